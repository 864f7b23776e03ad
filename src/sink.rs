//! Persisting recommendations to CSV.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::catalog::{Catalog, Product, PRODUCT_COLUMNS};
use crate::error::{RecError, Result};
use crate::query::RecommendationSet;
use crate::utils::fs::ensure_dir;

/// Collision suffixes tried before giving up.
const MAX_SUFFIX: usize = 10_000;

/// `recommendations_<YYYYmmdd_HHMMSS>`, in local time.
pub fn default_file_stem() -> String {
    format!("recommendations_{}", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Columns written for `catalog`: the known product columns that were
/// present in the source header, in canonical order.
pub fn projected_columns(catalog: &Catalog) -> Vec<&'static str> {
    PRODUCT_COLUMNS
        .into_iter()
        .filter(|column| catalog.has_column(column))
        .collect()
}

/// Write `set` to `<output_dir>/<stem>.csv`.
///
/// Returns `None` without touching the filesystem when the set is empty.
/// An existing file is never overwritten; `_1`, `_2`, ... is appended to the
/// stem until a free name is found.
pub fn save_recommendations(
    set: &RecommendationSet<'_>,
    catalog: &Catalog,
    output_dir: &Path,
    stem: Option<&str>,
) -> Result<Option<PathBuf>> {
    if set.is_empty() {
        return Ok(None);
    }

    ensure_dir(output_dir)?;
    let stem = stem
        .map(|s| s.trim().trim_end_matches(".csv").to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_file_stem);

    let (path, file) = create_unique(output_dir, &stem)?;
    let columns = projected_columns(catalog);

    let write_err = |err: csv::Error| RecError::OutputWrite {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&columns).map_err(write_err)?;
    for product in set.products() {
        let record: Vec<String> = columns.iter().map(|column| cell(product, column)).collect();
        writer.write_record(&record).map_err(write_err)?;
    }
    writer.flush().map_err(|err| RecError::OutputWrite {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    info!(path = %path.display(), rows = set.len(), "saved recommendations");
    Ok(Some(path))
}

fn create_unique(dir: &Path, stem: &str) -> Result<(PathBuf, File)> {
    for suffix in 0..MAX_SUFFIX {
        let name = if suffix == 0 {
            format!("{stem}.csv")
        } else {
            format!("{stem}_{suffix}.csv")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => {
                return Err(RecError::OutputWrite {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }
    Err(RecError::OutputWrite {
        path: dir.join(format!("{stem}.csv")).display().to_string(),
        reason: "no free file name".to_string(),
    })
}

fn cell(product: &Product, column: &str) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    match column {
        "id" => product.id.clone(),
        "brand" => text(&product.brand),
        "name" => text(&product.name),
        "product_type" => text(&product.product_type),
        "category" => text(&product.category),
        "price" => number(product.price),
        "price_sign" => text(&product.price_sign),
        "currency" => text(&product.currency),
        "rating" => number(product.rating),
        _ => String::new(),
    }
}
