//! Legal filter values formatter

use console::style;
use serde::Serialize;

use crate::catalog::{OptionCatalog, OptionField};
use crate::cli::output::{Formattable, HumanLayout, OutputFormat};

/// The option catalog prepared for listing.
#[derive(Debug, Clone)]
pub struct OptionsListing<'a> {
    pub options: &'a OptionCatalog,
    /// Values shown per field; `None` lists everything.
    pub preview: Option<usize>,
}

#[derive(Serialize)]
struct FieldJson<'a> {
    field: &'static str,
    available: bool,
    count: usize,
    values: Vec<&'a str>,
}

impl<'a> OptionsListing<'a> {
    pub const fn new(options: &'a OptionCatalog, preview: Option<usize>) -> Self {
        Self { options, preview }
    }

    /// Values of `field` in catalog order; `None` when unavailable.
    fn values(&self, field: OptionField) -> Option<Vec<&'a str>> {
        let set = self.options.get(field)?;
        Some(set.as_slice().iter().map(String::as_str).collect())
    }

    fn fields(&self) -> Vec<FieldJson<'a>> {
        OptionField::ALL
            .into_iter()
            .map(|field| {
                let values = self.values(field);
                FieldJson {
                    field: field.key(),
                    available: values.is_some(),
                    count: values.as_ref().map_or(0, Vec::len),
                    values: values.unwrap_or_default(),
                }
            })
            .collect()
    }

    fn shown<'v>(&self, values: &'v [&'a str]) -> (&'v [&'a str], usize) {
        match self.preview {
            Some(limit) if values.len() > limit => (&values[..limit], values.len() - limit),
            _ => (values, 0),
        }
    }

    fn format_human(&self) -> String {
        let mut layout = HumanLayout::new();
        layout.title("===== AVAILABLE OPTIONS =====");

        for field in OptionField::ALL {
            let Some(values) = self.values(field) else {
                layout.push_line(format!(
                    "{} {}",
                    style(format!("{}:", field.heading())).bold(),
                    style("not available").dim()
                ));
                layout.blank();
                continue;
            };

            layout.push_line(
                style(format!("{} ({} total):", field.heading(), values.len()))
                    .bold()
                    .to_string(),
            );
            let (shown, hidden) = self.shown(&values);
            for value in shown {
                layout.bullet(value);
            }
            if hidden > 0 {
                layout.push_line(style(format!("... and {hidden} more")).dim().to_string());
            }
            layout.blank();
        }

        layout.build()
    }

    fn format_plain(&self) -> String {
        let mut lines = Vec::new();
        for field in OptionField::ALL {
            if let Some(values) = self.values(field) {
                let (shown, _) = self.shown(&values);
                lines.extend(shown.iter().map(|value| format!("{}: {value}", field.key())));
            }
        }
        lines.join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("field\tvalue\n");
        for field in OptionField::ALL {
            if let Some(values) = self.values(field) {
                for value in values {
                    out.push_str(&format!("{}\t{}\n", field.key(), value.replace('\t', " ")));
                }
            }
        }
        out
    }
}

impl Formattable for OptionsListing<'_> {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "fields": self.fields(),
            }))
            .unwrap_or_default(),
            OutputFormat::Jsonl => self
                .fields()
                .iter()
                .filter_map(|f| serde_json::to_string(f).ok())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}
