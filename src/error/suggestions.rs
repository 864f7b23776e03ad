//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints that
//! name the offending path or key.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
///
/// Falls back to the static suggestion of `code` when the context does not
/// carry anything more specific.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::CatalogNotFound => suggest_catalog_not_found(context),
        ErrorCode::CatalogSchemaInvalid => suggest_catalog_schema(context),
        ErrorCode::ConfigMissingRequired => suggest_config_missing_required(context),
        ErrorCode::OutputWriteError => suggest_output_write(context),
        _ => code.suggestion().to_string(),
    }
}

fn context_str<'a>(context: Option<&'a Value>, key: &str) -> Option<&'a str> {
    context.and_then(|c| c.get(key)).and_then(Value::as_str)
}

fn suggest_catalog_not_found(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "No product table at {path}. Try:\n  - `cosmorec --data <dir>` with the directory holding products_main.csv\n  - setting data_dir under [paths] in cosmorec.toml"
        ),
        None => ErrorCode::CatalogNotFound.suggestion().to_string(),
    }
}

fn suggest_catalog_schema(context: Option<&Value>) -> String {
    match (context_str(context, "path"), context_str(context, "reason")) {
        (Some(path), Some(reason)) => {
            format!("{path}: {reason}\nRegenerate the table so its header row includes an `id` column")
        }
        _ => ErrorCode::CatalogSchemaInvalid.suggestion().to_string(),
    }
}

fn suggest_config_missing_required(context: Option<&Value>) -> String {
    match context_str(context, "config_key") {
        Some(key) => format!("Set `{key}` in cosmorec.toml or via the matching COSMOREC_* variable"),
        None => ErrorCode::ConfigMissingRequired.suggestion().to_string(),
    }
}

fn suggest_output_write(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "Could not write {path}. Check permissions, or pass `--output <dir>` to save elsewhere"
        ),
        None => ErrorCode::OutputWriteError.suggestion().to_string(),
    }
}
