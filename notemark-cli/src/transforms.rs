//! Views available to `notemark inspect`
//!
//! Each view parses a note and renders the resulting styled document, so what is shown is exactly
//! what an editor would load.
//!
//! - `treeviz`: one line per block, one nested line per run (default)
//! - `json`: the full document model, attachment previews included
//! - `markdown`: the canonical Markdown the document serializes back to
//!
//! ## Extra Parameters
//!
//! Views accept extra parameters via `--extra-<name> [value]`:
//!
//! - `show-linum`: prefix treeviz blocks with their source line (on unless set to "false")
//! - `show-previews`: append preview sizes to treeviz attachment runs
//! - `compact`: single-line JSON
//!
//! Example: `notemark inspect note.md json --extra-compact`

use notemark::FormatRegistry;
use std::collections::HashMap;

/// All views `inspect` can render
pub const AVAILABLE_TRANSFORMS: &[&str] = &["treeviz", "json", "markdown"];

/// Parse `source` as Markdown and render it with the named view.
pub fn execute_transform(
    registry: &FormatRegistry,
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    if !AVAILABLE_TRANSFORMS.contains(&transform_name) {
        return Err(format!("Unknown transform: {transform_name}"));
    }

    let mut params = extra_params.clone();
    if transform_name == "treeviz" && !params.contains_key("show-linum") {
        params.insert("show-linum".to_string(), "true".to_string());
    }

    let doc = registry
        .parse(source, "markdown")
        .map_err(|e| format!("Parse failed: {e}"))?;
    let mut output = registry
        .serialize_with_options(&doc, transform_name, &params)
        .map_err(|e| format!("Transform failed: {e}"))?;
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}
