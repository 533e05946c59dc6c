use neo_catalog::utils;
use neo_catalog::{Catalog, CloseApproach, ModelError, NearEarthObject, RawFields};
use serde_json::Value;
use tracing::{info, warn};

const SAMPLE_ROWS: &str = include_str!("../demos/sample_rows.json");

/// Builds every row of `section`, logging and skipping the malformed ones.
fn build_rows<T>(doc: &Value, section: &str, build: fn(&RawFields) -> Result<T, ModelError>) -> Vec<T> {
    let rows = doc.get(section).and_then(Value::as_array).cloned().unwrap_or_default();
    let mut built = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        match RawFields::try_from(row).and_then(|fields| build(&fields)) {
            Ok(record) => built.push(record),
            Err(e) => warn!(error = %e, section, row = idx, "Skipping malformed row"),
        }
    }
    built
}

fn main() {
    utils::logging::init();
    info!("neo-catalog demo");

    let doc: Value = match serde_json::from_str(SAMPLE_ROWS) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse sample rows");
            return;
        }
    };

    let neos = build_rows(&doc, "neos", NearEarthObject::from_fields);
    let approaches = build_rows(&doc, "approaches", CloseApproach::from_fields);

    let catalog = match Catalog::link(neos, approaches) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "Failed to link catalog");
            return;
        }
    };

    for neo in catalog.neos() {
        info!("{}", neo);
        for approach in neo.approaches() {
            match catalog.describe(approach) {
                Ok(line) => info!("- {}", line),
                Err(e) => warn!(error = %e, "Cannot describe approach"),
            }
        }
        match serde_json::to_string(&neo.serialize()) {
            Ok(json) => info!(json = %json, "Serialized object"),
            Err(e) => warn!(error = %e, "Failed to serialize object"),
        }
    }

    for approach in catalog.unlinked() {
        info!(record = ?approach, "Unlinked approach");
    }
}
