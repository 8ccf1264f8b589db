//! Touchpoint catalog command.

use serde::Serialize;
use tabled::Tabled;

use copydeck_entity::touchpoint::catalog;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct CatalogRow {
    channel: &'static str,
    id: i64,
    touchpoint: &'static str,
    purpose: &'static str,
}

/// Print every predefined touchpoint
pub fn execute(format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(catalog());
        return;
    }
    let rows: Vec<CatalogRow> = catalog()
        .iter()
        .flat_map(|c| {
            c.options.iter().map(move |t| CatalogRow {
                channel: c.channel,
                id: t.id,
                touchpoint: t.name,
                purpose: t.purpose,
            })
        })
        .collect();
    output::print_list(&rows, format);
}
