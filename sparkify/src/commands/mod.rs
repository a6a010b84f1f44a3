// sparkify/src/commands/mod.rs

pub mod ddl;
pub mod inspect;
pub mod query;
pub mod run;

use comfy_table::{Table, presets::UTF8_FULL};
use sparkify_core::application::QueryPreview;

/// Renders a preview as a terminal table.
pub fn preview_table(preview: &QueryPreview) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(preview.columns.iter().map(|c| c.name.as_str()));
    for row in &preview.rows {
        table.add_row(row);
    }
    table
}
