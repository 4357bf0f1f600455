//! # Tables
//!
//! File: cli/src/common/ui/tables.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Renders the `list` and `status` tables with `comfy-table`. Tables are
//! returned as strings so callers decide where they go.
//!
use crate::common::docker::state::ServerStatus;
use crate::core::registry::GameDefinition;
use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

/// GAME / DESCRIPTION rows for `list`.
pub fn games_table<'a>(games: impl IntoIterator<Item = &'a GameDefinition>) -> String {
    let mut t = table(&["GAME", "DESCRIPTION"]);
    for game in games {
        t.add_row(vec![game.name.as_str(), game.description.as_str()]);
    }
    t.to_string()
}

/// GAME / STATUS / PORTS / CONTAINER rows for `status`.
pub fn status_table(rows: &[ServerStatus]) -> String {
    let mut t = table(&["GAME", "STATUS", "PORTS", "CONTAINER"]);
    for row in rows {
        t.add_row(vec![
            row.game.as_str(),
            row.state.as_str(),
            row.ports.as_str(),
            row.short_id(),
        ]);
    }
    t.to_string()
}
