//! Price chip layout.
//!
//! Turns a [`PriceDescriptor`] into rows of "chips" the display shows
//! under each menu item. This is the only place synthetic group labels
//! get a human-facing name.

use serde::Serialize;

use crate::price::PriceDescriptor;
use crate::types::Menu;

/// Synthetic label of the first positional group.
const FIRST_GROUP: &str = "Group 1";

/// One row of chips, optionally labeled ("Half:", "Oil:", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub label: Option<String>,
    pub chips: Vec<String>,
}

impl PriceRow {
    fn labeled(label: &str, chips: &[String]) -> Self {
        PriceRow {
            label: Some(format!("{label}:")),
            chips: chips.to_vec(),
        }
    }

    fn unlabeled(chips: Vec<String>) -> Self {
        PriceRow { label: None, chips }
    }
}

/// Display name for a synthetic group label.
///
/// Only the exact label `"Group 1"` is the oil variant; every other
/// group (including `"Group 11"`) is butter.
pub fn group_display_label(label: &str) -> &'static str {
    if label == FIRST_GROUP {
        "Oil"
    } else {
        "Butter"
    }
}

/// Lay out a descriptor as chip rows. Rows without chips are omitted.
pub fn render(descriptor: &PriceDescriptor) -> Vec<PriceRow> {
    let rows: Vec<PriceRow> = match descriptor {
        PriceDescriptor::Complex { sections } => sections
            .iter()
            .map(|(label, options)| PriceRow::labeled(label, options))
            .collect(),
        PriceDescriptor::Grouped { sections } => sections
            .iter()
            .map(|(label, options)| PriceRow::labeled(group_display_label(label), options))
            .collect(),
        PriceDescriptor::HalfFull { half, full } => vec![
            PriceRow::labeled("Half", std::slice::from_ref(half)),
            PriceRow::labeled("Full", std::slice::from_ref(full)),
        ],
        PriceDescriptor::Simple { options } => vec![PriceRow::unlabeled(options.clone())],
        PriceDescriptor::Single { option } => vec![PriceRow::unlabeled(vec![option.clone()])],
    };
    rows.into_iter()
        .filter(|row| row.chips.iter().any(|chip| !chip.is_empty()))
        .collect()
}

/// One line of chips, indented and padded so labels line up.
fn row_line(row: &PriceRow) -> String {
    let chips = row
        .chips
        .iter()
        .map(|chip| format!("[{chip}]"))
        .collect::<Vec<_>>()
        .join(" ");
    match &row.label {
        Some(label) => format!("    {label:<8}{chips}"),
        None => format!("    {chips}"),
    }
}

/// Plain-text rendering of the whole menu. Each category block ends
/// with a blank line.
pub fn render_text(menu: &Menu) -> String {
    let mut lines = Vec::new();
    for category in &menu.categories {
        lines.push(format!("== {} ==", category.name));
        for item in &category.items {
            let marker = if item.veg { "(V)" } else { "(N)" };
            lines.push(format!("{marker} {}", item.name));
            lines.extend(render(&item.descriptor()).iter().map(row_line));
        }
        lines.push(String::new());
    }
    lines.into_iter().map(|line| line + "\n").collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
