use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use storage::models::NewCharacter;
use tracing::debug;

use crate::error::Result;

/// Labels that name a column rather than a character.
const HEADER_TOKENS: &[&str] = &["Name"];

/// Listing tables often repeat the name in later columns; only look this far.
const DEFAULT_MAX_CELLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    HeaderRow,
    NoLink,
    Duplicate,
    /// Label does not fit the name columns of the `characters` table.
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub name: String,
    pub image_path: Option<String>,
}

/// Tolerant parser for the character listing table.
pub struct RosterPageParser {
    max_cells: usize,
}

impl RosterPageParser {
    pub fn new() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn parse(&self, html: &str) -> Result<Vec<NewCharacter>> {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("tr")?;
        let link_selector = Selector::parse("a")?;
        let image_selector = Selector::parse("img")?;

        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (index, row) in document.select(&row_selector).enumerate() {
            let parsed = self
                .parse_row(row, &link_selector, &image_selector)
                .and_then(|parsed| {
                    if seen.insert(parsed.name.clone()) {
                        Ok(parsed)
                    } else {
                        Err(SkipReason::Duplicate)
                    }
                });

            match parsed {
                Ok(parsed) => entries.push(NewCharacter::from_name(&parsed.name, parsed.image_path)),
                Err(reason) => debug!(row = index, ?reason, "Skipping listing row"),
            }
        }

        debug!("Parsed {} characters from listing", entries.len());
        Ok(entries)
    }

    pub fn parse_row(
        &self,
        row: ElementRef<'_>,
        link_selector: &Selector,
        image_selector: &Selector,
    ) -> std::result::Result<RosterRow, SkipReason> {
        let cells: Vec<ElementRef<'_>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .collect();

        let mut saw_header = false;
        for cell in cells.iter().take(self.max_cells) {
            for link in cell.select(link_selector) {
                let label = normalize_whitespace(link.text());
                if is_header_token(&label) {
                    saw_header = true;
                    continue;
                }
                if label.chars().count() > 1 {
                    if !NewCharacter::from_name(&label, None).fits_columns() {
                        return Err(SkipReason::TooLong);
                    }
                    return Ok(RosterRow {
                        name: label,
                        image_path: row.select(image_selector).next().and_then(image_source),
                    });
                }
            }

            if is_header_token(&normalize_whitespace(cell.text())) {
                saw_header = true;
            }
        }

        if saw_header {
            Err(SkipReason::HeaderRow)
        } else {
            Err(SkipReason::NoLink)
        }
    }
}

impl Default for RosterPageParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_header_token(label: &str) -> bool {
    HEADER_TOKENS.contains(&label)
}

pub(crate) fn normalize_whitespace<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `src`, unless it is a lazy-load placeholder, then `data-src`.
pub(crate) fn image_source(image: ElementRef<'_>) -> Option<String> {
    let element = image.value();
    element
        .attr("src")
        .filter(|src| !src.trim().is_empty() && !src.starts_with("data:"))
        .or_else(|| element.attr("data-src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}
