use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::decode::RawTable;
use crate::catalog::error::CatalogError;
use crate::catalog::mapping::ColumnMapping;

/// One validated catalog row. Price is in minor currency units (won).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: u64,
    pub image_ref: String,
}

impl ProductRecord {
    /// Price formatted for display, e.g. `1,500원`.
    pub fn display_price(&self) -> String {
        let digits = self.price.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped.push('원');
        grouped
    }
}

/// What to do with a row that fails validation.
///
/// The observed catalogs are hand-edited by teachers, so the default is
/// `Lenient`: bad rows are logged and skipped, good rows still render.
/// `Strict` aborts the whole load on the first bad row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    #[default]
    Lenient,
    Strict,
}

/// Output of normalization: the surviving records in input order, plus how
/// many rows were skipped (always zero under `Strict`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub records: Vec<ProductRecord>,
    pub skipped: usize,
}

/// Validate every row of `table` through `mapping` into `ProductRecord`s,
/// preserving input order. Row numbers in errors are 1-based data rows
/// (the header row is not counted).
pub fn normalize(
    table: &RawTable,
    mapping: &ColumnMapping,
    policy: RowPolicy,
) -> Result<Normalized, CatalogError> {
    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;

    for (i, cells) in table.rows.iter().enumerate() {
        let row = i + 1;
        match normalize_row(cells, mapping, row) {
            Ok(record) => records.push(record),
            Err(err) => match policy {
                RowPolicy::Strict => return Err(err),
                RowPolicy::Lenient => {
                    warn!(row, %err, "skipping invalid catalog row");
                    skipped += 1;
                }
            },
        }
    }

    Ok(Normalized { records, skipped })
}

fn normalize_row(
    cells: &[String],
    mapping: &ColumnMapping,
    row: usize,
) -> Result<ProductRecord, CatalogError> {
    let cell = |index: usize| cells.get(index).map(String::as_str).unwrap_or("");

    let name = cell(mapping.name.index).trim();
    if name.is_empty() {
        return Err(CatalogError::InvalidName { row });
    }

    let raw_price = cell(mapping.price.index);
    let price = parse_price(raw_price).ok_or_else(|| CatalogError::InvalidPrice {
        row,
        value: raw_price.to_string(),
    })?;

    Ok(ProductRecord {
        name: name.to_string(),
        price,
        image_ref: cell(mapping.image.index).trim().to_string(),
    })
}

/// Coerce a price cell to a non-negative integer. Thousands separators and
/// a trailing currency marker are tolerated ("1,500", "500원"); anything
/// else non-numeric, or a negative value, is invalid.
fn parse_price(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value: i64 = cleaned.parse().ok()?;
    u64::try_from(value).ok()
}
