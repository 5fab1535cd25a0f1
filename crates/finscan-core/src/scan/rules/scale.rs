//! Scale and currency detection from a sheet's header region.

use rust_decimal::Decimal;

use crate::models::result::{DEFAULT_CURRENCY, DEFAULT_SCALE_LABEL};
use crate::models::workbook::Sheet;

use super::patterns::{title_case, SCALE_TABLE, USD_MARKERS};

/// Currency code reported for dollar-denominated sheets.
pub const USD: &str = "USD";

/// Magnitude and currency declared by one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetScale {
    /// Factor applied to every figure read from the sheet.
    pub multiplier: Decimal,
    /// Currency code (`IDR` or `USD`).
    pub currency: &'static str,
    /// Display label of the scale (`Full Amount` when none was found).
    pub label: String,
}

impl Default for SheetScale {
    fn default() -> Self {
        Self {
            multiplier: Decimal::ONE,
            currency: DEFAULT_CURRENCY,
            label: DEFAULT_SCALE_LABEL.to_string(),
        }
    }
}

impl SheetScale {
    /// Whether the sheet declared a magnitude other than full amounts.
    pub fn is_scaled(&self) -> bool {
        self.multiplier != Decimal::ONE
    }
}

/// Lower-cased text of the first `header_rows` cells of columns 0 and 1.
pub fn header_blob(sheet: &Sheet, header_rows: usize) -> String {
    let columns = sheet.column_count().min(2);
    (0..columns)
        .flat_map(|col| sheet.column_head(col, header_rows))
        .map(|cell| cell.text().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inspect the header region for currency and magnitude hints.
///
/// Scale keywords are tried in table order and the first one present wins,
/// even if a later keyword also appears.
pub fn detect_scale_and_currency(sheet: &Sheet, header_rows: usize) -> SheetScale {
    let mut scale = SheetScale::default();
    if sheet.column_count() == 0 {
        return scale;
    }

    let blob = header_blob(sheet, header_rows);

    if USD_MARKERS.iter().any(|marker| blob.contains(marker)) {
        scale.currency = USD;
    }

    if let Some(entry) = SCALE_TABLE.iter().find(|entry| blob.contains(entry.keyword)) {
        scale.multiplier = Decimal::from(entry.multiplier);
        scale.label = title_case(entry.keyword);
    }

    scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workbook::Cell;
    use pretty_assertions::assert_eq;

    fn sheet(rows: Vec<Vec<&str>>) -> Sheet {
        Sheet::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_jutaan_rupiah() {
        let sheet = sheet(vec![
            vec!["Laporan Posisi Keuangan", ""],
            vec!["(Dalam Jutaan Rupiah)", ""],
            vec!["Jumlah Aset", "1000"],
        ]);

        let scale = detect_scale_and_currency(&sheet, 20);
        assert_eq!(
            scale,
            SheetScale {
                multiplier: Decimal::from(1_000_000),
                currency: "IDR",
                label: "Jutaan".to_string(),
            }
        );
        assert!(scale.is_scaled());
    }

    #[test]
    fn test_usd_hint_in_second_column() {
        let sheet = sheet(vec![vec!["Statement", "Expressed in thousands of US Dollars"]]);

        let scale = detect_scale_and_currency(&sheet, 20);
        assert_eq!(scale.currency, USD);
        assert_eq!(scale.multiplier, Decimal::from(1_000));
        assert_eq!(scale.label, "Thousands");
    }

    #[test]
    fn test_every_scale_keyword() {
        let expected = [
            ("jutaan", 1_000_000, "Jutaan"),
            ("millions", 1_000_000, "Millions"),
            ("ribuan", 1_000, "Ribuan"),
            ("thousands", 1_000, "Thousands"),
            ("miliar", 1_000_000_000, "Miliar"),
            ("billions", 1_000_000_000, "Billions"),
        ];
        assert_eq!(SCALE_TABLE.len(), expected.len());

        for (entry, (keyword, multiplier, label)) in SCALE_TABLE.iter().zip(expected) {
            assert_eq!(entry.keyword, keyword);

            let header = format!("(Dalam {})", keyword.to_uppercase());
            let scale = detect_scale_and_currency(&sheet(vec![vec![header.as_str()]]), 20);
            assert_eq!(scale.multiplier, Decimal::from(multiplier), "{keyword}");
            assert_eq!(scale.label, label);
            assert_eq!(scale.currency, "IDR");
        }
    }

    #[test]
    fn test_every_usd_marker() {
        let headers = [
            "Dalam ribuan USD",
            "In thousands of US Dollars",
            "Dalam ribuan Dolar Amerika Serikat",
            "dalam ribuan AS$",
        ];
        assert_eq!(USD_MARKERS.len(), headers.len());

        for header in headers {
            let scale = detect_scale_and_currency(&sheet(vec![vec![header]]), 20);
            assert_eq!(scale.currency, USD, "{header}");
            assert_eq!(scale.multiplier, Decimal::from(1_000));
        }
    }

    #[test]
    fn test_first_keyword_in_table_order_wins() {
        // "miliar" appears first in the text but "ribuan" comes first in the table.
        let sheet = sheet(vec![vec!["dalam miliar"], vec!["atau ribuan"]]);

        let scale = detect_scale_and_currency(&sheet, 20);
        assert_eq!(scale.multiplier, Decimal::from(1_000));
        assert_eq!(scale.label, "Ribuan");
    }

    #[test]
    fn test_hints_outside_header_rows_are_ignored() {
        let mut rows = vec![vec!["x"]; 20];
        rows.push(vec!["dalam jutaan usd"]);
        let sheet = sheet(rows);

        assert_eq!(detect_scale_and_currency(&sheet, 20), SheetScale::default());
    }

    #[test]
    fn test_zero_columns() {
        let scale = detect_scale_and_currency(&Sheet::new(), 20);
        assert_eq!(scale, SheetScale::default());
        assert!(!scale.is_scaled());
        assert_eq!(scale.label, "Full Amount");
    }
}
