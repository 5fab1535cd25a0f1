//! Per-row label classification and the reducers folding rows into a
//! [`ScanResult`].

use std::cell::OnceCell;

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::result::{FieldKey, OtherItem, ScanResult, DEFAULT_ENTITY_NAME};
use crate::models::workbook::{Cell, Sheet};

use super::rules::numeric::clean_numeric;
use super::rules::patterns::{
    first_accepted, ENTITY_NAME_MARKER, FIELD_RULES, OTHER_ITEM_KEYWORDS, PERIOD_END_MARKER,
};

/// Per-sheet inputs shared by every row of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetContext {
    /// Multiplier declared in the sheet header.
    pub multiplier: Decimal,
    /// Column holding the figures; must be within the sheet.
    pub value_column: usize,
}

/// Keywords identifying secondary line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherKeywords {
    keywords: Vec<String>,
}

impl Default for OtherKeywords {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl OtherKeywords {
    /// Built-in keywords followed by `extra` (lower-cased).
    pub fn new(extra: &[String]) -> Self {
        let keywords = OTHER_ITEM_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .chain(extra.iter().map(|k| k.trim().to_lowercase()))
            .collect();
        Self { keywords }
    }

    pub fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|k| label.contains(k.as_str()))
    }
}

/// Row value, normalized at most once and only when a rule needs it.
struct LazyValue<'a> {
    cell: &'a Cell,
    value: OnceCell<Option<Decimal>>,
}

impl<'a> LazyValue<'a> {
    fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            value: OnceCell::new(),
        }
    }

    fn get(&self) -> Option<Decimal> {
        *self.value.get_or_init(|| clean_numeric(self.cell))
    }

    /// Value with the sheet multiplier applied; `None` when missing or not
    /// representable.
    fn scaled(&self, multiplier: Decimal) -> Option<Decimal> {
        self.get().and_then(|v| v.checked_mul(multiplier))
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-cased label of a row: column 0, or column 1 when column 0 is blank.
pub fn row_label(sheet: &Sheet, row: usize) -> Option<String> {
    let mut label = sheet.cell(row, 0).text().trim().to_lowercase();
    if (label.is_empty() || label == "nan") && sheet.column_count() > 1 {
        label = sheet.cell(row, 1).text().trim().to_lowercase();
    }

    let label = normalize_whitespace(&label);
    (!label.is_empty()).then_some(label)
}

/// Replace `current` when `candidate` has a strictly larger magnitude.
pub fn keep_largest_magnitude(current: &mut Decimal, candidate: Decimal) -> bool {
    if candidate.abs() > current.abs() {
        *current = candidate;
        true
    } else {
        false
    }
}

/// Set `slot` only while it still holds `default`.
pub fn keep_first(slot: &mut String, default: &str, candidate: &str) -> bool {
    if slot == default && !candidate.is_empty() {
        *slot = candidate.to_string();
        true
    } else {
        false
    }
}

/// Overwrite `slot` with every non-empty candidate.
pub fn keep_last(slot: &mut String, candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    *slot = candidate.to_string();
    true
}

/// Append an item unless its label is already present.
pub fn push_unique(result: &mut ScanResult, item: OtherItem) -> bool {
    if result.has_other_item(&item.label) {
        return false;
    }
    result.other_items.push(item);
    true
}

/// A net profit larger than the established total assets is an outlier.
fn exceeds_total_assets(total_assets: Decimal, candidate: Decimal) -> bool {
    !total_assets.is_zero() && candidate.abs() > total_assets.abs()
}

/// Classify one row and fold it into `result`.
///
/// Returns the headline field the row was accepted for, if any.
pub fn classify_row(
    sheet: &Sheet,
    row: usize,
    ctx: &SheetContext,
    keywords: &OtherKeywords,
    result: &mut ScanResult,
) -> Option<FieldKey> {
    let label = row_label(sheet, row)?;

    capture_metadata(sheet, row, &label, result);

    let value = LazyValue::new(sheet.cell(row, ctx.value_column));
    let accepted = classify_fields(&label, &value, ctx.multiplier, result);

    if keywords.matches(&label) {
        if let Some(scaled) = value.scaled(ctx.multiplier).filter(|v| !v.is_zero()) {
            let added = push_unique(
                result,
                OtherItem {
                    label: label.clone(),
                    value: scaled,
                },
            );
            if added {
                trace!("Other item {:?} = {}", label, scaled);
            }
        }
    }

    accepted
}

/// Blank column-1 cells are skipped so an empty cell never claims the
/// first-wins entity slot or erases an earlier period.
fn capture_metadata(sheet: &Sheet, row: usize, label: &str, result: &mut ScanResult) {
    if sheet.column_count() < 2 {
        return;
    }

    if label.contains(ENTITY_NAME_MARKER) && result.has_default_entity_name() {
        let name = sheet.cell(row, 1).text();
        keep_first(&mut result.entity_name, DEFAULT_ENTITY_NAME, name.trim());
    } else if label.contains(PERIOD_END_MARKER) {
        let period = sheet.cell(row, 1).text();
        keep_last(&mut result.reporting_period, period.trim());
    }
}

/// Test fields in table order; the first field with an acceptable rule
/// takes the row.
fn classify_fields(
    label: &str,
    value: &LazyValue<'_>,
    multiplier: Decimal,
    result: &mut ScanResult,
) -> Option<FieldKey> {
    for field in FIELD_RULES.iter() {
        let accepted = first_accepted(&field.rules, label, |_rule| {
            let scaled = value.scaled(multiplier)?;
            if field.key == FieldKey::NetProfit && exceeds_total_assets(result.total_assets, scaled)
            {
                trace!(
                    "Rejected net profit {} above total assets {} for {:?}",
                    scaled, result.total_assets, label
                );
                return None;
            }
            Some(scaled)
        });

        if let Some(scaled) = accepted {
            if keep_largest_magnitude(result.field_mut(field.key), scaled) {
                trace!("{} = {} from {:?}", field.key, scaled, label);
            }
            return Some(field.key);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(value_column: usize) -> SheetContext {
        SheetContext {
            multiplier: Decimal::ONE,
            value_column,
        }
    }

    fn run(sheet: &Sheet, ctx: &SheetContext, result: &mut ScanResult) -> Vec<Option<FieldKey>> {
        let keywords = OtherKeywords::default();
        (0..sheet.row_count())
            .map(|row| classify_row(sheet, row, ctx, &keywords, result))
            .collect()
    }

    #[test]
    fn test_row_label_falls_back_to_second_column() {
        let sheet = Sheet::from_rows(vec![
            vec!["  Jumlah   ASET ".into(), 1.0.into()],
            vec!["nan".into(), "Total  Equity".into()],
            vec![Cell::Empty, Cell::Empty],
        ]);

        assert_eq!(row_label(&sheet, 0).as_deref(), Some("jumlah aset"));
        assert_eq!(row_label(&sheet, 1).as_deref(), Some("total equity"));
        assert_eq!(row_label(&sheet, 2), None);
    }

    #[test]
    fn test_largest_magnitude_wins_with_sign() {
        let sheet = Sheet::from_rows(vec![
            vec!["Jumlah Aset".into(), 500.0.into()],
            vec!["Total Assets".into(), (-700.0).into()],
            vec!["Jumlah Aset".into(), 600.0.into()],
        ]);
        let mut result = ScanResult::default();

        run(&sheet, &ctx(1), &mut result);
        assert_eq!(result.total_assets, Decimal::from(-700));
    }

    #[test]
    fn test_multiplier_applied() {
        let sheet = Sheet::from_rows(vec![vec!["Jumlah Liabilitas".into(), "(400)".into()]]);
        let mut result = ScanResult::default();
        let ctx = SheetContext {
            multiplier: Decimal::from(1_000),
            value_column: 1,
        };

        run(&sheet, &ctx, &mut result);
        assert_eq!(result.total_liabilities, Decimal::from(-400_000));
    }

    #[test]
    fn test_net_profit_outlier_rejected_per_rule() {
        let mut result = ScanResult::default();
        result.total_assets = Decimal::from(1000);

        let sheet = Sheet::from_rows(vec![
            vec!["Laba Tahun Berjalan".into(), 5000.0.into()],
            vec!["Laba Tahun Berjalan".into(), 50.0.into()],
        ]);
        let outcomes = run(&sheet, &ctx(1), &mut result);

        assert_eq!(outcomes, vec![None, Some(FieldKey::NetProfit)]);
        assert_eq!(result.net_profit, Decimal::from(50));
    }

    #[test]
    fn test_net_profit_accepted_without_total_assets() {
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![vec!["Profit for the year".into(), 5000.0.into()]]);

        run(&sheet, &ctx(1), &mut result);
        assert_eq!(result.net_profit, Decimal::from(5000));
    }

    #[test]
    fn test_row_without_value_contributes_nothing() {
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![vec!["Jumlah Ekuitas".into(), "-".into()]]);

        let outcomes = run(&sheet, &ctx(1), &mut result);
        assert_eq!(outcomes, vec![None]);
        assert_eq!(result.total_equity, Decimal::ZERO);
    }

    #[test]
    fn test_smaller_match_still_claims_row() {
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![
            vec!["Jumlah Aset".into(), 900.0.into()],
            vec!["Jumlah Aset".into(), 100.0.into()],
        ]);

        let outcomes = run(&sheet, &ctx(1), &mut result);
        assert_eq!(outcomes, vec![Some(FieldKey::TotalAssets); 2]);
        assert_eq!(result.total_assets, Decimal::from(900));
    }

    #[test]
    fn test_metadata_capture_policies() {
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![
            vec!["Nama entitas".into(), " PT Satu Tbk ".into()],
            vec!["Tanggal akhir periode".into(), "2023-12-31".into()],
            vec!["Nama entitas".into(), "PT Dua Tbk".into()],
            vec!["Tanggal akhir periode".into(), "2024-06-30".into()],
        ]);

        run(&sheet, &ctx(1), &mut result);
        assert_eq!(result.entity_name, "PT Satu Tbk");
        assert_eq!(result.reporting_period, "2024-06-30");
    }

    #[test]
    fn test_blank_entity_does_not_consume_first_capture() {
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![
            vec!["Nama entitas".into(), Cell::Empty],
            vec!["Nama entitas".into(), "PT Tiga".into()],
        ]);

        run(&sheet, &ctx(1), &mut result);
        assert_eq!(result.entity_name, "PT Tiga");
    }

    #[test]
    fn test_other_items_deduplicated_and_non_zero() {
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![
            vec!["Persediaan".into(), 10.0.into()],
            vec!["persediaan ".into(), 20.0.into()],
            vec!["Pendapatan usaha".into(), 0.0.into()],
            vec!["Kas dan setara kas".into(), "n/a".into()],
            vec!["Beban pokok  penjualan".into(), "(30)".into()],
        ]);

        run(&sheet, &ctx(1), &mut result);
        assert_eq!(
            result.other_items,
            vec![
                OtherItem {
                    label: "persediaan".to_string(),
                    value: Decimal::from(10),
                },
                OtherItem {
                    label: "beban pokok penjualan".to_string(),
                    value: Decimal::from(-30),
                },
            ]
        );
    }

    #[test]
    fn test_other_keyword_row_can_also_be_headline() {
        let keywords = OtherKeywords::new(&["Jumlah Aset".to_string()]);
        let mut result = ScanResult::default();
        let sheet = Sheet::from_rows(vec![vec!["Jumlah Aset".into(), 10.0.into()]]);

        let outcome = classify_row(&sheet, 0, &ctx(1), &keywords, &mut result);
        assert_eq!(outcome, Some(FieldKey::TotalAssets));
        assert_eq!(result.total_assets, Decimal::from(10));
        assert_eq!(result.other_items.len(), 1);
    }

    #[test]
    fn test_reducers() {
        let mut value = Decimal::from(5);
        assert!(!keep_largest_magnitude(&mut value, Decimal::from(-5)));
        assert!(keep_largest_magnitude(&mut value, Decimal::from(-6)));
        assert_eq!(value, Decimal::from(-6));

        let mut name = "Unknown".to_string();
        assert!(keep_first(&mut name, "Unknown", "A"));
        assert!(!keep_first(&mut name, "Unknown", "B"));
        assert_eq!(name, "A");

        let mut period = "2024-12-31".to_string();
        assert!(keep_last(&mut period, "x"));
        assert!(!keep_last(&mut period, ""));
        assert_eq!(period, "x");

        let mut result = ScanResult::default();
        let item = |value: i64| OtherItem {
            label: "persediaan".to_string(),
            value: Decimal::from(value),
        };
        assert!(push_unique(&mut result, item(10)));
        assert!(!push_unique(&mut result, item(20)));
        assert!(result.has_other_item("persediaan"));
        assert_eq!(result.other_items, vec![item(10)]);
    }
}
