//! Heuristic rules for financial-statement sheets.

pub mod column;
pub mod numeric;
pub mod patterns;
pub mod scale;

pub use column::{clamp_column, find_value_column, ColumnHeuristics};
pub use numeric::{clean_numeric, clean_numeric_str};
pub use patterns::{
    classify_label, first_accepted, matching_rules, FieldRules, LabelRule, ScaleEntry,
    FIELD_RULES, OTHER_ITEM_KEYWORDS, SCALE_TABLE,
};
pub use scale::{detect_scale_and_currency, header_blob, SheetScale};
