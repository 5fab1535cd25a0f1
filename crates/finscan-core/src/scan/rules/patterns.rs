//! Label, scale and currency tables for Indonesian/English statements.
//!
//! Labels reaching these rules are lower-cased and whitespace-normalized.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::result::FieldKey;

/// One label-matching rule: an inclusion pattern plus words that must not
/// follow the matched prefix (`total assets` must not match
/// `total current assets`).
#[derive(Debug)]
pub struct LabelRule {
    pattern: Regex,
    exclusions: &'static [&'static str],
}

impl LabelRule {
    fn new(pattern: &str, exclusions: &'static [&'static str]) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){pattern}")).unwrap(),
            exclusions,
        }
    }

    /// Whether the label satisfies the pattern and none of the exclusions.
    pub fn matches(&self, label: &str) -> bool {
        match self.pattern.find(label) {
            Some(m) => {
                let tail = label[m.end()..].to_lowercase();
                !self.exclusions.iter().any(|word| tail.contains(word))
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Ordered rules for one headline field.
#[derive(Debug)]
pub struct FieldRules {
    pub key: FieldKey,
    pub rules: Vec<LabelRule>,
}

/// Magnitude keyword found in sheet headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleEntry {
    pub keyword: &'static str,
    pub multiplier: i64,
}

/// Scale keywords in evaluation order; the first one present wins.
pub const SCALE_TABLE: [ScaleEntry; 6] = [
    ScaleEntry { keyword: "jutaan", multiplier: 1_000_000 },
    ScaleEntry { keyword: "millions", multiplier: 1_000_000 },
    ScaleEntry { keyword: "ribuan", multiplier: 1_000 },
    ScaleEntry { keyword: "thousands", multiplier: 1_000 },
    ScaleEntry { keyword: "miliar", multiplier: 1_000_000_000 },
    ScaleEntry { keyword: "billions", multiplier: 1_000_000_000 },
];

/// Header substrings that mark a US-dollar statement.
pub const USD_MARKERS: [&str; 4] = ["usd", "dollar", "dolar", "as$"];

/// Label substring carrying the reporting entity name in column 1.
pub const ENTITY_NAME_MARKER: &str = "nama entitas";

/// Label substring carrying the reporting period end in column 1.
pub const PERIOD_END_MARKER: &str = "tanggal akhir";

/// Built-in keywords for secondary line items.
pub const OTHER_ITEM_KEYWORDS: [&str; 16] = [
    "kas dan setara kas",
    "persediaan",
    "pendapatan",
    "beban pokok",
    "laba bruto",
    "penjualan",
    "laba usaha",
    "laba sebelum pajak",
    "cash and cash equivalents",
    "inventories",
    "revenue",
    "cost of revenue",
    "gross profit",
    "sales",
    "operating profit",
    "profit before tax",
];

lazy_static! {
    /// Headline field rules in evaluation order.
    pub static ref FIELD_RULES: Vec<FieldRules> = vec![
        FieldRules {
            key: FieldKey::TotalAssets,
            rules: vec![
                LabelRule::new(r"^jumlah\s*aset", &["lancar", "tidak lancar", "pajak", "tetap"]),
                LabelRule::new(r"^total\s*assets", &["current", "non-current", "tax", "fixed"]),
                LabelRule::new(r"^jumlah\s*aktiva", &["lancar"]),
            ],
        },
        FieldRules {
            key: FieldKey::TotalLiabilities,
            rules: vec![
                LabelRule::new(
                    r"^jumlah\s*liabilitas",
                    &["lancar", "jangka", "ekuitas", "equity", "neto"],
                ),
                LabelRule::new(r"^total\s*liabilities", &["current", "term", "equity", "net"]),
                LabelRule::new(r"^jumlah\s*kewajiban", &["lancar", "jangka", "ekuitas"]),
            ],
        },
        FieldRules {
            key: FieldKey::TotalEquity,
            rules: vec![
                LabelRule::new(r"^jumlah\s*ekuitas", &["liabilitas", "kewajiban"]),
                LabelRule::new(r"^total\s*equity", &["liabilities"]),
                LabelRule::new(
                    r"^jumlah\s*ekuitas\s*yang\s*diatribusikan.*pemilik.*entitas.*induk",
                    &[],
                ),
                LabelRule::new(
                    r"^equity\s*attributable\s*to\s*owners\s*of\s*the\s*parent",
                    &["liabilities"],
                ),
            ],
        },
        FieldRules {
            key: FieldKey::NetProfit,
            // Parent-attributable profit outranks profit for the year.
            rules: vec![
                LabelRule::new(r"laba.*(rugi)?.*yang.*dapat.*diatribusikan.*ke.*entitas.*induk", &[]),
                LabelRule::new(r"profit.*(loss)?.*attributable.*to.*parent.*entity", &[]),
                LabelRule::new(
                    r"^laba.*(rugi)?.*tahun.*berjalan.*atribusikan.*kepada.*entitas.*induk",
                    &[],
                ),
                LabelRule::new(r"^laba.*(rugi)?.*tahun.*berjalan$", &[]),
                LabelRule::new(r"^profit.*(loss)?.*for.*the.*year$", &[]),
            ],
        },
    ];
}

/// Rules satisfied by `label`, in priority order.
pub fn matching_rules<'r>(
    rules: &'r [LabelRule],
    label: &'r str,
) -> impl Iterator<Item = &'r LabelRule> + 'r {
    rules.iter().filter(move |rule| rule.matches(label))
}

/// Ordered-rule evaluator: walk the rules satisfied by `label` in priority
/// order and return the first outcome `accept` agrees to.
pub fn first_accepted<T>(
    rules: &[LabelRule],
    label: &str,
    accept: impl FnMut(&LabelRule) -> Option<T>,
) -> Option<T> {
    matching_rules(rules, label).find_map(accept)
}

/// Field whose rules first match `label`, ignoring row values.
pub fn classify_label(label: &str) -> Option<FieldKey> {
    FIELD_RULES
        .iter()
        .find(|field| matching_rules(&field.rules, label).next().is_some())
        .map(|field| field.key)
}

/// Title-case a keyword for display (`jutaan` -> `Jutaan`).
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_assets_excludes_sub_items() {
        assert_eq!(classify_label("jumlah aset"), Some(FieldKey::TotalAssets));
        assert_eq!(classify_label("total assets"), Some(FieldKey::TotalAssets));
        assert_eq!(classify_label("jumlah aktiva"), Some(FieldKey::TotalAssets));
        assert_eq!(classify_label("jumlah aset lancar"), None);
        assert_eq!(classify_label("jumlah aset tidak lancar"), None);
        assert_eq!(classify_label("total assets current"), None);
        assert_eq!(classify_label("total current assets"), None);
        assert_eq!(classify_label("jumlah aset pajak tangguhan"), None);
    }

    #[test]
    fn test_liabilities_and_equity() {
        assert_eq!(classify_label("jumlah liabilitas"), Some(FieldKey::TotalLiabilities));
        assert_eq!(classify_label("total liabilities"), Some(FieldKey::TotalLiabilities));
        assert_eq!(classify_label("jumlah kewajiban"), Some(FieldKey::TotalLiabilities));
        assert_eq!(classify_label("jumlah liabilitas jangka pendek"), None);
        assert_eq!(classify_label("jumlah liabilitas dan ekuitas"), None);
        assert_eq!(classify_label("total liabilities and equity"), None);

        assert_eq!(classify_label("jumlah ekuitas"), Some(FieldKey::TotalEquity));
        assert_eq!(classify_label("total equity"), Some(FieldKey::TotalEquity));
        assert_eq!(
            classify_label("equity attributable to owners of the parent"),
            Some(FieldKey::TotalEquity)
        );
        assert_eq!(classify_label("jumlah ekuitas dan liabilitas"), None);
    }

    #[test]
    fn test_net_profit_priority() {
        let rules = &FIELD_RULES[3].rules;
        assert_eq!(FIELD_RULES[3].key, FieldKey::NetProfit);

        let attributable = "laba tahun berjalan yang dapat diatribusikan kepada entitas induk";
        let first = matching_rules(rules, attributable).next().unwrap();
        assert_eq!(first.as_str(), rules[0].as_str());

        let for_year: Vec<_> = matching_rules(rules, "laba (rugi) tahun berjalan")
            .map(LabelRule::as_str)
            .collect();
        assert_eq!(for_year, vec![rules[3].as_str()]);

        assert_eq!(
            classify_label("profit for the year"),
            Some(FieldKey::NetProfit)
        );
        assert_eq!(
            classify_label("profit (loss) attributable to parent entity"),
            Some(FieldKey::NetProfit)
        );
        assert_eq!(classify_label("profit for the year attributable to"), None);
    }

    #[test]
    fn test_first_accepted_skips_rejected_rules() {
        let rules = &FIELD_RULES[3].rules;
        let label = "laba tahun berjalan yang dapat diatribusikan kepada entitas induk";

        let mut seen = 0;
        let accepted = first_accepted(rules, label, |rule| {
            seen += 1;
            (seen == 2).then(|| rule.as_str().to_string())
        });

        assert_eq!(seen, 2);
        assert_eq!(accepted.as_deref(), Some(rules[2].as_str()));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jutaan"), "Jutaan");
        assert_eq!(title_case("millions"), "Millions");
        assert_eq!(title_case(""), "");
    }
}
