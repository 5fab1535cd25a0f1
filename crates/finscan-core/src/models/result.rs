//! Scan result model shared by the scanner and its callers.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entity name used until a sheet provides one.
pub const DEFAULT_ENTITY_NAME: &str = "Unknown";

/// Reporting period used until a sheet provides one.
pub const DEFAULT_REPORTING_PERIOD: &str = "2024-12-31";

/// Currency used unless a sheet header mentions dollars.
pub const DEFAULT_CURRENCY: &str = "IDR";

/// Scale label used when no sheet declares a magnitude.
pub const DEFAULT_SCALE_LABEL: &str = "Full Amount";

/// Headline figures extracted from a statement, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    TotalAssets,
    TotalLiabilities,
    TotalEquity,
    NetProfit,
}

impl FieldKey {
    /// All fields, in the order rows are tested against them.
    pub const ALL: [FieldKey; 4] = [
        FieldKey::TotalAssets,
        FieldKey::TotalLiabilities,
        FieldKey::TotalEquity,
        FieldKey::NetProfit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::TotalAssets => "total_assets",
            FieldKey::TotalLiabilities => "total_liabilities",
            FieldKey::TotalEquity => "total_equity",
            FieldKey::NetProfit => "net_profit",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secondary line item captured outside the four headline fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherItem {
    /// Whitespace-normalized, lower-cased row label.
    pub label: String,

    /// Row value with the sheet multiplier applied; never zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// Aggregated figures for one workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Reporting entity name.
    pub entity_name: String,

    /// Reporting period end, as written in the statement.
    pub reporting_period: String,

    /// ISO currency code.
    pub currency: String,

    /// Magnitude descriptor of the figures ("Jutaan", "Thousands", ...).
    pub scale_label: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_assets: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_liabilities: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_equity: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,

    /// Other line items of interest, in discovery order.
    pub other_items: Vec<OtherItem>,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::with_period(DEFAULT_REPORTING_PERIOD)
    }
}

impl ScanResult {
    /// Fresh result with every field at its default and a custom period.
    pub fn with_period(reporting_period: impl Into<String>) -> Self {
        Self {
            entity_name: DEFAULT_ENTITY_NAME.to_string(),
            reporting_period: reporting_period.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            scale_label: DEFAULT_SCALE_LABEL.to_string(),
            total_assets: Decimal::ZERO,
            total_liabilities: Decimal::ZERO,
            total_equity: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            other_items: Vec::new(),
        }
    }

    /// Current value of a headline field.
    pub fn field(&self, key: FieldKey) -> Decimal {
        match key {
            FieldKey::TotalAssets => self.total_assets,
            FieldKey::TotalLiabilities => self.total_liabilities,
            FieldKey::TotalEquity => self.total_equity,
            FieldKey::NetProfit => self.net_profit,
        }
    }

    pub fn field_mut(&mut self, key: FieldKey) -> &mut Decimal {
        match key {
            FieldKey::TotalAssets => &mut self.total_assets,
            FieldKey::TotalLiabilities => &mut self.total_liabilities,
            FieldKey::TotalEquity => &mut self.total_equity,
            FieldKey::NetProfit => &mut self.net_profit,
        }
    }

    /// Whether no sheet has supplied an entity name yet.
    pub fn has_default_entity_name(&self) -> bool {
        self.entity_name == DEFAULT_ENTITY_NAME
    }

    /// Whether an other item with this exact label was already captured.
    pub fn has_other_item(&self, label: &str) -> bool {
        self.other_items.iter().any(|item| item.label == label)
    }
}
