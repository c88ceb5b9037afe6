//! Per-deployment dashboard settings.
//!
//! Everything the pipeline would otherwise hard-code (currency, spending limit,
//! which categories count as income, the colour tables) lives here and is
//! passed into the aggregator and formatter explicitly.

pub mod load;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::date::DateLabelStyle;

pub use load::{ConfigOrigin, LoadedConfig, load_config, resolve_config_path};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub source_url: Option<String>,
    pub currency: CurrencyFormat,
    pub monthly_limit: Decimal,
    pub income_categories: Vec<String>,
    pub category_colors: Vec<CategoryColor>,
    pub keyword_groups: Vec<KeywordGroup>,
    pub default_color: String,
    pub row_policy: RowPolicy,
    pub group_order: GroupOrder,
    pub date_labels: DateLabelStyle,
    pub chart: ChartGeometry,
    pub legend_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: None,
            currency: CurrencyFormat::default(),
            monthly_limit: Decimal::from(10_000),
            income_categories: vec!["Salary".to_string(), "Income".to_string()],
            category_colors: default_category_colors(),
            keyword_groups: default_keyword_groups(),
            default_color: NEUTRAL_COLOR.to_string(),
            row_policy: RowPolicy::default(),
            group_order: GroupOrder::default(),
            date_labels: DateLabelStyle::default(),
            chart: ChartGeometry::default(),
            legend_size: 4,
        }
    }
}

impl DashboardConfig {
    pub fn is_income_category(&self, category: &str) -> bool {
        self.income_categories
            .iter()
            .any(|candidate| candidate == category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            grouping: DigitGrouping::Western,
        }
    }
}

/// Thousands-separator convention for formatted amounts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DigitGrouping {
    /// 1,234,567.00
    #[default]
    Western,
    /// 12,34,567.00
    Indian,
}

/// Which data rows survive parsing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Keep a row only when its column count equals the header's.
    ColumnCount,
    /// Keep a row only when Timestamp, Name, Amount and Category are all non-empty.
    #[default]
    RequiredFields,
}

impl RowPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColumnCount => "column_count",
            Self::RequiredFields => "required_fields",
        }
    }
}

/// Ordering of the calendar-date groups that follow Today and Yesterday.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    FirstSeen,
    #[default]
    NewestFirst,
}

impl GroupOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstSeen => "first_seen",
            Self::NewestFirst => "newest_first",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartGeometry {
    pub donut_radius: f64,
    pub ring_radius: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            donut_radius: 40.0,
            ring_radius: 52.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryColor {
    pub category: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordGroup {
    pub keywords: Vec<String>,
    pub color: String,
}

pub const NEUTRAL_COLOR: &str = "#64748b";

const FOOD_COLOR: &str = "#f97316";
const BILLS_COLOR: &str = "#ef4444";
const TRANSPORT_COLOR: &str = "#3b82f6";
const SHOPPING_COLOR: &str = "#a855f7";
const ENTERTAINMENT_COLOR: &str = "#ec4899";
const HEALTH_COLOR: &str = "#14b8a6";
const INCOME_COLOR: &str = "#22c55e";

fn default_category_colors() -> Vec<CategoryColor> {
    [
        ("Food", FOOD_COLOR),
        ("Bills", BILLS_COLOR),
        ("Transport", TRANSPORT_COLOR),
        ("Shopping", SHOPPING_COLOR),
        ("Entertainment", ENTERTAINMENT_COLOR),
        ("Health", HEALTH_COLOR),
        ("Salary", INCOME_COLOR),
        ("Income", INCOME_COLOR),
        ("Miscellaneous", NEUTRAL_COLOR),
    ]
    .iter()
    .map(|(category, color)| CategoryColor {
        category: (*category).to_string(),
        color: (*color).to_string(),
    })
    .collect()
}

fn default_keyword_groups() -> Vec<KeywordGroup> {
    let groups: [(&[&str], &str); 6] = [
        (
            &["food", "restaurant", "cafe", "coffee", "grocer", "dining"],
            FOOD_COLOR,
        ),
        (&["bill", "utility", "rent", "subscription"], BILLS_COLOR),
        (
            &["transport", "travel", "fuel", "taxi", "cab", "uber"],
            TRANSPORT_COLOR,
        ),
        (&["shop", "cloth", "amazon"], SHOPPING_COLOR),
        (
            &["entertain", "movie", "game", "music"],
            ENTERTAINMENT_COLOR,
        ),
        (&["health", "medic", "pharma", "gym"], HEALTH_COLOR),
    ];

    groups
        .iter()
        .map(|(keywords, color)| KeywordGroup {
            keywords: keywords.iter().map(|value| (*value).to_string()).collect(),
            color: (*color).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{DashboardConfig, DigitGrouping, GroupOrder, RowPolicy};

    #[test]
    fn defaults_match_documented_values() {
        let config = DashboardConfig::default();
        assert_eq!(config.monthly_limit, Decimal::from(10_000));
        assert_eq!(config.legend_size, 4);
        assert_eq!(config.row_policy, RowPolicy::RequiredFields);
        assert_eq!(config.group_order, GroupOrder::NewestFirst);
        assert_eq!(config.currency.grouping, DigitGrouping::Western);
        assert!(config.source_url.is_none());
    }

    #[test]
    fn income_allow_list_is_case_sensitive() {
        let config = DashboardConfig::default();
        assert!(config.is_income_category("Salary"));
        assert!(!config.is_income_category("salary"));
        assert!(!config.is_income_category("Salary "));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_sections() {
        let parsed = toml::from_str::<DashboardConfig>(
            "monthly_limit = 2500\nrow_policy = \"column_count\"\n\n[currency]\nsymbol = \"₹\"\ngrouping = \"indian\"\n",
        );
        assert!(parsed.is_ok());
        if let Ok(config) = parsed {
            assert_eq!(config.monthly_limit, Decimal::from(2_500));
            assert_eq!(config.row_policy, RowPolicy::ColumnCount);
            assert_eq!(config.currency.symbol, "₹");
            assert_eq!(config.currency.grouping, DigitGrouping::Indian);
            assert_eq!(config.legend_size, 4);
            assert!(!config.category_colors.is_empty());
        }
    }
}
