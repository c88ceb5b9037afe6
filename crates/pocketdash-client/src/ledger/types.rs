use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

pub const MISCELLANEOUS_CATEGORY: &str = "Miscellaneous";
pub const UNNAMED_TRANSACTION: &str = "Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub at: NaiveDateTime,
    pub has_time: bool,
}

/// A data row whose amount parsed as a positive decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub timestamp: String,
    pub occurred_at: Option<ParsedTimestamp>,
    pub name: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

impl Transaction {
    /// Expense bucket name; blank categories collapse into one bucket.
    pub fn bucket_name(&self) -> &str {
        self.category.as_deref().unwrap_or(MISCELLANEOUS_CATEGORY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAggregate {
    pub category: String,
    pub total: Decimal,
}

/// Tally of rows left out of totals. None of these abort a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowExclusions {
    pub dropped_rows: usize,
    pub invalid_amount: usize,
    pub invalid_date: usize,
    pub out_of_period: usize,
    pub amount_overflow: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub summary: MonthlySummary,
    /// Sorted by total, descending; ties keep first-seen order.
    pub buckets: Vec<CategoryAggregate>,
    pub exclusions: RowExclusions,
}
