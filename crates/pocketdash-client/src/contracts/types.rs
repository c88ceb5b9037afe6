use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::ledger::types::{RowExclusions, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Normal,
    Alert,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub generated_at: String,
    pub period_label: String,
    pub source: String,
    pub summary: SummaryCards,
    pub chart: DonutChart,
    pub legend: Vec<LegendEntry>,
    pub ring: SpendRing,
    pub groups: Vec<TransactionGroup>,
    pub exclusions: RowExclusions,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryCards {
    pub income: String,
    pub expense: String,
    pub remaining: String,
    pub remaining_tone: Tone,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub remaining_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonutChart {
    pub radius: f64,
    pub circumference: f64,
    pub segments: Vec<DonutSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSegment {
    pub category: String,
    pub color: String,
    pub percentage: f64,
    pub arc_length: f64,
    /// Negative share of the circle already used by earlier segments, in percent.
    pub offset_percent: f64,
    /// `offset_percent` expressed as a stroke length.
    pub dash_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: String,
    pub percentage: u32,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendRing {
    pub limit: Decimal,
    pub limit_label: String,
    pub percentage: f64,
    pub radius: f64,
    pub circumference: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionGroup {
    pub label: String,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub name: String,
    pub category: String,
    pub time: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub origin: String,
    pub path: Option<String>,
    pub config: DashboardConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchData {
    pub cycles: Vec<WatchCycle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchCycle {
    pub cycle: usize,
    pub outcome: String,
    pub snapshot: Option<SnapshotData>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnapshotData {
    Ready { dashboard: Box<DashboardModel> },
    Failed { code: String, message: String },
}
