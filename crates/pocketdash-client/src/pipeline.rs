//! One render cycle: load, parse, aggregate, format.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::contracts::types::DashboardModel;
use crate::ledger::aggregate::aggregate;
use crate::ledger::normalize::normalize_records;
use crate::present::model::build_dashboard;
use crate::source::fetch::CsvSource;
use crate::source::parse::{content_line_count, parse_csv};
use crate::{ClientError, ClientResult};

/// Runs the whole pipeline against `source`.
///
/// Fails only when the source cannot be loaded or holds no data rows. Every
/// row-level problem is counted in the model's exclusions instead.
pub fn render_dashboard<S>(
    source: &S,
    config: &DashboardConfig,
    now: NaiveDateTime,
) -> ClientResult<DashboardModel>
where
    S: CsvSource + ?Sized,
{
    let text = source.load()?;
    render_text(&text, &source.describe(), config, now)
}

pub fn render_text(
    text: &str,
    source_label: &str,
    config: &DashboardConfig,
    now: NaiveDateTime,
) -> ClientResult<DashboardModel> {
    if content_line_count(text) < 2 {
        return Err(ClientError::empty_dataset());
    }

    let report = parse_csv(text, config.row_policy);
    let rows = normalize_records(&report.records);
    let mut totals = aggregate(&rows.transactions, config, now);
    totals.exclusions.dropped_rows = report.rows_dropped;
    totals.exclusions.invalid_amount = rows.invalid_amount;

    debug!(
        rows_read = report.rows_read,
        transactions = rows.transactions.len(),
        buckets = totals.buckets.len(),
        "aggregated dashboard rows"
    );

    Ok(build_dashboard(
        &rows.transactions,
        &totals,
        config,
        now,
        source_label,
    ))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{render_dashboard, render_text};
    use crate::config::{DashboardConfig, RowPolicy};
    use crate::contracts::types::Tone;
    use crate::ledger::date::parse_now;
    use crate::source::input::TextSource;

    const EXAMPLE: &str = "Timestamp,Name,Amount,Category\n\
2024-03-10,Coffee,120,Cafe\n\
2024-03-10,Salary,50000,Salary";

    #[test]
    fn example_month_totals_match_exactly() {
        let config = DashboardConfig {
            income_categories: vec!["Salary".to_string()],
            ..DashboardConfig::default()
        };
        let now = parse_now("2024-03-15").unwrap_or_default();
        let source = TextSource::new("inline", EXAMPLE.to_string());

        let result = render_dashboard(&source, &config, now);
        assert!(result.is_ok());
        if let Ok(model) = result {
            assert_eq!(model.summary.total_income, Decimal::from(50_000));
            assert_eq!(model.summary.total_expense, Decimal::from(120));
            assert_eq!(model.summary.remaining_amount, Decimal::from(49_880));
            assert_eq!(model.chart.segments.len(), 1);
            assert_eq!(model.chart.segments[0].category, "Cafe");
            assert!((model.chart.segments[0].percentage - 100.0).abs() < 1e-9);
            assert_eq!(model.source, "inline");
        }
    }

    #[test]
    fn header_only_and_blank_input_are_empty_datasets() {
        let now = parse_now("2024-03-15").unwrap_or_default();
        let config = DashboardConfig::default();
        for text in [
            "",
            "\n\n",
            "Timestamp,Name,Amount,Category\n",
            "Timestamp,Name,Amount,Category\r\n\r\n",
        ] {
            let result = render_text(text, "inline", &config, now);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "empty_dataset");
                assert!(error.is_render_failure());
            }
        }
    }

    #[test]
    fn malformed_rows_are_counted_not_fatal() {
        let now = parse_now("2024-03-15").unwrap_or_default();
        let config = DashboardConfig {
            row_policy: RowPolicy::ColumnCount,
            ..DashboardConfig::default()
        };
        let text = "Timestamp,Name,Amount,Category\n\
2024-03-01,Lunch,abc,Food\n\
2024-03-01,Refund,-20,Food\n\
2024-03-02,Bus,\"1,200\",Transport\n\
someday,Mystery,15,Food\n\
2024-03-03,Rent,900,Bills\n";

        let result = render_text(text, "inline", &config, now);
        assert!(result.is_ok());
        if let Ok(model) = result {
            assert_eq!(model.exclusions.dropped_rows, 1);
            assert_eq!(model.exclusions.invalid_amount, 2);
            assert_eq!(model.exclusions.invalid_date, 1);
            assert_eq!(model.summary.total_expense, Decimal::from(900));
            assert_eq!(
                model.groups.last().map(|group| group.label.as_str()),
                Some("Other")
            );
        }
    }

    #[test]
    fn amounts_too_large_to_total_do_not_abort_the_render() {
        let now = parse_now("2024-03-15").unwrap_or_default();
        let text = "Timestamp,Name,Amount,Category\n\
2024-03-10,Vault,79228162514264337593543950335,Food\n\
2024-03-11,Vault,79228162514264337593543950335,Food\n";

        let result = render_text(text, "inline", &DashboardConfig::default(), now);
        assert!(result.is_ok());
        if let Ok(model) = result {
            assert_eq!(model.exclusions.amount_overflow, 1);
            assert_eq!(model.summary.total_expense, Decimal::MAX);
            assert_eq!(model.summary.remaining_tone, Tone::Alert);
            assert!((model.ring.percentage - 100.0).abs() < 1e-9);
        }
    }
}
