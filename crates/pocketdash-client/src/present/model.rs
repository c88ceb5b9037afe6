use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::DashboardConfig;
use crate::contracts::types::{DashboardModel, SummaryCards, Tone};
use crate::ledger::colors::ColorResolver;
use crate::ledger::date::period_label;
use crate::ledger::types::{Aggregate, Transaction};
use crate::present::chart::{donut_chart, legend, spend_ring};
use crate::present::currency::format_currency;
use crate::present::groups::group_transactions;

/// Assembles everything the view layer draws from one aggregated snapshot.
pub fn build_dashboard(
    transactions: &[Transaction],
    aggregate: &Aggregate,
    config: &DashboardConfig,
    now: NaiveDateTime,
    source: &str,
) -> DashboardModel {
    let colors = ColorResolver::from_config(config);
    let summary = &aggregate.summary;

    DashboardModel {
        generated_at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        period_label: period_label(now),
        source: source.to_string(),
        summary: summary_cards(aggregate, config),
        chart: donut_chart(
            &aggregate.buckets,
            summary.total_expense,
            config.chart.donut_radius,
            &colors,
        ),
        legend: legend(
            &aggregate.buckets,
            summary.total_expense,
            config.legend_size,
            &colors,
            &config.currency,
        ),
        ring: spend_ring(
            summary.total_expense,
            config.monthly_limit,
            config.chart.ring_radius,
            &config.currency,
        ),
        groups: group_transactions(transactions, config, &colors, now),
        exclusions: aggregate.exclusions,
    }
}

fn summary_cards(aggregate: &Aggregate, config: &DashboardConfig) -> SummaryCards {
    let summary = &aggregate.summary;
    let remaining_tone = if summary.remaining < Decimal::ZERO {
        Tone::Alert
    } else {
        Tone::Normal
    };

    SummaryCards {
        income: format_currency(summary.total_income, &config.currency),
        expense: format_currency(summary.total_expense, &config.currency),
        remaining: format_currency(summary.remaining, &config.currency),
        remaining_tone,
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        remaining_amount: summary.remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::build_dashboard;
    use crate::config::{DashboardConfig, RowPolicy};
    use crate::contracts::types::Tone;
    use crate::ledger::aggregate::aggregate;
    use crate::ledger::date::parse_now;
    use crate::ledger::normalize::normalize_records;
    use crate::source::parse::parse_csv;

    fn model_for(csv: &str, now: &str) -> crate::contracts::types::DashboardModel {
        let config = DashboardConfig::default();
        let now = parse_now(now).unwrap_or_default();
        let report = parse_csv(csv, RowPolicy::RequiredFields);
        let rows = normalize_records(&report.records);
        let totals = aggregate(&rows.transactions, &config, now);
        build_dashboard(&rows.transactions, &totals, &config, now, "fixture")
    }

    #[test]
    fn summary_cards_show_formatted_totals() {
        let model = model_for(
            "Timestamp,Name,Amount,Category\n\
2024-03-10T08:00,Salary,50000,Salary\n\
2024-03-15T09:00,Coffee,120,Cafe\n",
            "2024-03-15T12:00",
        );

        assert_eq!(model.period_label, "March 2024");
        assert_eq!(model.generated_at, "2024-03-15T12:00:00");
        assert_eq!(model.summary.income, "$50,000.00");
        assert_eq!(model.summary.expense, "$120.00");
        assert_eq!(model.summary.remaining, "$49,880.00");
        assert_eq!(model.summary.remaining_tone, Tone::Normal);
        assert_eq!(model.legend.len(), 1);
        assert_eq!(model.legend[0].category, "Cafe");
        assert_eq!(model.legend[0].percentage, 100);
        assert_eq!(model.chart.segments.len(), 1);
        assert_eq!(model.source, "fixture");
    }

    #[test]
    fn overspending_turns_remaining_into_an_alert() {
        let model = model_for(
            "Timestamp,Name,Amount,Category\n\
2024-03-01,Pay,1000,Salary\n\
2024-03-02,Rent,1500,Bills\n",
            "2024-03-15",
        );

        assert_eq!(model.summary.remaining, "-$500.00");
        assert_eq!(model.summary.remaining_tone, Tone::Alert);
        assert!((model.ring.percentage - 15.0).abs() < 1e-9);
    }

    #[test]
    fn empty_month_renders_zero_cards_and_no_arcs() {
        let model = model_for(
            "Timestamp,Name,Amount,Category\n2023-01-01,Old,10,Food\n",
            "2024-03-15",
        );

        assert_eq!(model.summary.income, "$0.00");
        assert_eq!(model.summary.expense, "$0.00");
        assert!(model.chart.segments.is_empty());
        assert!(model.legend.is_empty());
        assert_eq!(model.exclusions.out_of_period, 1);
        assert_eq!(model.groups.len(), 1);
    }
}
