//! Circle geometry for the spending donut, its legend, and the limit ring.
//!
//! Shares are computed from exact decimal ratios and only converted to `f64`
//! at the end, so a single-category month comes out at exactly 100%.

use std::f64::consts::PI;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::CurrencyFormat;
use crate::contracts::types::{DonutChart, DonutSegment, LegendEntry, SpendRing};
use crate::ledger::colors::ColorResolver;
use crate::ledger::types::CategoryAggregate;
use crate::present::currency::format_currency;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// Lays buckets out clockwise in the order given. Each segment starts where the
/// previous one ended; zero-share buckets produce no segment.
pub fn donut_chart(
    buckets: &[CategoryAggregate],
    total_expense: Decimal,
    radius: f64,
    colors: &ColorResolver,
) -> DonutChart {
    let full = circumference(radius);
    let mut segments = Vec::new();

    if total_expense > Decimal::ZERO {
        let mut consumed = 0.0_f64;
        for bucket in buckets {
            let percentage = share_percent(bucket.total, total_expense);
            if percentage <= 0.0 {
                continue;
            }

            segments.push(DonutSegment {
                category: bucket.category.clone(),
                color: colors.color_of(Some(&bucket.category)).to_string(),
                percentage,
                arc_length: percentage / 100.0 * full,
                offset_percent: -consumed,
                dash_offset: -(consumed / 100.0 * full),
            });
            consumed += percentage;
        }
    }

    DonutChart {
        radius,
        circumference: full,
        segments,
    }
}

/// First `size` buckets with whole-number shares.
pub fn legend(
    buckets: &[CategoryAggregate],
    total_expense: Decimal,
    size: usize,
    colors: &ColorResolver,
    currency: &CurrencyFormat,
) -> Vec<LegendEntry> {
    if total_expense <= Decimal::ZERO {
        return Vec::new();
    }

    buckets
        .iter()
        .take(size)
        .map(|bucket| LegendEntry {
            category: bucket.category.clone(),
            color: colors.color_of(Some(&bucket.category)).to_string(),
            percentage: whole_percent(bucket.total, total_expense),
            amount: format_currency(bucket.total, currency),
        })
        .collect()
}

/// Share of the monthly limit already spent, capped at 100 for display.
pub fn spend_ring(
    total_expense: Decimal,
    limit: Decimal,
    radius: f64,
    currency: &CurrencyFormat,
) -> SpendRing {
    let full = circumference(radius);
    let percentage = if limit <= Decimal::ZERO {
        if total_expense > Decimal::ZERO { 100.0 } else { 0.0 }
    } else if total_expense >= limit {
        100.0
    } else {
        share_percent(total_expense, limit)
    };

    SpendRing {
        limit,
        limit_label: format_currency(limit, currency),
        percentage,
        radius,
        circumference: full,
        offset: full - (percentage / 100.0) * full,
    }
}

fn share_percent(part: Decimal, whole: Decimal) -> f64 {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .and_then(|value| value.to_f64())
        .unwrap_or(0.0)
}

fn whole_percent(part: Decimal, whole: Decimal) -> u32 {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_u32())
        .unwrap_or(0)
}
