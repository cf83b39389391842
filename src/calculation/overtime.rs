//! Overtime duration and tiered multiplier calculation.
//!
//! Raw overtime is the span between an approved letter's in and out times,
//! crossing midnight when the out time precedes the in time. The
//! accumulative (pay-multiplied) duration consumes those hours through the
//! company's tiered rate table, ascending by level: each tier weights the
//! minutes it absorbs by its multiplier, and hours beyond all tier caps use
//! the highest tier's multiplier.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::OvertimeRateDetail;

/// The result of an overtime calculation for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeOutcome {
    /// Actual overtime duration in minutes.
    pub actual_minutes: i64,
    /// Multiplier-weighted overtime duration in minutes.
    pub accumulative_minutes: i64,
}

/// Calculates actual and accumulative overtime from a letter's time window.
///
/// # Arguments
///
/// * `minutes_in` - Overtime start as minutes since midnight
/// * `minutes_out` - Overtime end as minutes since midnight
/// * `tiers` - The rate tiers, sorted ascending by level; empty means no
///   rate configuration, in which case accumulative equals actual
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_overtime;
/// use attendance_engine::models::OvertimeRateDetail;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tiers = vec![
///     OvertimeRateDetail {
///         level: 1,
///         max_hours: Some(Decimal::from_str("2").unwrap()),
///         multiplier: Decimal::from_str("1.5").unwrap(),
///     },
///     OvertimeRateDetail {
///         level: 2,
///         max_hours: None,
///         multiplier: Decimal::from_str("2.0").unwrap(),
///     },
/// ];
///
/// // 18:00 to 20:30 = 2.5 hours actual
/// let outcome = calculate_overtime(18 * 60, 20 * 60 + 30, &tiers);
/// assert_eq!(outcome.actual_minutes, 150);
/// // 2h x 1.5 + 0.5h x 2.0 = 180 + 60 = 240 minutes
/// assert_eq!(outcome.accumulative_minutes, 240);
/// ```
pub fn calculate_overtime(
    minutes_in: i64,
    minutes_out: i64,
    tiers: &[OvertimeRateDetail],
) -> OvertimeOutcome {
    let mut actual_minutes = minutes_out - minutes_in;
    if actual_minutes < 0 {
        actual_minutes += 24 * 60;
    }

    if tiers.is_empty() {
        return OvertimeOutcome {
            actual_minutes,
            accumulative_minutes: actual_minutes,
        };
    }

    let sixty = Decimal::new(60, 0);
    let mut remaining = Decimal::new(actual_minutes, 0) / sixty;
    let mut accumulative = Decimal::ZERO;

    for tier in tiers {
        if remaining <= Decimal::ZERO {
            break;
        }
        let consumed = match tier.max_hours {
            Some(cap) => remaining.min(cap),
            None => remaining,
        };
        accumulative += consumed * sixty * tier.multiplier;
        remaining -= consumed;
    }

    // Hours past every tier cap keep the highest tier's multiplier
    if remaining > Decimal::ZERO {
        if let Some(last) = tiers.last() {
            accumulative += remaining * sixty * last.multiplier;
        }
    }

    OvertimeOutcome {
        actual_minutes,
        accumulative_minutes: accumulative.round().to_i64().unwrap_or(0),
    }
}
