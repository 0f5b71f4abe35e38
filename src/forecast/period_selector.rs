//! Picks the forecast period that best stands for "today"
//!
//! Tiers are tried in order; within a tier the first period in document order
//! wins:
//! 1. the period named "This Afternoon"
//! 2. a daytime period starting today
//! 3. any period starting today
//! 4. a period whose `[start, end)` window contains now
//! 5. the first daytime period
//! 6. the first period
//!
//! "Today" is evaluated per period, in the UTC offset embedded in that
//! period's own start time. Periods with unparsable timestamps never match
//! tiers 2-4 but stay eligible for 5 and 6.

use chrono::{DateTime, Utc};

use crate::error::SelectionError;
use crate::models::ForecastPeriod;

const THIS_AFTERNOON: &str = "This Afternoon";

pub fn select_today(
    periods: &[ForecastPeriod],
    now: DateTime<Utc>,
) -> Result<&ForecastPeriod, SelectionError> {
    let tiers: [(&str, fn(&ForecastPeriod, DateTime<Utc>) -> bool); 6] = [
        ("named this afternoon", |p, _| p.name == THIS_AFTERNOON),
        ("daytime starting today", |p, now| {
            p.is_daytime && starts_today(p, now)
        }),
        ("starting today", starts_today),
        ("covering now", covers),
        ("first daytime", |p, _| p.is_daytime),
        ("first period", |_, _| true),
    ];

    for (tier, matches) in tiers {
        if let Some(period) = periods.iter().find(|p| matches(p, now)) {
            tracing::debug!(tier, period = %period.name, "Selected today's period");
            return Ok(period);
        }
    }

    Err(SelectionError::NoPeriodsAvailable)
}

fn starts_today(period: &ForecastPeriod, now: DateTime<Utc>) -> bool {
    period.starts_at().is_some_and(|start| {
        let today = now.with_timezone(start.offset()).date_naive();
        start.date_naive() == today
    })
}

fn covers(period: &ForecastPeriod, now: DateTime<Utc>) -> bool {
    match (period.starts_at(), period.ends_at()) {
        (Some(start), Some(end)) => start <= now && now < end,
        _ => false,
    }
}
