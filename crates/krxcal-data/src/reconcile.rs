//! Reconciliation of the derived calendar against observed trading days.
//!
//! The weekend+holiday derivation is only as good as the holiday list. For
//! historical periods the feed of actually-observed trading days is ground
//! truth, so we compare the two over their overlapping range and report the
//! disagreements for caller action.

use krxcal_core::calendars::{Calendar, KrxCalendar};
use krxcal_core::countdown::build_trading_days;
use krxcal_core::types::Date;

use crate::error::DataResult;
use crate::feed::TradingDayFeed;

/// Disagreements between the derived calendar and the observed feed.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Days the calendar derives as open but the feed never observed.
    /// Usually an ad-hoc closure missing from the holiday list.
    pub derived_only: Vec<Date>,

    /// Days the feed observed as open but the calendar derives as closed.
    /// Usually an over-broad holiday list entry.
    pub observed_only: Vec<Date>,
}

impl Reconciliation {
    /// True when the derived calendar and the feed fully agree.
    pub fn is_clean(&self) -> bool {
        self.derived_only.is_empty() && self.observed_only.is_empty()
    }

    /// Total number of disagreeing dates.
    pub fn mismatch_count(&self) -> usize {
        self.derived_only.len() + self.observed_only.len()
    }
}

/// Compares derived trading days with the observed feed.
///
/// The comparison runs over the intersection of `[start, end]` and the
/// feed's own range, so a feed with short historical coverage never flags
/// days it simply does not cover. Mismatches are logged and returned.
///
/// # Errors
///
/// Returns the core `InvalidRange` error if `end < start`.
pub fn reconcile(
    calendar: &KrxCalendar,
    feed: &TradingDayFeed,
    start: Date,
    end: Date,
) -> DataResult<Reconciliation> {
    let Some((feed_start, feed_end)) = feed.range() else {
        return Ok(Reconciliation::default());
    };

    let from = if start > feed_start { start } else { feed_start };
    let to = if end < feed_end { end } else { feed_end };
    if to < from {
        return Ok(Reconciliation::default());
    }

    let derived = build_trading_days(from, to, calendar)?;

    let derived_only: Vec<Date> = derived
        .iter()
        .filter(|d| !feed.contains(**d))
        .copied()
        .collect();
    let observed_only: Vec<Date> = feed
        .days()
        .iter()
        .filter(|d| **d >= from && **d <= to && !calendar.is_trading_day(**d))
        .copied()
        .collect();

    for date in &derived_only {
        log::warn!("derived trading day {date} was not observed in the feed");
    }
    for date in &observed_only {
        log::warn!("observed trading day {date} is a non-trading day in the derived calendar");
    }

    Ok(Reconciliation {
        derived_only,
        observed_only,
    })
}

/// Returns a calendar corrected by the reconciliation result.
///
/// Derived-but-unobserved days become holidays (backfilled closures);
/// observed-but-underived weekdays are removed from the holiday list.
/// Weekend days observed as open are left alone: the weekend rule is not
/// data-correctable and such a record indicates a feed problem instead.
pub fn backfill_calendar(calendar: &KrxCalendar, reconciliation: &Reconciliation) -> KrxCalendar {
    let mut corrected = calendar.clone();

    corrected.add_holidays(reconciliation.derived_only.iter().copied());
    for date in &reconciliation.observed_only {
        if date.is_weekday() {
            corrected.remove_holiday(*date);
        } else {
            log::warn!("feed reports weekend {date} as open; ignoring during backfill");
        }
    }

    corrected
}
