//! Expands a validated [`Schedule`] into concrete occurrence dates.
//!
//! Every occurrence is computed from the start date, never from the previous
//! occurrence, so month-end clamping does not accumulate: a schedule starting
//! on Jan 31 yields Feb 28, Mar 31, Apr 30 and so on. Month arithmetic clamps
//! to the last day of the target month.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::{Offset, Schedule};

/// Returns up to `count` occurrences after the start date, stopping early at
/// the schedule's end date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cobranza::{project, validate, RecurrenceKind, ScheduleDraft};
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let schedule = validate(ScheduleDraft::new(start, RecurrenceKind::Weekly)).unwrap();
///
/// let dates: Vec<String> = project(&schedule, 2).iter().map(|d| d.to_string()).collect();
/// assert_eq!(dates, ["2023-01-22", "2023-01-29"]);
/// ```
pub fn project(schedule: &Schedule, count: usize) -> Vec<NaiveDate> {
    schedule.occurrences().take(count).collect()
}

/// Lazy iterator over a schedule's occurrences, see [`Schedule::occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences {
    schedule: Schedule,
    next_index: u32,
    done: bool,
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let date = self.schedule.occurrence(self.next_index);
        let within_end = match (date, self.schedule.end_date()) {
            (Some(date), Some(end)) => date <= end,
            (Some(_), None) => true,
            (None, _) => false,
        };

        match self.next_index.checked_add(1) {
            Some(next_index) if within_end => self.next_index = next_index,
            _ => self.done = true,
        }

        if within_end {
            date
        } else {
            None
        }
    }
}

impl std::iter::FusedIterator for Occurrences {}

impl Schedule {
    /// All occurrences after the start date, in increasing order.
    ///
    /// Unbounded when the schedule has no end date; use `take` to limit it.
    pub fn occurrences(&self) -> Occurrences {
        self.occurrences_from(1)
    }

    fn occurrences_from(&self, index: u32) -> Occurrences {
        Occurrences {
            schedule: *self,
            next_index: index.max(1),
            done: false,
        }
    }

    /// An index from which scanning for occurrences after `date` can start:
    /// every occurrence before it falls strictly before `date`.
    fn scan_start(&self, date: NaiveDate) -> u32 {
        let start = self.start_date();
        if date <= start {
            return 1;
        }

        let estimate = match self.rule().offset(1) {
            Some(Offset::Days(step)) => {
                let days = u64::try_from((date - start).num_days()).unwrap_or(0);
                days / step.max(1)
            }
            Some(Offset::Months(step)) => {
                let months = i64::from(date.year() - start.year()) * 12
                    + i64::from(date.month())
                    - i64::from(start.month());
                // The estimated month may already hold an occurrence past `date`
                (u64::try_from(months).unwrap_or(0) / u64::from(step.max(1))).saturating_sub(1)
            }
            None => 0,
        };

        u32::try_from(estimate).unwrap_or(u32::MAX).max(1)
    }

    /// The `n`-th occurrence, ignoring the end date. Index 0 is the start date
    /// itself and is not an occurrence.
    pub fn occurrence(&self, n: u32) -> Option<NaiveDate> {
        if n == 0 {
            return None;
        }

        let start = self.start_date();
        let date = match self.rule().offset(n)? {
            Offset::Days(days) => start.checked_add_days(Days::new(days)),
            Offset::Months(months) => start.checked_add_months(Months::new(months)),
        };

        if date.is_none() {
            tracing::warn!(%start, rule = %self.rule(), n, "occurrence is outside the supported date range");
        }
        date
    }

    /// The first occurrence strictly after `date` that is not past the end date.
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.occurrences_from(self.scan_start(date))
            .find(|occurrence| *occurrence > date)
    }

    /// Occurrences within `from..=to`, in increasing order.
    pub fn occurrences_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        if to < from {
            return Vec::new();
        }

        self.occurrences_from(self.scan_start(from))
            .take_while(|occurrence| *occurrence <= to)
            .filter(|occurrence| *occurrence >= from)
            .collect()
    }
}
