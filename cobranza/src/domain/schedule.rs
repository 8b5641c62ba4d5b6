use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{CustomUnit, RecurrenceKind, RecurrenceRule};

/// A schedule exactly as the form layer submits it, before validation.
///
/// `custom_interval` is kept as a plain number so that missing, negative and
/// fractional values can be reported instead of failing deserialization.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde_as(as = "DisplayFromStr")]
    pub kind: RecurrenceKind,
    #[serde(default)]
    pub custom_interval: Option<f64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub custom_unit: Option<CustomUnit>,
}

impl ScheduleDraft {
    pub fn new(start_date: NaiveDate, kind: RecurrenceKind) -> Self {
        Self {
            start_date,
            end_date: None,
            kind,
            custom_interval: None,
            custom_unit: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_custom(mut self, interval: f64, unit: CustomUnit) -> Self {
        self.custom_interval = Some(interval);
        self.custom_unit = Some(unit);
        self
    }
}

/// A validated recurring schedule.
///
/// Only obtainable through [`crate::validate`] or [`Schedule::new`], so the
/// end date never precedes the start date and custom intervals are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    rule: RecurrenceRule,
}

impl Schedule {
    pub(crate) fn new_unchecked(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            start_date,
            end_date,
            rule,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn rule(&self) -> RecurrenceRule {
        self.rule
    }
}

impl From<Schedule> for ScheduleDraft {
    fn from(schedule: Schedule) -> Self {
        let (custom_interval, custom_unit) = match schedule.rule {
            RecurrenceRule::Custom { interval, unit } => (Some(f64::from(interval)), Some(unit)),
            _ => (None, None),
        };

        ScheduleDraft {
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            kind: schedule.rule.kind(),
            custom_interval,
            custom_unit,
        }
    }
}
