use chrono::NaiveDate;

use crate::domain::{
    CustomUnit, IntervalError, RecurrenceKind, RecurrenceRule, Schedule, ScheduleDraft,
    ValidationError,
};

/// Validates a form-submitted schedule and turns it into a [`Schedule`].
///
/// The end date is checked first, then the custom interval, then the custom
/// unit. Interval and unit are ignored for non-custom kinds.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cobranza::{validate, RecurrenceKind, ScheduleDraft, ValidationError};
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
///
/// let draft = ScheduleDraft::new(start, RecurrenceKind::Monthly).with_end_date(end);
/// assert_eq!(
///     validate(draft).unwrap_err(),
///     ValidationError::InvalidEndDate { start, end }
/// );
/// ```
pub fn validate(draft: ScheduleDraft) -> Result<Schedule, ValidationError> {
    let result = check_draft(&draft);
    if let Err(err) = &result {
        tracing::debug!(start = %draft.start_date, kind = %draft.kind, "schedule rejected: {}", err);
    }
    result
}

fn check_draft(draft: &ScheduleDraft) -> Result<Schedule, ValidationError> {
    check_end_date(draft.start_date, draft.end_date)?;

    let rule = match draft.kind {
        RecurrenceKind::Weekly => RecurrenceRule::Weekly,
        RecurrenceKind::Monthly => RecurrenceRule::Monthly,
        RecurrenceKind::Quarterly => RecurrenceRule::Quarterly,
        RecurrenceKind::Yearly => RecurrenceRule::Yearly,
        RecurrenceKind::Custom => {
            let interval = check_interval(draft.custom_interval)?;
            let unit = draft.custom_unit.ok_or(ValidationError::MissingCustomUnit)?;
            RecurrenceRule::custom(interval, unit)
        }
    };

    Ok(Schedule::new_unchecked(draft.start_date, draft.end_date, rule))
}

fn check_end_date(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::InvalidEndDate { start, end }),
        _ => Ok(()),
    }
}

fn check_interval(interval: Option<f64>) -> Result<u32, IntervalError> {
    let value = interval.ok_or(IntervalError::Missing)?;

    if value.is_nan() || (value.is_finite() && value.fract() != 0.0) {
        return Err(IntervalError::NotWhole(value));
    }
    if value < 1.0 {
        return Err(IntervalError::NotPositive(value));
    }
    if value > f64::from(u32::MAX) {
        return Err(IntervalError::TooLarge(value));
    }

    Ok(value as u32)
}

impl Schedule {
    /// Builds a schedule from an already typed rule, applying the same checks
    /// as [`validate`].
    pub fn new(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        rule: RecurrenceRule,
    ) -> Result<Self, ValidationError> {
        let (custom_interval, custom_unit): (Option<f64>, Option<CustomUnit>) = match rule {
            RecurrenceRule::Custom { interval, unit } => (Some(f64::from(interval)), Some(unit)),
            _ => (None, None),
        };

        validate(ScheduleDraft {
            start_date,
            end_date,
            kind: rule.kind(),
            custom_interval,
            custom_unit,
        })
    }
}
