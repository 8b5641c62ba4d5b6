use serde::Serialize;
use strum::{Display, EnumString};

/// The frequency tag a recurring charge, payroll or expense form submits.
///
/// Parses both the English tags and the Spanish ones the CRM forms use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum RecurrenceKind {
    #[strum(ascii_case_insensitive, to_string = "weekly", serialize = "semanal")]
    Weekly,
    #[strum(ascii_case_insensitive, to_string = "monthly", serialize = "mensual")]
    Monthly,
    #[strum(
        ascii_case_insensitive,
        to_string = "quarterly",
        serialize = "trimestral"
    )]
    Quarterly,
    #[strum(
        ascii_case_insensitive,
        to_string = "yearly",
        serialize = "anual",
        serialize = "annual"
    )]
    Yearly,
    #[strum(
        ascii_case_insensitive,
        to_string = "custom",
        serialize = "personalizado"
    )]
    Custom,
}

/// Unit of a custom recurrence interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomUnit {
    #[strum(
        ascii_case_insensitive,
        to_string = "days",
        serialize = "day",
        serialize = "dias",
        serialize = "días"
    )]
    Days,
    #[strum(
        ascii_case_insensitive,
        to_string = "weeks",
        serialize = "week",
        serialize = "semanas"
    )]
    Weeks,
    #[strum(
        ascii_case_insensitive,
        to_string = "months",
        serialize = "month",
        serialize = "meses"
    )]
    Months,
}

/// A recurrence pattern, independent of any start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecurrenceRule {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Custom { interval: u32, unit: CustomUnit },
}

/// How far the n-th occurrence lies from the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offset {
    Days(u64),
    Months(u32),
}

impl RecurrenceRule {
    pub fn custom(interval: u32, unit: CustomUnit) -> Self {
        RecurrenceRule::Custom { interval, unit }
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            RecurrenceRule::Weekly => RecurrenceKind::Weekly,
            RecurrenceRule::Monthly => RecurrenceKind::Monthly,
            RecurrenceRule::Quarterly => RecurrenceKind::Quarterly,
            RecurrenceRule::Yearly => RecurrenceKind::Yearly,
            RecurrenceRule::Custom { .. } => RecurrenceKind::Custom,
        }
    }

    /// Offset of occurrence `n` from the start date, or `None` if it does not
    /// fit in the offset types.
    pub(crate) fn offset(&self, n: u32) -> Option<Offset> {
        match *self {
            RecurrenceRule::Weekly => Some(Offset::Days(7 * u64::from(n))),
            RecurrenceRule::Monthly => Some(Offset::Months(n)),
            RecurrenceRule::Quarterly => n.checked_mul(3).map(Offset::Months),
            RecurrenceRule::Yearly => n.checked_mul(12).map(Offset::Months),
            RecurrenceRule::Custom { interval, unit } => match unit {
                CustomUnit::Days => Some(Offset::Days(u64::from(interval) * u64::from(n))),
                CustomUnit::Weeks => (u64::from(interval) * u64::from(n))
                    .checked_mul(7)
                    .map(Offset::Days),
                CustomUnit::Months => interval.checked_mul(n).map(Offset::Months),
            },
        }
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceRule::Custom { interval, unit } => write!(f, "every {} {}", interval, unit),
            other => write!(f, "{}", other.kind()),
        }
    }
}
