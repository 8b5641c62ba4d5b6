use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use cobranza::{project, validate, ScheduleDraft};

use crate::config::CobranzaConfig;

/// Output settings shared by the commands that print dates.
#[derive(Debug)]
pub struct DateStyle<'a> {
    items: Vec<Item<'a>>,
}

impl<'a> DateStyle<'a> {
    pub fn parse(format: &'a str) -> Result<Self> {
        let items: Vec<Item<'a>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            bail!("Invalid date_format '{}' in config", format);
        }

        // Time and offset specifiers fail when applied to a plain date
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::MIN.format_with_items(items.iter())).is_err() {
            bail!("date_format '{}' must only use date specifiers", format);
        }
        Ok(Self { items })
    }

    pub fn render(&self, date: NaiveDate) -> String {
        date.format_with_items(self.items.iter()).to_string()
    }
}

pub fn preview(
    out: &mut impl Write,
    draft: ScheduleDraft,
    count: Option<usize>,
    json: bool,
    config: &CobranzaConfig,
) -> Result<()> {
    let schedule = validate(draft)?;
    let count = count.unwrap_or(config.default_count);
    let dates = project(&schedule, count);
    tracing::info!(rule = %schedule.rule(), requested = count, projected = dates.len(), "projected schedule");

    if json {
        serde_json::to_writer(&mut *out, &dates)?;
        writeln!(out)?;
        return Ok(());
    }

    let style = DateStyle::parse(&config.date_format)?;
    for date in dates {
        writeln!(out, "{}", style.render(date))?;
    }
    Ok(())
}

pub fn check(out: &mut impl Write, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule at {}", path.display()))?;
    let draft: ScheduleDraft = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse schedule at {}", path.display()))?;
    let schedule =
        validate(draft).with_context(|| format!("Invalid schedule in {}", path.display()))?;

    serde_json::to_writer_pretty(&mut *out, &schedule)?;
    writeln!(out)?;
    Ok(())
}

pub fn next(
    out: &mut impl Write,
    draft: ScheduleDraft,
    after: Option<NaiveDate>,
    config: &CobranzaConfig,
) -> Result<()> {
    let schedule = validate(draft)?;
    let after = after.unwrap_or(schedule.start_date());
    let style = DateStyle::parse(&config.date_format)?;

    match schedule.next_after(after) {
        Some(date) => writeln!(out, "{}", style.render(date))?,
        None => bail!("No occurrence after {} before the end date", after),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobranza::{CustomUnit, RecurrenceKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run_preview(draft: ScheduleDraft, count: Option<usize>, json: bool) -> Result<String> {
        let mut out = Vec::new();
        preview(&mut out, draft, count, json, &CobranzaConfig::default())?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn preview_prints_one_date_per_line() {
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Weekly);

        assert_eq!(
            run_preview(draft, Some(4), false).unwrap(),
            "2023-01-22\n2023-01-29\n2023-02-05\n2023-02-12\n"
        );
    }

    #[test]
    fn preview_uses_default_count_from_config() {
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Monthly);

        let output = run_preview(draft, None, false).unwrap();
        assert_eq!(output.lines().count(), 5);
        assert_eq!(output.lines().last(), Some("2023-06-15"));
    }

    #[test]
    fn preview_prints_json_array() {
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Monthly)
            .with_end_date(date(2023, 2, 20));

        assert_eq!(run_preview(draft, Some(5), true).unwrap(), "[\"2023-02-15\"]\n");
    }

    #[test]
    fn preview_honours_date_format() {
        let config = CobranzaConfig {
            date_format: "%d/%m/%Y".to_string(),
            ..CobranzaConfig::default()
        };
        let draft = ScheduleDraft::new(date(2023, 1, 31), RecurrenceKind::Monthly);

        let mut out = Vec::new();
        preview(&mut out, draft, Some(1), false, &config).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "28/02/2023\n");
    }

    #[test]
    fn preview_reports_validation_errors() {
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Custom)
            .with_custom(0.0, CustomUnit::Days);

        let err = run_preview(draft, Some(3), false).unwrap_err();
        assert!(err.to_string().contains("invalid custom interval"));
    }

    #[test]
    fn invalid_date_format_is_rejected() {
        assert!(DateStyle::parse("%Q").is_err());
    }

    #[test]
    fn time_specifiers_in_date_format_are_rejected() {
        for format in ["%d/%m/%Y %H:%M", "%S", "%Y-%m-%d %z", "%s"] {
            let err = DateStyle::parse(format).unwrap_err();
            assert!(err.to_string().contains("only use date specifiers"), "{format}");
        }
    }

    #[test]
    fn preview_with_time_format_returns_error() {
        let config = CobranzaConfig {
            date_format: "%d/%m/%Y %H:%M".to_string(),
            ..CobranzaConfig::default()
        };
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Weekly);

        let mut out = Vec::new();
        assert!(preview(&mut out, draft, Some(1), false, &config).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn check_prints_normalized_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(
            &path,
            r#"{ "startDate": "2023-01-15", "kind": "Personalizado", "customInterval": 3, "customUnit": "meses" }"#,
        )
        .unwrap();

        let mut out = Vec::new();
        check(&mut out, &path).unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            printed,
            serde_json::json!({
                "startDate": "2023-01-15",
                "endDate": null,
                "rule": { "kind": "custom", "interval": 3, "unit": "months" }
            })
        );
    }

    #[test]
    fn check_rejects_invalid_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(
            &path,
            r#"{ "startDate": "2023-03-01", "endDate": "2023-02-01", "kind": "weekly" }"#,
        )
        .unwrap();

        let err = check(&mut Vec::new(), &path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid schedule in"));
    }

    #[test]
    fn next_defaults_to_start_date() {
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Quarterly);

        let mut out = Vec::new();
        next(&mut out, draft, None, &CobranzaConfig::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2023-04-15\n");
    }

    #[test]
    fn next_fails_after_end_date() {
        let draft = ScheduleDraft::new(date(2023, 1, 15), RecurrenceKind::Monthly)
            .with_end_date(date(2023, 3, 1));

        let err = next(
            &mut Vec::new(),
            draft,
            Some(date(2023, 2, 15)),
            &CobranzaConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("No occurrence after 2023-02-15"));
    }
}
