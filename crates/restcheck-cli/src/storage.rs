//! Persistent report storage — `~/.restcheck/reports/`
//!
//! Every `restcheck run` is saved regardless of `--output` mode.
//! Directory layout: `{timestamp}_{pass|fail}/`

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use restcheck_core::config::Config;
use restcheck_core::report::SummaryReport;

/// Everything needed to persist one run.
pub struct ReportData<'a> {
    pub config: &'a Config,
    pub summary: &'a SummaryReport,
    pub seed: u64,
    pub duration_secs: f64,
}

/// Save a run report, honoring `report_dir` from the config.
///
/// Returns the report directory path on success.
pub fn save_report(data: &ReportData) -> Result<PathBuf, std::io::Error> {
    let base = match &data.config.report_dir {
        Some(dir) => dir.clone(),
        None => default_base_dir()?,
    };
    let report_dir = base.join(build_dir_name(data.summary));
    write_report(&report_dir, data)?;
    Ok(report_dir)
}

/// Write summary.json and a config.toml snapshot into `report_dir`.
fn write_report(report_dir: &Path, data: &ReportData) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(report_dir)?;

    // config.toml — snapshot of the config used
    let config_toml =
        toml::to_string_pretty(data.config).map_err(|e| std::io::Error::other(e.to_string()))?;
    std::fs::write(report_dir.join("config.toml"), config_toml)?;

    // summary.json — outcome counts + failures + metadata
    let summary = serde_json::json!({
        "summary": data.summary,
        "meta": {
            "timestamp": timestamp_iso(),
            "seed": data.seed,
            "duration_secs": data.duration_secs,
        },
    });
    std::fs::write(
        report_dir.join("summary.json"),
        serde_json::to_string_pretty(&summary).unwrap_or_default(),
    )?;

    Ok(())
}

fn default_base_dir() -> Result<PathBuf, std::io::Error> {
    let home = std::env::var("HOME")
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
    Ok(PathBuf::from(home).join(".restcheck").join("reports"))
}

/// `{timestamp}_{pass|fail}` e.g. `20260806T193000_pass`
fn build_dir_name(summary: &SummaryReport) -> String {
    let verdict = if summary.all_passed() { "pass" } else { "fail" };
    format!("{}_{verdict}", timestamp_compact())
}

/// `"20260806T193000"` — filesystem-safe compact timestamp.
fn timestamp_compact() -> String {
    let (y, mo, d, h, mi, s) = utc_now();
    format!("{y:04}{mo:02}{d:02}T{h:02}{mi:02}{s:02}")
}

/// `"2026-08-06T19:30:00Z"` — ISO 8601 for JSON.
fn timestamp_iso() -> String {
    let (y, mo, d, h, mi, s) = utc_now();
    format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z")
}

/// Current UTC date-time from epoch. No external crate needed.
fn utc_now() -> (i32, u32, u32, u32, u32, u32) {
    let epoch_secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let days = (epoch_secs / 86400) as i64;
    let tod = epoch_secs % 86400;
    let (y, m, d) = civil_from_days(days);
    (
        y,
        m,
        d,
        (tod / 3600) as u32,
        ((tod % 3600) / 60) as u32,
        (tod % 60) as u32,
    )
}

/// Howard Hinnant's `civil_from_days` — epoch days → (year, month, day).
///
/// Reference: <https://howardhinnant.github.io/date_algorithms.html#civil_from_days>
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = (z - era * 146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(failed: u64) -> SummaryReport {
        SummaryReport {
            total: 2,
            passed: 2 - failed,
            failed,
            total_duration_ms: 40,
            failures: vec![],
        }
    }

    #[test]
    fn civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn civil_from_days_known_date() {
        // 2026-08-06 = day 20671 from epoch
        assert_eq!(civil_from_days(20_671), (2026, 8, 6));
    }

    #[test]
    fn dir_name_reflects_verdict() {
        assert!(build_dir_name(&summary(0)).ends_with("_pass"));
        assert!(build_dir_name(&summary(1)).ends_with("_fail"));
    }

    #[test]
    fn write_report_produces_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let summary = summary(0);
        let data = ReportData {
            config: &config,
            summary: &summary,
            seed: 42,
            duration_secs: 1.5,
        };

        let report_dir = dir.path().join("report");
        write_report(&report_dir, &data).unwrap();

        let written = std::fs::read_to_string(report_dir.join("summary.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["summary"]["total"], 2);
        assert_eq!(parsed["meta"]["seed"], 42);

        let snapshot = std::fs::read_to_string(report_dir.join("config.toml")).unwrap();
        let restored: Config = toml::from_str(&snapshot).unwrap();
        assert_eq!(restored.timeout_ms, config.timeout_ms);
    }

    #[test]
    fn save_report_honors_report_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            report_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let summary = summary(1);
        let data = ReportData {
            config: &config,
            summary: &summary,
            seed: 7,
            duration_secs: 0.1,
        };

        let report_dir = save_report(&data).unwrap();
        assert!(report_dir.starts_with(dir.path()));
        assert!(report_dir.join("summary.json").exists());
    }
}
