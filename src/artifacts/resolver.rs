//! Output directory resolution.
//!
//! A report directory is never reused. If `base/name` already exists the
//! name gets a `_YYYYMMDD-HHMMSS` suffix, and if that exists too (two runs in
//! the same second) a `-N` counter is appended.
//!
//! The existence check and the creation are separate steps, so two processes
//! racing on the same name can still collide. That is acceptable for a
//! once-per-release CLI step.

use crate::utils::config::DIR_TIMESTAMP_FORMAT;
use crate::utils::error::OutputError;
use chrono::{DateTime, Local, TimeZone};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Resolve and create a fresh report directory under `base_dir`
///
/// **Public** - main entry point for output path resolution
///
/// # Errors
/// * `OutputError::WriteFailed` - the directory tree cannot be created
pub fn resolve_report_dir(base_dir: &Path, requested_name: &str) -> Result<PathBuf, OutputError> {
    resolve_report_dir_at(base_dir, requested_name, Local::now())
}

/// Same as `resolve_report_dir` with an explicit clock
pub fn resolve_report_dir_at<Tz: TimeZone>(
    base_dir: &Path,
    requested_name: &str,
    now: DateTime<Tz>,
) -> Result<PathBuf, OutputError>
where
    Tz::Offset: std::fmt::Display,
{
    let report_dir = pick_free_name(base_dir, requested_name, now);

    std::fs::create_dir_all(&report_dir).map_err(|source| OutputError::WriteFailed {
        path: report_dir.clone(),
        source,
    })?;

    debug!("Report directory: {}", report_dir.display());
    Ok(report_dir)
}

/// First non-existing candidate path
///
/// **Private** - internal helper
fn pick_free_name<Tz: TimeZone>(base_dir: &Path, requested_name: &str, now: DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let candidate = base_dir.join(requested_name);
    if !candidate.exists() {
        return candidate;
    }

    let stamped = format!("{}_{}", requested_name, now.format(DIR_TIMESTAMP_FORMAT));
    info!(
        "{} already exists, using {} instead",
        candidate.display(),
        stamped
    );

    let mut candidate = base_dir.join(&stamped);
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = base_dir.join(format!("{}-{}", stamped, counter));
        counter += 1;
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_fresh_name_is_used_as_is() {
        let base = tempfile::tempdir().unwrap();
        let dir = resolve_report_dir_at(base.path(), "v1.2.0", fixed_now()).unwrap();
        assert_eq!(dir, base.path().join("v1.2.0"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_collision_appends_timestamp() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir(base.path().join("v1.2.0")).unwrap();

        let dir = resolve_report_dir_at(base.path(), "v1.2.0", fixed_now()).unwrap();
        assert_eq!(dir, base.path().join("v1.2.0_20240309-140507"));
    }

    #[test]
    fn test_same_second_collision_appends_counter() {
        let base = tempfile::tempdir().unwrap();
        let first = resolve_report_dir_at(base.path(), "rel", fixed_now()).unwrap();
        let second = resolve_report_dir_at(base.path(), "rel", fixed_now()).unwrap();
        let third = resolve_report_dir_at(base.path(), "rel", fixed_now()).unwrap();

        assert_eq!(first, base.path().join("rel"));
        assert_eq!(second, base.path().join("rel_20240309-140507"));
        assert_eq!(third, base.path().join("rel_20240309-140507-1"));
    }

    #[test]
    fn test_creates_missing_base() {
        let base = tempfile::tempdir().unwrap();
        let nested = base.path().join("rpt/deep");
        let dir = resolve_report_dir(&nested, "v2").unwrap();
        assert!(dir.is_dir());
    }
}
