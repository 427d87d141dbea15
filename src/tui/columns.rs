//! Fixed column definitions for the dashboard grid.

use crate::model::BomRow;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Identifies one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    Repo,
    ServiceName,
    Maintainer,
    CiId,
    OpenPrCount,
    TotalPrCount,
    LastCommit,
    CiStatus,
    MinApprovers,
    StatusChecks,
    AllowForce,
    UnitTest,
    Sonar,
    Coverage,
    CoverageLines,
    VeracodeStatus,
    VeracodeApp,
    VeracodeScanDate,
    VeracodeScanResult,
    ScaStatus,
    ScaScanDate,
    ScaIssues,
    Technologies,
    DockerBaseImage,
}

/// One grid column: label, width, and display hints.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: ColumnKey,
    pub label: &'static str,
    pub width: u16,
    /// Cell text may contain newlines; the row grows one line per entry
    pub multiline: bool,
    /// Hidden unless the user toggles the full column set
    pub default_hidden: bool,
}

const fn col(key: ColumnKey, label: &'static str, width: u16) -> Column {
    Column {
        key,
        label,
        width,
        multiline: false,
        default_hidden: false,
    }
}

const fn hidden(key: ColumnKey, label: &'static str, width: u16) -> Column {
    Column {
        key,
        label,
        width,
        multiline: false,
        default_hidden: true,
    }
}

/// The full column set, in display order.
pub const COLUMNS: &[Column] = &[
    col(ColumnKey::Repo, "Repository", 20),
    col(ColumnKey::ServiceName, "Service", 25),
    hidden(ColumnKey::Maintainer, "Maintainer", 18),
    col(ColumnKey::CiId, "ID", 9),
    col(ColumnKey::OpenPrCount, "Open PRs", 8),
    hidden(ColumnKey::TotalPrCount, "Total PRs", 9),
    col(ColumnKey::LastCommit, "Last Commit", 16),
    col(ColumnKey::CiStatus, "CI Status", 9),
    col(ColumnKey::MinApprovers, "Min Approvers", 8),
    col(ColumnKey::StatusChecks, "Status Checks", 9),
    hidden(ColumnKey::AllowForce, "Allow Force", 8),
    col(ColumnKey::UnitTest, "Unit Test (t/s/f)", 13),
    col(ColumnKey::Sonar, "Sonar", 8),
    col(ColumnKey::Coverage, "Coverage", 8),
    hidden(ColumnKey::CoverageLines, "Coverage Lines", 10),
    col(ColumnKey::VeracodeStatus, "Veracode Status", 13),
    hidden(ColumnKey::VeracodeApp, "Veracode App", 14),
    hidden(ColumnKey::VeracodeScanDate, "Veracode Scan Date", 16),
    hidden(ColumnKey::VeracodeScanResult, "Veracode Scan Result", 14),
    col(ColumnKey::ScaStatus, "SCA Status", 10),
    hidden(ColumnKey::ScaScanDate, "SCA Scan Date", 16),
    hidden(ColumnKey::ScaIssues, "SCA Issues", 9),
    Column {
        key: ColumnKey::Technologies,
        label: "Technologies",
        width: 22,
        multiline: true,
        default_hidden: false,
    },
    hidden(ColumnKey::DockerBaseImage, "Docker Base Image", 24),
];

fn fmt_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn fmt_opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl Column {
    /// Cell text for a row. Multiline columns keep their embedded newlines.
    #[must_use]
    pub fn cell_text(&self, row: &BomRow) -> String {
        match self.key {
            ColumnKey::Repo => row.repo.clone(),
            ColumnKey::ServiceName => fmt_opt(&row.service_name),
            ColumnKey::Maintainer => fmt_opt(&row.maintainer_email),
            ColumnKey::CiId => fmt_opt(&row.ci_id),
            ColumnKey::OpenPrCount => fmt_opt(&row.open_pr_count),
            ColumnKey::TotalPrCount => fmt_opt(&row.total_pr_count),
            ColumnKey::LastCommit => fmt_date(row.last_master_commit_ci_time),
            ColumnKey::CiStatus => fmt_opt(&row.last_master_commit_ci_status),
            ColumnKey::MinApprovers => fmt_opt(&row.min_approvers),
            ColumnKey::StatusChecks => fmt_opt(&row.req_status_checks),
            ColumnKey::AllowForce => fmt_opt(&row.allow_force),
            ColumnKey::UnitTest => fmt_opt(&row.unit_test_result),
            ColumnKey::Sonar => fmt_opt(&row.sonar_status),
            ColumnKey::Coverage => fmt_opt(&row.coverage_result),
            ColumnKey::CoverageLines => fmt_opt(&row.coverage_total_lines),
            ColumnKey::VeracodeStatus => fmt_opt(&row.veracode_status),
            ColumnKey::VeracodeApp => fmt_opt(&row.veracode_app),
            ColumnKey::VeracodeScanDate => fmt_date(row.veracode_last_static_scan_date),
            ColumnKey::VeracodeScanResult => fmt_opt(&row.veracode_last_static_scan_result),
            ColumnKey::ScaStatus => fmt_opt(&row.veracode_sca_status),
            ColumnKey::ScaScanDate => fmt_date(row.veracode_sca_last_scan_date),
            ColumnKey::ScaIssues => fmt_opt(&row.veracode_sca_vulnerability_count),
            ColumnKey::Technologies => fmt_opt(&row.technologies),
            ColumnKey::DockerBaseImage => fmt_opt(&row.docker_base_image),
        }
    }

    /// Compare two rows under this column; unset values sort last.
    #[must_use]
    pub fn compare(&self, a: &BomRow, b: &BomRow) -> Ordering {
        match self.key {
            ColumnKey::OpenPrCount => cmp_opt(a.open_pr_count, b.open_pr_count),
            ColumnKey::TotalPrCount => cmp_opt(a.total_pr_count, b.total_pr_count),
            ColumnKey::MinApprovers => cmp_opt(a.min_approvers, b.min_approvers),
            ColumnKey::CoverageLines => cmp_opt(a.coverage_total_lines, b.coverage_total_lines),
            ColumnKey::ScaIssues => cmp_opt(
                a.veracode_sca_vulnerability_count,
                b.veracode_sca_vulnerability_count,
            ),
            ColumnKey::LastCommit => {
                cmp_opt(a.last_master_commit_ci_time, b.last_master_commit_ci_time)
            }
            ColumnKey::VeracodeScanDate => cmp_opt(
                a.veracode_last_static_scan_date,
                b.veracode_last_static_scan_date,
            ),
            ColumnKey::ScaScanDate => {
                cmp_opt(a.veracode_sca_last_scan_date, b.veracode_sca_last_scan_date)
            }
            _ => self.cell_text(a).to_lowercase().cmp(&self.cell_text(b).to_lowercase()),
        }
    }
}

/// Order options with `None` last.
fn cmp_opt<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
