//! The flat row record produced from a snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the dashboard grid.
///
/// A repository without a usable manifest yields a single row carrying only
/// repository-level fields; a manifest declaring N services yields N rows.
/// Every field besides `id` and `repo` is optional: absence means "no data
/// from that scanner for this entity", not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomRow {
    /// Unique row identifier: the repository name, or
    /// `"{repo} - {service}"` when the repository declares services
    pub id: String,
    /// Repository name
    pub repo: String,

    /// `"{project} - {service}"` display name
    pub service_name: Option<String>,
    pub maintainer_email: Option<String>,
    /// CI integration identifier from the service configuration
    pub ci_id: Option<String>,

    pub open_pr_count: Option<u64>,
    pub total_pr_count: Option<u64>,
    /// CI status time of the newest main-branch commit, falling back to the
    /// commit time; unset when neither parses (a degraded state, not an error)
    pub last_master_commit_ci_time: Option<DateTime<Utc>>,
    pub last_master_commit_ci_status: Option<String>,
    /// Required approval count; 0 unless branch protection is enabled and a
    /// minimum is configured
    pub min_approvers: Option<u64>,
    /// "Required" or "None"
    pub req_status_checks: Option<String>,
    pub allow_force: Option<bool>,

    /// `image:version` with the build-registry placeholder stripped
    pub docker_base_image: Option<String>,
    /// Newline-joined `name@version` pairs
    pub technologies: Option<String>,

    /// `"{total}/{skip}/{fail}"` or "None"
    pub unit_test_result: Option<String>,
    /// "None", "Enabled", or "Skipped"
    pub sonar_status: Option<String>,
    /// Coverage percentage to 4 significant digits, or "None"
    pub coverage_result: Option<String>,
    pub coverage_total_lines: Option<u64>,

    /// Veracode app name; suffixed with `" (!)"` when the declared and
    /// actual names disagree
    pub veracode_app: Option<String>,
    pub veracode_status: Option<String>,
    pub veracode_last_static_scan_date: Option<DateTime<Utc>>,
    pub veracode_last_static_scan_result: Option<String>,
    pub veracode_app_profile_url: Option<String>,

    pub veracode_sca_status: Option<String>,
    pub veracode_sca_last_scan_date: Option<DateTime<Utc>>,
    pub veracode_sca_vulnerability_count: Option<u64>,
    pub veracode_sca_profile_url: Option<String>,
}

impl BomRow {
    /// Create a repository-level row with all scanner fields unset.
    #[must_use]
    pub fn for_repo(repo: &str) -> Self {
        Self {
            id: repo.to_string(),
            repo: repo.to_string(),
            ..Self::default()
        }
    }

    /// Whether the row names a service (used by the default grid filter).
    #[must_use]
    pub fn has_service(&self) -> bool {
        self.service_name
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}
