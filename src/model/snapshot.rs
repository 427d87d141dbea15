//! Typed BOM snapshot document.
//!
//! A snapshot is the output of a multi-scanner run over a set of
//! repositories. The upstream collectors emit loosely structured JSON;
//! this model makes every optional traversal explicit: each scanner
//! sub-record is an `Option`, each collection defaults to empty, and a
//! missing field is valid data ("no result from that scanner"), never a
//! parse error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One BOM snapshot document - the input to row generation.
///
/// `repos` uses an [`IndexMap`] so rows come out in the document's own
/// repository order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BomSnapshot {
    /// When the scan was produced. Must be non-empty for a snapshot to be
    /// accepted by the loader.
    #[serde(default)]
    pub scan_date: String,
    /// Scan start as a UTC epoch value
    #[serde(default)]
    pub scan_start_utc_time: Option<f64>,
    /// Scan wall-clock duration in milliseconds
    #[serde(default)]
    pub scan_elapsed_ms: Option<f64>,
    /// Organizations covered by the scan
    #[serde(default)]
    pub orgs: Vec<String>,
    /// Repository whitelist used by the collector (informational)
    #[serde(default)]
    pub repo_whitelist: Vec<String>,
    /// Scanner names that ran (informational)
    #[serde(default)]
    pub scanners: Vec<String>,
    /// Per-repository scanner output, keyed by repository name
    #[serde(default)]
    pub repos: IndexMap<String, RepoScans>,
}

/// Scanner output for one repository. Any scanner may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoScans {
    /// Manifest scanner: declared services plus source-control and
    /// container build metadata
    #[serde(default)]
    pub manifest: Option<ManifestScan>,
    /// CI test and coverage results
    #[serde(default)]
    pub jenkins: Option<JenkinsScan>,
    /// Static-analysis compliance scan
    #[serde(default)]
    pub veracode: Option<VeracodeScan>,
    /// Software-composition-analysis scan
    #[serde(default)]
    pub veracode_sca: Option<ScaScan>,
}

/// Output of the manifest scanner, bundling three sub-records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestScan {
    /// Declared project/service manifest
    #[serde(default)]
    pub manifest: Option<RepoManifest>,
    /// Source-control metadata
    #[serde(default)]
    pub github: Option<GithubMeta>,
    /// Container build metadata
    #[serde(default)]
    pub dockerfile: Option<Dockerfile>,
}

/// Declared repository manifest: project identity and constituent services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoManifest {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub maintainer_email: Option<String>,
    /// One entry per deployable service declared in the repository
    #[serde(default)]
    pub manifests: Vec<ServiceManifest>,
}

/// One declared service within a repository manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceManifest {
    #[serde(default)]
    pub project_name: String,
    /// Veracode application name declared for this service
    #[serde(default)]
    pub veracode_app: Option<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    /// Service-level container settings
    #[serde(default)]
    pub docker: Option<ServiceDocker>,
    #[serde(default)]
    pub configurations: Option<Configurations>,
}

/// Per-service CI integration configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configurations {
    #[serde(default)]
    pub dtcom: Option<DtcomConfig>,
}

/// The dtcom CI integration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DtcomConfig {
    #[serde(default)]
    pub ci_id: Option<String>,
}

/// Service-level container build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDocker {
    #[serde(default)]
    pub base_image: Option<String>,
}

/// Source-control metadata for a repository's main branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubMeta {
    #[serde(default)]
    pub open_pr_count: Option<u64>,
    #[serde(default)]
    pub total_pr_count: Option<u64>,
    /// Status of the newest commit on the main branch
    #[serde(default)]
    pub master_status: Option<MasterStatus>,
    #[serde(default)]
    pub has_main_branch_protection: bool,
    #[serde(default)]
    pub main_branch_min_approvals: Option<u64>,
    #[serde(default)]
    pub main_branch_req_status_checks: bool,
    #[serde(default)]
    pub main_branch_allow_force: Option<bool>,
}

/// Commit and CI status of the newest main-branch commit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterStatus {
    /// Commit timestamp
    #[serde(default)]
    pub commit_time: Option<String>,
    /// CI status timestamp, preferred over `commit_time` when present
    #[serde(default)]
    pub commit_status_time: Option<String>,
    /// CI status state (e.g. "success", "failure")
    #[serde(default)]
    pub commit_status_state: Option<String>,
}

/// Container build metadata extracted from a repository's Dockerfile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dockerfile {
    /// Base image name; may contain the `${BUILD_REGISTRY}` placeholder
    #[serde(default)]
    pub base_image: Option<String>,
    #[serde(default)]
    pub base_version: Option<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

/// A detected technology with its version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Technology {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// CI test and coverage results for one repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JenkinsScan {
    #[serde(default)]
    pub test_results_available: bool,
    #[serde(default)]
    pub test_total_count: u64,
    #[serde(default)]
    pub test_skip_count: u64,
    #[serde(default)]
    pub test_fail_count: u64,
    #[serde(default)]
    pub sonar_available: bool,
    #[serde(default)]
    pub sonar_skipped: bool,
    /// Line coverage percentage; zero reads as "no data" downstream
    #[serde(default)]
    pub coverage_percent: Option<f64>,
    #[serde(default)]
    pub coverage_lines_analyzed: Option<u64>,
}

/// Static-analysis compliance scan results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeracodeScan {
    #[serde(default)]
    pub components: Vec<VeracodeComponent>,
}

/// One component tracked by the static-analysis scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeracodeComponent {
    /// Matched against a service's `project_name`
    #[serde(default)]
    pub component_name: String,
    /// App name as declared in the manifest
    #[serde(default)]
    pub veracode_app_name: Option<String>,
    /// App name as actually registered in the scanner
    #[serde(default)]
    pub veracode_app_name_actual: Option<String>,
    #[serde(default)]
    pub veracode_status: Option<String>,
    #[serde(default)]
    pub veracode_app_profile_url: Option<String>,
    #[serde(default)]
    pub last_static_scan_result: Option<String>,
    #[serde(default)]
    pub last_static_scan_date: Option<String>,
}

/// Software-composition-analysis scan results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaScan {
    #[serde(default)]
    pub components: Vec<ScaComponent>,
}

/// One component tracked by the SCA scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaComponent {
    /// Matched against a service's `project_name`
    #[serde(default)]
    pub component_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_scan_date: Option<String>,
    #[serde(default)]
    pub vulnerability_issue_count: Option<u64>,
    #[serde(default)]
    pub profile_url: Option<String>,
}

impl BomSnapshot {
    /// Whether the snapshot carries the required scan date.
    #[must_use]
    pub fn has_scan_date(&self) -> bool {
        !self.scan_date.trim().is_empty()
    }

    /// Scan duration rounded up to whole seconds, for display.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        match self.scan_elapsed_ms {
            Some(ms) if ms > 0.0 => (ms / 1000.0).ceil() as u64,
            _ => 0,
        }
    }
}
