//! Row generation: flattening a snapshot into grid rows.
//!
//! This is the core of the dashboard. [`generate_rows`] is a pure
//! transformation from one [`BomSnapshot`] to an ordered sequence of
//! [`BomRow`] records: row order follows the document's repository order,
//! and within a repository the declaration order of its services. The
//! generator never mutates its input and never fails on missing data -
//! every scanner field is independently optional and has a specified
//! default.

use crate::model::{
    BomRow, BomSnapshot, Dockerfile, GithubMeta, JenkinsScan, RepoManifest, RepoScans,
    ServiceManifest, Technology,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Repository name that holds tooling configuration, never a service.
const EXCLUDED_REPO: &str = ".github";

/// Placeholder token stripped from dockerfile base image names.
const BUILD_REGISTRY_TOKEN: &str = "${BUILD_REGISTRY}";

/// Flatten a snapshot into one row per repository-without-manifest or per
/// declared service.
#[must_use]
pub fn generate_rows(snapshot: &BomSnapshot) -> Vec<BomRow> {
    let mut rows = Vec::new();
    let no_jenkins = JenkinsScan::default();

    for (repo, scans) in &snapshot.repos {
        if repo == EXCLUDED_REPO {
            tracing::debug!(repo, "skipping tooling repository");
            continue;
        }

        let manifest = scans.manifest.as_ref().and_then(|m| m.manifest.as_ref());
        let github = scans.manifest.as_ref().and_then(|m| m.github.as_ref());
        let dockerfile = scans.manifest.as_ref().and_then(|m| m.dockerfile.as_ref());
        let jenkins = scans.jenkins.as_ref().unwrap_or(&no_jenkins);

        let mut base = BomRow::for_repo(repo);
        if let Some(github) = github {
            apply_github(&mut base, github);
        }
        if let Some(dockerfile) = dockerfile {
            apply_dockerfile(&mut base, dockerfile);
        }

        // A manifest without a project name or without services is unusable:
        // the base row is all that can be shown for this repository.
        let usable = manifest.filter(|m| {
            m.project_name.as_deref().is_some_and(|p| !p.is_empty()) && !m.manifests.is_empty()
        });
        let Some(manifest) = usable else {
            rows.push(base);
            continue;
        };

        for service in &manifest.manifests {
            rows.push(service_row(&base, repo, manifest, service, jenkins, scans));
        }
    }

    rows
}

/// Copy source-control fields onto the base row.
fn apply_github(row: &mut BomRow, github: &GithubMeta) {
    row.open_pr_count = github.open_pr_count;
    row.total_pr_count = github.total_pr_count;

    if let Some(status) = &github.master_status {
        // CI status time wins over the raw commit time; an unparseable value
        // leaves the field unset (degraded, not an error).
        row.last_master_commit_ci_time = status
            .commit_status_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| status.commit_time.as_deref().filter(|t| !t.is_empty()))
            .and_then(parse_scan_date);
        row.last_master_commit_ci_status = status.commit_status_state.clone();
    }

    // A configured minimum only counts while branch protection is on; a
    // missing or zero minimum reads as 0 either way.
    row.min_approvers = Some(if github.has_main_branch_protection {
        github.main_branch_min_approvals.unwrap_or(0)
    } else {
        0
    });
    row.req_status_checks = Some(
        if github.main_branch_req_status_checks {
            "Required"
        } else {
            "None"
        }
        .to_string(),
    );
    row.allow_force = github.main_branch_allow_force;
}

/// Copy container build fields onto the base row.
fn apply_dockerfile(row: &mut BomRow, dockerfile: &Dockerfile) {
    let Some(image) = dockerfile.base_image.as_deref().filter(|i| !i.is_empty()) else {
        return;
    };
    let image = image.replace(BUILD_REGISTRY_TOKEN, "");
    let version = dockerfile.base_version.as_deref().unwrap_or_default();
    row.docker_base_image = Some(format!("{image}:{version}"));
    row.technologies = format_technologies(&dockerfile.technologies);
}

/// Derive a service row by overlaying service, CI, and compliance fields on
/// a copy of the repository base row.
fn service_row(
    base: &BomRow,
    repo: &str,
    manifest: &RepoManifest,
    service: &ServiceManifest,
    jenkins: &JenkinsScan,
    scans: &RepoScans,
) -> BomRow {
    let mut row = base.clone();
    let project = manifest.project_name.as_deref().unwrap_or_default();

    row.id = format!("{repo} - {}", service.project_name);
    row.service_name = Some(format!("{project} - {}", service.project_name));
    row.maintainer_email = manifest.maintainer_email.clone();
    row.ci_id = service
        .configurations
        .as_ref()
        .and_then(|c| c.dtcom.as_ref())
        .and_then(|d| d.ci_id.clone());
    row.veracode_app = service.veracode_app.clone();

    // Repository-level dockerfile image takes precedence over the
    // service-level declaration.
    if row.docker_base_image.is_none() {
        row.docker_base_image = service.docker.as_ref().and_then(|d| d.base_image.clone());
    }

    // Overwritten, never merged with the dockerfile list.
    row.technologies = format_technologies(&service.technologies);

    row.unit_test_result = Some(if jenkins.test_results_available {
        format!(
            "{}/{}/{}",
            jenkins.test_total_count, jenkins.test_skip_count, jenkins.test_fail_count
        )
    } else {
        "None".to_string()
    });

    // Skip takes precedence over availability when both flags are set.
    row.sonar_status = Some(
        if jenkins.sonar_skipped {
            "Skipped"
        } else if jenkins.sonar_available {
            "Enabled"
        } else {
            "None"
        }
        .to_string(),
    );

    row.coverage_result = Some("None".to_string());
    if let Some(pct) = jenkins.coverage_percent {
        // Zero coverage reads as "no data", matching the upstream collector.
        if pct != 0.0 {
            row.coverage_result = Some(to_precision(pct, 4));
            row.coverage_total_lines = jenkins.coverage_lines_analyzed;
        }
    }

    apply_veracode(&mut row, service, scans);
    apply_sca(&mut row, service, scans);

    row
}

/// Overlay the static-analysis compliance block for one service.
fn apply_veracode(row: &mut BomRow, service: &ServiceManifest, scans: &RepoScans) {
    row.veracode_status = Some("Missing".to_string());

    let component = scans
        .veracode
        .as_ref()
        .and_then(|v| v.components.iter().find(|c| c.component_name == service.project_name));
    let Some(vc) = component else {
        return;
    };

    row.veracode_app = vc
        .veracode_app_name_actual
        .clone()
        .or_else(|| vc.veracode_app_name.clone());
    row.veracode_status = vc.veracode_status.clone();
    row.veracode_app_profile_url = vc.veracode_app_profile_url.clone();
    row.veracode_last_static_scan_result = vc.last_static_scan_result.clone();
    row.veracode_last_static_scan_date =
        vc.last_static_scan_date.as_deref().and_then(parse_scan_date);

    // Flag declared/actual app name mismatches for the analyst.
    if vc.veracode_app_name.is_some() && vc.veracode_app_name != vc.veracode_app_name_actual {
        match row.veracode_app.as_mut() {
            Some(app) => app.push_str(" (!)"),
            None => row.veracode_app = Some("(!)".to_string()),
        }
    }
}

/// Overlay the software-composition-analysis block for one service.
fn apply_sca(row: &mut BomRow, service: &ServiceManifest, scans: &RepoScans) {
    row.veracode_sca_status = Some("Missing".to_string());

    let component = scans
        .veracode_sca
        .as_ref()
        .and_then(|v| v.components.iter().find(|c| c.component_name == service.project_name));
    let Some(sca) = component else {
        return;
    };

    row.veracode_sca_status = sca.status.clone();
    row.veracode_sca_last_scan_date = sca.last_scan_date.as_deref().and_then(parse_scan_date);
    row.veracode_sca_vulnerability_count = sca.vulnerability_issue_count;
    row.veracode_sca_profile_url = sca.profile_url.clone();
}

// ============================================================================
// Pure helpers
// ============================================================================

/// Join technologies as newline-separated `name@version` pairs.
///
/// An empty list yields `None` so a service with no technologies also
/// clears any repository-level dockerfile list.
#[must_use]
pub fn format_technologies(technologies: &[Technology]) -> Option<String> {
    if technologies.is_empty() {
        return None;
    }
    Some(
        technologies
            .iter()
            .map(|t| format!("{}@{}", t.name, t.version))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Format a value to `digits` significant digits, the grid's display rule
/// for coverage percentages.
#[must_use]
pub fn to_precision(value: f64, digits: u32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", digits.saturating_sub(1) as usize, value);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}

/// Parse a scanner-supplied timestamp string.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, and bare dates. Anything else
/// is the documented degraded state: the field stays unset.
#[must_use]
pub fn parse_scan_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Configurations, DtcomConfig, GithubMeta, ManifestScan, MasterStatus, RepoManifest,
        ScaComponent, ScaScan, ServiceDocker, VeracodeComponent, VeracodeScan,
    };
    use indexmap::IndexMap;

    fn make_service(name: &str) -> ServiceManifest {
        ServiceManifest {
            project_name: name.to_string(),
            ..ServiceManifest::default()
        }
    }

    fn make_manifest(project: &str, services: Vec<ServiceManifest>) -> RepoManifest {
        RepoManifest {
            project_name: Some(project.to_string()),
            maintainer_email: Some("team@example.com".to_string()),
            manifests: services,
        }
    }

    fn make_scans(manifest: RepoManifest) -> RepoScans {
        RepoScans {
            manifest: Some(ManifestScan {
                manifest: Some(manifest),
                ..ManifestScan::default()
            }),
            ..RepoScans::default()
        }
    }

    fn snapshot_with(repos: Vec<(&str, RepoScans)>) -> BomSnapshot {
        let mut map = IndexMap::new();
        for (name, scans) in repos {
            map.insert(name.to_string(), scans);
        }
        BomSnapshot {
            scan_date: "2026-08-01T00:00:00Z".to_string(),
            repos: map,
            ..BomSnapshot::default()
        }
    }

    #[test]
    fn test_single_service_row() {
        let scans = make_scans(make_manifest("A", vec![make_service("svc1")]));
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, "A - svc1");
        assert_eq!(row.repo, "A");
        assert_eq!(row.service_name.as_deref(), Some("A - svc1"));
        assert_eq!(row.maintainer_email.as_deref(), Some("team@example.com"));
        assert_eq!(row.veracode_status.as_deref(), Some("Missing"));
        assert_eq!(row.veracode_sca_status.as_deref(), Some("Missing"));
    }

    #[test]
    fn test_github_tooling_repo_is_excluded() {
        let scans = make_scans(make_manifest("X", vec![make_service("svc")]));
        let rows = generate_rows(&snapshot_with(vec![(".github", scans)]));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_repo_without_manifest_yields_base_row() {
        let rows = generate_rows(&snapshot_with(vec![("bare", RepoScans::default())]));

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, "bare");
        assert!(row.service_name.is_none());
        assert!(row.maintainer_email.is_none());
        assert!(row.min_approvers.is_none());
        assert!(row.req_status_checks.is_none());
        assert!(row.veracode_status.is_none());
    }

    #[test]
    fn test_manifest_without_services_yields_base_row() {
        let scans = make_scans(make_manifest("A", vec![]));
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "A");
        assert!(rows[0].service_name.is_none());
    }

    #[test]
    fn test_manifest_without_project_name_yields_base_row() {
        let manifest = RepoManifest {
            project_name: None,
            maintainer_email: None,
            manifests: vec![make_service("svc")],
        };
        let rows = generate_rows(&snapshot_with(vec![("A", make_scans(manifest))]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "A");
    }

    #[test]
    fn test_service_count_matches_row_count() {
        let scans = make_scans(make_manifest(
            "multi",
            vec![make_service("a"), make_service("b"), make_service("c")],
        ));
        let rows = generate_rows(&snapshot_with(vec![("multi", scans)]));

        assert_eq!(rows.len(), 3);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["multi - a", "multi - b", "multi - c"]);
    }

    #[test]
    fn test_github_fields_on_base_row() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.manifest.as_mut().unwrap().github = Some(GithubMeta {
            open_pr_count: Some(3),
            total_pr_count: Some(40),
            master_status: Some(MasterStatus {
                commit_time: Some("2026-07-01T10:00:00Z".to_string()),
                commit_status_time: Some("2026-07-01T10:05:00Z".to_string()),
                commit_status_state: Some("success".to_string()),
            }),
            has_main_branch_protection: true,
            main_branch_min_approvals: Some(2),
            main_branch_req_status_checks: true,
            main_branch_allow_force: Some(false),
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));

        let row = &rows[0];
        assert_eq!(row.open_pr_count, Some(3));
        assert_eq!(row.total_pr_count, Some(40));
        assert_eq!(row.min_approvers, Some(2));
        assert_eq!(row.req_status_checks.as_deref(), Some("Required"));
        assert_eq!(row.allow_force, Some(false));
        assert_eq!(row.last_master_commit_ci_status.as_deref(), Some("success"));
        // Status time wins over commit time
        assert_eq!(
            row.last_master_commit_ci_time.unwrap(),
            parse_scan_date("2026-07-01T10:05:00Z").unwrap()
        );
    }

    #[test]
    fn test_min_approvers_zero_without_protection() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.manifest.as_mut().unwrap().github = Some(GithubMeta {
            has_main_branch_protection: false,
            main_branch_min_approvals: Some(2),
            ..GithubMeta::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].min_approvers, Some(0));
        assert_eq!(rows[0].req_status_checks.as_deref(), Some("None"));
    }

    #[test]
    fn test_commit_time_fallback_and_degraded_state() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.manifest.as_mut().unwrap().github = Some(GithubMeta {
            master_status: Some(MasterStatus {
                commit_time: Some("2026-07-01 09:00:00".to_string()),
                commit_status_time: None,
                commit_status_state: None,
            }),
            ..GithubMeta::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans.clone())]));
        assert!(rows[0].last_master_commit_ci_time.is_some());

        // Unparseable time is a recognized degraded state, not an error
        scans
            .manifest
            .as_mut()
            .unwrap()
            .github
            .as_mut()
            .unwrap()
            .master_status = Some(MasterStatus {
            commit_time: Some("not a timestamp".to_string()),
            ..MasterStatus::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert!(rows[0].last_master_commit_ci_time.is_none());
    }

    #[test]
    fn test_dockerfile_base_image_and_registry_stripping() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.manifest.as_mut().unwrap().dockerfile = Some(Dockerfile {
            base_image: Some("${BUILD_REGISTRY}library/alpine".to_string()),
            base_version: Some("3.19".to_string()),
            technologies: vec![Technology {
                name: "openssl".to_string(),
                version: "3.1".to_string(),
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(
            rows[0].docker_base_image.as_deref(),
            Some("library/alpine:3.19")
        );
    }

    #[test]
    fn test_service_image_only_fills_when_base_unset() {
        let mut service = make_service("svc");
        service.docker = Some(ServiceDocker {
            base_image: Some("svc-image:1".to_string()),
        });

        // No dockerfile at repo level: service image fills in
        let scans = make_scans(make_manifest("A", vec![service.clone()]));
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].docker_base_image.as_deref(), Some("svc-image:1"));

        // Repo-level dockerfile image takes precedence
        let mut scans = make_scans(make_manifest("A", vec![service]));
        scans.manifest.as_mut().unwrap().dockerfile = Some(Dockerfile {
            base_image: Some("repo-image".to_string()),
            base_version: Some("2".to_string()),
            technologies: vec![],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].docker_base_image.as_deref(), Some("repo-image:2"));
    }

    #[test]
    fn test_service_technologies_overwrite_dockerfile_list() {
        let mut service = make_service("svc");
        service.technologies = vec![Technology {
            name: "rust".to_string(),
            version: "1.70".to_string(),
        }];
        let mut scans = make_scans(make_manifest("A", vec![service]));
        scans.manifest.as_mut().unwrap().dockerfile = Some(Dockerfile {
            base_image: Some("img".to_string()),
            base_version: Some("1".to_string()),
            technologies: vec![Technology {
                name: "docker-only".to_string(),
                version: "9".to_string(),
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].technologies.as_deref(), Some("rust@1.70"));
    }

    #[test]
    fn test_empty_service_technologies_clear_dockerfile_list() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.manifest.as_mut().unwrap().dockerfile = Some(Dockerfile {
            base_image: Some("img".to_string()),
            base_version: None,
            technologies: vec![Technology {
                name: "docker-only".to_string(),
                version: "9".to_string(),
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert!(rows[0].technologies.is_none());
    }

    #[test]
    fn test_unit_test_result_format() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.jenkins = Some(JenkinsScan {
            test_results_available: true,
            test_total_count: 120,
            test_skip_count: 3,
            test_fail_count: 1,
            ..JenkinsScan::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].unit_test_result.as_deref(), Some("120/3/1"));
    }

    #[test]
    fn test_unit_test_result_none_without_results() {
        let scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].unit_test_result.as_deref(), Some("None"));
        assert_eq!(rows[0].sonar_status.as_deref(), Some("None"));
        assert_eq!(rows[0].coverage_result.as_deref(), Some("None"));
    }

    #[test]
    fn test_sonar_skip_overrides_available() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.jenkins = Some(JenkinsScan {
            sonar_available: true,
            sonar_skipped: true,
            ..JenkinsScan::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans.clone())]));
        assert_eq!(rows[0].sonar_status.as_deref(), Some("Skipped"));

        scans.jenkins.as_mut().unwrap().sonar_skipped = false;
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].sonar_status.as_deref(), Some("Enabled"));
    }

    #[test]
    fn test_zero_coverage_stays_none() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.jenkins = Some(JenkinsScan {
            coverage_percent: Some(0.0),
            coverage_lines_analyzed: Some(5000),
            ..JenkinsScan::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].coverage_result.as_deref(), Some("None"));
        assert!(rows[0].coverage_total_lines.is_none());
    }

    #[test]
    fn test_coverage_formatting() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.jenkins = Some(JenkinsScan {
            coverage_percent: Some(85.5),
            coverage_lines_analyzed: Some(5000),
            ..JenkinsScan::default()
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].coverage_result.as_deref(), Some("85.50"));
        assert_eq!(rows[0].coverage_total_lines, Some(5000));
    }

    #[test]
    fn test_veracode_match_copies_fields() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.veracode = Some(VeracodeScan {
            components: vec![VeracodeComponent {
                component_name: "svc".to_string(),
                veracode_app_name: Some("app".to_string()),
                veracode_app_name_actual: Some("app".to_string()),
                veracode_status: Some("Compliant".to_string()),
                veracode_app_profile_url: Some("https://vc/app".to_string()),
                last_static_scan_result: Some("Pass".to_string()),
                last_static_scan_date: Some("2026-07-15".to_string()),
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        let row = &rows[0];
        assert_eq!(row.veracode_status.as_deref(), Some("Compliant"));
        assert_eq!(row.veracode_app.as_deref(), Some("app"));
        assert_eq!(row.veracode_app_profile_url.as_deref(), Some("https://vc/app"));
        assert_eq!(row.veracode_last_static_scan_result.as_deref(), Some("Pass"));
        assert!(row.veracode_last_static_scan_date.is_some());
    }

    #[test]
    fn test_veracode_app_name_mismatch_is_flagged() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.veracode = Some(VeracodeScan {
            components: vec![VeracodeComponent {
                component_name: "svc".to_string(),
                veracode_app_name: Some("declared".to_string()),
                veracode_app_name_actual: Some("actual".to_string()),
                veracode_status: Some("Outdated".to_string()),
                ..VeracodeComponent::default()
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].veracode_app.as_deref(), Some("actual (!)"));
    }

    #[test]
    fn test_veracode_unmatched_keeps_declared_app() {
        let mut service = make_service("svc");
        service.veracode_app = Some("declared-app".to_string());
        let mut scans = make_scans(make_manifest("A", vec![service]));
        scans.veracode = Some(VeracodeScan {
            components: vec![VeracodeComponent {
                component_name: "other".to_string(),
                ..VeracodeComponent::default()
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].veracode_status.as_deref(), Some("Missing"));
        assert_eq!(rows[0].veracode_app.as_deref(), Some("declared-app"));
    }

    #[test]
    fn test_sca_match_copies_fields() {
        let mut scans = make_scans(make_manifest("A", vec![make_service("svc")]));
        scans.veracode_sca = Some(ScaScan {
            components: vec![ScaComponent {
                component_name: "svc".to_string(),
                status: Some("Vulnerable".to_string()),
                last_scan_date: Some("2026-07-20T08:00:00Z".to_string()),
                vulnerability_issue_count: Some(7),
                profile_url: Some("https://sca/svc".to_string()),
            }],
        });
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        let row = &rows[0];
        assert_eq!(row.veracode_sca_status.as_deref(), Some("Vulnerable"));
        assert_eq!(row.veracode_sca_vulnerability_count, Some(7));
        assert_eq!(row.veracode_sca_profile_url.as_deref(), Some("https://sca/svc"));
        assert!(row.veracode_sca_last_scan_date.is_some());
    }

    #[test]
    fn test_ci_id_from_configuration() {
        let mut service = make_service("svc");
        service.configurations = Some(Configurations {
            dtcom: Some(DtcomConfig {
                ci_id: Some("CI-42".to_string()),
            }),
        });
        let scans = make_scans(make_manifest("A", vec![service]));
        let rows = generate_rows(&snapshot_with(vec![("A", scans)]));
        assert_eq!(rows[0].ci_id.as_deref(), Some("CI-42"));
    }

    #[test]
    fn test_row_ids_are_unique() {
        let scans_a = make_scans(make_manifest("A", vec![make_service("x"), make_service("y")]));
        let scans_b = make_scans(make_manifest("B", vec![make_service("x")]));
        let rows = generate_rows(&snapshot_with(vec![
            ("A", scans_a),
            ("B", scans_b),
            ("C", RepoScans::default()),
        ]));

        let mut ids: Vec<_> = rows.iter().map(|r| r.id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let scans = make_scans(make_manifest("A", vec![make_service("x"), make_service("y")]));
        let snapshot = snapshot_with(vec![("A", scans), ("B", RepoScans::default())]);
        assert_eq!(generate_rows(&snapshot), generate_rows(&snapshot));
    }

    #[test]
    fn test_to_precision() {
        assert_eq!(to_precision(85.5, 4), "85.50");
        assert_eq!(to_precision(0.5, 4), "0.5000");
        assert_eq!(to_precision(100.0, 4), "100.0");
        assert_eq!(to_precision(7.0, 4), "7.000");
        assert_eq!(to_precision(99.99, 4), "99.99");
    }

    #[test]
    fn test_parse_scan_date_formats() {
        assert!(parse_scan_date("2026-07-15T10:30:00Z").is_some());
        assert!(parse_scan_date("2026-07-15 10:30:00").is_some());
        assert!(parse_scan_date("2026-07-15").is_some());
        assert!(parse_scan_date("last tuesday").is_none());
        assert!(parse_scan_date("").is_none());
    }
}
