//! Core data structures: the BOM snapshot document and the flat row record.

mod row;
mod snapshot;

pub use row::BomRow;
pub use snapshot::{
    BomSnapshot, Configurations, DtcomConfig, Dockerfile, GithubMeta, JenkinsScan, ManifestScan,
    MasterStatus, RepoManifest, RepoScans, ScaComponent, ScaScan, ServiceDocker, ServiceManifest,
    Technology, VeracodeComponent, VeracodeScan,
};
