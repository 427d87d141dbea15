//! Build-time snapshot index generation.
//!
//! Lists the snapshot JSON files in a content directory and writes them as
//! a JSON array to `boms.json` in that directory. The index file itself is
//! always excluded from its own listing. Filenames are sorted descending so
//! date-stamped snapshot names come out newest first, which is how the
//! loader interprets entry 0.

use crate::error::{BomDashError, IndexErrorKind, Result};
use crate::loader::DEFAULT_INDEX_FILE;
use std::fs;
use std::path::Path;

/// Generate the index for `dir`, returning the entries written.
pub fn generate_index(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BomDashError::index(
            format!("listing {}", dir.display()),
            IndexErrorKind::UnreadableDirectory(e.to_string()),
        )
    })?;

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json") && name != DEFAULT_INDEX_FILE)
        .collect();
    names.sort_by(|a, b| b.cmp(a));

    let index_path = dir.join(DEFAULT_INDEX_FILE);
    let content = serde_json::to_string(&names)?;
    fs::write(&index_path, content).map_err(|e| {
        BomDashError::index(
            format!("writing {}", index_path.display()),
            IndexErrorKind::WriteFailed(e.to_string()),
        )
    })?;

    tracing::info!(
        path = %index_path.display(),
        snapshots = names.len(),
        "wrote snapshot index"
    );
    Ok(names)
}
