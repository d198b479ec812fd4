//! CIFS mount collector: wraps [`crate::parse::cifs`] over
//! `/proc/fs/cifs/Stats`.

use crate::error::CollectError;
use crate::fs::FileSystem;
use crate::model::CifsRaw;
use crate::parse;
use std::path::Path;

/// Reads `<proc_root>/fs/cifs/Stats`. No mounted CIFS shares (file
/// absent, or present but empty) yields an empty list rather than an
/// error.
pub fn read_cifs_stats(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<(String, CifsRaw)>, CollectError> {
    let path = proc_root.join("fs/cifs/Stats");
    if !fs.exists(&path) {
        return Ok(Vec::new());
    }
    match parse::cifs::parse_cifs_stats(&fs.read_to_string(&path)?) {
        Ok(rows) => Ok(rows),
        Err(_) => Ok(Vec::new()),
    }
}
