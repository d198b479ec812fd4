//! Collectors: thin glue between [`crate::fs::FileSystem`] and the pure
//! parsers in [`crate::parse`], producing the typed records
//! [`crate::model`] defines. Parsing and file I/O are kept in separate
//! modules so the parsers can be exercised with string fixtures alone.
//!
//! Every function here follows the same reader contract: a source file
//! that does not exist yields zero entities rather than an error; a
//! source file that exists but fails to parse surfaces a
//! [`crate::error::CollectError`]. There is no fixed-size read buffer to
//! retry against here — `String`'s amortized growth makes a
//! doubling-buffer retry loop unnecessary; see `DESIGN.md` for the
//! rationale.

pub mod cifs;
pub mod filesystem;
pub mod process;
pub mod system;
pub mod tape;
pub mod topology;

use crate::error::CollectError;
use crate::fs::FileSystem;
use std::path::Path;

/// Reads a source file, treating "does not exist" as "no data" rather
/// than an error.
fn read_optional(fs: &dyn FileSystem, path: &Path) -> Result<Option<String>, CollectError> {
    if !fs.exists(path) {
        return Ok(None);
    }
    match fs.read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
