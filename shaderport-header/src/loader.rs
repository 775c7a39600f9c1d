use crate::formats::{HeaderFormat, RawStringHeader};
use crate::{Extraction, HeaderError};
use std::path::Path;

/// Loads every shader declared in a header file.
///
/// # Arguments
///
/// * `path` - The path to the source header
///
/// # Returns
///
/// The extraction produced by [`RawStringHeader`], or a `HeaderError::Io`
/// naming `path` when the file cannot be read.
pub fn load_from_file(path: &Path) -> Result<Extraction, HeaderError> {
    load_with_format(path, &RawStringHeader::new())
}

/// Loads a header using an explicit format.
pub fn load_with_format(path: &Path, format: &dyn HeaderFormat) -> Result<Extraction, HeaderError> {
    let content = std::fs::read_to_string(path).map_err(|source| HeaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Scanning {:?} ({} bytes) as {}",
        path,
        content.len(),
        format.format_name()
    );
    Ok(format.extract(&content))
}
