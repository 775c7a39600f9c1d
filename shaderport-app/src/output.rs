use crate::error::AppError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replaces `output_path` with `content` in one step.
///
/// The content is written to a temporary file next to the destination and
/// renamed over it, so readers see either the previous header or the new one,
/// never a partial file. On failure the destination is left as it was.
pub fn write_atomically(output_path: &Path, content: &str) -> Result<(), AppError> {
    log::info!("Writing {} bytes to {:?}...", content.len(), output_path);
    let write_error = |source| AppError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    staged.write_all(content.as_bytes()).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged
        .persist(output_path)
        .map_err(|e| write_error(e.error))?;

    log::info!("Successfully wrote {:?}", output_path);
    Ok(())
}
