//! Output file naming with numbered disambiguation
//!
//! The existence check and the later write are separate steps, so two
//! processes targeting the same directory can still race for a name.

use crate::io::configuration::{MAX_NAME_ATTEMPTS, OUTPUT_SUFFIX};
use crate::io::error::{MosaicError, Result, file_system, invalid_input};
use std::path::{Path, PathBuf};

/// Mosaic file name for a target: `<stem>_mosaic.<ext>`
///
/// # Errors
///
/// Returns `InvalidInput` if the target has no UTF-8 file stem.
pub fn default_output_name(target: &Path) -> Result<String> {
    let stem = target
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| invalid_input(target, &"target has no usable file name"))?;

    Ok(match target.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{ext}"),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    })
}

/// Insert `(n)` between the stem and the extension of a file name
pub fn numbered_name(file_name: &str, n: u32) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map_or_else(|| file_name.into(), |stem| stem.to_string_lossy());

    match path.extension() {
        Some(ext) => format!("{stem}({n}).{}", ext.to_string_lossy()),
        None => format!("{stem}({n})"),
    }
}

/// First path in `directory` for `file_name` that does not exist yet
///
/// Tries the name itself, then `name(1)`, `name(2)`, and so on.
///
/// # Errors
///
/// Returns an error if:
/// - Existence of a candidate cannot be determined
/// - Every candidate up to the attempt bound exists
pub fn unique_output_path(directory: &Path, file_name: &str) -> Result<PathBuf> {
    unique_output_path_within(directory, file_name, MAX_NAME_ATTEMPTS)
}

/// [`unique_output_path`] with an explicit bound on numbered candidates
///
/// # Errors
///
/// Returns `NamingCollisionExhausted` once `max_attempts` numbered names
/// have been tried, or `FileSystem` if a candidate cannot be checked.
pub fn unique_output_path_within(
    directory: &Path,
    file_name: &str,
    max_attempts: u32,
) -> Result<PathBuf> {
    let is_free = |candidate: &Path| {
        candidate
            .try_exists()
            .map(|exists| !exists)
            .map_err(file_system(candidate, "check output name"))
    };

    let candidate = directory.join(file_name);
    if is_free(&candidate)? {
        return Ok(candidate);
    }

    for attempt in 1..=max_attempts {
        let candidate = directory.join(numbered_name(file_name, attempt));
        if is_free(&candidate)? {
            return Ok(candidate);
        }
    }

    Err(MosaicError::NamingCollisionExhausted {
        directory: directory.to_path_buf(),
        file_name: file_name.to_string(),
        attempts: max_attempts,
    })
}
