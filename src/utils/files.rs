use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Data files larger than this are rejected before parsing
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Reject files over [`MAX_FILE_SIZE_BYTES`].
///
/// Takes the already-open handle so the checked file is the one that gets read.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Display a path with the home directory shown as `~`
pub fn format_path_with_tilde(path: &Path) -> String {
    format_with_home(path, env::var("HOME").ok().as_deref())
}

pub(crate) fn format_with_home(path: &Path, home: Option<&str>) -> String {
    // Component-wise prefix check so /home/al doesn't match /home/alice
    if let Some(home) = home.filter(|h| !h.is_empty())
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.to_string_lossy());
    }
    path.to_string_lossy().into_owned()
}
