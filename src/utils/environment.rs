use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DELIVERY_DESK_DATA";

/// Default data directory (`$HOME/.delivery-desk`)
pub fn default_data_dir() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".delivery-desk"))
}

/// Resolve the data directory.
///
/// Precedence: explicit flag, then `DELIVERY_DESK_DATA`, then the configured
/// directory, then `$HOME/.delivery-desk`.
pub fn resolve_data_dir(flag: Option<&Path>, configured: Option<&Path>) -> Result<PathBuf> {
    resolve_with_env(flag, env::var_os(DATA_DIR_ENV).map(PathBuf::from), configured)
}

fn resolve_with_env(
    flag: Option<&Path>,
    from_env: Option<PathBuf>,
    configured: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(flag) = flag {
        return Ok(flag.to_path_buf());
    }
    if let Some(dir) = from_env.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    if let Some(configured) = configured {
        return Ok(configured.to_path_buf());
    }
    default_data_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let dir = resolve_with_env(
            Some(Path::new("/flag")),
            Some(PathBuf::from("/env")),
            Some(Path::new("/config")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/flag"));
    }

    #[test]
    fn test_env_before_config() {
        let dir =
            resolve_with_env(None, Some(PathBuf::from("/env")), Some(Path::new("/config"))).unwrap();
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn test_empty_env_ignored() {
        let dir =
            resolve_with_env(None, Some(PathBuf::new()), Some(Path::new("/config"))).unwrap();
        assert_eq!(dir, PathBuf::from("/config"));
    }

    #[test]
    fn test_falls_back_to_home() {
        // Only meaningful where HOME is set, which is every supported test environment
        if let Ok(home) = env::var("HOME") {
            let dir = resolve_with_env(None, None, None).unwrap();
            assert_eq!(dir, PathBuf::from(home).join(".delivery-desk"));
        }
    }
}
