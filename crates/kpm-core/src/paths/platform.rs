//! Data root resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "KPM_DATA_DIR";

/// Name of the per-user directory under the platform data dir.
const APP_DIR_NAME: &str = "kpm";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `explicit` (the `--data-dir` flag)
/// 2. `KPM_DATA_DIR` environment variable
/// 3. System data directory (e.g., `~/.local/share/kpm`)
pub fn data_root(explicit: Option<&Path>) -> Result<PathBuf, PathError> {
    let root = select_data_root(explicit, env::var(DATA_DIR_ENV).ok(), dirs::data_local_dir())?;
    ensure_dir(&root)?;
    Ok(root)
}

/// Pick the data root from the candidate sources without touching the disk.
pub(super) fn select_data_root(
    explicit: Option<&Path>,
    env_value: Option<String>,
    system_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(path) = explicit {
        if path.as_os_str().is_empty() {
            return Err(PathError::EmptyPath);
        }
        return Ok(path.to_path_buf());
    }

    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }

    system_dir
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(PathError::NoDataDir)
}

/// Create `path` (and parents) if missing; fail if it exists as a file.
pub(super) fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins_over_env_and_system() {
        let root = select_data_root(
            Some(Path::new("/opt/kpm")),
            Some("/env/kpm".to_string()),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(root, PathBuf::from("/opt/kpm"));
    }

    #[test]
    fn test_env_wins_over_system() {
        let root = select_data_root(
            None,
            Some("/env/kpm".to_string()),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(root, PathBuf::from("/env/kpm"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let root =
            select_data_root(None, Some("  ".to_string()), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(root, PathBuf::from("/data/kpm"));
    }

    #[test]
    fn test_no_sources_is_an_error() {
        assert!(matches!(
            select_data_root(None, None, None),
            Err(PathError::NoDataDir)
        ));
    }

    #[test]
    fn test_ensure_dir_rejects_files() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            ensure_dir(tmp.path()),
            Err(PathError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_data_root_creates_explicit_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let wanted = tmp.path().join("nested").join("kpm");
        let root = data_root(Some(&wanted)).unwrap();
        assert_eq!(root, wanted);
        assert!(wanted.is_dir());
    }
}
