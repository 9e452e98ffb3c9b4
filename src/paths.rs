use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the default config location: `<exe_dir>/comment_sampler.json`
pub fn get_default_config_path() -> PathBuf {
    get_exe_dir().join("comment_sampler.json")
}

/// Returns the local Tesseract directory: `<data_local_dir>/comment-sampler/tesseract/`
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("comment-sampler")
        .join("tesseract")
}

/// Creates the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out").join("nested").join("comments.csv");

        ensure_parent_dir(&target).unwrap();

        assert!(target.parent().unwrap().is_dir());
    }

    #[test]
    fn test_default_config_sits_next_to_executable() {
        let path = get_default_config_path();

        assert_eq!(path.file_name().unwrap(), "comment_sampler.json");
        assert_eq!(path.parent().unwrap(), get_exe_dir().as_path());
    }

    #[test]
    fn test_ensure_parent_dir_bare_filename() {
        ensure_parent_dir(Path::new("comments.csv")).unwrap();
    }
}
