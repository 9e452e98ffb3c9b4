use anyhow::{anyhow, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::paths::get_tesseract_dir;

/// Executable name inside a local Tesseract directory.
#[cfg(windows)]
const TESSERACT_BIN: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_BIN: &str = "tesseract";

const COMMON_EXECUTABLE_PATHS: [&str; 5] = [
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

const COMMON_TESSDATA_PATHS: [&str; 6] = [
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Finds the Tesseract executable.
///
/// Order: configured path, our local data dir, `PATH`, common install locations.
pub fn find_tesseract_executable(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!(
            "Configured Tesseract executable not found: {}",
            path.display()
        ));
    }

    let local_exe = get_tesseract_dir().join(TESSERACT_BIN);
    if local_exe.exists() {
        info!("Tesseract found at: {}", local_exe.display());
        return Ok(local_exe);
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            debug!("Using Tesseract from PATH");
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in &COMMON_EXECUTABLE_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            info!("Tesseract found at: {}", p.display());
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR and add it to PATH, \
         or copy it to {}",
        get_tesseract_dir().display()
    ))
}

/// Returns true if `dir` holds trained data for every `+`-separated language.
fn has_languages(dir: &Path, languages: &str) -> bool {
    languages
        .split('+')
        .filter(|lang| !lang.is_empty())
        .all(|lang| dir.join(format!("{}.traineddata", lang)).exists())
}

/// Finds a tessdata directory holding the requested languages.
///
/// Returns `None` when nothing suitable is found, in which case Tesseract
/// falls back to its compiled-in default location.
pub fn find_tessdata_dir(configured: Option<&Path>, languages: &str) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }

    let mut candidates = vec![get_tesseract_dir().join("tessdata")];

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let prefix = PathBuf::from(prefix);
        candidates.push(prefix.join("tessdata"));
        candidates.push(prefix);
    }

    candidates.extend(COMMON_TESSDATA_PATHS.iter().map(PathBuf::from));

    candidates
        .into_iter()
        .find(|dir| has_languages(dir, languages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_has_languages_requires_all() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eng.traineddata"), b"").unwrap();

        assert!(has_languages(dir.path(), "eng"));
        assert!(!has_languages(dir.path(), "chi_tra+eng"));

        std::fs::write(dir.path().join("chi_tra.traineddata"), b"").unwrap();
        assert!(has_languages(dir.path(), "chi_tra+eng"));
    }

    #[test]
    fn test_configured_tessdata_wins() {
        let dir = tempdir().unwrap();
        let found = find_tessdata_dir(Some(dir.path()), "eng");
        assert_eq!(found.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_configured_executable_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-tesseract");
        assert!(find_tesseract_executable(Some(missing.as_path())).is_err());

        let present = dir.path().join("tesseract");
        std::fs::write(&present, b"").unwrap();
        assert_eq!(find_tesseract_executable(Some(present.as_path())).unwrap(), present);
    }
}
