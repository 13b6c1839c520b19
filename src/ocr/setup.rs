use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

/// Directories holding the executable, checked after our own directory and PATH.
#[cfg(windows)]
const EXECUTABLE_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];
#[cfg(not(windows))]
const EXECUTABLE_DIRS: &[&str] = &["/usr/bin", "/usr/local/bin", "/opt/homebrew/bin"];

/// System tessdata directories, checked after our own and `TESSDATA_PREFIX`.
#[cfg(windows)]
const TESSDATA_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];
#[cfg(not(windows))]
const TESSDATA_DIRS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: PathBuf,
}

/// Returns the directory for storing Tesseract files
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("card-buyer")
        .join("tesseract")
}

fn executable_name() -> &'static str {
    if cfg!(windows) { "tesseract.exe" } else { "tesseract" }
}

/// Locates Tesseract and makes sure every language in `languages` has
/// trained data, downloading what is missing into our own tessdata dir.
pub fn ensure_tesseract(languages: &[&str]) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable()?;

    if let Some(tessdata) = find_tessdata_dir(languages) {
        log(&format!(
            "Tesseract: {} (tessdata: {})",
            executable.display(),
            tessdata.display()
        ));
        return Ok(TesseractPaths {
            executable,
            tessdata,
        });
    }

    let tessdata = get_tesseract_dir().join("tessdata");
    fs::create_dir_all(&tessdata)
        .with_context(|| format!("Failed to create {}", tessdata.display()))?;

    for language in languages {
        if !has_language(&tessdata, language) {
            download_tessdata(&tessdata, language)?;
        }
    }

    log(&format!("Tesseract ready, tessdata at: {}", tessdata.display()));
    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

fn has_language(tessdata: &Path, language: &str) -> bool {
    tessdata.join(format!("{}.traineddata", language)).exists()
}

/// Downloads `<language>.traineddata` from the tessdata repository
fn download_tessdata(tessdata_dir: &Path, language: &str) -> Result<()> {
    let url = format!("{}/{}.traineddata", TESSDATA_REPO, language);
    let path = tessdata_dir.join(format!("{}.traineddata", language));

    log(&format!("Downloading {}.traineddata...", language));

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "card-buyer")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}.traineddata: HTTP {}",
            language,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    log(&format!(
        "Downloaded {}.traineddata ({} bytes)",
        language,
        bytes.len()
    ));

    Ok(())
}

/// Finds the Tesseract executable, checking our local dir first, then PATH,
/// then the usual install locations.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    let local_exe = get_tesseract_dir().join(executable_name());
    if local_exe.exists() {
        return Ok(local_exe);
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    executable_candidates()
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| {
            anyhow!(
                "Tesseract not found. Install Tesseract-OCR and add it to PATH, \
                 or copy it to {}",
                get_tesseract_dir().display()
            )
        })
}

fn executable_candidates() -> Vec<PathBuf> {
    EXECUTABLE_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(executable_name()))
        .collect()
}

fn tessdata_candidates(prefix: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = vec![get_tesseract_dir().join("tessdata")];
    if let Some(prefix) = prefix {
        candidates.push(PathBuf::from(prefix));
        candidates.push(PathBuf::from(prefix).join("tessdata"));
    }
    candidates.extend(TESSDATA_DIRS.iter().map(PathBuf::from));
    candidates
}

/// Finds a tessdata directory that holds all of `languages`.
pub fn find_tessdata_dir(languages: &[&str]) -> Option<PathBuf> {
    let prefix = std::env::var("TESSDATA_PREFIX").ok();
    tessdata_candidates(prefix.as_deref())
        .into_iter()
        .find(|dir| languages.iter().all(|lang| has_language(dir, lang)))
}
