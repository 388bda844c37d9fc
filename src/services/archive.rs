use crate::domain::constants::DOWNLOAD_TIMEOUT_SECS;
use crate::domain::models::{ArchiveStatus, CommandSpec};
use crate::error::ToolError;
use crate::services::runner::CommandRunner;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub trait ArchiveFetcher {
    /// Downloads `url` to `dest`. `dest` only appears once the body is complete.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), ToolError>;
}

pub struct HttpFetcher {
    pub timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
        }
    }
}

fn download_error(url: &str, reason: impl ToString) -> ToolError {
    ToolError::Download {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), ToolError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| download_error(url, e))?;
        let mut resp = client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| download_error(url, e))?;

        let tmp = dest.with_extension("part");
        let mut file = fs::File::create(&tmp).map_err(|e| download_error(url, e))?;
        let written = resp
            .copy_to(&mut file)
            .map_err(|e| download_error(url, e))
            .and_then(|_| {
                drop(file);
                fs::rename(&tmp, dest).map_err(|e| download_error(url, e))
            });
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written
    }
}

/// Stands in for the network during `--dry-run`.
#[derive(Default)]
pub struct NoopFetcher;

impl ArchiveFetcher for NoopFetcher {
    fn fetch(&self, _url: &str, _dest: &Path) -> Result<(), ToolError> {
        Ok(())
    }
}

pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

pub struct ArchiveRequest<'a> {
    pub url: &'a str,
    pub sha256: Option<&'a str>,
    /// Directory the archive unpacks into; its presence means "already installed".
    pub unpack_dir: PathBuf,
    pub zip_path: PathBuf,
    pub dry_run: bool,
}

pub fn unzip_spec(zip: &Path, into: &Path) -> CommandSpec {
    CommandSpec::new("unzip")
        .args(&["-q", "-o"])
        .arg(zip.to_string_lossy())
        .arg("-d")
        .arg(into.to_string_lossy())
}

pub fn ensure_archive(
    req: &ArchiveRequest<'_>,
    fetcher: &dyn ArchiveFetcher,
    runner: &mut dyn CommandRunner,
    steps: &mut Vec<CommandSpec>,
) -> anyhow::Result<ArchiveStatus> {
    if req.unpack_dir.exists() {
        info!(dir = %req.unpack_dir.display(), "archive already unpacked, skipping download");
        return Ok(ArchiveStatus::Present);
    }

    if req.dry_run {
        info!(url = req.url, dest = %req.zip_path.display(), "archive download planned");
    } else {
        info!(url = req.url, dest = %req.zip_path.display(), "downloading archive");
        fetcher.fetch(req.url, &req.zip_path)?;
    }

    if let (Some(expected), false) = (req.sha256, req.dry_run) {
        let actual = sha256_file(&req.zip_path).map_err(|e| download_error(req.url, e))?;
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            let _ = fs::remove_file(&req.zip_path);
            return Err(download_error(
                req.url,
                format!("checksum mismatch: expected {}, got {}", expected, actual),
            )
            .into());
        }
    }

    let parent = req
        .unpack_dir
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let unzip = unzip_spec(&req.zip_path, &parent);
    steps.push(unzip.clone());
    if let Err(e) = runner.run(&unzip) {
        // a partial unpack must not pass for an installed archive next time
        if !req.dry_run {
            let _ = fs::remove_dir_all(&req.unpack_dir);
            let _ = fs::remove_file(&req.zip_path);
        }
        return Err(e);
    }

    if req.dry_run {
        return Ok(ArchiveStatus::Planned);
    }
    if req.zip_path.exists() {
        fs::remove_file(&req.zip_path)?;
    }
    Ok(ArchiveStatus::Downloaded)
}
