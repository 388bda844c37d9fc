use crate::cli::ArchiveVariant;
use crate::domain::constants::*;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    pub archive: ArchiveConfig,
    pub build: BuildConfig,
    pub protos: ProtosConfig,
    pub privilege: PrivilegeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub variant: ArchiveVariant,
    pub cpu_url: String,
    pub cuda_url: String,
    /// Unpack directory, relative to the project root.
    pub dir: String,
    /// Expected hex SHA-256 of each archive. Unchecked when absent.
    pub cpu_sha256: Option<String>,
    pub cuda_sha256: Option<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            variant: ArchiveVariant::Cpu,
            cpu_url: LIBTORCH_CPU_URL.to_string(),
            cuda_url: LIBTORCH_CUDA_URL.to_string(),
            dir: LIBTORCH_DIR.to_string(),
            cpu_sha256: None,
            cuda_sha256: None,
        }
    }
}

impl ArchiveConfig {
    pub fn url(&self, variant: ArchiveVariant) -> &str {
        match variant {
            ArchiveVariant::Cpu => &self.cpu_url,
            ArchiveVariant::Cuda => &self.cuda_url,
        }
    }

    pub fn sha256(&self, variant: ArchiveVariant) -> Option<&str> {
        match variant {
            ArchiveVariant::Cpu => self.cpu_sha256.as_deref(),
            ArchiveVariant::Cuda => self.cuda_sha256.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub program: String,
    pub args: Vec<String>,
    pub server_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_BUILD_PROGRAM.to_string(),
            args: strings(DEFAULT_BUILD_ARGS),
            server_dir: DEFAULT_SERVER_DIR.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProtosConfig {
    pub compiler: Vec<String>,
    pub proto_dir: String,
    pub files: Vec<String>,
    pub out_dir: String,
    pub includes: Vec<String>,
}

impl Default for ProtosConfig {
    fn default() -> Self {
        Self {
            compiler: strings(DEFAULT_PROTO_COMPILER),
            proto_dir: DEFAULT_PROTO_DIR.to_string(),
            files: strings(DEFAULT_PROTO_FILES),
            out_dir: DEFAULT_STUB_OUT_DIR.to_string(),
            includes: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PrivilegeConfig {
    pub helper: Vec<String>,
}

impl Default for PrivilegeConfig {
    fn default() -> Self {
        Self {
            helper: strings(DEFAULT_ESCALATION_HELPER),
        }
    }
}

/// An explicit path must exist; the implicit `<root>/bastion-dev.toml` is optional.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<ToolConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = root.join(CONFIG_FILE_NAME);
            if !p.exists() {
                return Ok(ToolConfig::default());
            }
            p
        }
    };
    debug!(path = %path.display(), "loading config");
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

/// Resolved locations inside the project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
}

impl ProjectLayout {
    pub fn resolve(root: &Path) -> anyhow::Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("project root not found: {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn archive_dir(&self, cfg: &ToolConfig) -> PathBuf {
        self.root.join(&cfg.archive.dir)
    }

    /// Sibling of the unpack directory named `<dir>.zip`.
    pub fn archive_zip(&self, cfg: &ToolConfig) -> PathBuf {
        let dir = self.archive_dir(cfg);
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| LIBTORCH_DIR.to_string());
        dir.with_file_name(format!("{}.zip", name))
    }

    pub fn server_dir(&self, cfg: &ToolConfig) -> PathBuf {
        self.root.join(&cfg.build.server_dir)
    }

    pub fn proto_dir(&self, cfg: &ToolConfig) -> PathBuf {
        self.root.join(&cfg.protos.proto_dir)
    }

    pub fn stub_out_dir(&self, cfg: &ToolConfig) -> PathBuf {
        self.root.join(&cfg.protos.out_dir)
    }

    pub fn includes(&self, cfg: &ToolConfig) -> Vec<PathBuf> {
        cfg.protos
            .includes
            .iter()
            .map(|i| self.root.join(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_default_config_yields_defaults() {
        let tmp = TempDir::new().expect("temp root");
        let cfg = load_config(tmp.path(), None).unwrap();
        assert_eq!(cfg.archive.variant, ArchiveVariant::Cpu);
        assert_eq!(cfg.archive.url(ArchiveVariant::Cuda), LIBTORCH_CUDA_URL);
        assert_eq!(cfg.build.args, vec!["build", "--release"]);
        assert_eq!(cfg.protos.files, vec!["remote_torch.proto"]);
        assert_eq!(cfg.privilege.helper, vec!["sudo", "-E"]);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().expect("temp root");
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"[archive]
variant = "cuda"

[protos]
files = ["bastionlab.proto", "attestation.proto"]
includes = ["third_party/protos"]
"#,
        )
        .expect("write config");
        let cfg = load_config(tmp.path(), None).unwrap();
        assert_eq!(cfg.archive.variant, ArchiveVariant::Cuda);
        assert_eq!(cfg.archive.dir, LIBTORCH_DIR);
        assert_eq!(cfg.protos.files.len(), 2);
        assert_eq!(cfg.protos.out_dir, DEFAULT_STUB_OUT_DIR);
        assert_eq!(cfg.build.program, "cargo");

        let layout = ProjectLayout::resolve(tmp.path()).unwrap();
        assert!(layout.includes(&cfg)[0].ends_with("third_party/protos"));
        assert!(layout.archive_zip(&cfg).ends_with("libtorch.zip"));
    }

    #[test]
    fn checksums_are_per_variant() {
        let tmp = TempDir::new().expect("temp root");
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[archive]\ncpu_sha256 = \"abc123\"\n",
        )
        .expect("write config");
        let cfg = load_config(tmp.path(), None).unwrap();
        assert_eq!(cfg.archive.sha256(ArchiveVariant::Cpu), Some("abc123"));
        assert_eq!(cfg.archive.sha256(ArchiveVariant::Cuda), None);
    }

    #[test]
    fn archive_zip_sits_next_to_unpack_dir() {
        let tmp = TempDir::new().expect("temp root");
        let layout = ProjectLayout::resolve(tmp.path()).unwrap();
        let mut cfg = ToolConfig::default();

        cfg.archive.dir = "vendor/libtorch/".to_string();
        assert_eq!(
            layout.archive_zip(&cfg),
            layout.root.join("vendor/libtorch.zip")
        );

        cfg.archive.dir = "libtorch-1.12.1".to_string();
        assert_eq!(
            layout.archive_zip(&cfg),
            layout.root.join("libtorch-1.12.1.zip")
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let tmp = TempDir::new().expect("temp root");
        let err = load_config(tmp.path(), Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
