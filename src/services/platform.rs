use crate::domain::constants::{DEBIAN_MARKER, DEBIAN_PACKAGES, RHEL_MARKER, RHEL_PACKAGES};
use crate::domain::models::{CommandSpec, Platform};
use crate::error::ToolError;
use std::path::Path;
use tracing::debug;

/// Everything that differs between distro families.
pub struct PlatformProfile {
    pub platform: Platform,
    pub package_manager: &'static str,
    pub packages: &'static [&'static str],
    /// Prefix of the "is this package installed" query; the package name is appended.
    pub probe: &'static [&'static str],
    pub refresh: Option<&'static [&'static str]>,
    /// Prefix of the non-interactive install command; package names are appended.
    pub install: &'static [&'static str],
}

static DEBIAN: PlatformProfile = PlatformProfile {
    platform: Platform::Debian,
    package_manager: "apt-get",
    packages: DEBIAN_PACKAGES,
    probe: &["dpkg", "-s"],
    refresh: Some(&["apt-get", "update"]),
    install: &["apt-get", "install", "-y", "--no-install-recommends"],
};

static RHEL: PlatformProfile = PlatformProfile {
    platform: Platform::Rhel,
    package_manager: "yum",
    packages: RHEL_PACKAGES,
    probe: &["rpm", "-q"],
    refresh: None,
    install: &["yum", "install", "-y"],
};

pub fn profile(platform: Platform) -> &'static PlatformProfile {
    match platform {
        Platform::Debian => &DEBIAN,
        Platform::Rhel => &RHEL,
    }
}

pub fn detect(host_root: &Path) -> Result<Platform, ToolError> {
    for platform in Platform::ALL {
        let marker = host_root.join(platform.marker());
        debug!(marker = %marker.display(), "checking distro marker");
        if marker.exists() {
            return Ok(platform);
        }
    }
    Err(ToolError::UnsupportedHost {
        root: host_root.to_path_buf(),
        debian: DEBIAN_MARKER,
        rhel: RHEL_MARKER,
    })
}

impl PlatformProfile {
    pub fn probe_spec(&self, package: &str) -> CommandSpec {
        CommandSpec::new(self.probe[0])
            .args(&self.probe[1..])
            .arg(package)
    }

    pub fn refresh_spec(&self) -> Option<CommandSpec> {
        self.refresh.and_then(CommandSpec::from_argv)
    }

    pub fn install_spec(&self, packages: &[String]) -> CommandSpec {
        CommandSpec::new(self.install[0])
            .args(&self.install[1..])
            .args(packages)
    }

    /// Cheap availability check for the package manager itself.
    pub fn manager_version_spec(&self) -> CommandSpec {
        CommandSpec::new(self.package_manager).arg("--version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn host_with(marker: Option<&str>) -> TempDir {
        let tmp = TempDir::new().expect("temp host root");
        if let Some(m) = marker {
            let p = tmp.path().join(m);
            fs::create_dir_all(p.parent().expect("marker parent")).expect("create etc");
            fs::write(p, "12\n").expect("write marker");
        }
        tmp
    }

    #[test]
    fn detects_debian_and_rhel_markers() {
        let deb = host_with(Some(DEBIAN_MARKER));
        assert_eq!(detect(deb.path()).unwrap(), Platform::Debian);
        let rhel = host_with(Some(RHEL_MARKER));
        assert_eq!(detect(rhel.path()).unwrap(), Platform::Rhel);
    }

    #[test]
    fn debian_marker_wins_when_both_present() {
        let both = host_with(Some(DEBIAN_MARKER));
        fs::write(both.path().join(RHEL_MARKER), "x").expect("write rhel marker");
        assert_eq!(detect(both.path()).unwrap(), Platform::Debian);
    }

    #[test]
    fn missing_markers_is_unsupported_host() {
        let empty = host_with(None);
        let err = detect(empty.path()).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_HOST");
        assert!(err.to_string().contains("unsupported host"));
    }

    #[test]
    fn profiles_build_family_specific_commands() {
        let deb = profile(Platform::Debian);
        assert_eq!(deb.probe_spec("cmake").display(), "dpkg -s cmake");
        assert_eq!(
            deb.refresh_spec().map(|s| s.display()),
            Some("apt-get update".to_string())
        );
        assert!(deb.packages.contains(&"libssl-dev"));

        let rhel = profile(Platform::Rhel);
        assert_eq!(rhel.probe_spec("cmake").display(), "rpm -q cmake");
        assert!(rhel.refresh_spec().is_none());
        assert_eq!(
            rhel.install_spec(&["gcc".to_string(), "make".to_string()])
                .display(),
            "yum install -y gcc make"
        );
        assert!(rhel.packages.contains(&"openssl-devel"));
    }
}
