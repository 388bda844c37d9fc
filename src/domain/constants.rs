pub const CONFIG_FILE_NAME: &str = "bastion-dev.toml";

/// When set, the bootstrapper trusts the caller to hold the privileges it
/// needs and never re-invokes itself.
pub const BUILD_AS_ROOT_ENV: &str = "BASTIONAI_BUILD_AS_ROOT";
/// Set on the re-invoked child so escalation happens at most once.
pub const ESCALATED_ENV: &str = "BASTION_DEV_ESCALATED";
pub const HOST_ROOT_ENV: &str = "BASTION_DEV_HOST_ROOT";

pub const DEBIAN_MARKER: &str = "etc/debian_version";
pub const RHEL_MARKER: &str = "etc/redhat-release";

pub const LIBTORCH_CPU_URL: &str =
    "https://download.pytorch.org/libtorch/cpu/libtorch-cxx11-abi-shared-with-deps-1.12.1%2Bcpu.zip";
pub const LIBTORCH_CUDA_URL: &str =
    "https://download.pytorch.org/libtorch/cu116/libtorch-cxx11-abi-shared-with-deps-1.12.1%2Bcu116.zip";
pub const LIBTORCH_DIR: &str = "libtorch";
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 3600;

pub const DEBIAN_PACKAGES: &[&str] = &[
    "build-essential",
    "pkg-config",
    "libssl-dev",
    "cmake",
    "curl",
    "unzip",
    "python3",
    "python3-dev",
    "python3-pip",
];

pub const RHEL_PACKAGES: &[&str] = &[
    "gcc",
    "gcc-c++",
    "make",
    "pkgconf-pkg-config",
    "openssl-devel",
    "cmake",
    "curl",
    "unzip",
    "python3",
    "python3-devel",
    "python3-pip",
];

pub const DEFAULT_BUILD_PROGRAM: &str = "cargo";
pub const DEFAULT_BUILD_ARGS: &[&str] = &["build", "--release"];
pub const DEFAULT_SERVER_DIR: &str = "server";

pub const DEFAULT_PROTO_COMPILER: &[&str] = &["python3", "-m", "grpc_tools.protoc"];
pub const DEFAULT_PROTO_DIR: &str = "protos";
pub const DEFAULT_PROTO_FILES: &[&str] = &["remote_torch.proto"];
pub const DEFAULT_STUB_OUT_DIR: &str = "client/bastionai/pb";

pub const DEFAULT_ESCALATION_HELPER: &[&str] = &["sudo", "-E"];
