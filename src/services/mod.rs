//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `platform.rs` — distro detection + per-family package/command table.
//! - `packages.rs` — probe and install missing native dependencies.
//! - `privilege.rs` — effective-uid check and self re-invocation.
//! - `archive.rs` — libtorch download, checksum and unpack.
//! - `environment.rs` — LIBTORCH / LD_LIBRARY_PATH / PATH composition.
//! - `bootstrap.rs` — ordered bootstrap flow tying the above together.
//! - `stubs.rs` — protocol compiler invocations for client stubs.
//! - `doctor.rs` — read-only readiness checks.
//! - `config.rs` — `bastion-dev.toml` loading + project layout.
//! - `runner.rs` — child process seam (real and recording runners).
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Every child process goes through `CommandRunner`.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod archive;
pub mod bootstrap;
pub mod config;
pub mod doctor;
pub mod environment;
pub mod output;
pub mod packages;
pub mod platform;
pub mod privilege;
pub mod runner;
pub mod stubs;
