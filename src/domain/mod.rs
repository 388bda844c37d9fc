//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — platform, command specs, report/output structs.
//! - `constants.rs` — package tables, archive URLs, env var names, default paths.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network/process side effects.
//!
//! ## Compatibility note
//! Report structs are the `--json` output schema. CI jobs parse them, so keep
//! schema-impacting changes explicit.

pub mod constants;
pub mod models;
