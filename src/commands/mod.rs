//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `bootstrap.rs` — build/env.
//! - `codegen.rs` — protos/doctor.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod bootstrap;
pub mod codegen;

pub use bootstrap::handle_bootstrap_commands;
pub use codegen::{handle_codegen_commands, handle_doctor_command};
