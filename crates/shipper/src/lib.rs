//! # Shipper
//!
//! Release tooling for the game and its parent project.
//!
//! ## Usage
//!
//! ```bash
//! build-all          # Cross-compile every target into bin/ (+ wasm harness)
//! package-product    # Assemble mpm-release/MyProjectManager
//! reproduce          # Run the issue reproduction template
//! ```
//!
//! Structure:
//! - `target` - static list of compilation targets
//! - `config` - build configuration defaults
//! - `toolchain` - compiler invocation (`go build`, `go env GOROOT`)
//! - `orchestrator` - sequential best-effort build loop
//! - `web` - wasm runtime loader + HTML harness
//! - `package` - release folder assembly
//! - `repro` - bug reproduction harness
//! - `output` - console commentary

pub mod config;
pub mod orchestrator;
pub mod output;
pub mod package;
pub mod pattern;
pub mod repro;
pub mod target;
pub mod toolchain;
pub mod web;

pub use config::BuildConfig;
pub use orchestrator::{run, BuildReport, TargetOutcome, TargetStatus, WebHarness};
pub use target::{Target, TARGETS};
pub use toolchain::{BuildInvocation, ExecContext, GoToolchain, Toolchain};
