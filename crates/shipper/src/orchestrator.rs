//! Cross-compilation batch.
//!
//! Targets are built one after another in list order. A failed target is
//! reported and skipped; only an unusable output directory stops the run.

use crate::config::{self, BuildConfig};
use crate::output::Console;
use crate::target::Target;
use crate::toolchain::{BuildInvocation, ExecContext, Toolchain};
use crate::web;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of the compiler step for one target.
#[derive(Debug)]
pub enum TargetStatus {
    Built,
    Failed(anyhow::Error),
}

/// Result of the post-build step for the wasm target.
#[derive(Debug)]
pub enum WebHarness {
    Generated(web::Installed),
    /// No loader under the toolchain root; nothing written.
    LoaderMissing { root: PathBuf },
    RootQueryFailed(anyhow::Error),
    InstallFailed(anyhow::Error),
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub target: Target,
    /// Path as passed to the compiler.
    pub artifact: PathBuf,
    pub status: TargetStatus,
    /// Set only for a successfully built wasm target.
    pub web: Option<WebHarness>,
}

impl TargetOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TargetStatus::Built)
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        match &self.status {
            TargetStatus::Built => None,
            TargetStatus::Failed(e) => Some(e),
        }
    }
}

/// Outcomes in build order.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl BuildReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_success)
    }

    pub fn web(&self) -> Option<&WebHarness> {
        self.outcomes.iter().find_map(|o| o.web.as_ref())
    }
}

/// Build every configured target from `work_dir`.
///
/// Returns `Err` only if the output directory cannot be created, before any
/// target is attempted.
pub fn run<T, W>(
    config: &BuildConfig,
    toolchain: &T,
    work_dir: &Path,
    console: &mut Console<W>,
) -> Result<BuildReport>
where
    T: Toolchain + ?Sized,
    W: Write,
{
    let out_dir = config.output_dir_in(work_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Creating output directory {}", out_dir.display()))?;

    console.banner(&format!("Building {}", config.app_name));

    let mut report = BuildReport::default();
    for target in &config.targets {
        let outcome = build_one(config, toolchain, work_dir, &out_dir, target, console);
        report.outcomes.push(outcome);
    }

    let built = report.succeeded().count();
    console.blank();
    console.banner(&format!(
        "Build complete: {built}/{} targets built",
        report.outcomes.len()
    ));

    Ok(report)
}

fn build_one<T, W>(
    config: &BuildConfig,
    toolchain: &T,
    work_dir: &Path,
    out_dir: &Path,
    target: &Target,
    console: &mut Console<W>,
) -> TargetOutcome
where
    T: Toolchain + ?Sized,
    W: Write,
{
    let file_name = target.artifact_name(&config.app_name);
    let artifact = config.output_dir.join(&file_name);
    let ldflags = target.ldflags(&config.baseline_ldflags);
    let ctx = ExecContext::for_target(target);

    console.step(&format!("{file_name} ({target})"));

    let invocation = BuildInvocation {
        ctx,
        work_dir,
        output: &artifact,
        ldflags: &ldflags,
        package: config::entry_point(work_dir),
    };

    match toolchain.invoke_compiler(&invocation) {
        Ok(()) => {
            console.success(&artifact.display().to_string());
            let web = target
                .is_web()
                .then(|| post_process(toolchain, &ctx, work_dir, out_dir, &file_name, console));
            TargetOutcome {
                target: *target,
                artifact,
                status: TargetStatus::Built,
                web,
            }
        }
        Err(e) => {
            console.fail(&format!("{target}: {e:#}"));
            TargetOutcome {
                target: *target,
                artifact,
                status: TargetStatus::Failed(e),
                web: None,
            }
        }
    }
}

/// Copy the runtime loader and write the harness for `wasm_file`.
fn post_process<T, W>(
    toolchain: &T,
    ctx: &ExecContext,
    work_dir: &Path,
    out_dir: &Path,
    wasm_file: &str,
    console: &mut Console<W>,
) -> WebHarness
where
    T: Toolchain + ?Sized,
    W: Write,
{
    let root = match toolchain.root(ctx, work_dir) {
        Ok(root) => root,
        Err(e) => {
            console.warn(&format!("Skipping wasm harness, toolchain root unknown: {e:#}"));
            return WebHarness::RootQueryFailed(e);
        }
    };

    let Some(loader) = web::find_loader(&root) else {
        return WebHarness::LoaderMissing { root };
    };

    match web::install(&loader, out_dir, wasm_file) {
        Ok(installed) => {
            console.detail(&format!("Copied {}", installed.loader.display()));
            console.detail(&format!("Generated {}", installed.harness.display()));
            WebHarness::Generated(installed)
        }
        Err(e) => {
            console.warn(&format!("Wasm harness not written: {e:#}"));
            WebHarness::InstallFailed(e)
        }
    }
}
