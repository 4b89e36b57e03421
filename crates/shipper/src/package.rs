//! Release folder assembly.
//!
//! Copies the distributable parts of the project into
//! `mpm-release/MyProjectManager`, then checks that the prebuilt binaries made
//! it in. The release directory is recreated from scratch on every run.

#![allow(clippy::cast_precision_loss)] // Sizes are only displayed in MB

use crate::output::Console;
use crate::pattern::IgnoreSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Optional manifest override in the project root.
pub const MANIFEST_FILE: &str = "release.json";

/// What goes into the release.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseManifest {
    /// Created under the project root, wiped before each run.
    pub release_dir: String,
    /// Folder inside `release_dir` that is shipped.
    pub product_name: String,
    /// Copied recursively, filtered by `ignore`.
    pub core_dirs: Vec<String>,
    /// Copied to the same relative path.
    pub core_files: Vec<String>,
    /// Copied flat into `scripts/`.
    pub build_scripts: Vec<String>,
    pub ignore: Vec<String>,
    /// Only `manual_keep` is taken from this directory.
    pub manual_dir: String,
    pub manual_keep: String,
    /// Checked inside the distribution after copying.
    pub required_bins: Vec<String>,
}

impl Default for ReleaseManifest {
    fn default() -> Self {
        Self {
            release_dir: "mpm-release".to_string(),
            product_name: "MyProjectManager".to_string(),
            core_dirs: strings(&["mcp-server-go", "docs"]),
            core_files: strings(&[
                "README.md",
                "README_EN.md",
                "install.ps1",
                "QUICKSTART.md",
                "QUICKSTART_EN.md",
                "docs/images/mpm_logo.png",
            ]),
            build_scripts: strings(&[
                "scripts/build-windows.ps1",
                "scripts/build-unix.sh",
                "scripts/build-cross-platform.sh",
            ]),
            ignore: strings(&[
                "__pycache__",
                ".mcp-data",
                ".git",
                "*.pyc",
                ".vscode",
                ".idea",
                "target",
                "node_modules",
                "debug_*",
                "check_*",
                "*.pdb",
                "*.log",
            ]),
            manual_dir: "user-manual".to_string(),
            manual_keep: "COMPLETE-MANUAL-CONCISE.md".to_string(),
            required_bins: strings(&[
                "mcp-server-go/bin/mpm-go.exe",
                "mcp-server-go/bin/ast_indexer.exe",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl ReleaseManifest {
    /// Read `release.json` from `root` if present, otherwise the defaults.
    /// Fields missing from the file keep their default values.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(&path).with_context(|| format!("Reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Parsing {}", path.display()))
    }

    pub fn release_root(&self, root: &Path) -> PathBuf {
        root.join(&self.release_dir)
    }

    pub fn dist_dir(&self, root: &Path) -> PathBuf {
        self.release_root(root).join(&self.product_name)
    }
}

/// Presence check for one required binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryCheck {
    pub path: String,
    /// `None` when missing.
    pub size: Option<u64>,
}

#[derive(Debug, Default)]
pub struct PackageReport {
    pub dist: PathBuf,
    pub copied_files: usize,
    /// Manifest entries that did not exist in the project.
    pub missing_sources: Vec<String>,
    pub binaries: Vec<BinaryCheck>,
}

impl PackageReport {
    /// All required binaries are present.
    pub fn is_complete(&self) -> bool {
        self.binaries.iter().all(|b| b.size.is_some())
    }
}

/// Assemble the release for the project at `root`.
pub fn package<W: Write>(
    root: &Path,
    manifest: &ReleaseManifest,
    console: &mut Console<W>,
) -> Result<PackageReport> {
    let release_root = manifest.release_root(root);
    let dist = manifest.dist_dir(root);

    if release_root.exists() {
        fs::remove_dir_all(&release_root)
            .with_context(|| format!("Removing {}", release_root.display()))?;
    }
    fs::create_dir_all(&dist).with_context(|| format!("Creating {}", dist.display()))?;

    console.banner(&format!("Packaging {}", manifest.product_name));
    console.note(&format!("Base: {}", root.display()));
    console.note(&format!("Target: {}", dist.display()));

    let mut report = PackageReport {
        dist: dist.clone(),
        ..PackageReport::default()
    };
    let ignore = IgnoreSet::new(manifest.ignore.iter().cloned());

    for name in &manifest.core_dirs {
        let src = root.join(name);
        if src.is_dir() {
            console.step(&format!("Module {name}"));
            report.copied_files += copy_tree(&src, &dist.join(name), &ignore)?;
        } else {
            console.warn(&format!("Directory not found: {name}"));
            report.missing_sources.push(name.clone());
        }
    }

    copy_manual(root, &dist, manifest, console, &mut report)?;

    for name in &manifest.core_files {
        let src = root.join(name);
        if src.is_file() {
            console.step(&format!("File {name}"));
            copy_file(&src, &dist.join(name))?;
            report.copied_files += 1;
        } else {
            console.warn(&format!("File not found: {name}"));
            report.missing_sources.push(name.clone());
        }
    }

    let scripts_dst = dist.join("scripts");
    fs::create_dir_all(&scripts_dst)
        .with_context(|| format!("Creating {}", scripts_dst.display()))?;
    for script in &manifest.build_scripts {
        let src = root.join(script);
        match src.file_name() {
            Some(file_name) if src.is_file() => {
                console.step(&format!("Build script {script}"));
                copy_file(&src, &scripts_dst.join(file_name))?;
                report.copied_files += 1;
            }
            _ => {
                console.warn(&format!("Build script not found: {script}"));
                report.missing_sources.push(script.clone());
            }
        }
    }

    console.blank();
    console.note("Checking binaries");
    for rel in &manifest.required_bins {
        let size = fs::metadata(dist.join(rel)).ok().map(|m| m.len());
        match size {
            Some(bytes) => console.success(&format!(
                "{rel} ({:.1} MB)",
                bytes as f64 / (1024.0 * 1024.0)
            )),
            None => console.fail(&format!("Missing: {rel}")),
        }
        report.binaries.push(BinaryCheck {
            path: rel.clone(),
            size,
        });
    }

    console.blank();
    if report.is_complete() {
        console.banner(&format!("Release ready: {}", dist.display()));
        console.detail("Copy this folder to the target machine to use it.");
    } else {
        console.warn("Some binaries are missing, build the project first.");
    }

    Ok(report)
}

/// Only the concise manual is shipped.
fn copy_manual<W: Write>(
    root: &Path,
    dist: &Path,
    manifest: &ReleaseManifest,
    console: &mut Console<W>,
    report: &mut PackageReport,
) -> Result<()> {
    let src_dir = root.join(&manifest.manual_dir);
    if !src_dir.is_dir() {
        console.warn(&format!("Directory not found: {}", manifest.manual_dir));
        report.missing_sources.push(manifest.manual_dir.clone());
        return Ok(());
    }

    console.step(&format!(
        "Module {} (only {})",
        manifest.manual_dir, manifest.manual_keep
    ));
    let dst_dir = dist.join(&manifest.manual_dir);
    fs::create_dir_all(&dst_dir).with_context(|| format!("Creating {}", dst_dir.display()))?;

    let keep = src_dir.join(&manifest.manual_keep);
    if keep.is_file() {
        copy_file(&keep, &dst_dir.join(&manifest.manual_keep))?;
        report.copied_files += 1;
    } else {
        console.warn(&format!("File not found: {}", manifest.manual_keep));
        report
            .missing_sources
            .push(format!("{}/{}", manifest.manual_dir, manifest.manual_keep));
    }
    Ok(())
}

/// Recursively copy `src` into `dst`, skipping ignored names. Returns files copied.
pub fn copy_tree(src: &Path, dst: &Path, ignore: &IgnoreSet) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("Creating {}", dst.display()))?;

    let mut copied = 0;
    let entries = fs::read_dir(src).with_context(|| format!("Reading {}", src.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading {}", src.display()))?;
        let name = entry.file_name();
        if ignore.is_ignored(&name.to_string_lossy()) {
            continue;
        }

        let from = entry.path();
        let to = dst.join(&name);
        if from.is_dir() {
            copied += copy_tree(&from, &to, ignore)?;
        } else {
            copy_file(&from, &to)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Creating {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("Copying {} to {}", src.display(), dst.display()))?;
    Ok(())
}
