//! Build configuration.
//!
//! Everything is compiled in; `BuildConfig::default()` is what `build-all` runs.

use crate::target::{Target, TARGETS};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "mygame";
pub const OUTPUT_DIR: &str = "bin";

/// Strip the symbol table (`-s`) and DWARF info (`-w`).
pub const BASELINE_LDFLAGS: &str = "-s -w";

/// Entry point used when `cmd/game/main.go` exists.
pub const NESTED_MAIN: &str = "cmd/game/main.go";
pub const NESTED_PACKAGE: &str = "./cmd/game";
pub const ROOT_PACKAGE: &str = ".";

/// Configuration for one `build-all` run.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub app_name: String,
    /// Relative paths resolve against the invocation directory.
    pub output_dir: PathBuf,
    pub baseline_ldflags: String,
    pub targets: Vec<Target>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            baseline_ldflags: BASELINE_LDFLAGS.to_string(),
            targets: TARGETS.to_vec(),
        }
    }
}

impl BuildConfig {
    /// Output directory on disk.
    pub fn output_dir_in(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(&self.output_dir)
    }
}

/// Package argument for `go build`.
///
/// Checked on every call; the nested layout wins when present.
pub fn entry_point(work_dir: &Path) -> &'static str {
    if work_dir.join(NESTED_MAIN).exists() {
        NESTED_PACKAGE
    } else {
        ROOT_PACKAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.app_name, "mygame");
        assert_eq!(config.output_dir, PathBuf::from("bin"));
        assert_eq!(config.baseline_ldflags, "-s -w");
        assert_eq!(config.targets.len(), 5);
        assert_eq!(
            config.output_dir_in(Path::new("/work")),
            PathBuf::from("/work/bin")
        );
    }

    #[test]
    fn test_entry_point_falls_back_to_current_dir() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(entry_point(tmp.path()), ".");
    }

    #[test]
    fn test_entry_point_prefers_nested_main() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("cmd/game")).unwrap();
        std::fs::write(tmp.path().join("cmd/game/main.go"), "package main\n").unwrap();
        assert_eq!(entry_point(tmp.path()), "./cmd/game");
    }
}
