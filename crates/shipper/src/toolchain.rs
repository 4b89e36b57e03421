//! Compiler invocation.
//!
//! The orchestrator only talks to [`Toolchain`]; [`GoToolchain`] is the real
//! subprocess-backed implementation.

use crate::target::Target;
use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Target platform for one subprocess, layered over the inherited environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecContext {
    pub os: &'static str,
    pub arch: &'static str,
}

impl ExecContext {
    pub fn for_target(target: &Target) -> Self {
        Self {
            os: target.os,
            arch: target.arch,
        }
    }

    /// Set `GOOS`/`GOARCH` on `cmd`. Nothing else in the environment changes.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("GOOS", self.os).env("GOARCH", self.arch);
    }
}

/// Everything needed for one `go build`.
#[derive(Clone, Debug)]
pub struct BuildInvocation<'a> {
    pub ctx: ExecContext,
    /// Directory the compiler runs in.
    pub work_dir: &'a Path,
    pub output: &'a Path,
    pub ldflags: &'a str,
    pub package: &'a str,
}

impl BuildInvocation<'_> {
    /// `build -o <output> -ldflags <flags> <package>`
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "build".into(),
            "-o".into(),
            self.output.as_os_str().to_owned(),
            "-ldflags".into(),
            self.ldflags.into(),
            self.package.into(),
        ]
    }
}

/// Something that can compile a target and report its installation root.
pub trait Toolchain {
    /// Run one build. Each call is attempted exactly once.
    fn invoke_compiler(&self, invocation: &BuildInvocation<'_>) -> Result<()>;

    /// Installation root (`GOROOT`) as seen under `ctx`.
    fn root(&self, ctx: &ExecContext, work_dir: &Path) -> Result<PathBuf>;
}

/// The `go` command.
#[derive(Clone, Debug)]
pub struct GoToolchain {
    program: PathBuf,
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::with_program("go")
    }
}

impl GoToolchain {
    /// Use a specific executable (name looked up on `PATH`, or a path).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, ctx: &ExecContext, work_dir: &Path) -> Result<Command> {
        let exe = which::which(&self.program)
            .with_context(|| format!("{} not found in PATH", self.program.display()))?;
        let mut cmd = Command::new(exe);
        cmd.current_dir(work_dir);
        ctx.apply(&mut cmd);
        Ok(cmd)
    }
}

impl Toolchain for GoToolchain {
    fn invoke_compiler(&self, invocation: &BuildInvocation<'_>) -> Result<()> {
        let status = self
            .command(&invocation.ctx, invocation.work_dir)?
            .args(invocation.args())
            .status()
            .with_context(|| format!("Failed to run {} build", self.program.display()))?;

        if !status.success() {
            bail!("{} build failed with status {status}", self.program.display());
        }
        Ok(())
    }

    fn root(&self, ctx: &ExecContext, work_dir: &Path) -> Result<PathBuf> {
        let out = self
            .command(ctx, work_dir)?
            .args(["env", "GOROOT"])
            .output()
            .with_context(|| format!("Failed to run {} env GOROOT", self.program.display()))?;

        if !out.status.success() {
            bail!(
                "{} env GOROOT failed with status {}",
                self.program.display(),
                out.status
            );
        }

        let root = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if root.is_empty() {
            bail!("{} env GOROOT printed nothing", self.program.display());
        }
        Ok(PathBuf::from(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TARGETS;
    use std::ffi::OsStr;

    #[test]
    fn test_invocation_args_order() {
        let inv = BuildInvocation {
            ctx: ExecContext::for_target(&TARGETS[0]),
            work_dir: Path::new("."),
            output: Path::new("bin/mygame_windows_amd64.exe"),
            ldflags: "-s -w -H windowsgui",
            package: ".",
        };
        let args: Vec<OsString> = inv.args();
        assert_eq!(
            args,
            [
                "build",
                "-o",
                "bin/mygame_windows_amd64.exe",
                "-ldflags",
                "-s -w -H windowsgui",
                "."
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_context_sets_only_target_vars() {
        let ctx = ExecContext::for_target(&TARGETS[4]);
        let mut cmd = Command::new("go");
        ctx.apply(&mut cmd);

        let envs: Vec<(&OsStr, Option<&OsStr>)> = cmd.get_envs().collect();
        assert_eq!(envs.len(), 2);
        assert!(envs.contains(&(OsStr::new("GOOS"), Some(OsStr::new("js")))));
        assert!(envs.contains(&(OsStr::new("GOARCH"), Some(OsStr::new("wasm")))));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let go = GoToolchain::with_program("definitely-not-a-real-go-binary");
        let inv = BuildInvocation {
            ctx: ExecContext::for_target(&TARGETS[1]),
            work_dir: Path::new("."),
            output: Path::new("bin/x"),
            ldflags: "-s -w",
            package: ".",
        };
        let err = go.invoke_compiler(&inv).unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }
}
