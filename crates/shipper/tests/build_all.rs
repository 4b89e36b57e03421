//! End-to-end runs of the build orchestrator against a scripted stand-in for
//! the `go` command.

#![cfg(unix)]

use shipper::output::Console;
use shipper::{BuildConfig, GoToolchain, WebHarness};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fake `go`: `build` writes `<GOOS>/<GOARCH>|<ldflags>|<package>` to the `-o`
/// path, `env GOROOT` prints `goroot` only under `GOOS=js GOARCH=wasm` (a
/// root without the loader otherwise). Builds for `fail_os` exit 2.
fn fake_go(dir: &Path, goroot: &Path, fail_os: &str, root_exit: u8) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
case "$1" in
  build)
    if [ "$GOOS" = "{fail_os}" ]; then
      echo "cannot build for $GOOS" >&2
      exit 2
    fi
    printf '%s/%s|%s|%s' "$GOOS" "$GOARCH" "$5" "$6" > "$3"
    ;;
  env)
    if [ "$GOOS" != "js" ] || [ "$GOARCH" != "wasm" ]; then
      echo "/not/the/wasm/goroot"
      exit 0
    fi
    echo "{goroot}"
    exit {root_exit}
    ;;
esac
"#,
        goroot = goroot.display(),
    );
    let path = dir.join("go");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn goroot(tmp: &TempDir) -> PathBuf {
    let root = tmp.path().join("goroot");
    fs::create_dir_all(root.join("misc/wasm")).unwrap();
    fs::write(root.join("misc/wasm/wasm_exec.js"), "// wasm runtime\n").unwrap();
    root
}

fn workspace(tmp: &TempDir) -> PathBuf {
    let work = tmp.path().join("game");
    fs::create_dir_all(&work).unwrap();
    fs::write(work.join("main.go"), "package main\n").unwrap();
    work
}

fn quiet() -> Console<Vec<u8>> {
    Console::new(Vec::new(), false)
}

#[test]
fn builds_every_target_with_wasm_harness() {
    let tmp = TempDir::new().unwrap();
    let go = GoToolchain::with_program(fake_go(tmp.path(), &goroot(&tmp), "none", 0));
    let work = workspace(&tmp);

    let report = shipper::run(&BuildConfig::default(), &go, &work, &mut quiet()).unwrap();

    assert!(report.all_succeeded());
    assert!(matches!(report.web(), Some(WebHarness::Generated(_))));
    let bin = work.join("bin");
    let mut files: Vec<String> = fs::read_dir(&bin)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            "index.html",
            "mygame_darwin_amd64",
            "mygame_darwin_arm64",
            "mygame_js_wasm.wasm",
            "mygame_linux_amd64",
            "mygame_windows_amd64.exe",
            "wasm_exec.js",
        ]
    );

    assert_eq!(
        fs::read_to_string(bin.join("mygame_windows_amd64.exe")).unwrap(),
        "windows/amd64|-s -w -H windowsgui|."
    );
    assert_eq!(
        fs::read_to_string(bin.join("mygame_darwin_arm64")).unwrap(),
        "darwin/arm64|-s -w|."
    );
    assert_eq!(
        fs::read_to_string(bin.join("wasm_exec.js")).unwrap(),
        "// wasm runtime\n"
    );
    let html = fs::read_to_string(bin.join("index.html")).unwrap();
    assert!(html.contains(r#"fetch("mygame_js_wasm.wasm")"#));
}

#[test]
fn failing_target_does_not_stop_the_rest() {
    let tmp = TempDir::new().unwrap();
    let go = GoToolchain::with_program(fake_go(tmp.path(), &goroot(&tmp), "darwin", 0));
    let work = workspace(&tmp);

    let mut console = quiet();
    let report = shipper::run(&BuildConfig::default(), &go, &work, &mut console).unwrap();

    let failed: Vec<_> = report.failed().map(|o| o.target.to_string()).collect();
    assert_eq!(failed, ["darwin/amd64", "darwin/arm64"]);
    assert_eq!(report.succeeded().count(), 3);
    assert!(work.join("bin/mygame_js_wasm.wasm").is_file());
    assert!(matches!(report.web(), Some(WebHarness::Generated(_))));

    let text = String::from_utf8(console.into_inner()).unwrap();
    assert!(text.contains("[fail] darwin/amd64:"));
    assert!(text.contains("Build complete: 3/5 targets built"));
}

#[test]
fn failed_root_query_leaves_no_harness() {
    let tmp = TempDir::new().unwrap();
    let go = GoToolchain::with_program(fake_go(tmp.path(), &goroot(&tmp), "none", 1));
    let work = workspace(&tmp);

    let report = shipper::run(&BuildConfig::default(), &go, &work, &mut quiet()).unwrap();

    assert!(report.all_succeeded());
    assert!(matches!(report.web(), Some(WebHarness::RootQueryFailed(_))));
    assert!(!work.join("bin/index.html").exists());
    assert!(!work.join("bin/wasm_exec.js").exists());
}
