//! Browser harness for the wasm target.
//!
//! The toolchain ships a JavaScript runtime loader (`wasm_exec.js`). It is
//! copied next to the wasm artifact together with an `index.html` that boots it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOADER_FILE: &str = "wasm_exec.js";
pub const HARNESS_FILE: &str = "index.html";

/// Loader locations under the toolchain root, in lookup order.
/// Go 1.24 moved the file from `misc/wasm` to `lib/wasm`.
pub const LOADER_DIRS: &[&str] = &["misc/wasm", "lib/wasm"];

const WASM_PLACEHOLDER: &str = "{{WASM_FILE}}";

const HARNESS_TEMPLATE: &str = r#"<!DOCTYPE html>
<script src="wasm_exec.js"></script>
<script>
    const go = new Go();
    WebAssembly.instantiateStreaming(fetch("{{WASM_FILE}}"), go.importObject).then((result) => {
        go.run(result.instance);
    });
</script>
"#;

/// First existing loader under `root`.
pub fn find_loader(root: &Path) -> Option<PathBuf> {
    LOADER_DIRS
        .iter()
        .map(|dir| root.join(dir).join(LOADER_FILE))
        .find(|p| p.is_file())
}

/// HTML that loads `wasm_file` (a bare file name in the same directory).
pub fn render_harness(wasm_file: &str) -> String {
    HARNESS_TEMPLATE.replace(WASM_PLACEHOLDER, wasm_file)
}

/// Files written by [`install`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Installed {
    pub loader: PathBuf,
    pub harness: PathBuf,
}

/// Copy the loader into `out_dir` and write the harness for `wasm_file`.
pub fn install(loader: &Path, out_dir: &Path, wasm_file: &str) -> Result<Installed> {
    let loader_dest = out_dir.join(LOADER_FILE);
    fs::copy(loader, &loader_dest).with_context(|| {
        format!(
            "Copying {} to {}",
            loader.display(),
            loader_dest.display()
        )
    })?;

    let harness = out_dir.join(HARNESS_FILE);
    write_atomic(&harness, &render_harness(wasm_file))?;

    Ok(Installed {
        loader: loader_dest,
        harness,
    })
}

/// Write via a temporary sibling so `path` is either old or complete.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).with_context(|| format!("Writing {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Renaming {} to {}", tmp.display(), path.display()));
    }
    Ok(())
}
