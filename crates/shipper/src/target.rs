//! Compilation target descriptors.
//!
//! The list is static and ordered; adding a platform is a data change only.

/// `GOOS` value of the target whose binary runs in a browser.
pub const WEB_OS: &str = "js";

/// One compilation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    /// Value for `GOOS`.
    pub os: &'static str,
    /// Value for `GOARCH`.
    pub arch: &'static str,
    /// Appended to the artifact name, may be empty.
    pub extension: &'static str,
    /// Extra `-ldflags` for this target only, may be empty.
    pub extra_flags: &'static str,
}

/// All targets, built in this order.
///
/// Derived artifact names must stay unique across the list.
pub static TARGETS: &[Target] = &[
    Target {
        os: "windows",
        arch: "amd64",
        extension: ".exe",
        // No console window for the GUI build
        extra_flags: "-H windowsgui",
    },
    Target {
        os: "linux",
        arch: "amd64",
        extension: "",
        extra_flags: "",
    },
    // macOS Intel
    Target {
        os: "darwin",
        arch: "amd64",
        extension: "",
        extra_flags: "",
    },
    // macOS Apple Silicon
    Target {
        os: "darwin",
        arch: "arm64",
        extension: "",
        extra_flags: "",
    },
    Target {
        os: WEB_OS,
        arch: "wasm",
        extension: ".wasm",
        extra_flags: "",
    },
];

impl Target {
    /// `{app}_{os}_{arch}{extension}`
    pub fn artifact_name(&self, app_name: &str) -> String {
        format!("{app_name}_{}_{}{}", self.os, self.arch, self.extension)
    }

    /// Baseline flags followed by this target's extras, single-space separated.
    pub fn ldflags(&self, baseline: &str) -> String {
        if self.extra_flags.is_empty() {
            baseline.to_string()
        } else {
            format!("{baseline} {}", self.extra_flags)
        }
    }

    /// Whether this target gets the browser harness after building.
    pub fn is_web(&self) -> bool {
        self.os == WEB_OS
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
