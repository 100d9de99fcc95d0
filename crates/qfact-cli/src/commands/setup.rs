//! Setup command implementation.
//!
//! Checks the active Rust toolchain against the minimum supported version
//! and installs the components the workspace expects:
//!
//! ```text
//!   version() ──→ too old? ──→ VersionTooOld (nothing installed)
//!        │
//!        └──→ install(rustfmt) ──→ install(clippy) ──→ done
//!                   │                    │
//!                   └────────────────────┴──→ InstallFailed (rest skipped)
//! ```

use std::fmt;
use std::io::{self, Write};
use std::process::Command;

use anyhow::Result;
use console::style;
use thiserror::Error;
use tracing::debug;

/// Oldest toolchain the workspace builds with.
pub const MIN_RUST_VERSION: RustVersion = RustVersion::new(1, 85, 0);

/// Components installed by `qfact setup`, in order.
pub const COMPONENTS: &[&str] = &["rustfmt", "clippy"];

/// Errors raised by the setup sequence.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The active toolchain predates [`MIN_RUST_VERSION`].
    #[error("Rust {required} or newer is required, found {actual}")]
    VersionTooOld {
        /// Minimum version.
        required: RustVersion,
        /// Active version.
        actual: RustVersion,
    },

    /// The toolchain version could not be determined.
    #[error("Could not determine the Rust version: {0}")]
    Probe(String),

    /// Installing a component failed; later components were not attempted.
    #[error("Failed to install '{component}': {reason}")]
    InstallFailed {
        /// Component that failed.
        component: String,
        /// What went wrong.
        reason: String,
    },

    /// Writing progress failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A `major.minor.patch` toolchain version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RustVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl RustVersion {
    /// Create a version.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the output of `rustc --version`, e.g.
    /// `rustc 1.85.0 (4d91de4e4 2025-02-17)`.
    pub fn parse(output: &str) -> Option<Self> {
        let version = output.split_whitespace().nth(1)?;
        let core = version.split('-').next()?;
        let mut parts = core.split('.').map(str::parse::<u32>);
        let major = parts.next()?.ok()?;
        let minor = parts.next()?.ok()?;
        let patch = parts.next()?.ok()?;
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for RustVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Access to the local toolchain.
pub trait Toolchain {
    /// Version of the active compiler.
    fn version(&self) -> Result<RustVersion, SetupError>;

    /// Install one component.
    fn install(&mut self, component: &str) -> Result<(), SetupError>;
}

/// The toolchain on `PATH`, driven through `rustc` and `rustup`.
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn version(&self) -> Result<RustVersion, SetupError> {
        let output = Command::new("rustc")
            .arg("--version")
            .output()
            .map_err(|e| SetupError::Probe(e.to_string()))?;
        let text = String::from_utf8_lossy(&output.stdout);
        RustVersion::parse(&text).ok_or_else(|| SetupError::Probe(text.trim().to_string()))
    }

    fn install(&mut self, component: &str) -> Result<(), SetupError> {
        let status = Command::new("rustup")
            .args(["component", "add", component])
            .status()
            .map_err(|e| SetupError::InstallFailed {
                component: component.to_string(),
                reason: e.to_string(),
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(SetupError::InstallFailed {
                component: component.to_string(),
                reason: format!("rustup exited with {status}"),
            })
        }
    }
}

/// Check the version, then install [`COMPONENTS`] one by one.
pub fn run_setup(toolchain: &mut impl Toolchain, out: &mut impl Write) -> Result<(), SetupError> {
    let actual = toolchain.version()?;
    debug!("Detected rustc {actual}");
    if actual < MIN_RUST_VERSION {
        writeln!(out, "Rust {MIN_RUST_VERSION} or newer is required.")?;
        writeln!(out, "The current version is {actual}.")?;
        return Err(SetupError::VersionTooOld {
            required: MIN_RUST_VERSION,
            actual,
        });
    }

    writeln!(
        out,
        "{} Rust {actual} is supported. Installing components...",
        style("✓").green().bold()
    )?;
    for component in COMPONENTS {
        writeln!(out, "  {} {component}", style("→").cyan())?;
        toolchain.install(component)?;
    }
    writeln!(out, "{} Component installation complete.", style("✓").green().bold())?;
    Ok(())
}

/// Execute the setup command.
pub fn execute() -> Result<()> {
    run_setup(&mut SystemToolchain, &mut io::stdout())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeToolchain {
        version: RustVersion,
        fail_on: Option<&'static str>,
        installed: Vec<String>,
    }

    impl FakeToolchain {
        fn new(version: RustVersion) -> Self {
            Self {
                version,
                fail_on: None,
                installed: vec![],
            }
        }
    }

    impl Toolchain for FakeToolchain {
        fn version(&self) -> Result<RustVersion, SetupError> {
            Ok(self.version)
        }

        fn install(&mut self, component: &str) -> Result<(), SetupError> {
            self.installed.push(component.to_string());
            if self.fail_on == Some(component) {
                return Err(SetupError::InstallFailed {
                    component: component.to_string(),
                    reason: "simulated".into(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_parse_rustc_output() {
        assert_eq!(
            RustVersion::parse("rustc 1.85.0 (4d91de4e4 2025-02-17)"),
            Some(RustVersion::new(1, 85, 0))
        );
        assert_eq!(
            RustVersion::parse("rustc 1.87.0-nightly (abc 2025-03-01)"),
            Some(RustVersion::new(1, 87, 0))
        );
        assert_eq!(RustVersion::parse("garbage"), None);
    }

    #[test]
    fn test_version_ordering() {
        assert!(RustVersion::new(1, 70, 0) < MIN_RUST_VERSION);
        assert!(RustVersion::new(1, 85, 1) > MIN_RUST_VERSION);
        assert!(RustVersion::new(2, 0, 0) > MIN_RUST_VERSION);
    }

    #[test]
    fn test_old_version_installs_nothing() {
        let mut toolchain = FakeToolchain::new(RustVersion::new(1, 70, 0));
        let mut out = Vec::new();
        let err = run_setup(&mut toolchain, &mut out).unwrap_err();

        assert!(matches!(err, SetupError::VersionTooOld { .. }));
        assert!(toolchain.installed.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1.85.0"));
        assert!(text.contains("1.70.0"));
    }

    #[test]
    fn test_installs_every_component() {
        let mut toolchain = FakeToolchain::new(MIN_RUST_VERSION);
        let mut out = Vec::new();
        run_setup(&mut toolchain, &mut out).unwrap();

        assert_eq!(toolchain.installed, COMPONENTS);
        assert!(String::from_utf8(out).unwrap().contains("installation complete"));
    }

    #[test]
    fn test_failure_stops_sequence() {
        let mut toolchain = FakeToolchain::new(RustVersion::new(1, 90, 0));
        toolchain.fail_on = Some("rustfmt");
        let mut out = Vec::new();
        let err = run_setup(&mut toolchain, &mut out).unwrap_err();

        assert!(matches!(err, SetupError::InstallFailed { ref component, .. } if component == "rustfmt"));
        assert_eq!(toolchain.installed, vec!["rustfmt"]);
    }
}
