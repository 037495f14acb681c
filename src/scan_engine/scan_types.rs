//! Core types for scan runs.
//!
//! Two failure tiers exist. [`ScanError`] aborts a run before any target is
//! processed. Everything that goes wrong for a single target is captured as
//! a [`RunOutcome`] value instead and never escapes the pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fatal, run-level errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Target list could not be read
    #[error("Failed to read target list {path}: {source}")]
    TargetsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// None of the SOCKS candidates accepted a connection
    #[error("No Tor SOCKS5 proxy reachable (tried {})", candidates.join(", "))]
    ProxyUnavailable { candidates: Vec<String> },

    /// Anonymity was required but not confirmed
    #[error("Anonymity check failed: {0}")]
    AnonymityNotConfirmed(String),

    /// HTTP transport could not be constructed
    #[error("Transport setup failed: {0}")]
    Transport(String),

    /// Output root could not be prepared
    #[error("Output directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for Result with `ScanError`
pub type ScanResult<T> = Result<T, ScanError>;

/// Why a single target failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    /// Target is not a parseable URL
    InvalidTarget,
    /// Fetch deadline expired
    Timeout,
    /// Connection, proxy or protocol failure
    Network,
    /// Body could not be read or decompressed
    Read,
    /// Artifact directory or files could not be written
    Write,
    /// The pipeline task panicked
    Internal,
}

impl FailureKind {
    /// Upper-case tag used in the report log
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidTarget => "INVALID TARGET",
            Self::Timeout => "TIMEOUT",
            Self::Network => "NETWORK ERROR",
            Self::Read => "READ ERROR",
            Self::Write => "WRITE ERROR",
            Self::Internal => "INTERNAL ERROR",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal status of one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    /// Every artifact was written
    Success { status_code: u16, elapsed: Duration },
    /// HTML and links were archived, visual capture failed
    Partial {
        status_code: u16,
        elapsed: Duration,
        reason: String,
    },
    /// Nothing past the failing step was attempted
    Failed { kind: FailureKind, message: String },
}

/// Write-once record of what happened to one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub target: String,
    /// Set once the artifact directory has been created
    pub artifact_dir: Option<PathBuf>,
    pub status: TargetStatus,
}

impl RunOutcome {
    #[must_use]
    pub fn failed(
        target: impl Into<String>,
        artifact_dir: Option<PathBuf>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            artifact_dir,
            status: TargetStatus::Failed {
                kind,
                message: message.into(),
            },
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, TargetStatus::Success { .. })
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self.status, TargetStatus::Partial { .. })
    }

    /// Failure kind, if the target failed
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.status {
            TargetStatus::Failed { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// HTTP status for targets that got past the fetch
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self.status {
            TargetStatus::Success { status_code, .. } | TargetStatus::Partial { status_code, .. } => {
                Some(status_code)
            }
            TargetStatus::Failed { .. } => None,
        }
    }
}

/// Aggregate counts over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub partial: usize,
    pub failed: BTreeMap<FailureKind, usize>,
}

impl RunSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[RunOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match &outcome.status {
                TargetStatus::Success { .. } => summary.succeeded += 1,
                TargetStatus::Partial { .. } => summary.partial += 1,
                TargetStatus::Failed { kind, .. } => *summary.failed.entry(*kind).or_default() += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.partial + self.failed.values().sum::<usize>()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} targets: {} ok, {} partial",
            self.total(),
            self.succeeded,
            self.partial
        )?;
        for (kind, count) in &self.failed {
            write!(f, ", {count} {kind}")?;
        }
        Ok(())
    }
}
