//! Run-wide accounting of generated artifacts and unresolved failures.
use std::fmt;
use std::path::PathBuf;

/// A saying that is still invalid after the corrective pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNote {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a single persisted batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub failures: Vec<FailureNote>,
}

/// Accumulates batch reports over a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    generated: usize,
    failures: Vec<FailureNote>,
}

impl RunSummary {
    pub fn absorb(&mut self, report: BatchReport) {
        self.generated += report.generated.len();
        self.failures.extend(report.failures);
    }

    pub fn generated(&self) -> usize {
        self.generated
    }

    pub fn failures(&self) -> &[FailureNote] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "Finished processing successfully.");
        }

        let ruler = "=".repeat(50);
        writeln!(f, "{ruler}")?;
        writeln!(f, "Finished with {} errors:", self.failures.len())?;
        for failure in &self.failures {
            writeln!(f, "❌ {}: {}", failure.path.display(), failure.reason)?;
        }
        write!(f, "{ruler}")
    }
}
