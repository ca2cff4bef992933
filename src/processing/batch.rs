//! Batch processing: one gateway call, validation, a single corrective pass, then persistence.
use std::path::PathBuf;

use log::{debug, info, warn};

use super::artifacts;
use super::summary::{BatchReport, FailureNote};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::record::{SayingInput, SayingRecord};
use crate::validation::{validate, ValidationOutcome};

/// Number of sayings sent in a single gateway call.
pub const BATCH_SIZE: usize = 10;

/// Appended to the prompt of the corrective pass.
pub const CORRECTIVE_INSTRUCTIONS: &str = "\n\nCRITICAL FIX: The previous attempt failed validation. \
Every saying MUST be split into TWO semantic parts. \
All \"p2\" fields (lu_part2, en_literal_translation_p2, en_closest_real_corresponding_saying_p2) MUST contain text. \
Do not leave them empty.";

/// A saying with its validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success {
    pub input: SayingInput,
    pub record: SayingRecord,
}

/// A saying whose record (if any) did not pass validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub input: SayingInput,
    pub record: Option<SayingRecord>,
    pub reason: String,
}

/// Partition of a batch after validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub successes: Vec<Success>,
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, Copy)]
enum Pass {
    Initial,
    Retry,
}

/// Call `gateway` on `inputs` and validate what comes back.
fn attempt<G: Gateway + ?Sized>(
    gateway: &G,
    inputs: Vec<SayingInput>,
    extra_instructions: Option<&str>,
    pass: Pass,
) -> Result<BatchResult, Error> {
    let texts: Vec<String> = inputs.iter().map(|i| i.content.clone()).collect();
    let records = gateway.call(&texts, extra_instructions)?;

    if records.len() != inputs.len() {
        return Err(Error::Custom(format!(
            "gateway returned {} records for {} sayings",
            records.len(),
            inputs.len()
        )));
    }

    let mut result = BatchResult::default();
    for (input, record) in inputs.into_iter().zip(records) {
        match validate(record.as_ref(), &input.content) {
            ValidationOutcome::Valid => {
                // checked by validate
                if let Some(record) = record {
                    result.successes.push(Success { input, record });
                }
            }
            ValidationOutcome::Invalid(reason) => {
                match pass {
                    Pass::Initial => warn!(
                        "Initial validation failed for: {} - {}",
                        input.path.display(),
                        reason
                    ),
                    Pass::Retry => warn!(
                        "Still failing after retry: {} - {}",
                        input.path.display(),
                        reason
                    ),
                }
                debug!(
                    "Received data: {}",
                    serde_json::to_string_pretty(&record).unwrap_or_default()
                );
                result.failures.push(Failure {
                    input,
                    record,
                    reason,
                });
            }
        }
    }
    Ok(result)
}

/// Run the initial pass and, for failed sayings only, one corrective pass.
///
/// Failures left after the corrective pass are terminal.
/// Gateway errors in either pass abort the batch.
pub fn run_batch<G: Gateway + ?Sized>(
    gateway: &G,
    inputs: Vec<SayingInput>,
) -> Result<BatchResult, Error> {
    info!("Processing batch of {} items...", inputs.len());
    let mut result = attempt(gateway, inputs, None, Pass::Initial)?;

    if result.failures.is_empty() {
        return Ok(result);
    }

    info!(
        "Retrying {} failed items with corrected instructions...",
        result.failures.len()
    );
    let failed = std::mem::take(&mut result.failures)
        .into_iter()
        .map(|f| f.input)
        .collect();
    let retried = attempt(gateway, failed, Some(CORRECTIVE_INSTRUCTIONS), Pass::Retry)?;

    result.successes.extend(retried.successes);
    result.failures = retried.failures;
    Ok(result)
}

/// Write artifacts for every saying of `result`.
pub fn persist(result: &BatchResult) -> Result<BatchReport, Error> {
    let mut report = BatchReport::default();

    for success in &result.successes {
        report
            .generated
            .push(artifacts::write_success(&success.input, &success.record)?);
    }

    for failure in &result.failures {
        artifacts::write_failure(&failure.input, failure.record.as_ref(), &failure.reason)?;
        report.failures.push(FailureNote {
            path: failure.input.path.clone(),
            reason: failure.reason.clone(),
        });
    }

    Ok(report)
}

/// Read, process and persist the sayings stored at `paths`.
pub fn process_batch<G: Gateway + ?Sized>(
    gateway: &G,
    paths: &[PathBuf],
) -> Result<BatchReport, Error> {
    let inputs = paths
        .iter()
        .map(|path| SayingInput::read(path))
        .collect::<Result<Vec<_>, Error>>()?;

    let result = run_batch(gateway, inputs)?;
    persist(&result)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::record::tests::beidel;

    type Answer = Result<Vec<Option<SayingRecord>>, Error>;

    /// Gateway replaying scripted answers and recording what it was asked.
    struct Scripted {
        answers: RefCell<VecDeque<Answer>>,
        calls: RefCell<Vec<(Vec<String>, Option<String>)>>,
    }

    impl Scripted {
        fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Gateway for Scripted {
        fn call(
            &self,
            sayings: &[String],
            extra_instructions: Option<&str>,
        ) -> Result<Vec<Option<SayingRecord>>, Error> {
            self.calls
                .borrow_mut()
                .push((sayings.to_vec(), extra_instructions.map(str::to_string)));
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Custom("no more answers".to_string())))
        }
    }

    const BEIDEL: &str = "D'Aen op oder de Beidel.";

    fn input(name: &str, content: &str) -> SayingInput {
        SayingInput::new(PathBuf::from(name), content)
    }

    fn broken() -> SayingRecord {
        let mut record = beidel();
        record.entry.en_literal_translation_p2 = "  ".to_string();
        record
    }

    #[test]
    fn all_valid_single_call() {
        let gw = Scripted::new(vec![Ok(vec![Some(beidel()), Some(beidel())])]);
        let result = run_batch(&gw, vec![input("a.txt", BEIDEL), input("b.txt", BEIDEL)]).unwrap();

        assert_eq!(result.successes.len(), 2);
        assert!(result.failures.is_empty());
        assert_eq!(gw.calls.borrow().len(), 1);
        assert_eq!(gw.calls.borrow()[0].1, None);
    }

    #[test_log::test]
    fn retry_only_failed_items() {
        let gw = Scripted::new(vec![
            Ok(vec![Some(beidel()), Some(broken()), None]),
            Ok(vec![Some(beidel()), Some(broken())]),
        ]);
        let inputs = vec![
            input("a.txt", BEIDEL),
            input("b.txt", BEIDEL),
            input("c.txt", "D'Aen  op oder de Beidel"),
        ];

        let result = run_batch(&gw, inputs).unwrap();

        let calls = gw.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].0,
            vec![BEIDEL.to_string(), "D'Aen  op oder de Beidel".to_string()]
        );
        assert_eq!(calls[1].1.as_deref(), Some(CORRECTIVE_INSTRUCTIONS));

        let succeeded: Vec<&Path> = result
            .successes
            .iter()
            .map(|s| s.input.path.as_path())
            .collect();
        assert_eq!(succeeded, vec![Path::new("a.txt"), Path::new("b.txt")]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].input.path, Path::new("c.txt"));
        assert_eq!(
            result.failures[0].reason,
            "Field en_literal_translation_p2 is empty - sayings must always be split in 2"
        );
    }

    #[test]
    fn never_a_third_call() {
        let gw = Scripted::new(vec![
            Ok(vec![None]),
            Ok(vec![None]),
            Ok(vec![Some(beidel())]),
        ]);
        let result = run_batch(&gw, vec![input("a.txt", BEIDEL)]).unwrap();

        assert_eq!(gw.calls.borrow().len(), 2);
        assert_eq!(result.failures[0].reason, "No data returned");
    }

    #[test]
    fn gateway_failure_aborts() {
        let gw = Scripted::new(vec![Err(Error::Custom("down".to_string()))]);
        assert!(run_batch(&gw, vec![input("a.txt", BEIDEL)]).is_err());

        let gw = Scripted::new(vec![
            Ok(vec![None]),
            Err(Error::Custom("down".to_string())),
        ]);
        assert!(run_batch(&gw, vec![input("a.txt", BEIDEL)]).is_err());
    }

    #[test]
    fn misaligned_gateway_is_an_error() {
        let gw = Scripted::new(vec![Ok(vec![Some(beidel())])]);
        let err = run_batch(&gw, vec![input("a.txt", BEIDEL), input("b.txt", BEIDEL)]);
        assert!(err.is_err());
    }

    #[test]
    fn process_batch_writes_success() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("test.txt");
        fs::write(&txt, BEIDEL).unwrap();

        let gw = Scripted::new(vec![Ok(vec![Some(beidel())])]);
        let report = process_batch(&gw, &[txt.clone()]).unwrap();

        let json = dir.path().join("test.json");
        assert_eq!(report.generated, vec![json.clone()]);
        assert!(report.failures.is_empty());
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(json).unwrap()).unwrap();
        assert_eq!(written["lu_part1"], "D'Aen op oder");
        assert!(!dir.path().join("test-error.json").exists());
    }

    #[test]
    fn process_batch_input_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("test.txt");
        fs::write(&txt, "\u{FEFF}D'Aen op oder de Beidel.\r\n").unwrap();

        let gw = Scripted::new(vec![Ok(vec![Some(beidel())])]);
        let report = process_batch(&gw, &[txt]).unwrap();

        assert_eq!(report.generated.len(), 1);
        assert!(report.failures.is_empty());
        assert_eq!(gw.calls.borrow()[0].0, vec![BEIDEL.to_string()]);
        assert!(!dir.path().join("test-error.json").exists());
    }

    #[test]
    fn process_batch_success_after_retry() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("test.txt");
        fs::write(&txt, BEIDEL).unwrap();

        let gw = Scripted::new(vec![Ok(vec![Some(broken())]), Ok(vec![Some(beidel())])]);
        let report = process_batch(&gw, &[txt]).unwrap();

        assert_eq!(report.generated.len(), 1);
        assert!(dir.path().join("test.json").exists());
        assert!(!dir.path().join("test-error.json").exists());
    }

    #[test]
    fn process_batch_writes_terminal_failure() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("test.txt");
        fs::write(&txt, BEIDEL).unwrap();

        let gw = Scripted::new(vec![Ok(vec![Some(broken())]), Ok(vec![Some(broken())])]);
        let report = process_batch(&gw, &[txt.clone()]).unwrap();

        assert!(report.generated.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, txt);
        assert!(!dir.path().join("test.json").exists());
        assert!(dir.path().join("test-error.json").exists());
    }

    #[test]
    fn unreadable_input_aborts_before_calling() {
        let dir = tempfile::tempdir().unwrap();
        let gw = Scripted::new(vec![]);
        let err = process_batch(&gw, &[dir.path().join("missing.txt")]).unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
        assert!(gw.calls.borrow().is_empty());
    }
}
