use crate::errors::{RespecError, Result};
use crate::plan::{plan_substitutions, PlannedSubstitution};
use crate::policy::PathPolicy;
use crate::scan::{scan_module_specifiers, ScanOptions};
use crate::splice::splice;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cached result of the scan step: the bytes read from disk and the plan
/// computed over them.
#[derive(Debug)]
struct ScanData {
    source: Vec<u8>,
    plan: Vec<PlannedSubstitution>,
}

#[derive(Debug)]
enum TargetState {
    Unscanned,
    Scanned(ScanData),
    Written(ScanData),
}

/// One file bound to one policy and one parser configuration, driven
/// through an explicit lifecycle: `scan()` once, then materialize with
/// [`to_buffer`] or persist with [`write_to_file`].
///
/// `to_buffer` is pure and may be called any number of times once scanned.
/// `write_to_file` mutates the file and is allowed exactly once per
/// instance; the second call fails with `AlreadyWritten`. Calling either
/// before `scan()` fails with `NotInitialized`.
///
/// [`to_buffer`]: RewriteTarget::to_buffer
/// [`write_to_file`]: RewriteTarget::write_to_file
pub struct RewriteTarget {
    path: PathBuf,
    options: ScanOptions,
    policy: Arc<dyn PathPolicy>,
    state: TargetState,
}

impl RewriteTarget {
    pub fn new(path: impl Into<PathBuf>, options: ScanOptions, policy: Arc<dyn PathPolicy>) -> Self {
        Self {
            path: path.into(),
            options,
            policy,
            state: TargetState::Unscanned,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file once and compute the substitution plan.
    ///
    /// Valid only from the unscanned state; a second call fails with
    /// `AlreadyScanned`.
    pub fn scan(&mut self) -> Result<()> {
        if !matches!(self.state, TargetState::Unscanned) {
            return Err(RespecError::AlreadyScanned {
                path: self.path.clone(),
            });
        }

        let source = std::fs::read(&self.path)?;
        let literals = scan_module_specifiers(&source, &self.options, &self.path)?;
        let plan = plan_substitutions(literals, self.policy.as_ref());

        tracing::debug!(
            path = %self.path.display(),
            substitutions = plan.len(),
            "scanned rewrite target"
        );

        self.state = TargetState::Scanned(ScanData { source, plan });
        Ok(())
    }

    /// The substitution plan computed by [`scan`].
    ///
    /// [`scan`]: RewriteTarget::scan
    pub fn plan(&self) -> Result<&[PlannedSubstitution]> {
        match &self.state {
            TargetState::Unscanned => Err(RespecError::NotInitialized { operation: "plan()" }),
            TargetState::Scanned(data) | TargetState::Written(data) => Ok(&data.plan),
        }
    }

    /// Whether the scan found anything to rewrite.
    pub fn has_changes(&self) -> Result<bool> {
        Ok(!self.plan()?.is_empty())
    }

    /// Splice the cached source into a rewritten buffer without touching the
    /// file. Pure; repeatable.
    pub fn to_buffer(&self) -> Result<Vec<u8>> {
        match &self.state {
            TargetState::Unscanned => Err(RespecError::NotInitialized {
                operation: "to_buffer()",
            }),
            TargetState::Scanned(data) | TargetState::Written(data) => {
                Ok(splice(&data.source, &data.plan))
            }
        }
    }

    /// Rewrite the file in place.
    ///
    /// Opens the file read+write, reads the current bytes, computes the full
    /// rewritten buffer in memory, then writes it back and truncates. The
    /// handle is released on every exit path and no partial buffer ever
    /// reaches disk. Allowed exactly once; valid only after [`scan`].
    ///
    /// [`scan`]: RewriteTarget::scan
    pub fn write_to_file(&mut self) -> Result<()> {
        let data = match std::mem::replace(&mut self.state, TargetState::Unscanned) {
            TargetState::Unscanned => {
                return Err(RespecError::NotInitialized {
                    operation: "write_to_file()",
                });
            }
            TargetState::Written(data) => {
                self.state = TargetState::Written(data);
                return Err(RespecError::AlreadyWritten {
                    path: self.path.clone(),
                });
            }
            TargetState::Scanned(data) => data,
        };

        let result = Self::write_spliced(&self.path, &data);
        self.state = match result {
            Ok(()) => TargetState::Written(data),
            Err(_) => TargetState::Scanned(data),
        };
        result
    }

    fn write_spliced(path: &Path, data: &ScanData) -> Result<()> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        let mut current = Vec::new();
        file.read_to_end(&mut current)?;

        let rewritten = splice(&current, &data.plan);

        file.seek(SeekFrom::Start(0))?;
        file.write_all(&rewritten)?;
        file.set_len(rewritten.len() as u64)?;
        Ok(())
    }
}
