use crate::errors::{RespecError, Result};

/// Decides which module specifiers are eligible for rewriting, and what
/// their replacement text is.
///
/// Implementations must be stateless with respect to individual files: one
/// policy instance is shared read-only across every target in a run.
/// `rewrite` is only ever called on specifiers for which `is_local` returned
/// true, and must succeed on every such input.
pub trait PathPolicy: Send + Sync {
    /// Whether `specifier` refers to a file inside the project tree, as
    /// opposed to an external package name.
    fn is_local(&self, specifier: &str) -> bool;

    /// Replacement text for a specifier accepted by [`is_local`].
    ///
    /// [`is_local`]: PathPolicy::is_local
    fn rewrite(&self, specifier: &str) -> String;
}

/// Default policy: remap a trailing extension suffix.
///
/// A specifier is local iff it ends with `from`; rewriting swaps that
/// trailing suffix for `to` and leaves the rest of the path untouched.
/// `./util.ts` with `.ts` -> `.js` becomes `./util.js`; `left-pad` is left
/// alone.
#[derive(Debug, Clone)]
pub struct SuffixRemap {
    from: String,
    to: String,
}

impl SuffixRemap {
    /// Both suffixes must be non-empty and begin with the `.` delimiter.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self> {
        let from = from.into();
        let to = to.into();
        for suffix in [&from, &to] {
            if suffix.is_empty() {
                return Err(RespecError::Config("suffix must not be empty".to_string()));
            }
            if !suffix.starts_with('.') {
                return Err(RespecError::Config(format!(
                    "suffix must begin with '.': {suffix}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn from_suffix(&self) -> &str {
        &self.from
    }

    pub fn to_suffix(&self) -> &str {
        &self.to
    }
}

impl PathPolicy for SuffixRemap {
    fn is_local(&self, specifier: &str) -> bool {
        specifier.ends_with(&self.from)
    }

    fn rewrite(&self, specifier: &str) -> String {
        let stem = &specifier[..specifier.len() - self.from.len()];
        format!("{stem}{}", self.to)
    }
}
