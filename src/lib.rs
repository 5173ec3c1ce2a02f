//! Syntax-aware import specifier rewriter for JavaScript and TypeScript.
//!
//! respec parses each source file with tree-sitter, collects the string
//! literals sitting in import/re-export specifier position, filters them
//! through a pluggable [`policy::PathPolicy`], and splices the replacement
//! text back into the original buffer, leaving every other byte untouched.

pub mod config;
pub mod errors;
pub mod output;
pub mod plan;
pub mod policy;
pub mod rewrite;
pub mod scan;
pub mod splice;
pub mod walk;
