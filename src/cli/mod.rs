pub mod check;
pub mod rewrite;

use clap::{Parser, Subcommand};
use respec::errors::Result;

#[derive(Debug, Parser)]
#[command(
    name = "respec",
    version,
    about = "Syntax-aware import specifier rewriter for JavaScript and TypeScript"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite eligible import specifiers in place
    Rewrite(rewrite::RewriteArgs),
    /// Report pending rewrites without touching files; exits 1 if any
    Check(rewrite::RewriteArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rewrite(args) => rewrite::run(&args),
        Commands::Check(args) => check::run(&args),
    }
}
