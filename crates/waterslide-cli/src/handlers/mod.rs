//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &LauncherContext, ...) -> Result<T, CliError>`
//! - They never read the environment or print; `main` owns stdout and exit codes.

pub mod export;
pub mod launch;
