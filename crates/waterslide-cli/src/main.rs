//! CLI entry point - the composition root.
//!
//! Parses arguments, wires adapters via bootstrap and maps the outcome to
//! the process exit code. Launcher logs go to stderr; stdout carries only
//! engine output and exported payloads.

use std::io::Write;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use waterslide_cli::{Cli, CliError, Invocation, LauncherConfig, USAGE, bootstrap, handlers};
use waterslide_runtime::Supervisor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let invocation = match parse_invocation() {
        Ok(invocation) => invocation,
        Err(e) => fail(&e),
    };

    // Bootstrap the launcher context (composition root)
    let config = LauncherConfig::with_defaults()?;
    debug!(
        bin_dir = %config.bin_dir.display(),
        monitor_dir = %config.monitor_dir.display(),
        "Launcher resources"
    );
    let ctx = bootstrap(config);

    let result = match invocation {
        Invocation::Launch(source) => handlers::launch::execute(&ctx, source, Supervisor::new())
            .await
            .map(|outcome| outcome.launcher_exit_code()),
        Invocation::Export(path) => handlers::export::execute(&ctx, &path).await.map(|payload| {
            println!("{payload}");
            0
        }),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => fail(&e),
    }
}

/// Parse argv. `--help` and `--version` print and exit 0 here.
fn parse_invocation() -> Result<Invocation, CliError> {
    let cli = Cli::try_parse().map_err(|e| {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
        debug!(error = %e, "Argument parsing failed");
        CliError::from(e)
    })?;
    cli.into_invocation()
}

fn fail(err: &CliError) -> ! {
    if matches!(err, CliError::Usage(_)) {
        print!("{USAGE}");
        let _ = std::io::stdout().flush();
    }
    eprintln!("Error: {err}");
    std::process::exit(err.exit_code())
}
