//! Launch handler: the whole engine start-up sequence.
//!
//! Order: load or inspect → monitor gateway → resolve → encode → select
//! binary → spawn → wait. Any failure before spawn drops the gateway, which
//! closes its socket.

use std::path::Path;

use tracing::{debug, info, warn};
use waterslide_axum::{GatewayConfig, MonitorGateway, MonitorHandle};
use waterslide_core::{InitConfig, MonitorConfig, WirePayload, encode, resolve_server_addr};
use waterslide_runtime::{ExitOutcome, Supervisor};

use crate::bootstrap::LauncherContext;
use crate::error::CliError;
use crate::parser::ConfigSource;

/// Launch the engine and wait for it.
///
/// The monitor gateway, if any, keeps serving until the engine exits.
pub async fn execute(
    ctx: &LauncherContext,
    source: ConfigSource,
    supervisor: Supervisor,
) -> Result<ExitOutcome, CliError> {
    let (payload, _monitor) = match source {
        ConfigSource::File(path) => prepare_from_file(ctx, &path).await?,
        ConfigSource::Payload(text) => prepare_from_payload(ctx, text).await?,
    };

    let binary = ctx.table.select(&ctx.platform, &ctx.config.bin_dir)?;
    info!(platform = %ctx.platform, binary = %binary.display(), "Selected engine binary");

    let mut engine = supervisor.launch(&binary, &payload)?;
    debug!(pid = ?engine.pid(), "Waiting for engine to exit");
    Ok(engine.wait().await?)
}

async fn prepare_from_file(
    ctx: &LauncherContext,
    path: &Path,
) -> Result<(WirePayload, Option<MonitorHandle>), CliError> {
    let mut config = InitConfig::load(path).await?;
    info!(path = %path.display(), mode = ?config.mode, "Loaded engine config");

    let monitor = start_monitor(ctx, &config.monitor).await;
    resolve_server_addr(&mut config, ctx.resolver.as_ref()).await?;
    let payload = encode(&config)?;

    Ok((payload, monitor))
}

async fn prepare_from_payload(
    ctx: &LauncherContext,
    text: String,
) -> Result<(WirePayload, Option<MonitorHandle>), CliError> {
    let payload = WirePayload::from_base64(text)?;
    let config = payload.decode()?;
    info!(mode = ?config.mode, "Using pre-encoded payload");

    let monitor = start_monitor(ctx, &config.monitor).await;
    Ok((payload, monitor))
}

/// Start the monitor gateway when the document asks for one.
///
/// Returns `None` when no UI port is configured or the port cannot be bound;
/// the engine launches either way.
pub async fn start_monitor(
    ctx: &LauncherContext,
    monitor: &MonitorConfig,
) -> Option<MonitorHandle> {
    let Some(config) = GatewayConfig::from_monitor(monitor, ctx.config.monitor_dir.clone()) else {
        debug!("No monitor uiPort configured; gateway disabled");
        return None;
    };

    match MonitorGateway::bind(config).await {
        Ok(gateway) => Some(gateway.serve()),
        Err(e) => {
            warn!(error = %e, "Monitor UI unavailable; launching engine without it");
            None
        }
    }
}
