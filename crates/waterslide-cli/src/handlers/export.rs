//! Export handler: JSON config in, base64 payload out.

use std::path::Path;

use tracing::debug;
use waterslide_core::{InitConfig, WirePayload, encode, resolve_server_addr};

use crate::bootstrap::LauncherContext;
use crate::error::CliError;

/// Load, resolve if needed and encode a configuration without launching anything.
pub async fn execute(ctx: &LauncherContext, path: &Path) -> Result<WirePayload, CliError> {
    let mut config = InitConfig::load(path).await?;

    if !resolve_server_addr(&mut config, ctx.resolver.as_ref()).await? {
        debug!("Server address already numeric; no lookup needed");
    }

    let payload = encode(&config)?;
    debug!(chars = payload.as_str().len(), "Exported payload");
    Ok(payload)
}
