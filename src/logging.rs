//! Structured logging bootstrap using `tracing`.

use std::str::FromStr;

use anyhow::{bail, Result};
use serde::Deserialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output shape for log lines; stdout stays reserved for command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" | "text" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format {other:?}"),
        }
    }
}

/// Install a global stderr subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let timer = fmt::time::UtcTime::rfc_3339();
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Full => registry
            .with(base.with_file(true).with_line_number(true))
            .try_init()?,
        LogFormat::Compact => registry.with(base.compact()).try_init()?,
        LogFormat::Json => registry
            .with(base.json().with_current_span(true))
            .try_init()?,
    }

    tracing::debug!(?format, "tracing initialised");
    Ok(())
}
