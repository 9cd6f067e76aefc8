use anyhow::{Context, Result};
use kernel32_bindings::config::{validate_config, ConfigLoader, LoggingConfig, DEFAULT_CONFIG_FILE};
use kernel32_bindings::{initialize, probe};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(logging.show_target)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let config = ConfigLoader::new(&config_path)
        .load_or_default()
        .with_context(|| format!("loading {}", config_path))?;
    validate_config(&config).context("validating configuration")?;

    init_logging(&config.logging);
    info!("Starting kernel32-probe v{}", env!("CARGO_PKG_VERSION"));
    info!("Architecture: {}", std::env::consts::ARCH);

    #[cfg(not(target_os = "windows"))]
    {
        anyhow::bail!("kernel32-probe only supports the Windows platform");
    }

    let k32 = initialize(&config.library).map_err(|err| {
        error!(library = %config.library.name, error = %err, "symbol table unavailable");
        err
    })?;

    let report = probe::run(k32, &config.probe)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Probe complete");
    Ok(())
}
