use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// REST service for contact records held in memory
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Cli {
    /// TCP port to listen on (default 8000, or `server.port` from config.toml)
    #[arg(long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Interface to bind (default 0.0.0.0, or `server.host` from config.toml)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Emit logs as JSON lines instead of the compact text format
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

fn load_settings(cli: &Cli) -> anyhow::Result<configs::ServerConfig> {
    let mut cfg = configs::AppConfig::load_or_default()?
        .with_overrides(cli.host.clone(), cli.port);
    cfg.normalize_and_validate()?;
    Ok(cfg.server)
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and SERVER_PORT are visible to clap and the filter
    dotenv().ok();
    let cli = Cli::parse();
    common::utils::logging::init_logging(cli.log_json);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "contacts",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            error!(service = "contacts", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = settings.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "contacts", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "contacts",
        event = "start",
        %service_id,
        pid,
        version,
        host = %settings.host,
        port = settings.port,
        threads = settings.worker_threads.unwrap_or_default(),
        "contacts service starting"
    );

    rt.block_on(async move {
        match server::run(settings).await {
            Ok(()) => {
                info!(service = "contacts", event = "stop", %service_id, pid, "contacts service stopped");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "contacts", event = "run_failed", error = %e, "contacts service terminated");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
