use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and DATABASE_URL are visible
    dotenv().ok();
    let (cfg, source) = match server::startup::load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "catalogue", event = "config_invalid", error = %e, "refusing to start");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging.format);
    info!(service = "catalogue", event = "logger_init", format = %cfg.logging.format, config_source = %source, "tracing subscriber initialized");

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "catalogue",
            event = "panic",
            %instance_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads.filter(|w| *w > 0) {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalogue", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "catalogue",
        event = "start",
        %instance_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "catalogue service starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            if let Err(e) = server::run(cfg).await {
                error!(service = "catalogue", event = "run_failed", error = %e, "server::run returned error");
                Err(e)
            } else {
                Ok(())
            }
        });

        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(service = "catalogue", event = "stop", %instance_id, pid, "server stopped normally");
                    std::process::ExitCode::SUCCESS
                }
                // already logged by the task
                Ok(Err(_)) => std::process::ExitCode::FAILURE,
                Err(e) => {
                    error!(service = "catalogue", event = "task_join_error", error = %e, "server task join error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "catalogue", event = "shutdown_signal", %instance_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
