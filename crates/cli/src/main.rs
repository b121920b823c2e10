//! `pizzaria` entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cli::{App, Cli, Config, Interrupt};
use client::HttpOrderApi;
use local_state::FileStateStore;
use storefront::{Storefront, StorefrontError};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Cancels in-flight requests on Ctrl-C.
async fn cancel_on_ctrl_c(interrupt: Interrupt) {
    if signal::ctrl_c().await.is_ok() {
        tracing::info!("received SIGINT, cancelling in-flight requests");
        interrupt.fire();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(&cli);

    // 1. Initialize tracing (stderr keeps stdout for command output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 2. Wire the storefront to the backend and the local state file
    let api = match HttpOrderApi::new(&config.client_config()) {
        Ok(api) => api,
        Err(e) => return report(&StorefrontError::from(e)),
    };
    let store = FileStateStore::new(config.state_file.clone());
    tracing::debug!(
        api_url = %config.api_url,
        state_file = %config.state_file.display(),
        "starting"
    );
    let app = App::new(Storefront::new(Arc::new(api), Arc::new(store)));

    // 3. Run the command, cancellable with Ctrl-C
    tokio::spawn(cancel_on_ctrl_c(app.interrupt()));
    match app.run(cli.command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn report(err: &StorefrontError) -> ExitCode {
    tracing::debug!(error = %err, "command failed");
    eprintln!("{}", err.user_message());
    ExitCode::FAILURE
}
