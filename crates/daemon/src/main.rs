// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dispatchd`: the standalone process entry point. Parses a config path,
//! initializes logging, starts the composition root, and runs until a
//! shutdown signal arrives.

use clap::Parser;
use dispatch_daemon::{wait_for_shutdown_signal, App, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Parser)]
#[command(name = "dispatchd", about = "Dispatch core daemon")]
struct Cli {
    /// Path to a TOML config file. Missing fields fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write rolling log files into. Logs to stderr only if unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("failed to load config: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    if cli.log_dir.is_some() {
        settings.log_dir = cli.log_dir;
    }

    let _guard = dispatch_daemon::logging::init(settings.log_dir.as_deref());

    tracing::info!(monitor = ?settings.dispatch.monitor, "starting dispatchd");

    let app = App::start(settings.dispatch);
    let cancellation = CancellationToken::new();
    wait_for_shutdown_signal(&cancellation).await;
    app.shutdown().await;

    tracing::info!("dispatchd stopped");
    ExitCode::SUCCESS
}
