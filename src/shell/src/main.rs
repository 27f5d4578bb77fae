use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::{error, info, warn};
use panel_sync::{
    config::AppConfig,
    console,
    shell::{ConsoleView, Shell, ShellMessage},
};
use panel_sync_core::Event;
use std::io::Write;
use tokio::{
    io::BufReader,
    sync::mpsc::{self, UnboundedSender},
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    initialize();

    let config = AppConfig::load().context("failed to load configuration")?;
    info!(
        "panel for {} (poll interval {} ms)",
        config.device.url, config.polling.interval_ms
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let shell = Shell::new(&config, tx.clone(), ConsoleView)?;

    send(&tx, Event::StartPolling {
        interval_ms: config.polling.interval_ms,
    });
    send(&tx, Event::Refresh);

    tokio::spawn(read_commands(tx.clone(), config.polling.interval_ms));
    tokio::spawn(quit_on_ctrl_c(tx.clone()));
    drop(tx);

    shell.run(rx).await;
    Ok(())
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    // stdout belongs to the rendered panel
    builder.format(|f, record| writeln!(f, "[{}] {}", record.level(), record.args()));
    builder.target(Target::Stderr).init();

    info!("module version: {}", env!("CARGO_PKG_VERSION"));
}

fn send(tx: &UnboundedSender<ShellMessage>, event: Event) {
    if tx.send(ShellMessage::Event(event)).is_err() {
        warn!("shell loop is gone, dropping event");
    }
}

async fn read_commands(tx: UnboundedSender<ShellMessage>, default_interval_ms: u64) {
    println!("{}", console::USAGE);
    let stdin = BufReader::new(tokio::io::stdin());
    console::forward_commands(stdin, tx, default_interval_ms).await;
}

async fn quit_on_ctrl_c(tx: UnboundedSender<ShellMessage>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("interrupted, shutting down");
            let _ = tx.send(ShellMessage::Quit);
        }
        Err(e) => warn!("failed to install Ctrl-C handler: {e:#}"),
    }
}
