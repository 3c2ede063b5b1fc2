use anyhow::{Context, Result};
use clap::Parser;
use countdown_widget::cli::Cli;
use countdown_widget::config::Settings;
use countdown_widget::logging;
use countdown_widget::widget::{self, Launch};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = logging::init(cli.log_file.as_deref(), cli.log_level());

    let mut settings = match cli.config_path() {
        Some(path) => Settings::load(&path).map_err(|e| {
            error!(error = %e, "failed to load configuration");
            e
        })?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);

    info!(
        log = ?log_path,
        interval_ms = settings.timer.interval_ms,
        sound = settings.sound.enabled,
        "starting countdown"
    );

    widget::configure(Launch {
        settings,
        preset: cli.preset(),
        autostart: cli.start,
    });

    let program = bubbletea_rs::Program::<widget::Model>::builder()
        .build()
        .context("failed to set up the terminal program")?;
    program.run().await.context("countdown program failed")?;

    info!("countdown exited");
    Ok(())
}
