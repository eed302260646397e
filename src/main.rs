//! comedy-stage: runs one show and streams its cues to stdout
//!
//! Every presentation change is written as one JSON object per line, for a
//! renderer to consume. Logs go to stderr.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use comedy_stage::config::Config;
use comedy_stage::events::StageCue;
use comedy_stage::jokes::load_or_fallback;
use comedy_stage::lifecycle::ShutdownSignal;
use comedy_stage::stage::ChannelStage;
use comedy_stage::state::Sequencer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "comedy-stage starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(
        ?config.jokes_path,
        stage_width = config.stage.stage_width,
        seed = ?config.seed,
        "configuration loaded"
    );

    let jokes = load_or_fallback(&config.jokes_path);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let shutdown = ShutdownSignal::new();

    // Sequencer -> renderer output
    let (cue_tx, mut cue_rx) = broadcast::channel::<StageCue>(256);

    let mut sequencer = Sequencer::new(ChannelStage::new(cue_tx), jokes, config.stage, rng);
    sequencer.start();

    info!("show initialized, entering main loop");

    tokio::select! {
        _ = sequencer.run() => {
            info!("show finished");
        }

        result = write_cues(&mut cue_rx) => {
            if let Err(e) = result {
                error!(?e, "cue output failed");
            }
        }

        result = shutdown.wait() => {
            match result {
                Ok(()) => info!("shutdown signal received"),
                Err(e) => error!(?e, "failed to register signal handlers"),
            }
        }
    }

    // Cleanup
    info!("shutting down...");
    let cancelled = sequencer.stop();

    info!(cancelled, "comedy-stage stopped");

    Ok(())
}

/// Write each cue to stdout as a JSON line
async fn write_cues(cue_rx: &mut broadcast::Receiver<StageCue>) -> Result<()> {
    let mut stdout = tokio::io::stdout();

    loop {
        match cue_rx.recv().await {
            Ok(cue) => {
                let mut line = serde_json::to_vec(&cue)?;
                line.push(b'\n');
                stdout.write_all(&line).await?;
                stdout.flush().await?;
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "cue receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                return Ok(());
            }
        }
    }
}
