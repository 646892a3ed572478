use std::path::Path;

use anyhow::Context;
use tracing::info;

use framekit::{init_logging, CommandWords, LocateSession, SimConfig, SimMachine, XyPoint};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load_from_file(Path::new(&path))
            .with_context(|| format!("loading config {}", path))?,
        None => SimConfig::default(),
    };

    info!(
        version = framekit::VERSION,
        built = framekit::BUILD_DATE,
        command = %config.command,
        "framekit locate simulation"
    );

    let words = CommandWords::parse(&config.command);
    let mut machine = SimMachine::new(config.initial_feed_rate).with_workspace_offset(
        XyPoint::new(config.workspace_offset_x, config.workspace_offset_y),
    );

    let session = LocateSession::new(&mut machine);
    let token = session.token();

    // The simulated operator watches the frame for a while, then presses
    // back on the locate screen.
    let mut remaining = config.cancel_after_steps;
    let mut session = session.with_display_poll(move || {
        remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            token.cancel();
        }
    });

    if let Some(slice) = config.slice_mm {
        session = session.with_slice(slice);
    }

    session.run(&words).context("locate session failed")?;

    info!(
        moves = machine.moves().len(),
        traveled_mm = machine.traveled_mm(),
        corner_syncs = machine.synchronize_count().saturating_sub(1),
        "simulation complete"
    );

    Ok(())
}
