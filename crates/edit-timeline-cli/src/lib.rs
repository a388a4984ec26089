//! Command-line host for persisted edit timelines.
//!
//! Each invocation loads the state file, performs one operation against a
//! [`Timeline`], prints the result, and writes the state back if it changed.
//! Moving the cursor prints the snapshot the caller should restore; the CLI
//! itself never touches the tracked files.

pub mod args;
pub mod store;

use anyhow::Context;
use edit_timeline::{FileUri, Snapshot, SnapshotEntry, Step, Timeline, TimelineConfig};
use serde_json::json;

pub use args::{Cli, Command, StopArg};
pub use store::StateFile;

/// Execute one command and return what should be printed.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = TimelineConfig::load_or_default(cli.config.as_deref())
        .context("failed to load config")?;
    if let Some(policy) = cli.restore_policy {
        config = config.with_restore_policy(policy);
    }

    let store = StateFile::new(&cli.state);
    let mut timeline = match store.read()? {
        Some(json) => Timeline::from_json(config, &json)
            .with_context(|| format!("invalid timeline in {}", store.path().display()))?,
        None => Timeline::with_config(config),
    };
    let generation = timeline.generation();

    let output = match &cli.command {
        Command::Show => show(&timeline),
        Command::Disablement => serde_json::to_string_pretty(timeline.request_disablement())?,
        Command::Push { request, stop, files } => {
            let snapshot: Snapshot = files
                .iter()
                .map(|(uri, content)| {
                    (FileUri::from(uri.as_str()), SnapshotEntry::new(request.as_str(), content.as_str()))
                })
                .collect();
            let stop_id = stop.stop_id();
            timeline.push_snapshot(request.as_str().into(), stop_id.clone(), snapshot);
            format!("pushed {request}/{stop_id} (index {})", timeline.index())
        }
        Command::Undo => {
            let step = timeline.undo_step();
            move_to(&mut timeline, step, "nothing to undo")?
        }
        Command::Redo => {
            let step = timeline.redo_step();
            move_to(&mut timeline, step, "nothing to redo")?
        }
        Command::Restore { request, stop } => {
            let step = timeline.snapshot_for_restore(request, &stop.stop_id());
            move_to(&mut timeline, step, "no such stop")?
        }
    };

    if timeline.generation() != generation {
        store.write(&timeline.to_json()?)?;
    }
    Ok(output)
}

fn show(timeline: &Timeline) -> String {
    let status = timeline.status();
    let mut lines = vec![format!(
        "index {}/{}  undo: {}  redo: {}",
        status.index, status.stop_count, status.can_undo, status.can_redo
    )];
    let mut pos = 0;
    for entry in timeline.history() {
        lines.push(entry.request_id.to_string());
        for stop in &entry.stops {
            pos += 1;
            let marker = if pos == status.index { ">" } else if pos > status.index { "x" } else { " " };
            lines.push(format!("  {marker} {} ({} files)", stop.stop_id, stop.snapshot.len()));
        }
    }
    lines.join("\n")
}

fn move_to(timeline: &mut Timeline, step: Option<Step>, missing: &str) -> anyhow::Result<String> {
    let Some(mut step) = step else {
        return Ok(missing.to_string());
    };
    if step.apply(timeline) {
        tracing::info!(kind = %step.kind(), request_id = %step.request_id(), stop_id = %step.stop().stop_id, "moved cursor");
    } else {
        tracing::debug!(kind = %step.kind(), stop_id = %step.stop().stop_id, "cursor already at stop");
    }

    let out = json!({
        "kind": step.kind().to_string(),
        "requestId": step.request_id(),
        "stopId": step.stop().stop_id,
        "index": timeline.index(),
        "snapshot": step.stop().snapshot,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
