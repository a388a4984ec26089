//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use edit_timeline::{RestorePolicy, StopId};

/// Inspect and step a persisted edit timeline.
#[derive(Debug, Parser)]
#[command(name = "edit-timeline", version)]
pub struct Cli {
    /// Persisted timeline state (JSON). Missing file = empty timeline.
    #[arg(long, short = 's', default_value = "timeline.json")]
    pub state: PathBuf,

    /// Timeline configuration (RON).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Override the configured restore policy.
    #[arg(long)]
    pub restore_policy: Option<RestorePolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print cursor, undo/redo availability, and request disablement.
    Show,
    /// Record a checkpoint for a request.
    Push {
        request: String,
        #[command(flatten)]
        stop: StopArg,
        /// Tracked file content as URI=CONTENT (repeatable).
        #[arg(long = "file", value_parser = parse_file_entry)]
        files: Vec<(String, String)>,
    },
    /// Step back one checkpoint and print the snapshot to restore.
    Undo,
    /// Step forward one checkpoint and print the snapshot to restore.
    Redo,
    /// Jump to a specific checkpoint and print the snapshot to restore.
    Restore {
        request: String,
        #[command(flatten)]
        stop: StopArg,
    },
    /// Print the request disablement list as JSON.
    Disablement,
}

/// Exactly one way of naming a stop.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct StopArg {
    /// Named stop id.
    #[arg(long)]
    pub stop: Option<String>,
    /// The request's root stop.
    #[arg(long)]
    pub root: bool,
    /// The request's post-edit stop.
    #[arg(long)]
    pub post_edit: bool,
}

impl StopArg {
    pub fn stop_id(&self) -> StopId {
        if self.root {
            StopId::Root
        } else if self.post_edit {
            StopId::PostEdit
        } else {
            StopId::from(self.stop.as_deref().unwrap_or_default())
        }
    }
}

fn parse_file_entry(raw: &str) -> Result<(String, String), String> {
    let (uri, content) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected URI=CONTENT, got '{raw}'"))?;
    if uri.is_empty() {
        return Err(format!("empty uri in '{raw}'"));
    }
    Ok((uri.to_string(), content.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_entry() {
        assert_eq!(
            parse_file_entry("file:///a.rs=fn main() {}").unwrap(),
            ("file:///a.rs".to_string(), "fn main() {}".to_string())
        );
        assert_eq!(parse_file_entry("a=b=c").unwrap().1, "b=c");
        assert!(parse_file_entry("no-separator").is_err());
        assert!(parse_file_entry("=content").is_err());
    }

    #[test]
    fn test_push_requires_one_stop_form() {
        assert!(Cli::try_parse_from(["edit-timeline", "push", "r1"]).is_err());
        assert!(Cli::try_parse_from(["edit-timeline", "push", "r1", "--root", "--post-edit"]).is_err());

        let cli = Cli::try_parse_from(["edit-timeline", "push", "r1", "--post-edit"]).unwrap();
        let Command::Push { stop, .. } = cli.command else {
            panic!("expected push");
        };
        assert_eq!(stop.stop_id(), StopId::PostEdit);
    }

    #[test]
    fn test_restore_policy_flag() {
        let cli = Cli::try_parse_from(["edit-timeline", "--restore-policy", "clamp", "show"]).unwrap();
        assert_eq!(cli.restore_policy, Some(RestorePolicy::Clamp));
        assert!(Cli::try_parse_from(["edit-timeline", "--restore-policy", "maybe", "show"]).is_err());
    }
}
