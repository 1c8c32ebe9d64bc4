use clap::{Parser, Subcommand};

use crate::catalog;

#[derive(Parser, Debug)]
#[command(name = "segment-creator", version, about = "Name a segment, pick schema fields, post it to a webhook")]
pub struct Cli {
    /// Webhook URL; overrides the configured endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Run the interactive TUI (default)
    Run {
        /// Tick rate, i.e. number of ticks per second
        #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
        tick_rate: f64,

        /// Frame rate, i.e. number of frames per second
        #[arg(short, long, value_name = "FLOAT", default_value_t = 30.0)]
        frame_rate: f64,
    },
    /// Submit a segment without the TUI
    Submit {
        /// Segment name
        #[arg(short, long)]
        name: String,

        /// Schema key to add, in order (repeatable)
        #[arg(short, long = "schema", value_name = "KEY", value_parser = catalog::parse_key)]
        schemas: Vec<String>,
    },
    /// List the schema catalog
    Schemas {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Cmd {
        self.cmd.clone().unwrap_or(Cmd::Run {
            tick_rate: 4.0,
            frame_rate: 30.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tui() {
        let cli = Cli::parse_from(["segment-creator"]);
        assert_eq!(
            cli.command(),
            Cmd::Run {
                tick_rate: 4.0,
                frame_rate: 30.0
            }
        );
        assert_eq!(cli.endpoint, None);
    }

    #[test]
    fn submit_keeps_schema_order() {
        let cli = Cli::parse_from([
            "segment-creator",
            "submit",
            "--name",
            "VIP Users",
            "--schema",
            "first_name",
            "-s",
            "city",
            "--endpoint",
            "http://localhost/hook",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost/hook"));
        match cli.command() {
            Cmd::Submit { name, schemas } => {
                assert_eq!(name, "VIP Users");
                assert_eq!(schemas, vec!["first_name", "city"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let result =
            Cli::try_parse_from(["segment-creator", "submit", "-n", "x", "-s", "email"]);
        assert!(result.is_err());
    }
}
