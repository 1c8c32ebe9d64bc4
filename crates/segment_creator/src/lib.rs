pub mod action;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod errors;
pub mod logging;
pub mod segment;
pub mod state;
pub mod submit;
pub mod tui;

use color_eyre::{eyre::eyre, Result};
use tracing::info;

use crate::{
    app::App,
    catalog::CATALOG,
    cli::{Cli, Cmd},
    config::Config,
    segment::SegmentEditor,
    submit::WebhookClient,
};

pub async fn run(cli: Cli) -> Result<()> {
    crate::errors::init()?;
    crate::logging::init()?;

    let config = Config::new(cli.endpoint.as_deref())?;
    match cli.command() {
        Cmd::Run {
            tick_rate,
            frame_rate,
        } => {
            let mut app = App::new(config, tick_rate, frame_rate);
            app.run().await?;
        }
        Cmd::Submit { name, schemas } => submit(config, name, schemas).await?,
        Cmd::Schemas { json } => print_schemas(json)?,
    }
    Ok(())
}

/// Editor holding the draft described on the command line, staged through
/// the same add path the form uses. Keys the add control would not offer
/// (a repeated `--schema`) are an error.
pub fn headless_editor(name: String, schemas: &[String]) -> Result<SegmentEditor> {
    let mut editor = SegmentEditor::new();
    editor.open();
    let Some(draft) = editor.draft_mut() else {
        return Err(eyre!("segment editor refused the draft"));
    };
    draft.set_name(name);
    for key in schemas {
        if !draft.set_pending(key) {
            return Err(eyre!("schema `{key}` is already part of the segment"));
        }
        draft.add_pending();
    }
    Ok(editor)
}

/// Headless submission through the same editor the TUI uses.
pub async fn submit(config: Config, name: String, schemas: Vec<String>) -> Result<()> {
    let mut editor = headless_editor(name, &schemas)?;

    let client = WebhookClient::new(config.endpoint);
    info!(endpoint = client.endpoint(), "headless submission");
    match client.save(&mut editor).await {
        Some(Ok(())) => {
            println!("Segment saved.");
            Ok(())
        }
        Some(Err(err)) => Err(err.into()),
        None => Err(eyre!("segment editor refused to submit")),
    }
}

fn print_schemas(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(CATALOG)?);
    } else {
        for field in CATALOG {
            println!("{:<14} {}", field.key, field.label);
        }
    }
    Ok(())
}
