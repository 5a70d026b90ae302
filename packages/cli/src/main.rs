mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use common::UiEvent;
use dispatcher::config::{DispatcherAppConfig, RawFormErrorPolicy};
use dispatcher::payload::{build_payload, load_dropped_files};
use dispatcher::{DRAG_DROP_ZONE, Dispatcher, FormKind, QueuedEvents, StaticPage};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalSurface;

#[derive(Debug, Parser)]
#[command(name = "irembo", version, about = "Submit iRembo document verification forms")]
struct Cli {
    /// API origin, overriding configuration (e.g. http://localhost:8000/api)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Report upload failures instead of only logging them
    #[arg(long, global = true)]
    notify_raw_errors: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit one form
    Submit {
        /// upload, ai-upload, appeal, verification or ai-review
        #[arg(value_parser = parse_form)]
        form: FormKind,

        /// Text field, as name=value
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,

        /// File field, as name=path
        #[arg(long = "file", value_parser = parse_key_val)]
        files: Vec<(String, String)>,
    },
    /// Drop files onto the drop zone (nothing is uploaded)
    Drop {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// GET an endpoint and print the JSON reply
    Get {
        /// Path under the API origin, e.g. /statistics/appeals
        endpoint: String,
    },
}

fn parse_form(s: &str) -> Result<FormKind, String> {
    FormKind::from_slug(s).ok_or_else(|| {
        let known: Vec<&str> = FormKind::ALL.iter().map(|k| k.slug()).collect();
        format!("unknown form '{s}', expected one of: {}", known.join(", "))
    })
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = DispatcherAppConfig::load().context("Failed to load config")?;
    if let Some(url) = cli.api_base_url {
        config.api.base_url = url;
    }
    if cli.notify_raw_errors {
        config.errors.raw_form = RawFormErrorPolicy::Notify;
    }
    info!(base_url = %config.api.base_url, "Using API origin");

    let surface = Arc::new(TerminalSurface::default());
    let dispatcher =
        Dispatcher::from_config(&config, surface.clone()).context("Failed to build API client")?;

    match cli.command {
        Command::Submit {
            form,
            fields,
            files,
        } => {
            let files = files
                .into_iter()
                .map(|(name, path)| (name, PathBuf::from(path)));
            let payload = build_payload(fields, files)
                .await
                .context("Failed to build form payload")?;

            let event = UiEvent::submit(form.element_id(), payload);
            dispatcher
                .run(&StaticPage::complete(), QueuedEvents::new([event]))
                .await;
        }
        Command::Drop { paths } => {
            let files = load_dropped_files(&paths)
                .await
                .context("Failed to read dropped files")?;

            let summary = dispatcher
                .run(
                    &StaticPage::complete(),
                    QueuedEvents::new([
                        UiEvent::drag_over(DRAG_DROP_ZONE),
                        UiEvent::drop_files(DRAG_DROP_ZONE, files),
                    ]),
                )
                .await;
            for record in &summary.drops {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
        }
        Command::Get { endpoint } => {
            let value = dispatcher
                .make_api_call(&endpoint, None, None)
                .await
                .with_context(|| format!("GET {endpoint} failed"))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    let errors = surface.error_count();
    if errors > 0 {
        bail!("{errors} submission(s) failed");
    }
    Ok(())
}
