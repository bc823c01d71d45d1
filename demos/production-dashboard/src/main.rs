// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Production dashboard on the command line.
//!
//! Prints every output as JSON. With `--watch`, keeps reading `ID=VALUE` lines
//! from stdin and prints each output a change refreshed, one per line.
//!
//! ```text
//! production-dashboard --set QUANTITY_MAX=30000 --output quantity_record_count_string
//! printf 'MEDICINE_B=false\nTIME_RANGE=1..9\n' | production-dashboard --watch
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream;
use sieve::prelude::*;
use sieve::{parse_input_literal, InputLiteral};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Render the production dashboard for a set of input values.")]
struct Args {
    /// Dashboard configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Initial input value (repeatable), e.g. `TIME_RANGE=1..8`
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Only print these outputs (repeatable)
    #[arg(long = "output", value_name = "OUTPUT_ID")]
    outputs: Vec<String>,

    /// Keep applying `ID=VALUE` lines from stdin until EOF or Ctrl-C
    #[arg(long)]
    watch: bool,
}

fn parse_assignment(text: &str) -> Result<(String, String), String> {
    text.split_once('=')
        .map(|(id, value)| (id.trim().to_string(), value.to_string()))
        .filter(|(id, _)| !id.is_empty())
        .ok_or_else(|| format!("expected ID=VALUE, got `{text}`"))
}

/// Prints `output_id<TAB>json` per refreshed output.
struct JsonLines;

impl OutputSink for JsonLines {
    fn update(&mut self, output_id: &str, artifact: ViewArtifact) {
        match serde_json::to_string(&artifact) {
            Ok(json) => println!("{output_id}\t{json}"),
            Err(err) => tracing::warn!("Cannot encode {output_id}: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let mut config = DashboardConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    for (id, value) in args.set {
        config = config.with_input(id, InputLiteral::Text(value));
    }

    let mut session = DashboardSession::start(&config, dashboards::all())?;

    let mut rendered: BTreeMap<String, ViewArtifact> = BTreeMap::new();
    if args.outputs.is_empty() {
        session.render_all_into(&mut rendered);
    } else {
        session.render_into(&mut rendered, &args.outputs);
    }
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    if args.watch {
        let cancel = CancellationToken::new();
        let on_ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_ctrl_c.cancel();
            }
        });

        let lines = BufReader::new(tokio::io::stdin()).lines();
        let changes = stream::unfold(lines, |mut lines| async move {
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => {}
                    Ok(Some(line)) => match parse_assignment(&line) {
                        Ok((id, value)) => {
                            let change = InputChange::new(id, parse_input_literal(&value));
                            return Some((change, lines));
                        }
                        Err(err) => tracing::warn!("{err}"),
                    },
                    Ok(None) => return None,
                    Err(err) => {
                        tracing::warn!("Reading stdin failed: {err}");
                        return None;
                    }
                }
            }
        });

        let batches = session.run(changes, &mut JsonLines, cancel).await;
        tracing::info!("Applied {batches} input batches");
    }

    Ok(())
}
