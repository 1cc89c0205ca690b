//! Interactive dashboard loop.
//!
//! Stdin lines are search submissions. Fetches run on spawned tasks and report
//! back over a channel, so typing a new city while a lookup is in flight
//! cancels the old one.

use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::debug;
use weatherboard_core::{
    Applied, Config, Dashboard, FetchRequest, LookupError, Pipeline, Snapshot,
    source_from_config,
};

use crate::render;

const PROMPT: &str = "Search for cities> ";
const QUIT_COMMANDS: [&str; 2] = [":q", ":quit"];

type FetchOutcome = (FetchRequest, Result<Snapshot, LookupError>);

pub async fn run(config: &Config, city: String) -> Result<()> {
    let pipeline = Arc::new(Pipeline::new(Arc::new(source_from_config(config)?)));
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    let mut app = Dashboard::new(city);
    spawn_fetch(&pipeline, &tx, app.request_refresh());
    redraw(&app)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if QUIT_COMMANDS.contains(&line.trim()) {
                    break;
                }

                app.set_input(line);
                if let Some(request) = app.submit() {
                    spawn_fetch(&pipeline, &tx, request);
                }
                redraw(&app)?;
            }
            Some((request, result)) = rx.recv() => {
                if app.apply(&request, result) == Applied::Stale {
                    debug!(city = %request.city, "dropped stale result");
                } else {
                    redraw(&app)?;
                }
            }
        }
    }

    pipeline.cancel();
    Ok(())
}

/// Registers the cycle before spawning so tokens follow submission order.
fn spawn_fetch(
    pipeline: &Arc<Pipeline>,
    tx: &mpsc::UnboundedSender<FetchOutcome>,
    request: FetchRequest,
) {
    let token = pipeline.begin(request.generation);
    let pipeline = Arc::clone(pipeline);
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = pipeline.run_with(token, &request.city).await;
        // The receiver is gone only when the loop has exited.
        let _ = tx.send((request, result));
    });
}

fn redraw(app: &Dashboard) -> Result<()> {
    let mut stdout = io::stdout().lock();

    writeln!(stdout)?;
    if let Some(board) = app.board() {
        write!(stdout, "{}", render::render_board(board))?;
    } else if let Some(error) = app.error() {
        writeln!(stdout, "! {error}")?;
    } else if app.is_loading() {
        writeln!(stdout, "Loading weather for {}...", app.city())?;
    }
    if app.is_loading() && app.board().is_some() {
        writeln!(stdout, "(updating {}...)", app.city())?;
    }

    write!(stdout, "{PROMPT}")?;
    stdout.flush()?;
    Ok(())
}
