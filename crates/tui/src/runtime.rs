//! Runtime: terminal lifecycle and the unified event loop.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop over terminal input, animation ticks, and
//!   completed background fetches.
//! - Route keys through `App::handle_key` and execute returned `Effect`s.
//!
//! Input comes from a dedicated polling task that forwards `crossterm`
//! events over a channel; keeping `poll()` and `read()` together avoids lost
//! events in some terminals. Fetches run as spawned tasks joined through a
//! `FuturesUnordered`, so overlapping cascade and result fetches complete in
//! whatever order the network decides while the UI stays responsive.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::stream::{FuturesUnordered, StreamExt};
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use datascope_api::DataServiceClient;

use crate::app::{App, Effect, FetchOutcome, Msg, SharedCtx};
use crate::cmd;
use crate::ui;

/// Spawn a task that polls terminal input and forwards events over a channel.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(16);
        loop {
            match event::poll(poll_interval) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if sender.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| ui::draw(frame, app))?;
    Ok(())
}

/// Handle a raw crossterm event. Returns the effects to execute.
fn handle_input_event(app: &mut App, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => app.handle_key(key_event),
        Event::Resize(width, height) => app.update(Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Entry point for the TUI runtime: sets up the terminal, kicks off the
/// initial catalog fetch, runs the event loop, and cleans up on exit.
pub async fn run_app(client: DataServiceClient, catalog_path: String) -> Result<()> {
    let mut input_receiver = spawn_input_task();
    let mut app = App::new(SharedCtx { client: Arc::new(client), catalog_path });
    let mut terminal = setup_terminal()?;

    let mut pending: FuturesUnordered<JoinHandle<FetchOutcome>> = FuturesUnordered::new();
    cmd::run_effects(&mut app, vec![Effect::FetchCatalog], &mut pending);

    // Fast ticks only while fetches animate the throbber.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(1000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app)?;

    loop {
        let target_interval = if app.in_flight > 0 { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(Event::Key(key_event))
                        if key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        break;
                    }
                    Some(event) => {
                        let effects = handle_input_event(&mut app, event);
                        cmd::run_effects(&mut app, effects, &mut pending);
                        needs_render = true;
                    }
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }

            _ = ticker.tick() => {
                let effects = app.update(Msg::Tick);
                needs_render = app.in_flight > 0;
                cmd::run_effects(&mut app, effects, &mut pending);
            }

            Some(joined) = pending.next(), if !pending.is_empty() => {
                let outcome = joined.unwrap_or_else(|error| FetchOutcome::Failed(format!("fetch task failed: {error}")));
                let effects = app.update(Msg::FetchCompleted(outcome));
                cmd::run_effects(&mut app, effects, &mut pending);
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if needs_render {
            render(&mut terminal, &mut app)?;
        }
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}
