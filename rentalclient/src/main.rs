#![warn(clippy::all)]

mod config;
mod state_handler;
mod tui;

use anyhow::{anyhow, Result};
use clap::Parser;
use common::ApiClient;
use log::{debug, error, info};
use std::time::Duration;
use tokio::sync::{
    broadcast::{self},
    mpsc::{self, UnboundedSender},
};

use crate::config::{init_logging, ClientConfig};
use crate::state_handler::{ClientState, Completion, Request, StateHandler};
use tui::{
    app_router::AppRouter,
    components::component::{Component, ComponentRender},
    Event, Tui,
};

#[derive(Clone)]
enum Terminate {
    Exit,
}

// Every call runs on its own task so a slow request never blocks the UI.
// The completion carries the ticket back so stale replies can be dropped.
fn dispatch(api: &ApiClient, requests: Vec<Request>, completion_tx: &UnboundedSender<Completion>) {
    for Request { ticket, call } in requests {
        debug!("[*] Request #{} {}", ticket.id(), call.endpoint());

        let api = api.clone();
        let completion_tx = completion_tx.clone();
        tokio::spawn(async move {
            let result = api.execute(call).await;
            if let Err(e) = &result {
                error!("[-] Request #{} failed: {e}", ticket.id());
            }

            let _ = completion_tx.send(Completion { ticket, result });
        });
    }
}

async fn run(
    config: ClientConfig,
    api: ApiClient,
    shutdown_tx: broadcast::Sender<Terminate>,
    shutdown_rx: &mut broadcast::Receiver<Terminate>,
) -> Result<()> {
    // Initialize required structures:
    // * Channel for passing state between TUI and state handler
    // * Channel for passing actions/input from TUI to state handler
    // * Channel for finished API calls
    // * Shutdown channels for TUI and state handler components
    let (state_handler, mut state_rx) = StateHandler::new();
    let (tui, mut action_rx, mut tui_events) = Tui::new();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<Completion>();
    let mut shutdown_state = shutdown_rx.resubscribe();
    let mut shutdown_tui = shutdown_rx.resubscribe();

    // State Handler
    let state_task = tokio::spawn(async move {
        // Create and send initial state to TUI
        let mut state = ClientState::new(config.api_url.clone(), config.per_page());
        state_handler.send_update(state.clone());

        let mut ticker = tokio::time::interval(Duration::from_millis(250));

        loop {
            if state.exit {
                let _ = shutdown_tx.send(Terminate::Exit);
            }

            // Three sources of events:
            // * Action channel from TUI
            // * Completed API calls
            // * Shutdown channel
            let update = tokio::select! {
                _tick = ticker.tick() => false,
                action = action_rx.recv() => {
                    match action {
                        Some(action) => {
                            let requests = state.handle_action(action);
                            dispatch(&api, requests, &completion_tx);
                        },
                        None => break,
                    }

                    true
                },
                completion = completion_rx.recv() => {
                    if let Some(completion) = completion {
                        let requests = state.complete(completion);
                        dispatch(&api, requests, &completion_tx);
                    }

                    true
                },
                _ = shutdown_state.recv() => {
                    break;
                }
            };

            // Update state if needed
            if update {
                state_handler.send_update(state.clone());
            }
        }
    });

    // TUI Handler
    let tui_task = tokio::spawn(async move {
        let mut terminal = Tui::setup_terminal()?;

        // Get initial State
        let state = state_rx
            .recv()
            .await
            .ok_or(anyhow!("State handler closed before startup"))?;
        let mut app_router = AppRouter::new(&state, tui.action_tx);
        terminal.draw(|f| app_router.render(f, ()))?;

        // Main loop with three sources of events:
        // * Terminal user interface events such as keyboard
        // * State update channel
        // * Client shutdown channel
        loop {
            tokio::select! {
                event = tui_events.next() => {
                    match event.map_err(|e| anyhow!("{e}"))? {
                        Event::Key(key) => {
                            app_router.handle_key_event(key);
                        },
                        Event::Tick => {},
                        Event::Error => {},
                    }
                },
                state = state_rx.recv() => {
                    match state {
                        Some(state) => {
                            app_router = app_router.update(&state);
                        }
                        None => break,
                    }
                },
                _ = shutdown_tui.recv() => {
                    break;
                }
            }

            terminal.draw(|f| app_router.render(f, ()))?;
        }

        Tui::teardown_terminal(&mut terminal)?;

        Ok::<(), anyhow::Error>(())
    });

    // Wait for both tasks to finish
    let (tui_result, state_result) = tokio::join!(tui_task, state_task);
    state_result?;
    tui_result??;

    Ok(())
}

fn shutdown() {
    println!("shutting down client");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Get client config from cli arguments
    let config = ClientConfig::parse();
    init_logging(&config.log_file)?;

    let api = ApiClient::http(&config.api_url, config.timeout())?;
    info!("[*] Starting client against {}", config.api_url);

    // Create broadcast channel to send shutdown signal to the different components
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<Terminate>(2);

    let result = run(config, api, shutdown_tx, &mut shutdown_rx).await;
    shutdown();

    if let Err(e) = &result {
        error!("[-] Client error: {e}");
    }

    info!("[+] Client shut down");

    result
}
