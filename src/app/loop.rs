use crate::app::{
    action::Action, command::Command, input::map_event_to_action, reducer, state::AppState, ui,
};
use crate::domain::store::TemplateStore;

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    store: Arc<dyn TemplateStore>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, store, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    store: Arc<dyn TemplateStore>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Template file watcher: external edits trigger a reload prompt.
    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok() {
            let _ = notify_tx.try_send(());
        }
    })?;

    if let Some(path) = &app_state.template_path {
        if path.exists() {
            watcher.watch(path, RecursiveMode::NonRecursive)?;
        }
    }

    let action_tx_clone = action_tx.clone();
    tokio::spawn(async move {
        let mut pending = false;
        let debounce_duration = Duration::from_millis(500);

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(debounce_duration) => {
                        let _ = action_tx_clone.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    // Initial Load
    if app_state.document.is_none() {
        if let Some(path) = app_state.template_path.clone() {
            app_state.is_loading = true;
            handle_command(Command::Load(path), store.clone(), action_tx.clone())?;
        }
    }

    loop {
        // --- 1. Render ---
        let theme = app_state.theme.clone();
        terminal.draw(|f| {
            ui::draw(f, &mut app_state, &theme);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = match res {
                    Ok(e) => e,
                    Err(e) => return Err(e.into()),
                };
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            if let Action::Quit = action {
                break;
            }

            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                handle_command(cmd, store.clone(), action_tx.clone())?;
            }
        }
    }

    if !app_state.recent.is_empty() {
        crate::app::persistence::save_recent(&app_state.recent);
    }

    Ok(())
}

/// Dispatch a reducer command to an async store worker. Results come back
/// as actions over `tx`.
pub(crate) fn handle_command(
    command: Command,
    store: Arc<dyn TemplateStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::Load(path) => {
            tokio::spawn(async move {
                match store.load(&path).await {
                    Ok(document) => {
                        let _ = tx.send(Action::TemplateLoaded(Box::new(document))).await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Failed to load: {e:#}")))
                            .await;
                    }
                }
            });
        }
        Command::Save(document, path) => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted("Saving…".to_string()))
                    .await;
                match store.save(&document, &path).await {
                    Ok(()) => {
                        let _ = tx.send(Action::TemplateSaved(path)).await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Save failed: {e:#}"))))
                            .await;
                    }
                }
            });
        }
        Command::Export(document, path) => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted("Exporting…".to_string()))
                    .await;
                match store.export_html(&document, &path).await {
                    Ok(()) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(format!(
                                "Exported {}",
                                path.display()
                            ))))
                            .await;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!(
                                "Export failed: {e:#}"
                            ))))
                            .await;
                    }
                }
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
