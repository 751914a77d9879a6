use std::io::Write;

use kanal::{AsyncReceiver, AsyncSender};
use tango_config::ui::UiConfig;
use tango_types::AppEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub mod command;
pub mod events;
pub mod shell;
pub mod state;
pub mod view;

pub use shell::{InputAction, Shell};

/// Interactive loop over stdin.
///
/// Ends when the app acknowledges `Quit`, the app side closes, or the token
/// is cancelled. End of input counts as `quit`.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    mut progress: watch::Receiver<f32>,
    config: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut shell = Shell::new(std::io::stdout(), config);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut progress_open = true;

    if interactive {
        shell.greet()?;
        shell.prompt()?;
    }

    loop {
        tokio::select! {
            biased;

            event = app_to_ui_rx.recv() => {
                match event {
                    Ok(AppEvent::Quit) | Err(_) => break,
                    Ok(event) => {
                        shell.handle_app_event(event)?;
                        if interactive && input_open && !shell.ocr_running() {
                            shell.prompt()?;
                        }
                    }
                }
            }
            line = input.next_line(), if input_open => {
                let action = match line? {
                    Some(line) => shell.handle_input(&line)?,
                    None => InputAction::Quit,
                };
                match action {
                    InputAction::Send(event) => ui_to_app_tx.send(event).await?,
                    InputAction::Quit => {
                        ui_to_app_tx.send(AppEvent::Quit).await?;
                        input_open = false;
                    }
                    InputAction::Nothing if interactive => shell.prompt()?,
                    InputAction::Nothing => {}
                }
            }
            changed = progress.changed(), if progress_open && shell.ocr_running() => {
                match changed {
                    Ok(()) => {
                        let fraction = *progress.borrow_and_update();
                        shell.show_progress(fraction)?;
                    }
                    Err(_) => progress_open = false,
                }
            }
            _ = cancel.cancelled() => {
                tracing::debug!("[UI] Cancelled");
                break;
            }
        }
    }

    Ok(())
}

/// Non-interactive front end printing to stdout
pub async fn script_loop(
    events: Vec<AppEvent>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    progress: watch::Receiver<f32>,
    config: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut shell = Shell::new(std::io::stdout(), config);
    run_script(events, app_to_ui_rx, ui_to_app_tx, progress, &mut shell, cancel).await
}

/// Feed a fixed list of events, then quit once the app has answered them all
pub async fn run_script<W: Write>(
    events: Vec<AppEvent>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    mut progress: watch::Receiver<f32>,
    shell: &mut Shell<W>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let sender = async move {
        for event in events {
            ui_to_app_tx.send(event).await?;
        }
        ui_to_app_tx.send(AppEvent::Quit).await?;
        Ok::<_, anyhow::Error>(())
    };

    let receiver = async {
        let mut progress_open = true;
        loop {
            tokio::select! {
                biased;

                event = app_to_ui_rx.recv() => match event {
                    Ok(AppEvent::Quit) | Err(_) => break,
                    Ok(event) => shell.handle_app_event(event)?,
                },
                changed = progress.changed(), if progress_open && shell.ocr_running() => {
                    match changed {
                        Ok(()) => {
                            let fraction = *progress.borrow_and_update();
                            shell.show_progress(fraction)?;
                        }
                        Err(_) => progress_open = false,
                    }
                }
                _ = cancel.cancelled() => break,
            }
        }
        Ok::<_, anyhow::Error>(())
    };

    let (sent, received) = tokio::join!(sender, receiver);
    sent?;
    received
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tango_types::VocabularyEntry;
    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn script_runs_until_quit_is_acknowledged() {
        let (ui_tx, app_rx) = kanal::bounded_async::<AppEvent>(8);
        let (app_tx, ui_rx) = kanal::bounded_async::<AppEvent>(8);
        let (_progress_tx, progress_rx) = watch::channel(0.0_f32);

        // Minimal app: answers ListWords, echoes Quit
        let app = tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Ok(event) = app_rx.recv().await {
                match event {
                    AppEvent::ListWords => {
                        app_tx
                            .send(AppEvent::ShowVocabulary(vec![VocabularyEntry {
                                id: 3,
                                japanese: "山".to_string(),
                                reading: Some("やま".to_string()),
                                meaning: "mountain".to_string(),
                            }]))
                            .await
                            .unwrap();
                        seen.push("list");
                    }
                    AppEvent::Quit => {
                        app_tx.send(AppEvent::Quit).await.unwrap();
                        seen.push("quit");
                        break;
                    }
                    _ => {}
                }
            }
            seen
        });

        let mut shell = Shell::new(Vec::new(), UiConfig::default());
        timeout(
            Duration::from_secs(2),
            run_script(
                vec![AppEvent::ListWords],
                ui_rx,
                ui_tx,
                progress_rx,
                &mut shell,
                CancellationToken::new(),
            ),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(app.await.unwrap(), vec!["list", "quit"]);
        let text = String::from_utf8(shell.into_inner()).unwrap();
        assert!(text.contains("[3] 山 (やま)"));
    }
}
