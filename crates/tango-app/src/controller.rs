use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tango_core::{KeyValueStore, LineParser};
use tango_ocr::RecognitionEngine;
use tango_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(ui_capacity: usize, app_capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(ui_capacity), // OCR line bursts
            ui_to_app: kanal::bounded_async(app_capacity), // typed commands
        }
    }
}

/// How the UI side is driven
pub enum Frontend {
    /// Interactive shell on stdin
    Shell,
    /// Fixed events from a one-shot command
    Script(Vec<AppEvent>),
}

/// Everything the event loop needs besides config
pub struct Services {
    pub parser: Arc<dyn LineParser>,
    pub engine: Box<dyn RecognitionEngine>,
    pub backend: Arc<dyn KeyValueStore>,
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let channels = {
            let config = state.config.read().await;
            ChannelSet::new(config.ui_channel_capacity, config.app_channel_capacity)
        };

        Self {
            channels,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(
        &self,
        services: Services,
        frontend: Frontend,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let ctx = AppContext::new(
            self.state.clone(),
            self.channels.app_to_ui.0.clone(),
            services.parser,
            services.engine,
            services.backend,
        )
        .await;
        let progress = ctx.adapter.progress();
        let ui_config = self.state.config.read().await.ui.clone();

        // Event loop
        tasks.spawn(event_loop(
            ctx,
            self.channels.ui_to_app.1.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        match frontend {
            Frontend::Shell => {
                tasks.spawn(tango_ui::ui_loop(
                    self.channels.app_to_ui.1.clone(),
                    self.channels.ui_to_app.0.clone(),
                    progress,
                    ui_config,
                    self.cancel_token.child_token(),
                ));
            }
            Frontend::Script(events) => {
                tasks.spawn(tango_ui::script_loop(
                    events,
                    self.channels.app_to_ui.1.clone(),
                    self.channels.ui_to_app.0.clone(),
                    progress,
                    ui_config,
                    self.cancel_token.child_token(),
                ));
            }
        }

        tasks
    }

    /// Wait for both loops; the first one to stop brings the other down
    pub async fn run(&self, mut tasks: JoinSet<anyhow::Result<()>>) -> anyhow::Result<()> {
        let mut first_error = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => tracing::debug!("Task finished"),
                Ok(Err(e)) => {
                    tracing::error!("Task failed: {:#}", e);
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    tracing::error!("Task panicked: {}", e);
                    first_error.get_or_insert(e.into());
                }
            }
            self.shutdown();
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
