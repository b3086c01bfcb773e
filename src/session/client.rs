//! Async driver tying the controller to the channel and name store.

use super::controller::{Directive, SessionController};
use crate::channel::{ChannelEvent, ChannelManager};
use crate::config::ChatConfig;
use crate::protocol::WireFormat;
use crate::store::NameStore;

/// The assembled chat client for one session.
///
/// Owns the channel manager, the name store, and the session controller,
/// and is the only mutator of all three. Front-ends feed it user input and
/// pump [`run_event`](Self::run_event), rendering from
/// [`session`](Self::session) state in between.
pub struct ChatClient {
    manager: ChannelManager,
    store: NameStore,
    controller: SessionController,
}

impl ChatClient {
    /// Build a client from configuration, loading the saved name.
    pub fn new(config: &ChatConfig) -> Self {
        let store = NameStore::new(config.name_path.clone());
        let saved_name = store.load();
        Self {
            manager: ChannelManager::new(),
            controller: SessionController::new(WireFormat::Json, saved_name),
            store,
        }
    }

    /// Build a client with an explicit store and wire format.
    pub fn with_store(store: NameStore, format: WireFormat) -> Self {
        let saved_name = store.load();
        Self {
            manager: ChannelManager::new(),
            controller: SessionController::new(format, saved_name),
            store,
        }
    }

    /// Session state for rendering.
    pub fn session(&self) -> &SessionController {
        &self.controller
    }

    /// Open the channel. Re-entrant; a failed attempt surfaces only as a
    /// `Closed` event.
    pub async fn connect(&mut self, url: &str) {
        self.manager.open(url).await;
    }

    /// Wait for the next channel event and run it through the controller.
    ///
    /// Returns the event so front-ends can react to transitions; `None`
    /// only if the event stream has shut down entirely.
    pub async fn run_event(&mut self) -> Option<ChannelEvent> {
        let event = self.manager.next_event().await?;
        let directives = self.controller.on_event(event.clone());
        self.execute(directives).await;
        Some(event)
    }

    /// Submit a display name from the prompt.
    pub async fn submit_name(&mut self, name: &str) {
        let directives = self.controller.submit_name(name);
        self.execute(directives).await;
    }

    /// Submit a line of chat input. Returns whether the input buffer
    /// should be cleared.
    pub async fn submit_input(&mut self, line: &str) -> bool {
        let submission = self.controller.submit_input(line);
        self.execute(submission.directives).await;
        submission.clear_input
    }

    /// Close the channel (the disconnect control).
    pub async fn disconnect(&mut self) {
        self.manager.close().await;
    }

    async fn execute(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::SendText(text) => self.manager.send(&text).await,
                Directive::CloseChannel => self.manager.close().await,
                Directive::PersistName(name) => {
                    if let Err(e) = self.store.save(&name) {
                        // Persistence is best-effort; the session keeps going.
                        tracing::warn!("failed to persist name: {e}");
                    }
                }
            }
        }
    }
}
