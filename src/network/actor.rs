//! Network actor - runs dispatch sessions in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, RenderEvent};
use crate::network::client::{create_client, dispatch, DispatchOptions};

/// Network actor that spawns one task per dispatch session
///
/// A newer session never cancels an older one. Stale results still arrive
/// and are discarded by the App layer.
pub struct NetworkActor {
    client: reqwest::Client,
    events_tx: mpsc::UnboundedSender<RenderEvent>,
    sessions: JoinSet<()>,
    options: DispatchOptions,
}

impl NetworkActor {
    pub fn new(events_tx: mpsc::UnboundedSender<RenderEvent>, config: &Config) -> Self {
        NetworkActor {
            client: create_client(),
            events_tx,
            sessions: JoinSet::new(),
            options: DispatchOptions {
                timeout: config.request_timeout,
                stream_buffer_lines: config.stream_buffer_lines,
            },
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Dispatch { session, request }) => {
                            let events_tx = self.events_tx.clone();
                            let client = self.client.clone();
                            let options = self.options;

                            self.sessions.spawn(async move {
                                tracing::info!(session, url = %request.url, method = %request.method, "Dispatching request");
                                dispatch(&client, session, request, options, &events_tx).await;
                                tracing::debug!(session, "Session finished");
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.sessions.abort_all();
                            break;
                        }
                    }
                }

                // Reap finished sessions
                Some(_result) = self.sessions.join_next() => {}
            }
        }
    }
}
