//! App actor wiring: UI events in, dispatch commands and render states out.

use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;

use reqfile_tui::messages::{BodyFormat, NetworkCommand, RenderEvent, RenderState, RightPanel, UiEvent, WatchEvent};
use reqfile_tui::{parse, AppActor, AppState, DocumentStore, ResponseSummary};

struct Harness {
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    events_tx: mpsc::UnboundedSender<RenderEvent>,
    watch_tx: mpsc::UnboundedSender<WatchEvent>,
    cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>,
    render_rx: mpsc::UnboundedReceiver<RenderState>,
    store: DocumentStore,
}

fn start(text: &str) -> Harness {
    let store = DocumentStore::new(parse(text));
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (watch_tx, watch_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (render_tx, render_rx) = mpsc::unbounded_channel();

    let actor = AppActor::new(AppState::new(store.clone(), "api.http"), cmd_tx, render_tx);
    tokio::spawn(actor.run(ui_rx, events_rx, watch_rx));

    Harness {
        ui_tx,
        events_tx,
        watch_tx,
        cmd_rx,
        render_rx,
        store,
    }
}

impl Harness {
    /// Wait until the actor goes quiet and return the newest render state
    async fn settle(&mut self) -> RenderState {
        let mut latest = self.render_rx.recv().await.unwrap();
        while let Ok(Some(state)) =
            tokio::time::timeout(Duration::from_millis(50), self.render_rx.recv()).await
        {
            latest = state;
        }
        latest
    }

    async fn dispatched_session(&mut self) -> u64 {
        match self.cmd_rx.recv().await {
            Some(NetworkCommand::Dispatch { session, .. }) => session,
            other => panic!("expected dispatch, got {:?}", other),
        }
    }
}

fn summary(status: u16) -> ResponseSummary {
    ResponseSummary {
        status,
        reason: "OK".into(),
        headers: Vec::new(),
        elapsed: Duration::from_millis(3),
        line_count: None,
    }
}

const FILE: &str = "### One\nGET http://localhost/one\n###\n### Two\nGET http://localhost/two\n";

#[tokio::test]
async fn only_latest_session_reaches_the_screen() {
    let mut h = start(FILE);
    let initial = h.settle().await;
    assert_eq!(initial.requests.len(), 2);
    assert_eq!(initial.selected, Some(0));

    h.ui_tx.send(UiEvent::SendRequest).unwrap();
    let first = h.dispatched_session().await;
    h.ui_tx.send(UiEvent::SelectNext).unwrap();
    h.ui_tx.send(UiEvent::SendRequest).unwrap();
    let second = h.dispatched_session().await;

    h.events_tx
        .send(RenderEvent::completed(second, summary(200), "two".into(), BodyFormat::Text))
        .unwrap();
    h.events_tx
        .send(RenderEvent::completed(first, summary(200), "one".into(), BodyFormat::Text))
        .unwrap();

    let state = h.settle().await;
    match &state.right {
        RightPanel::Response(event) => assert_eq!(event.body, "two"),
        other => panic!("expected response, got {:?}", other),
    }
    assert!(state.status.message.contains("GET http://localhost/two"));
}

#[tokio::test]
async fn reload_updates_list_and_failure_keeps_it() {
    let mut h = start(FILE);
    h.settle().await;
    h.ui_tx.send(UiEvent::SelectNext).unwrap();
    h.settle().await;

    h.store.replace(parse(&format!("{}###\nDELETE http://localhost/three\n", FILE)));
    h.watch_tx
        .send(WatchEvent::Reloaded { count: 3, at: Local::now() })
        .unwrap();
    let state = h.settle().await;
    assert_eq!(state.requests.len(), 3);
    assert_eq!(state.selected, Some(1));
    assert_eq!(state.requests[2].1, "DELETE http://localhost/three");

    h.watch_tx
        .send(WatchEvent::ReloadFailed {
            message: "open file api.http: gone".into(),
            at: Local::now(),
        })
        .unwrap();
    let state = h.settle().await;
    assert_eq!(state.requests.len(), 3);
    assert!(state.status.message.starts_with("open file api.http: gone"));
}

#[tokio::test]
async fn quit_shuts_down_network() {
    let mut h = start(FILE);
    h.settle().await;
    h.ui_tx.send(UiEvent::Quit).unwrap();
    assert!(matches!(h.cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
}
