//! Event queue and effect execution for the interactive session
//!
//! Keys, ticks and fetch completions all arrive on one mpsc channel and are
//! fed to `App::update` one at a time. Fetches run as spawned tasks that only
//! report back through the channel.

use std::time::Duration;

use anyhow::Result;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::CatalogClient;
use crate::app::{App, AppEvent, Effect, FetchPayload};
use crate::player::LocalPlayer;
use crate::ui;

/// Spinner animation rate
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Queue capacity; producers wait when the UI falls behind
const QUEUE_SIZE: usize = 256;

/// Create the event queue
pub fn channel() -> (mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
    mpsc::channel(QUEUE_SIZE)
}

/// Carries out effects on behalf of the state machine
pub struct Runtime {
    catalog: CatalogClient,
    player: LocalPlayer,
    tx: mpsc::Sender<AppEvent>,
}

impl Runtime {
    pub fn new(catalog: CatalogClient, player: LocalPlayer, tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            catalog,
            player,
            tx,
        }
    }

    /// Start one effect. Fetches are spawned and report back as
    /// `AppEvent::FetchCompleted`; playback is fire and forget.
    pub fn dispatch(&self, effect: Effect) {
        match effect {
            Effect::Search(query) => {
                let catalog = self.catalog.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = catalog.search(&query).await.map(FetchPayload::Courses);
                    // Receiver gone means the session already ended
                    let _ = tx.send(AppEvent::FetchCompleted(result)).await;
                });
            }
            Effect::LoadLessons(course) => {
                let catalog = self.catalog.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = catalog.lessons(&course).await.map(FetchPayload::Lessons);
                    let _ = tx.send(AppEvent::FetchCompleted(result)).await;
                });
            }
            Effect::Play(url) => self.player.play_detached(&url),
        }
    }
}

/// Send `AppEvent::Tick` every `period` until the queue closes
pub fn spawn_ticker(tx: mpsc::Sender<AppEvent>, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    })
}

/// Main loop: render, wait for the next event, apply it, run its effects.
///
/// Returns when the app stops running or every producer is gone.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: &Runtime,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    info!("interactive session started");

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        let Some(event) = rx.recv().await else {
            debug!("event queue closed");
            break;
        };

        for effect in app.update(event) {
            debug!(?effect, "dispatching");
            runtime.dispatch(effect);
        }
    }

    info!(error = ?app.last_error, "interactive session ended");
    Ok(())
}
