//! Loreline Runner - composition root binary
//!
//! Wires the adapters to the session coordinator and bridges stdin lines to
//! action submissions. All session logic lives in `loreline-client`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loreline_client::application::{SessionCoordinator, SessionEvent};
use loreline_client::domain::SessionKey;
use loreline_client::infrastructure::{
    translate, ClientConfig, FileTimelineCache, HttpApi, NullAudioChannel, WsConnection,
};
use loreline_client::ports::outbound::{GameConnectionPort, TimelineCachePort};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loreline_client=debug,loreline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Loreline client");

    let config = ClientConfig::load()?;
    let campaign_id: uuid::Uuid = std::env::var("LORELINE_CAMPAIGN_ID")?.parse()?;
    let character_id = std::env::var("LORELINE_CHARACTER_ID")?;
    let user_id =
        std::env::var("LORELINE_USER_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());
    let auth_token = std::env::var("LORELINE_AUTH_TOKEN").unwrap_or_default();

    let connection = Arc::new(WsConnection::new(config.ws_url.clone()));
    let api = Arc::new(HttpApi::new(config.api_base_url.clone()));
    let cache: Arc<dyn TimelineCachePort> = match config.cache_dir.as_ref() {
        Some(dir) => Arc::new(FileTimelineCache::with_dir(dir.clone())),
        None => match FileTimelineCache::new() {
            Some(cache) => Arc::new(cache),
            None => {
                anyhow::bail!("no platform cache directory available; set cache_dir");
            }
        },
    };
    // Headless runner: no real playback device behind the channels.
    let narration = Arc::new(NullAudioChannel::new());
    let ambience = Arc::new(NullAudioChannel::new());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    {
        let tx = event_tx.clone();
        connection
            .set_on_transport_event(Box::new(move |event| {
                let _ = tx.send(SessionEvent::Transport(event));
            }))
            .await;
        let tx = event_tx.clone();
        connection
            .set_on_message(Box::new(move |message| {
                if let Some(event) = translate(message) {
                    let _ = tx.send(event);
                }
            }))
            .await;
    }

    let key = SessionKey::new(campaign_id, character_id);
    let mut coordinator =
        SessionCoordinator::new(connection, api, cache, narration, ambience, key, user_id);

    let mut printed = print_new_messages(&coordinator, 0);
    coordinator.start(&auth_token).await;
    printed = print_new_messages(&coordinator, printed);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                coordinator.handle_event(event).await;
                printed = print_new_messages(&coordinator, printed);
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(action)) => {
                        // the first keypress doubles as the audio unlock gesture
                        coordinator.note_user_gesture();
                        coordinator.submit_action(&action).await;
                        printed = print_new_messages(&coordinator, printed);
                    }
                    _ => break,
                }
            }
        }
    }

    coordinator.disconnect().await;
    Ok(())
}

/// Print timeline entries added since the last call, returning the new count
fn print_new_messages(coordinator: &SessionCoordinator, printed: usize) -> usize {
    let snapshot = coordinator.snapshot();
    for message in snapshot.timeline.iter().skip(printed) {
        println!("[{:?}] {}", message.kind, message.content);
    }
    snapshot.timeline.len()
}
