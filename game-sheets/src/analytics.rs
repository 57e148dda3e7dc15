use crate::event_sink::{EVENT_HEADER, EventSink};
use anyhow::Result;
use dashmap::DashMap;
use game_types::{GameplayEvent, PlayerStats};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Default bound on the event buffer. Events past this are dropped.
pub const EVENT_BUFFER_CAPACITY: usize = 1000;

/// Cell range of the aggregate counters on a destination (total players,
/// players solved).
pub const STATS_RANGE: &str = "I2:I3";

/// Cell range of the ordered solver list on a destination.
pub const RANKING_RANGE: &str = "K3:K";

/// Destination name for one game's events.
pub fn destination_for(game_id: &str) -> String {
    format!("Game-{}", game_id)
}

/// Buffers gameplay events and flushes them to the event sink without ever
/// blocking or failing the gameplay path.
///
/// Delivery is best effort: a full buffer drops the event, sink errors are
/// logged and absorbed, and events still buffered at process exit are lost.
/// The single consumer task writes events strictly in submission order.
pub struct AnalyticsPipeline {
    tx: mpsc::Sender<GameplayEvent>,
    sink: Arc<dyn EventSink>,
    known_destinations: Arc<DashMap<String, ()>>,
}

impl AnalyticsPipeline {
    /// Spawn the consumer task and return the pipeline handle.
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_capacity(sink, EVENT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(sink: Arc<dyn EventSink>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let known_destinations = Arc::new(DashMap::new());
        tokio::spawn(consume_events(
            rx,
            sink.clone(),
            known_destinations.clone(),
        ));
        Self {
            tx,
            sink,
            known_destinations,
        }
    }

    /// Enqueue an event. Never blocks: when the buffer is full (or the
    /// consumer is gone) the event is dropped with a warning.
    pub fn submit(&self, event: GameplayEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(game_id = %event.game_id, "analytics buffer full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(game_id = %event.game_id, "analytics consumer stopped, dropping event");
            }
        }
    }

    /// Aggregate counters and rank for one player, read from the sink.
    ///
    /// Stats are advisory: a game with no recorded destination, or any read
    /// failure, degrades to the default `{1, 1, 1}` instead of erroring.
    pub async fn player_stats(&self, game_id: &str, player_id: &str) -> PlayerStats {
        let destination = destination_for(game_id.trim_matches('"'));
        let mut stats = PlayerStats::default();

        if !self.known_destinations.contains_key(&destination) {
            match self.sink.destination_exists(&destination).await {
                Ok(true) => {
                    self.known_destinations.insert(destination.clone(), ());
                }
                Ok(false) => {
                    debug!(%destination, "no plays recorded yet, returning default stats");
                    return stats;
                }
                Err(err) => {
                    warn!(%destination, error = %err, "destination check failed");
                    return stats;
                }
            }
        }

        let totals = match self.sink.read_range(&destination, STATS_RANGE).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%destination, error = %err, "failed to read stats block");
                return stats;
            }
        };
        if let Some(total_players) = parse_counter(&totals, 0) {
            stats.total_players = total_players;
        }
        if let Some(players_solved) = parse_counter(&totals, 1) {
            stats.players_solved = players_solved;
        }

        match self.sink.read_range(&destination, RANKING_RANGE).await {
            Ok(ranking) => {
                for (position, row) in ranking.iter().enumerate() {
                    let Some(solver) = row.first() else { continue };
                    if solver.trim().is_empty() {
                        continue;
                    }
                    if solver.trim() == player_id.trim() {
                        stats.player_rank = (position + 1) as u32;
                        break;
                    }
                }
            }
            Err(err) => {
                warn!(%destination, error = %err, "failed to read player rankings");
            }
        }

        stats
    }
}

fn parse_counter(rows: &[Vec<String>], index: usize) -> Option<u32> {
    rows.get(index)?
        .first()?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|count| *count > 0)
}

async fn consume_events(
    mut rx: mpsc::Receiver<GameplayEvent>,
    sink: Arc<dyn EventSink>,
    known_destinations: Arc<DashMap<String, ()>>,
) {
    while let Some(event) = rx.recv().await {
        if let Err(err) = write_event(sink.as_ref(), &known_destinations, &event).await {
            warn!(game_id = %event.game_id, error = %err, "failed to record analytics event");
        }
    }
}

async fn write_event(
    sink: &dyn EventSink,
    known_destinations: &DashMap<String, ()>,
    event: &GameplayEvent,
) -> Result<()> {
    let destination = destination_for(&event.game_id);

    if !known_destinations.contains_key(&destination) {
        if !sink.destination_exists(&destination).await? {
            sink.create_destination(&destination, &EVENT_HEADER).await?;
        }
        known_destinations.insert(destination.clone(), ());
    }

    sink.append_row(
        &destination,
        vec![
            event.timestamp.to_rfc3339(),
            event.kind.as_str().to_string(),
            event.field("correct").to_string(),
            event.field("guess").to_string(),
            event.field("category").to_string(),
            event.player_id.clone(),
        ],
    )
    .await
}
