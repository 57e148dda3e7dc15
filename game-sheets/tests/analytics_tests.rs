use anyhow::Result;
use async_trait::async_trait;
use game_sheets::{
    AnalyticsPipeline, EventSink, MemoryEventSink, RANKING_RANGE, STATS_RANGE, destination_for,
};
use game_types::{GameplayEvent, PlayerStats};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

const GAME_ID: &str = "2025-04-10";

async fn wait_for_rows(sink: &MemoryEventSink, destination: &str, want: usize) -> Vec<Vec<String>> {
    for _ in 0..100 {
        let rows = sink.rows(destination).await;
        if rows.len() >= want {
            return rows;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("sink never received {} rows", want);
}

#[tokio::test]
async fn events_are_written_in_submission_order() {
    let sink = Arc::new(MemoryEventSink::new());
    let pipeline = AnalyticsPipeline::new(sink.clone());

    for i in 0..5 {
        pipeline.submit(GameplayEvent::guess(
            GAME_ID,
            &format!("player-{}", i),
            &format!("guess-{}", i),
            false,
        ));
    }

    let destination = destination_for(GAME_ID);
    let rows = wait_for_rows(&sink, &destination, 6).await;

    // Header first, then the five events in the order they were submitted.
    assert_eq!(rows[0][0], "Timestamp");
    for (i, row) in rows[1..].iter().enumerate() {
        assert_eq!(row.len(), 6);
        assert_eq!(row[1], "guess");
        assert_eq!(row[2], "false");
        assert_eq!(row[3], format!("guess-{}", i));
        assert_eq!(row[5], format!("player-{}", i));
    }
}

#[tokio::test]
async fn hint_events_record_the_category() {
    let sink = Arc::new(MemoryEventSink::new());
    let pipeline = AnalyticsPipeline::new(sink.clone());

    pipeline.submit(GameplayEvent::hint(GAME_ID, "p1", "fruit"));

    let rows = wait_for_rows(&sink, &destination_for(GAME_ID), 2).await;
    assert_eq!(rows[1][1], "hint");
    assert_eq!(rows[1][2], "");
    assert_eq!(rows[1][4], "fruit");
    assert_eq!(rows[1][5], "p1");
}

/// Sink wrapper that counts existence checks.
struct CountingSink {
    inner: MemoryEventSink,
    existence_checks: AtomicUsize,
}

#[async_trait]
impl EventSink for CountingSink {
    async fn append_row(&self, destination: &str, row: Vec<String>) -> Result<()> {
        self.inner.append_row(destination, row).await
    }

    async fn destination_exists(&self, destination: &str) -> Result<bool> {
        self.existence_checks.fetch_add(1, Ordering::SeqCst);
        self.inner.destination_exists(destination).await
    }

    async fn create_destination(&self, destination: &str, header: &[&str]) -> Result<()> {
        self.inner.create_destination(destination, header).await
    }

    async fn read_range(&self, destination: &str, range: &str) -> Result<Vec<Vec<String>>> {
        self.inner.read_range(destination, range).await
    }
}

#[tokio::test]
async fn destination_is_checked_and_created_once() {
    let sink = Arc::new(CountingSink {
        inner: MemoryEventSink::new(),
        existence_checks: AtomicUsize::new(0),
    });
    let pipeline = AnalyticsPipeline::new(sink.clone());

    for i in 0..10 {
        pipeline.submit(GameplayEvent::guess(GAME_ID, "p1", &format!("g{}", i), false));
    }

    wait_for_rows(&sink.inner, &destination_for(GAME_ID), 11).await;
    assert_eq!(sink.existence_checks.load(Ordering::SeqCst), 1);
    assert_eq!(sink.inner.destination_count().await, 1);
}

/// Sink whose writes park until released, to back the queue up.
struct StalledSink {
    release: Notify,
}

#[async_trait]
impl EventSink for StalledSink {
    async fn append_row(&self, _destination: &str, _row: Vec<String>) -> Result<()> {
        self.release.notified().await;
        Ok(())
    }

    async fn destination_exists(&self, _destination: &str) -> Result<bool> {
        Ok(true)
    }

    async fn create_destination(&self, _destination: &str, _header: &[&str]) -> Result<()> {
        Ok(())
    }

    async fn read_range(&self, _destination: &str, _range: &str) -> Result<Vec<Vec<String>>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn submit_never_blocks_when_the_buffer_is_full() {
    let sink = Arc::new(StalledSink {
        release: Notify::new(),
    });
    let pipeline = AnalyticsPipeline::with_capacity(sink.clone(), 2);

    // Far more events than the buffer holds, against a sink that is stuck.
    // Submission must return immediately every time, dropping the overflow.
    let submitted = tokio::time::timeout(Duration::from_secs(1), async {
        for i in 0..100 {
            pipeline.submit(GameplayEvent::guess(GAME_ID, "p1", &format!("g{}", i), false));
        }
    })
    .await;
    assert!(submitted.is_ok(), "submit blocked on a full buffer");

    sink.release.notify_waiters();
}

#[tokio::test]
async fn stats_default_when_no_plays_are_recorded() {
    let sink = Arc::new(MemoryEventSink::new());
    let pipeline = AnalyticsPipeline::new(sink);

    let stats = pipeline.player_stats("2025-04-10", "p1").await;
    assert_eq!(stats, PlayerStats::default());
    assert_eq!(stats.total_players, 1);
    assert_eq!(stats.players_solved, 1);
    assert_eq!(stats.player_rank, 1);
}

#[tokio::test]
async fn stats_read_totals_and_rank_from_the_sink() {
    let sink = Arc::new(MemoryEventSink::new());
    let destination = destination_for(GAME_ID);
    sink.create_destination(&destination, &["Timestamp"])
        .await
        .unwrap();
    sink.set_range(
        &destination,
        STATS_RANGE,
        vec![vec!["42".to_string()], vec!["17".to_string()]],
    )
    .await;
    sink.set_range(
        &destination,
        RANKING_RANGE,
        vec![
            vec!["first-solver".to_string()],
            vec!["p1".to_string()],
            vec!["later-solver".to_string()],
        ],
    )
    .await;

    let pipeline = AnalyticsPipeline::new(sink);
    let stats = pipeline.player_stats(GAME_ID, "p1").await;

    assert_eq!(stats.total_players, 42);
    assert_eq!(stats.players_solved, 17);
    // Second entry in the solver list: rank 2, 1-based.
    assert_eq!(stats.player_rank, 2);
}

#[tokio::test]
async fn stats_keep_defaults_for_unranked_players_and_junk_cells() {
    let sink = Arc::new(MemoryEventSink::new());
    let destination = destination_for(GAME_ID);
    sink.create_destination(&destination, &["Timestamp"])
        .await
        .unwrap();
    sink.set_range(
        &destination,
        STATS_RANGE,
        vec![vec!["#N/A".to_string()], vec!["0".to_string()]],
    )
    .await;
    sink.set_range(
        &destination,
        RANKING_RANGE,
        vec![vec!["someone-else".to_string()], vec!["".to_string()]],
    )
    .await;

    let pipeline = AnalyticsPipeline::new(sink);
    let stats = pipeline.player_stats(GAME_ID, "p1").await;
    assert_eq!(stats, PlayerStats::default());
}

/// Sink that always fails, to exercise error absorption.
struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn append_row(&self, _destination: &str, _row: Vec<String>) -> Result<()> {
        anyhow::bail!("sink unreachable")
    }

    async fn destination_exists(&self, _destination: &str) -> Result<bool> {
        anyhow::bail!("sink unreachable")
    }

    async fn create_destination(&self, _destination: &str, _header: &[&str]) -> Result<()> {
        anyhow::bail!("sink unreachable")
    }

    async fn read_range(&self, _destination: &str, _range: &str) -> Result<Vec<Vec<String>>> {
        anyhow::bail!("sink unreachable")
    }
}

#[tokio::test]
async fn sink_failures_never_reach_the_caller() {
    let pipeline = AnalyticsPipeline::new(Arc::new(FailingSink));

    // Writes fail inside the consumer and are absorbed.
    pipeline.submit(GameplayEvent::guess(GAME_ID, "p1", "apple", true));
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Reads fail and degrade to the safe default.
    let stats = pipeline.player_stats(GAME_ID, "p1").await;
    assert_eq!(stats, PlayerStats::default());
}
