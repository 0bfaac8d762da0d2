//! End-to-end seat map sessions through the store
//!
//! Time is paused, so staggered reveals advance deterministically.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use seatmap_booking::{
    BookingRecord, CategoryRule, Price, SeatId, SeatMapAction, SeatMapConfig, SeatMapEnvironment,
    SeatMapReducer, SeatMapState, SeatTypeConfig, SelectionMode,
};
use seatmap_core::environment::Clock;
use seatmap_runtime::{Store, StoreError};
use seatmap_testing::{init_test_tracing, test_clock};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type SeatMapStore = Store<SeatMapState, SeatMapAction, SeatMapEnvironment, SeatMapReducer>;

// ============================================================================
// Test Fixtures
// ============================================================================

struct Session {
    store: SeatMapStore,
    bookings: Arc<Mutex<Vec<BookingRecord>>>,
}

async fn session(config: SeatMapConfig, seat_count: usize) -> Session {
    init_test_tracing();

    let bookings = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&bookings);
    let env = SeatMapEnvironment::with_callback(Arc::new(test_clock()), move |record| {
        sink.lock().unwrap().push(record.clone());
    });
    let store = Store::new(
        SeatMapState::new(config).unwrap(),
        SeatMapReducer::new(),
        env,
    );

    store
        .send(SeatMapAction::ChooseSeatCount { count: seat_count })
        .await
        .unwrap();
    store.send(SeatMapAction::ConfirmSeatCount).await.unwrap();

    Session { store, bookings }
}

impl Session {
    async fn click(&self, row: usize, column: usize) {
        self.store
            .send(SeatMapAction::SeatActivated { row, column })
            .await
            .unwrap();
    }

    async fn selected(&self) -> Vec<String> {
        self.store
            .state(|s| s.selected_ids().iter().map(ToString::to_string).collect())
            .await
    }

    async fn book(&self) -> Result<SeatMapAction, StoreError> {
        self.store
            .send_and_wait_for(
                SeatMapAction::ConfirmBooking,
                |a| matches!(a, SeatMapAction::BookingCompleted { .. }),
                Duration::from_secs(1),
            )
            .await
    }
}

fn ids(raw: &[&str]) -> Vec<SeatId> {
    raw.iter().map(|id| id.parse().unwrap()).collect()
}

/// Stock hall with C1 and C2 already sold
fn hall() -> SeatMapConfig {
    SeatMapConfig {
        booked_seat_ids: ids(&["C1", "C2"]),
        ..SeatMapConfig::default()
    }
}

/// Row C priced as gold, the rest of the stock table unchanged
fn gold_row_c() -> SeatMapConfig {
    SeatMapConfig {
        seat_types: SeatTypeConfig::new(vec![
            CategoryRule::new("regular", "Regular", Price::new(150), 0..=1),
            CategoryRule::new("gold", "Gold", Price::new(350), 2..=5),
            CategoryRule::new("platinum", "Platinum", Price::new(650), 6..=7),
        ]),
        ..hall()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pair_from_first_seat_is_booked() {
    let session = session(hall(), 2).await;

    session.click(0, 0).await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(session.selected().await, vec!["A1", "A2"]);

    let completed = session.book().await.unwrap();
    let expected = BookingRecord {
        booked_seat_ids: ids(&["A1", "A2"]),
        total_price: Price::new(300),
    };
    assert_eq!(
        completed,
        SeatMapAction::BookingCompleted {
            record: expected.clone(),
            completed_at: test_clock().now(),
        }
    );
    assert_eq!(*session.bookings.lock().unwrap(), vec![expected]);

    let (booked, selected) = session
        .store
        .state(|s| (s.grid.booked_count(), s.selection.len()))
        .await;
    assert_eq!((booked, selected), (4, 0));
}

#[tokio::test(start_paused = true)]
async fn test_block_skips_prebooked_seats() {
    let session = session(gold_row_c(), 2).await;

    session.click(2, 2).await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(session.selected().await, vec!["C3", "C4"]);

    session.book().await.unwrap();
    let record = session.bookings.lock().unwrap()[0].clone();
    assert_eq!(record.booked_seat_ids, ids(&["C3", "C4"]));
    assert_eq!(record.total_price, Price::new(700));
}

#[tokio::test(start_paused = true)]
async fn test_booked_seat_click_is_a_noop() {
    let session = session(hall(), 2).await;

    session.click(2, 0).await;
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert!(session.selected().await.is_empty());
    assert_eq!(session.store.state(|s| s.last_error.clone()).await, None);
}

#[tokio::test(start_paused = true)]
async fn test_config_without_bookings_opens_every_seat() {
    let config = SeatMapConfig::from_json(r#"{ "revealDelayMs": 0 }"#).unwrap();
    let session = session(config, 2).await;

    assert_eq!(session.store.state(|s| s.grid.booked_count()).await, 0);
    session.click(2, 0).await;
    assert_eq!(session.selected().await, vec!["C1", "C2"]);

    session.book().await.unwrap();
    assert_eq!(session.store.state(|s| s.grid.booked_count()).await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_block_at_row_end_grows_left() {
    let session = session(SeatMapConfig::default(), 4).await;

    session.click(4, 11).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(session.selected().await, vec!["E9", "E10", "E11", "E12"]);
}

#[tokio::test(start_paused = true)]
async fn test_reveal_is_staggered() {
    let session = session(SeatMapConfig::default(), 3).await;

    session.click(1, 0).await;
    assert_eq!(session.selected().await, vec!["B1"]);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(session.selected().await, vec!["B1", "B2"]);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(session.selected().await, vec!["B1", "B2", "B3"]);
    assert!(!session.store.state(SeatMapState::is_revealing).await);
}

#[tokio::test(start_paused = true)]
async fn test_second_click_supersedes_running_reveal() {
    let session = session(SeatMapConfig::default(), 5).await;

    session.click(0, 0).await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    session.click(6, 3).await;
    tokio::time::sleep(Duration::from_millis(1000)).await;

    assert_eq!(session.selected().await, vec!["G4", "G5", "G6", "G7", "G8"]);
    let stray = session
        .store
        .state(|s| s.grid.seats().filter(|seat| seat.selected && seat.row == 0).count())
        .await;
    assert_eq!(stray, 0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_booking_is_rejected() {
    let session = session(SeatMapConfig::default(), 2).await;

    let result = session.book().await;

    assert!(matches!(result, Err(StoreError::Timeout)));
    assert!(session.bookings.lock().unwrap().is_empty());
    assert!(session
        .store
        .state(|s| s.last_error.is_some())
        .await);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mode_session() {
    let config = SeatMapConfig {
        selection_mode: SelectionMode::Toggle,
        ..SeatMapConfig::default()
    };
    let session = session(config, 2).await;

    session.click(7, 0).await;
    session.click(3, 5).await;
    session.click(0, 0).await;
    assert_eq!(session.selected().await, vec!["H1", "D6"]);

    session.book().await.unwrap();
    let record = session.bookings.lock().unwrap()[0].clone();
    assert_eq!(record.total_price, Price::new(1000));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_rejects_further_clicks() {
    let session = session(SeatMapConfig::default(), 2).await;

    session.store.shutdown(Duration::from_secs(1)).await.unwrap();
    let result = session
        .store
        .send(SeatMapAction::SeatActivated { row: 0, column: 0 })
        .await;

    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}
