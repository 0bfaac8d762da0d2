//! Seat map demo binary
//!
//! Drives a scripted session through the store and prints the widget after
//! each step. Configuration comes from `SEATMAP_*` environment variables
//! (a `.env` file is honored). Unless `SEATMAP_BOOKED_SEATS` says otherwise,
//! the demo hall opens with C1 and C2 already sold.

use anyhow::Context;
use seatmap_booking::{
    view, SeatMapAction, SeatMapConfig, SeatMapEnvironment, SeatMapReducer, SeatMapState,
};
use seatmap_core::environment::SystemClock;
use seatmap_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seats sold before the demo session starts
const DEMO_BOOKED_SEATS: [&str; 2] = ["C1", "C2"];

type SeatMapStore = Store<SeatMapState, SeatMapAction, SeatMapEnvironment, SeatMapReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatmap_booking=info,seatmap_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    seatmap_runtime::metrics::describe_metrics();

    let mut config = SeatMapConfig::from_env().context("invalid seat map configuration")?;
    if std::env::var_os("SEATMAP_BOOKED_SEATS").is_none() {
        config.booked_seat_ids = DEMO_BOOKED_SEATS
            .iter()
            .map(|id| id.parse())
            .collect::<Result<_, _>>()?;
    }
    info!(
        rows = config.layout.rows,
        seats_per_row = config.layout.seats_per_row,
        booked = config.booked_seat_ids.len(),
        mode = ?config.selection_mode,
        "Configuration loaded"
    );

    let env = SeatMapEnvironment::with_callback(Arc::new(SystemClock), |record| {
        let json = serde_json::to_string(record).unwrap_or_default();
        println!("\n<<< Booking Done: {json}");
    });
    let store = Store::new(SeatMapState::new(config)?, SeatMapReducer::new(), env);

    print_step(&store, "Initial state").await;

    store.send(SeatMapAction::ChooseSeatCount { count: 3 }).await?;
    store.send(SeatMapAction::ConfirmSeatCount).await?;
    print_step(&store, "Chose 3 seats").await;

    store
        .send(SeatMapAction::SeatActivated { row: 2, column: 2 })
        .await?;
    settle(&store).await;
    print_step(&store, "Clicked C3").await;

    store
        .send(SeatMapAction::SeatActivated { row: 5, column: 11 })
        .await?;
    settle(&store).await;
    print_step(&store, "Clicked F12").await;

    store
        .send_and_wait_for(
            SeatMapAction::ConfirmBooking,
            |action| matches!(action, SeatMapAction::BookingCompleted { .. }),
            Duration::from_secs(5),
        )
        .await?;
    print_step(&store, "Booked").await;

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

/// Wait until any staggered reveal has finished
async fn settle(store: &SeatMapStore) {
    let step = store.state(|s| s.config.reveal_delay()).await;
    while store.state(SeatMapState::is_revealing).await {
        tokio::time::sleep(step).await;
    }
}

async fn print_step(store: &SeatMapStore, title: &str) {
    let text = store.state(view::render_text).await;
    println!("\n>>> {title}\n\n{text}");
}
