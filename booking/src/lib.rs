//! # Seatmap Booking
//!
//! A cinema seat map selector built on the reducer architecture.
//!
//! The widget shows a rectangular grid of seats (rows `A`, `B`, ...,
//! columns `1..n`, split by an aisle), priced by per-row category. The user
//! picks how many seats they want, clicks a seat, and the widget selects a
//! contiguous run of that size around the click without crossing booked
//! seats. Confirming books the selection and hands a [`BookingRecord`] to the
//! host's [`BookingListener`].
//!
//! ## Architecture
//!
//! - [`grid`]: seat table built from configuration
//! - [`selection`]: click planning (contiguous block or toggle)
//! - [`finalize`]: selection to booked seats and record
//! - [`reducer`]: state machine tying prompt, reveal animation and booking together
//! - [`view`]: presentation model and text rendering
//!
//! ## Example
//!
//! ```rust,no_run
//! use seatmap_booking::{SeatMapAction, SeatMapConfig, SeatMapEnvironment, SeatMapReducer, SeatMapState};
//! use seatmap_core::environment::SystemClock;
//! use seatmap_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let env = SeatMapEnvironment::with_callback(Arc::new(SystemClock), |record| {
//!     println!("booked {:?} for {}", record.booked_seat_ids, record.total_price);
//! });
//! let store = Store::new(SeatMapState::new(SeatMapConfig::default())?, SeatMapReducer::new(), env);
//!
//! store.send(SeatMapAction::ConfirmSeatCount).await?;
//! store.send(SeatMapAction::SeatActivated { row: 0, column: 0 }).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod finalize;
pub mod grid;
pub mod reducer;
pub mod selection;
pub mod types;
pub mod view;

pub use config::{
    CategoryRule, Layout, SeatMapConfig, SeatTypeConfig, SelectionMode, MAX_SEATS_PER_BOOKING,
};
pub use error::{ConfigError, SeatMapError};
pub use grid::Grid;
pub use reducer::{
    BookingListener, FnListener, NoopListener, RevealTicket, SeatMapAction, SeatMapEnvironment,
    SeatMapReducer, SeatMapState, REVEAL_EFFECT_ID,
};
pub use selection::{Activation, IgnoreReason, Selection, SelectionPlan};
pub use types::{BookingRecord, ColorTag, Price, Seat, SeatId, SeatPosition, SeatStatus};
