//! Seat map reducer.
//!
//! Owns the widget state machine: the seat-count prompt, seat activation
//! with its staggered reveal, booking finalization and reconfiguration.
//!
//! # Staggered reveal
//!
//! In contiguous mode with a non-zero delay, the first seat of a new block is
//! selected immediately and every further seat arrives through a delayed
//! [`SeatMapAction::RevealNext`]. Each activation takes a fresh
//! [`RevealTicket`] and cancels the effects registered under
//! [`REVEAL_EFFECT_ID`], so steps from a superseded activation are aborted by
//! the runtime and, if one was already in flight, ignored here because its
//! ticket no longer matches.

use crate::config::{SeatMapConfig, SelectionMode, MAX_SEATS_PER_BOOKING};
use crate::error::{ConfigError, SeatMapError};
use crate::finalize::finalize;
use crate::grid::Grid;
use crate::selection::{plan_activation, Activation, IgnoreReason, Selection};
use crate::types::{BookingRecord, Price, SeatId, SeatPosition};
use chrono::{DateTime, Utc};
use seatmap_core::{
    async_effect, cancellable, delay,
    effect::{Effect, EffectId},
    environment::Clock,
    reducer::Reducer,
    smallvec, SmallVec,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Effect group for pending reveal steps
pub const REVEAL_EFFECT_ID: &str = "seat-reveal";

type Effects = SmallVec<[Effect<SeatMapAction>; 4]>;

// ============================================================================
// State
// ============================================================================

/// Identifies one activation's reveal sequence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealTicket(u64);

impl RevealTicket {
    /// Ticket value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Seats still waiting to be revealed for the current activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReveal {
    /// Activation the queue belongs to
    pub ticket: RevealTicket,
    /// Remaining seats, in reveal order
    pub queue: VecDeque<SeatPosition>,
}

/// Widget state
#[derive(Debug, Clone)]
pub struct SeatMapState {
    /// Active configuration
    pub config: SeatMapConfig,
    /// Seat grid
    pub grid: Grid,
    /// In-progress selection
    pub selection: Selection,
    /// Target number of seats per activation
    pub seat_count: usize,
    /// Whether the seat-count prompt is showing
    pub prompt_open: bool,
    /// Reveal in progress, if any
    pub reveal: Option<PendingReveal>,
    /// Most recent booking
    pub last_booking: Option<BookingRecord>,
    /// When the listener acknowledged the most recent booking
    pub last_booking_at: Option<DateTime<Utc>>,
    /// Last rejected operation
    pub last_error: Option<SeatMapError>,
    ticket: RevealTicket,
}

impl SeatMapState {
    /// Build the initial state: grid from `config`, prompt open
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn new(config: SeatMapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::build(config.layout, &config.seat_types, &config.booked_seat_ids)?;

        Ok(Self {
            seat_count: config.initial_seat_count,
            config,
            grid,
            selection: Selection::new(),
            prompt_open: true,
            reveal: None,
            last_booking: None,
            last_booking_at: None,
            last_error: None,
            ticket: RevealTicket::default(),
        })
    }

    /// Ids of the selected seats in selection order
    #[must_use]
    pub fn selected_ids(&self) -> Vec<SeatId> {
        self.selection.ids(&self.grid)
    }

    /// Sum of the selected seats' prices
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.selection.total(&self.grid)
    }

    /// Whether a reveal sequence is still running
    #[must_use]
    pub const fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    /// Ticket of the most recent activation
    #[must_use]
    pub const fn current_ticket(&self) -> RevealTicket {
        self.ticket
    }

    fn next_ticket(&mut self) -> RevealTicket {
        self.ticket = self.ticket.next();
        self.ticket
    }

    /// Drop a pending reveal, returning the cancel effect if one was running
    fn cancel_reveal(&mut self) -> Option<Effect<SeatMapAction>> {
        self.reveal.take().map(|pending| {
            tracing::debug!(ticket = pending.ticket.value(), "Cancelling pending reveal");
            Effect::Cancel {
                id: EffectId::new(REVEAL_EFFECT_ID),
            }
        })
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Every input the seat map reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeatMapAction {
    /// Pick a seat count in the prompt (`1..=10`)
    ChooseSeatCount {
        /// Seats per activation
        count: usize,
    },
    /// Close the prompt and start accepting clicks
    ConfirmSeatCount,
    /// A seat was clicked
    SeatActivated {
        /// Row index
        row: usize,
        /// Column index
        column: usize,
    },
    /// Deferred reveal step
    RevealNext {
        /// Activation the step belongs to
        ticket: RevealTicket,
    },
    /// Drop the whole selection
    ClearSelection,
    /// Book the current selection
    ConfirmBooking,
    /// The host listener received the booking
    BookingCompleted {
        /// The booking handed to the listener
        record: BookingRecord,
        /// Time the listener returned
        completed_at: DateTime<Utc>,
    },
    /// Replace the configuration and rebuild the grid
    Reconfigure {
        /// New configuration
        config: Box<SeatMapConfig>,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Host callback for finalized bookings
pub trait BookingListener: Send + Sync {
    /// Called once per successful booking
    fn booking_completed(&self, record: &BookingRecord);
}

/// Listener that ignores bookings
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl BookingListener for NoopListener {
    fn booking_completed(&self, _record: &BookingRecord) {}
}

/// Adapts a closure into a [`BookingListener`]
pub struct FnListener<F>(F);

impl<F> FnListener<F>
where
    F: Fn(&BookingRecord) + Send + Sync,
{
    /// Wrap `callback`
    pub const fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> BookingListener for FnListener<F>
where
    F: Fn(&BookingRecord) + Send + Sync,
{
    fn booking_completed(&self, record: &BookingRecord) {
        (self.0)(record);
    }
}

/// Injected dependencies
#[derive(Clone)]
pub struct SeatMapEnvironment {
    /// Clock for completion timestamps
    pub clock: Arc<dyn Clock>,
    /// Host booking callback
    pub listener: Arc<dyn BookingListener>,
}

impl SeatMapEnvironment {
    /// Creates an environment
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, listener: Arc<dyn BookingListener>) -> Self {
        Self { clock, listener }
    }

    /// Environment whose listener runs `callback`
    #[must_use]
    pub fn with_callback<F>(clock: Arc<dyn Clock>, callback: F) -> Self
    where
        F: Fn(&BookingRecord) + Send + Sync + 'static,
    {
        Self::new(clock, Arc::new(FnListener::new(callback)))
    }
}

impl fmt::Debug for SeatMapEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeatMapEnvironment").finish_non_exhaustive()
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the seat map widget
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatMapReducer;

impl SeatMapReducer {
    /// Creates the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn choose_seat_count(state: &mut SeatMapState, count: usize) -> Result<Effects, SeatMapError> {
        if !state.prompt_open {
            tracing::debug!(count, "Seat count ignored: prompt is closed");
            return Ok(smallvec![Effect::None]);
        }
        if !(1..=MAX_SEATS_PER_BOOKING).contains(&count) {
            return Err(SeatMapError::InvalidSeatCount {
                count,
                max: MAX_SEATS_PER_BOOKING,
            });
        }
        state.seat_count = count;
        state.last_error = None;
        Ok(smallvec![Effect::None])
    }

    fn activate_seat(
        state: &mut SeatMapState,
        position: SeatPosition,
    ) -> Result<Effects, SeatMapError> {
        if state.prompt_open {
            tracing::debug!(%position, "Activation ignored: seat count prompt is open");
            metrics::counter!("seatmap.activations.total", "outcome" => "prompt_open")
                .increment(1);
            return Ok(smallvec![Effect::None]);
        }

        let mode = state.config.selection_mode;
        let plan = match plan_activation(
            &state.grid,
            &state.selection,
            position,
            state.seat_count,
            mode,
        )? {
            Activation::Planned(plan) => plan,
            Activation::Ignored(reason) => {
                let outcome = match reason {
                    IgnoreReason::SeatBooked => "seat_booked",
                    IgnoreReason::SelectionFull => "selection_full",
                };
                tracing::debug!(%position, ?reason, "Activation ignored");
                metrics::counter!("seatmap.activations.total", "outcome" => outcome).increment(1);
                return Ok(smallvec![Effect::None]);
            },
        };

        let mut effects: Effects = SmallVec::new();
        effects.extend(state.cancel_reveal());
        let ticket = state.next_ticket();
        state.last_error = None;

        plan.apply_release(&mut state.grid, &mut state.selection)?;

        let delay = state.config.reveal_delay();
        let mut queue: VecDeque<SeatPosition> = plan.reveal.into();

        if mode == SelectionMode::ContiguousBlock && !delay.is_zero() {
            if let Some(first) = queue.pop_front() {
                state.selection.select(&mut state.grid, first)?;
            }
            if !queue.is_empty() {
                tracing::debug!(
                    ticket = ticket.value(),
                    remaining = queue.len(),
                    "Revealing block"
                );
                state.reveal = Some(PendingReveal { ticket, queue });
                effects.push(Self::reveal_step(ticket, delay));
            }
        } else {
            for position in queue {
                state.selection.select(&mut state.grid, position)?;
            }
        }

        tracing::debug!(
            %position,
            selected = state.selection.len(),
            target = state.seat_count,
            "Seat activated"
        );
        metrics::counter!("seatmap.activations.total", "outcome" => "selected").increment(1);

        if effects.is_empty() {
            effects.push(Effect::None);
        }
        Ok(effects)
    }

    fn reveal_next(state: &mut SeatMapState, ticket: RevealTicket) -> Result<Effects, SeatMapError> {
        let Some(pending) = state.reveal.as_mut().filter(|p| p.ticket == ticket) else {
            tracing::trace!(ticket = ticket.value(), "Stale reveal step ignored");
            return Ok(smallvec![Effect::None]);
        };

        let next = pending.queue.pop_front();
        let finished = pending.queue.is_empty();
        if finished {
            state.reveal = None;
        }

        if let Some(position) = next {
            state.selection.select(&mut state.grid, position)?;
        }

        if finished {
            Ok(smallvec![Effect::None])
        } else {
            Ok(smallvec![Self::reveal_step(
                ticket,
                state.config.reveal_delay()
            )])
        }
    }

    fn confirm_booking(
        state: &mut SeatMapState,
        env: &SeatMapEnvironment,
    ) -> Result<Effects, SeatMapError> {
        let mut effects: Effects = SmallVec::new();
        effects.extend(state.cancel_reveal());

        let record = finalize(&mut state.grid, &mut state.selection)?;

        metrics::counter!("seatmap.bookings.total").increment(1);
        metrics::counter!("seatmap.seats.booked.total")
            .increment(u64::try_from(record.seat_count()).unwrap_or(u64::MAX));

        state.last_booking = Some(record.clone());
        state.last_error = None;

        let listener = Arc::clone(&env.listener);
        let clock = Arc::clone(&env.clock);
        effects.push(async_effect! {
            listener.booking_completed(&record);
            Some(SeatMapAction::BookingCompleted {
                record,
                completed_at: clock.now(),
            })
        });
        Ok(effects)
    }

    fn reconfigure(
        state: &mut SeatMapState,
        config: SeatMapConfig,
    ) -> Result<Effects, SeatMapError> {
        config.validate()?;
        let grid = Grid::build(config.layout, &config.seat_types, &config.booked_seat_ids)?;

        let mut effects: Effects = SmallVec::new();
        effects.extend(state.cancel_reveal());

        tracing::info!(
            rows = config.layout.rows,
            seats_per_row = config.layout.seats_per_row,
            "Seat map reconfigured"
        );

        state.grid = grid;
        state.selection = Selection::new();
        state.config = config;
        state.last_error = None;

        if effects.is_empty() {
            effects.push(Effect::None);
        }
        Ok(effects)
    }

    fn reveal_step(ticket: RevealTicket, duration: Duration) -> Effect<SeatMapAction> {
        cancellable! {
            id: REVEAL_EFFECT_ID,
            effect: delay! {
                duration: duration,
                action: SeatMapAction::RevealNext { ticket }
            }
        }
    }

    fn record_error(state: &mut SeatMapState, error: SeatMapError) -> Effects {
        match error {
            SeatMapError::EmptySelection | SeatMapError::InvalidSeatCount { .. } => {
                tracing::warn!(%error, "Action rejected");
            },
            _ => tracing::error!(%error, "Seat map operation failed"),
        }
        state.last_error = Some(error);
        smallvec![Effect::None]
    }
}

impl Reducer for SeatMapReducer {
    type State = SeatMapState;
    type Action = SeatMapAction;
    type Environment = SeatMapEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let result = match action {
            SeatMapAction::ChooseSeatCount { count } => Self::choose_seat_count(state, count),
            SeatMapAction::ConfirmSeatCount => {
                if state.prompt_open {
                    tracing::info!(seat_count = state.seat_count, "Seat count confirmed");
                }
                state.prompt_open = false;
                Ok(smallvec![Effect::None])
            },
            SeatMapAction::SeatActivated { row, column } => {
                Self::activate_seat(state, SeatPosition::new(row, column))
            },
            SeatMapAction::RevealNext { ticket } => Self::reveal_next(state, ticket),
            SeatMapAction::ClearSelection => {
                let mut effects: Effects = SmallVec::new();
                effects.extend(state.cancel_reveal());
                state.selection.clear(&mut state.grid);
                if effects.is_empty() {
                    effects.push(Effect::None);
                }
                Ok(effects)
            },
            SeatMapAction::ConfirmBooking => Self::confirm_booking(state, env),
            SeatMapAction::BookingCompleted {
                record,
                completed_at,
            } => {
                tracing::info!(
                    seats = record.seat_count(),
                    total = record.total_price.amount(),
                    %completed_at,
                    "Booking delivered to listener"
                );
                state.last_booking_at = Some(completed_at);
                Ok(smallvec![Effect::None])
            },
            SeatMapAction::Reconfigure { config } => Self::reconfigure(state, *config),
        };

        result.unwrap_or_else(|error| Self::record_error(state, error))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use crate::config::{Layout, SeatMapConfig};
    use seatmap_testing::{assertions, test_clock, ReducerTest};
    use std::sync::Mutex;

    fn env() -> SeatMapEnvironment {
        SeatMapEnvironment::new(Arc::new(test_clock()), Arc::new(NoopListener))
    }

    fn ready_state(config: SeatMapConfig) -> SeatMapState {
        let mut state = SeatMapState::new(config).unwrap();
        state.prompt_open = false;
        state
    }

    /// Stock hall with C1 and C2 sold, selecting without animation
    fn instant(mode: SelectionMode) -> SeatMapConfig {
        SeatMapConfig {
            selection_mode: mode,
            reveal_delay_ms: 0,
            booked_seat_ids: vec!["C1".parse().unwrap(), "C2".parse().unwrap()],
            ..SeatMapConfig::default()
        }
    }

    fn click(row: usize, column: usize) -> SeatMapAction {
        SeatMapAction::SeatActivated { row, column }
    }

    /// Feed every delayed reveal step back until the sequence ends
    fn drain_reveal(state: &mut SeatMapState, mut effects: Effects) {
        let env = env();
        loop {
            let next: Vec<SeatMapAction> = assertions::delayed_actions(&effects)
                .into_iter()
                .cloned()
                .collect();
            let Some(action) = next.into_iter().next() else {
                break;
            };
            effects = SeatMapReducer.reduce(state, action, &env);
        }
    }

    #[test]
    fn prompt_chooses_and_confirms_count() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(SeatMapState::new(SeatMapConfig::default()).unwrap())
            .when_actions([
                SeatMapAction::ChooseSeatCount { count: 4 },
                SeatMapAction::ConfirmSeatCount,
            ])
            .then_state(|state| {
                assert_eq!(state.seat_count, 4);
                assert!(!state.prompt_open);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn out_of_range_seat_count_is_rejected() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(SeatMapState::new(SeatMapConfig::default()).unwrap())
            .when_action(SeatMapAction::ChooseSeatCount { count: 11 })
            .then_state(|state| {
                assert_eq!(state.seat_count, 2);
                assert_eq!(
                    state.last_error,
                    Some(SeatMapError::InvalidSeatCount { count: 11, max: 10 })
                );
            })
            .run();
    }

    #[test]
    fn clicks_are_ignored_while_prompt_is_open() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(SeatMapState::new(SeatMapConfig::default()).unwrap())
            .when_action(click(0, 0))
            .then_state(|state| assert!(state.selection.is_empty()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn instant_activation_selects_whole_block() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(instant(SelectionMode::ContiguousBlock)))
            .when_action(click(2, 2))
            .then_state(|state| {
                assert_eq!(state.selected_ids(), vec!["C3", "C4"]);
                assert_eq!(state.total_price(), Price::new(300));
                assert!(!state.is_revealing());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn animated_activation_reveals_one_seat_per_step() {
        let mut state = ready_state(SeatMapConfig::default());
        state.seat_count = 3;

        let effects = SeatMapReducer.reduce(&mut state, click(0, 0), &env());

        assert_eq!(state.selected_ids(), vec!["A1"]);
        assert!(state.is_revealing());
        assertions::assert_has_delay_effect(&effects);
        assert_eq!(
            assertions::delayed_actions(&effects),
            vec![&SeatMapAction::RevealNext {
                ticket: state.current_ticket()
            }]
        );

        drain_reveal(&mut state, effects);

        assert_eq!(state.selected_ids(), vec!["A1", "A2", "A3"]);
        assert!(!state.is_revealing());
    }

    #[test]
    fn new_activation_cancels_running_reveal() {
        let mut state = ready_state(SeatMapConfig::default());
        state.seat_count = 4;

        let first = SeatMapReducer.reduce(&mut state, click(0, 0), &env());
        let stale = assertions::delayed_actions(&first)[0].clone();

        let second = SeatMapReducer.reduce(&mut state, click(5, 4), &env());
        assertions::assert_cancels(&second, REVEAL_EFFECT_ID);
        assert_eq!(state.selected_ids(), vec!["F5"]);

        // A step from the first activation that slipped through changes nothing
        let ignored = SeatMapReducer.reduce(&mut state, stale, &env());
        assertions::assert_no_effects(&ignored);
        assert_eq!(state.selected_ids(), vec!["F5"]);

        drain_reveal(&mut state, second);
        assert_eq!(state.selected_ids(), vec!["F5", "F6", "F7", "F8"]);
        assert!(!state.grid.seats().any(|s| s.selected && s.row == 0));
    }

    #[test]
    fn toggle_mode_never_animates() {
        let config = SeatMapConfig {
            selection_mode: SelectionMode::Toggle,
            ..SeatMapConfig::default()
        };
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(config))
            .when_actions([click(0, 0), click(4, 4), click(7, 7), click(0, 0)])
            .then_state(|state| {
                assert_eq!(state.selected_ids(), vec!["E5"]);
                assert!(!state.is_revealing());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn booked_seat_click_changes_nothing() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(instant(SelectionMode::ContiguousBlock)))
            .when_actions([click(0, 0), click(2, 0)])
            .then_state(|state| {
                assert_eq!(state.selected_ids(), vec!["A1", "A2"]);
                assert_eq!(state.last_error, None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn default_hall_has_no_prebooked_seats() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(SeatMapConfig {
                reveal_delay_ms: 0,
                ..SeatMapConfig::default()
            }))
            .when_action(click(2, 0))
            .then_state(|state| {
                assert_eq!(state.grid.booked_count(), 0);
                assert_eq!(state.selected_ids(), vec!["C1", "C2"]);
            })
            .run();
    }

    #[test]
    fn invalid_coordinates_are_reported_not_panicked() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(SeatMapConfig::default()))
            .when_action(click(8, 0))
            .then_state(|state| {
                assert!(matches!(
                    state.last_error,
                    Some(SeatMapError::InvalidIndex { row: 8, column: 0, .. })
                ));
                assert!(state.selection.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn confirm_booking_with_empty_selection_is_rejected() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(SeatMapConfig::default()))
            .when_action(SeatMapAction::ConfirmBooking)
            .then_state(|state| {
                assert_eq!(state.last_error, Some(SeatMapError::EmptySelection));
                assert_eq!(state.last_booking, None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn confirm_booking_notifies_listener() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let env = SeatMapEnvironment::with_callback(Arc::new(test_clock()), move |record| {
            sink.lock().unwrap().push(record.clone());
        });

        let mut state = ready_state(instant(SelectionMode::ContiguousBlock));
        let _ = SeatMapReducer.reduce(&mut state, click(0, 0), &env);
        let mut effects = SeatMapReducer.reduce(&mut state, SeatMapAction::ConfirmBooking, &env);

        assert!(state.selection.is_empty());
        assert_eq!(state.grid.booked_count(), 4);
        let expected = BookingRecord {
            booked_seat_ids: vec!["A1".parse().unwrap(), "A2".parse().unwrap()],
            total_price: Price::new(300),
        };
        assert_eq!(state.last_booking.as_ref(), Some(&expected));
        assertions::assert_has_future_effect(&effects);

        let Some(Effect::Future(future)) = effects.pop() else {
            panic!("expected the listener effect last");
        };
        assert_eq!(
            future.await,
            Some(SeatMapAction::BookingCompleted {
                record: expected.clone(),
                completed_at: test_clock().now(),
            })
        );
        assert_eq!(*received.lock().unwrap(), vec![expected]);
    }

    #[test]
    fn confirm_booking_mid_reveal_books_what_is_selected() {
        let mut state = ready_state(SeatMapConfig::default());
        state.seat_count = 3;
        let _ = SeatMapReducer.reduce(&mut state, click(6, 0), &env());

        let effects = SeatMapReducer.reduce(&mut state, SeatMapAction::ConfirmBooking, &env());

        assertions::assert_cancels(&effects, REVEAL_EFFECT_ID);
        assert_eq!(
            state.last_booking.as_ref().map(|b| b.booked_seat_ids.clone()),
            Some(vec!["G1".parse().unwrap()])
        );
        assert!(!state.is_revealing());
    }

    #[test]
    fn booking_completed_records_timestamp() {
        let record = BookingRecord {
            booked_seat_ids: vec!["A1".parse().unwrap()],
            total_price: Price::new(150),
        };
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(SeatMapConfig::default()))
            .when_action(SeatMapAction::BookingCompleted {
                record,
                completed_at: test_clock().now(),
            })
            .then_state(|state| assert_eq!(state.last_booking_at, Some(test_clock().now())))
            .run();
    }

    #[test]
    fn clear_selection_releases_everything() {
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(instant(SelectionMode::ContiguousBlock)))
            .when_actions([click(3, 3), SeatMapAction::ClearSelection])
            .then_state(|state| {
                assert!(state.selection.is_empty());
                assert!(state.grid.seats().all(|s| !s.selected));
            })
            .run();
    }

    #[test]
    fn reconfigure_rebuilds_grid() {
        let config = SeatMapConfig {
            layout: Layout {
                rows: 3,
                seats_per_row: 6,
                aisle_position: 3,
            },
            booked_seat_ids: vec!["B2".parse().unwrap()],
            ..instant(SelectionMode::ContiguousBlock)
        };
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(instant(SelectionMode::ContiguousBlock)))
            .when_actions([
                click(0, 0),
                SeatMapAction::Reconfigure {
                    config: Box::new(config),
                },
            ])
            .then_state(|state| {
                assert_eq!(state.grid.row_count(), 3);
                assert_eq!(state.grid.booked_count(), 1);
                assert!(state.selection.is_empty());
                assert_eq!(state.seat_count, 2);
            })
            .run();
    }

    #[test]
    fn invalid_reconfigure_keeps_current_grid() {
        let config = SeatMapConfig {
            layout: Layout {
                rows: 0,
                seats_per_row: 6,
                aisle_position: 3,
            },
            ..SeatMapConfig::default()
        };
        ReducerTest::new(SeatMapReducer::new())
            .with_env(env())
            .given_state(ready_state(SeatMapConfig::default()))
            .when_action(SeatMapAction::Reconfigure {
                config: Box::new(config),
            })
            .then_state(|state| {
                assert_eq!(state.grid.row_count(), 8);
                assert_eq!(
                    state.last_error,
                    Some(SeatMapError::Config(ConfigError::NoRows))
                );
            })
            .run();
    }
}
