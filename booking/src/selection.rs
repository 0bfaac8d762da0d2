//! Seat selection engine.
//!
//! A click is first *planned* against the grid and current selection, which
//! yields the seats to release, the seats to keep and the seats still to
//! reveal. Planning never mutates; the reducer applies the plan either all at
//! once or one revealed seat at a time.
//!
//! # Contiguous block
//!
//! Starting at the clicked seat, count available seats to the right (up to
//! the target) and to the left (including the clicked seat, up to the
//! target). The longer run wins, ties go right. The run never crosses a
//! booked seat or the row end, so it may be shorter than the target.

use crate::config::SelectionMode;
use crate::error::SeatMapError;
use crate::grid::Grid;
use crate::types::{Price, Seat, SeatId, SeatPosition};
use serde::{Deserialize, Serialize};

/// Ordered set of selected seat positions
///
/// Order is the order seats were added, which is also the order ids appear
/// in the booking record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    seats: Vec<SeatPosition>,
}

impl Selection {
    /// Empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { seats: Vec::new() }
    }

    /// Number of selected seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Whether `position` is selected
    #[must_use]
    pub fn contains(&self, position: SeatPosition) -> bool {
        self.seats.contains(&position)
    }

    /// Selected positions in order
    #[must_use]
    pub fn positions(&self) -> &[SeatPosition] {
        &self.seats
    }

    /// Ids of the selected seats, in selection order
    #[must_use]
    pub fn ids(&self, grid: &Grid) -> Vec<SeatId> {
        self.seats(grid).map(|seat| seat.id.clone()).collect()
    }

    /// Sum of the selected seats' prices
    #[must_use]
    pub fn total(&self, grid: &Grid) -> Price {
        self.seats(grid).map(|seat| seat.price).sum()
    }

    fn seats<'g>(&'g self, grid: &'g Grid) -> impl Iterator<Item = &'g Seat> + 'g {
        self.seats
            .iter()
            .filter_map(move |position| grid.seat(*position).ok())
    }

    /// Deselect every seat
    pub fn clear(&mut self, grid: &mut Grid) {
        grid.clear_selected();
        self.seats.clear();
    }

    /// Select one seat
    ///
    /// Returns `false` without changes if the seat is booked or already
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if `position` is outside the grid.
    pub fn select(&mut self, grid: &mut Grid, position: SeatPosition) -> Result<bool, SeatMapError> {
        let seat = grid.seat_mut(position)?;
        if !seat.is_available() || seat.selected {
            return Ok(false);
        }
        seat.selected = true;
        self.seats.push(position);
        Ok(true)
    }

    /// Deselect one seat, returning whether it was selected
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if `position` is outside the grid.
    pub fn release(
        &mut self,
        grid: &mut Grid,
        position: SeatPosition,
    ) -> Result<bool, SeatMapError> {
        grid.seat_mut(position)?.selected = false;
        let before = self.seats.len();
        self.seats.retain(|selected| *selected != position);
        Ok(self.seats.len() != before)
    }

    /// Remove all positions and hand them back, leaving grid flags untouched
    pub(crate) fn take(&mut self) -> Vec<SeatPosition> {
        std::mem::take(&mut self.seats)
    }
}

/// Why an activation left the selection unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    /// The clicked seat is booked
    SeatBooked,
    /// Toggle mode: the selection already holds the target count
    SelectionFull,
}

/// Changes an activation makes to the selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPlan {
    /// Currently selected seats to deselect
    pub release: Vec<SeatPosition>,
    /// Currently selected seats that stay selected
    pub retain: Vec<SeatPosition>,
    /// Seats to add, in reveal order
    pub reveal: Vec<SeatPosition>,
}

impl SelectionPlan {
    /// Size of the selection once the plan is fully applied
    #[must_use]
    pub fn final_len(&self) -> usize {
        self.retain.len() + self.reveal.len()
    }

    /// Deselect every seat in `release`
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if a released position is outside the grid.
    pub fn apply_release(
        &self,
        grid: &mut Grid,
        selection: &mut Selection,
    ) -> Result<(), SeatMapError> {
        for position in &self.release {
            selection.release(grid, *position)?;
        }
        Ok(())
    }

    /// Apply the whole plan at once
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if a planned position is outside the grid.
    pub fn apply(&self, grid: &mut Grid, selection: &mut Selection) -> Result<(), SeatMapError> {
        self.apply_release(grid, selection)?;
        for position in &self.reveal {
            selection.select(grid, *position)?;
        }
        Ok(())
    }
}

/// Outcome of planning a seat activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Nothing changes
    Ignored(IgnoreReason),
    /// The selection changes as described
    Planned(SelectionPlan),
}

/// Available seats from `column` rightwards, stopping at a booked seat,
/// the row end, or `cap`
#[must_use]
pub fn run_right(row: &[Seat], column: usize, cap: usize) -> usize {
    row.iter()
        .skip(column)
        .take(cap)
        .take_while(|seat| seat.is_available())
        .count()
}

/// Available seats from `column` leftwards (inclusive), stopping at a booked
/// seat, the row start, or `cap`
#[must_use]
pub fn run_left(row: &[Seat], column: usize, cap: usize) -> usize {
    row.iter()
        .take(column + 1)
        .rev()
        .take(cap)
        .take_while(|seat| seat.is_available())
        .count()
}

/// Positions of the contiguous block for a click at `position`
///
/// Empty if the clicked seat is booked.
///
/// # Errors
///
/// Returns [`SeatMapError::InvalidIndex`] if `position` is outside the grid.
pub fn contiguous_block(
    grid: &Grid,
    position: SeatPosition,
    target: usize,
) -> Result<Vec<SeatPosition>, SeatMapError> {
    grid.seat(position)?;
    let row = grid.row(position.row)?;
    let column = position.column;

    let right = run_right(row, column, target);
    let left = run_left(row, column, target);

    let columns = if right >= left {
        column..column + right
    } else {
        column + 1 - left..column + 1
    };

    Ok(columns
        .map(|column| SeatPosition::new(position.row, column))
        .collect())
}

/// Plan the effect of activating the seat at `position`
///
/// # Errors
///
/// - [`SeatMapError::InvalidIndex`]: `position` is outside the grid
/// - [`SeatMapError::InvalidSeatCount`]: `target` is zero
pub fn plan_activation(
    grid: &Grid,
    selection: &Selection,
    position: SeatPosition,
    target: usize,
    mode: SelectionMode,
) -> Result<Activation, SeatMapError> {
    if target == 0 {
        return Err(SeatMapError::InvalidSeatCount {
            count: target,
            max: crate::config::MAX_SEATS_PER_BOOKING,
        });
    }

    let seat = grid.seat(position)?;
    if seat.is_booked() {
        return Ok(Activation::Ignored(IgnoreReason::SeatBooked));
    }

    match mode {
        SelectionMode::ContiguousBlock => {
            let block = contiguous_block(grid, position, target)?;
            let (retain, release): (Vec<SeatPosition>, Vec<SeatPosition>) = selection
                .positions()
                .iter()
                .partition(|selected| block.contains(selected));
            let reveal = block
                .into_iter()
                .filter(|candidate| !selection.contains(*candidate))
                .collect();

            Ok(Activation::Planned(SelectionPlan {
                release,
                retain,
                reveal,
            }))
        },
        SelectionMode::Toggle => {
            if seat.selected {
                let retain = selection
                    .positions()
                    .iter()
                    .copied()
                    .filter(|selected| *selected != position)
                    .collect();
                return Ok(Activation::Planned(SelectionPlan {
                    release: vec![position],
                    retain,
                    reveal: Vec::new(),
                }));
            }

            if selection.len() >= target {
                return Ok(Activation::Ignored(IgnoreReason::SelectionFull));
            }

            Ok(Activation::Planned(SelectionPlan {
                release: Vec::new(),
                retain: selection.positions().to_vec(),
                reveal: vec![position],
            }))
        },
    }
}

/// Plan and apply an activation in one step
///
/// # Errors
///
/// Same as [`plan_activation`].
pub fn activate(
    grid: &mut Grid,
    selection: &mut Selection,
    position: SeatPosition,
    target: usize,
    mode: SelectionMode,
) -> Result<Activation, SeatMapError> {
    let activation = plan_activation(grid, selection, position, target, mode)?;
    if let Activation::Planned(plan) = &activation {
        plan.apply(grid, selection)?;
    }
    Ok(activation)
}
