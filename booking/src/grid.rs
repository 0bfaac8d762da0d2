//! The seat grid.
//!
//! A rectangular table of seats built once from configuration. Category and
//! price are captured per seat at build time; afterwards only the `selected`
//! flag and the booking status change.

use crate::config::{Layout, SeatTypeConfig, FALLBACK_CATEGORY, FALLBACK_PRICE};
use crate::error::{ConfigError, SeatMapError};
use crate::types::{ColorTag, Price, Seat, SeatId, SeatPosition, SeatStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Seats indexed by `[row][column]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    layout: Layout,
    rows: Vec<Vec<Seat>>,
}

impl Grid {
    /// Build the grid from layout, seat types and pre-booked ids
    ///
    /// Each row takes the first category whose row set contains it; rows no
    /// category claims fall back to `regular` at 150. Booked ids that do not
    /// name a seat in this layout are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the layout or seat types are invalid.
    pub fn build(
        layout: Layout,
        seat_types: &SeatTypeConfig,
        booked: &[SeatId],
    ) -> Result<Self, ConfigError> {
        layout.validate()?;
        seat_types.validate()?;

        let booked: HashSet<&SeatId> = booked.iter().collect();

        let rows = (0..layout.rows)
            .map(|row| {
                let (category, price) = category_for_row(seat_types, row);
                let color = ColorTag::for_category(&category);

                (0..layout.seats_per_row)
                    .map(|column| {
                        let id = SeatId::from_position(SeatPosition::new(row, column))
                            .ok_or(ConfigError::TooManyRows(layout.rows))?;
                        let status = if booked.contains(&id) {
                            SeatStatus::Booked
                        } else {
                            SeatStatus::Available
                        };

                        Ok(Seat {
                            id,
                            row,
                            column,
                            category: category.clone(),
                            price,
                            color,
                            status,
                            selected: false,
                        })
                    })
                    .collect::<Result<Vec<_>, ConfigError>>()
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let grid = Self { layout, rows };
        let matched = grid.booked_count();
        if matched < booked.len() {
            tracing::warn!(
                configured = booked.len(),
                matched,
                "Some booked seat ids are outside the layout and were ignored"
            );
        }
        tracing::debug!(
            rows = layout.rows,
            seats_per_row = layout.seats_per_row,
            booked = matched,
            "Seat grid built"
        );

        Ok(grid)
    }

    /// Grid dimensions
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of rows
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.layout.rows
    }

    /// Seats in each row
    #[must_use]
    pub const fn seats_per_row(&self) -> usize {
        self.layout.seats_per_row
    }

    /// Rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[Seat]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Every seat, row by row
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.rows.iter().flatten()
    }

    /// One row of seats
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if `row` is out of range.
    pub fn row(&self, row: usize) -> Result<&[Seat], SeatMapError> {
        self.rows
            .get(row)
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid(SeatPosition::new(row, 0)))
    }

    /// The seat at `position`
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if `position` is outside the grid.
    pub fn seat(&self, position: SeatPosition) -> Result<&Seat, SeatMapError> {
        self.rows
            .get(position.row)
            .and_then(|row| row.get(position.column))
            .ok_or_else(|| self.invalid(position))
    }

    /// Mutable access to the seat at `position`
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidIndex`] if `position` is outside the grid.
    pub(crate) fn seat_mut(&mut self, position: SeatPosition) -> Result<&mut Seat, SeatMapError> {
        let error = self.invalid(position);
        self.rows
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.column))
            .ok_or(error)
    }

    /// Seat with the given id, if it is part of this grid
    #[must_use]
    pub fn find(&self, id: &SeatId) -> Option<&Seat> {
        self.seat(id.position()).ok().filter(|seat| &seat.id == id)
    }

    /// Number of booked seats
    #[must_use]
    pub fn booked_count(&self) -> usize {
        self.seats().filter(|seat| seat.is_booked()).count()
    }

    /// Number of seats still available
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.seats().filter(|seat| seat.is_available()).count()
    }

    /// Clear every `selected` flag
    pub(crate) fn clear_selected(&mut self) {
        for seat in self.rows.iter_mut().flatten() {
            seat.selected = false;
        }
    }

    const fn invalid(&self, position: SeatPosition) -> SeatMapError {
        SeatMapError::InvalidIndex {
            row: position.row,
            column: position.column,
            rows: self.layout.rows,
            columns: self.layout.seats_per_row,
        }
    }
}

/// Category key and price for a row
///
/// First matching rule wins; unclaimed rows get the `regular` fallback.
#[must_use]
pub fn category_for_row(seat_types: &SeatTypeConfig, row: usize) -> (String, Price) {
    seat_types.rule_for_row(row).map_or_else(
        || (FALLBACK_CATEGORY.to_string(), FALLBACK_PRICE),
        |rule| (rule.key.clone(), rule.price),
    )
}
