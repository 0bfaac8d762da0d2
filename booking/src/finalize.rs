//! Booking finalizer: converts the selection into booked seats.

use crate::error::SeatMapError;
use crate::grid::Grid;
use crate::selection::Selection;
use crate::types::{BookingRecord, Price, SeatStatus};

/// Book every selected seat and clear the selection
///
/// Ids in the record follow selection order; the total is the sum of the
/// prices captured at grid build time. Nothing is mutated on error.
///
/// # Errors
///
/// - [`SeatMapError::EmptySelection`]: nothing is selected
/// - [`SeatMapError::InvalidIndex`]: a selected position is outside the grid
pub fn finalize(grid: &mut Grid, selection: &mut Selection) -> Result<BookingRecord, SeatMapError> {
    if selection.is_empty() {
        return Err(SeatMapError::EmptySelection);
    }

    let mut booked_seat_ids = Vec::with_capacity(selection.len());
    let mut total_price = Price::default();
    for position in selection.positions() {
        let seat = grid.seat(*position)?;
        booked_seat_ids.push(seat.id.clone());
        total_price += seat.price;
    }

    for position in selection.take() {
        let seat = grid.seat_mut(position)?;
        seat.status = SeatStatus::Booked;
        seat.selected = false;
    }

    tracing::info!(
        seats = booked_seat_ids.len(),
        total = total_price.amount(),
        "Booking finalized"
    );

    Ok(BookingRecord {
        booked_seat_ids,
        total_price,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::config::{Layout, SeatTypeConfig, SelectionMode};
    use crate::selection::activate;
    use crate::types::SeatPosition;

    fn grid() -> Grid {
        Grid::build(Layout::default(), &SeatTypeConfig::default(), &[]).unwrap()
    }

    #[test]
    fn finalize_books_selection_in_order() {
        let mut grid = grid();
        let mut selection = Selection::new();
        for (row, column) in [(5, 2), (0, 7)] {
            activate(
                &mut grid,
                &mut selection,
                SeatPosition::new(row, column),
                2,
                SelectionMode::Toggle,
            )
            .unwrap();
        }

        let record = finalize(&mut grid, &mut selection).unwrap();

        assert_eq!(record.booked_seat_ids, vec!["F3", "A8"]);
        assert_eq!(record.total_price, Price::new(500));
        assert!(selection.is_empty());
        assert!(grid.seat(SeatPosition::new(5, 2)).unwrap().is_booked());
        assert!(grid.seats().all(|seat| !seat.selected));
        assert_eq!(grid.booked_count(), 2);
    }

    #[test]
    fn empty_selection_is_rejected_without_changes() {
        let mut grid = grid();
        let before = grid.clone();
        let mut selection = Selection::new();

        assert_eq!(
            finalize(&mut grid, &mut selection),
            Err(SeatMapError::EmptySelection)
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn booked_seats_cannot_be_selected_again() {
        let mut grid = grid();
        let mut selection = Selection::new();
        activate(
            &mut grid,
            &mut selection,
            SeatPosition::new(7, 0),
            3,
            SelectionMode::ContiguousBlock,
        )
        .unwrap();
        let record = finalize(&mut grid, &mut selection).unwrap();
        assert_eq!(record.total_price, Price::new(1950));

        activate(
            &mut grid,
            &mut selection,
            SeatPosition::new(7, 1),
            3,
            SelectionMode::ContiguousBlock,
        )
        .unwrap();
        assert!(selection.is_empty());
    }
}
