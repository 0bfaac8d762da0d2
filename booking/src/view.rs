//! Presentation model.
//!
//! Pure functions from state to what a host renders: seat visuals, row
//! labels, aisle sections, the legend, the booking summary and button
//! labels. [`render_text`] draws the whole widget as plain text for
//! terminals and logs.

use crate::config::SeatMapConfig;
use crate::grid::Grid;
use crate::reducer::SeatMapState;
use crate::types::{row_letter, ColorTag, Price, Seat, SeatId};
use serde::Serialize;
use std::fmt::Write as _;

/// How one seat is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatVisual {
    /// Seat id
    pub id: SeatId,
    /// Column number shown on the seat (1-based)
    pub label: usize,
    /// Swatch color
    pub color: ColorTag,
    /// Whether the seat reacts to clicks
    pub clickable: bool,
}

impl SeatVisual {
    /// Visual for `seat`: booked is gray and inert, selected is green,
    /// otherwise the category color
    #[must_use]
    pub fn of(seat: &Seat) -> Self {
        let color = if seat.is_booked() {
            ColorTag::BOOKED
        } else if seat.selected {
            ColorTag::SELECTED
        } else {
            seat.color
        };

        Self {
            id: seat.id.clone(),
            label: seat.column + 1,
            color,
            clickable: seat.is_available(),
        }
    }
}

/// Row letter for display (`0 → "A"`)
#[must_use]
pub fn row_label(row: usize) -> String {
    row_letter(row).map_or_else(|| format!("#{}", row + 1), String::from)
}

/// Split a row at the aisle into left and right sections
#[must_use]
pub fn row_sections(row: &[Seat], aisle_position: usize) -> (&[Seat], &[Seat]) {
    row.split_at(aisle_position.min(row.len()))
}

/// One legend swatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Swatch color
    pub color: ColorTag,
    /// Caption
    pub label: String,
}

/// Legend: one entry per category in configured order, then Selected and Booked
#[must_use]
pub fn legend(config: &SeatMapConfig) -> Vec<LegendEntry> {
    config
        .seat_types
        .iter()
        .map(|rule| LegendEntry {
            color: ColorTag::for_category(&rule.key),
            label: format!("{} ({}{})", rule.name, config.currency, rule.price),
        })
        .chain([
            LegendEntry {
                color: ColorTag::SELECTED,
                label: "Selected".to_string(),
            },
            LegendEntry {
                color: ColorTag::BOOKED,
                label: "Booked".to_string(),
            },
        ])
        .collect()
}

/// Booking summary panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    /// Selected ids in selection order
    pub seat_ids: Vec<SeatId>,
    /// Number of selected seats
    pub seat_count: usize,
    /// Sum of selected prices
    pub total: Price,
    /// Currency symbol
    pub currency: String,
}

impl BookingSummary {
    /// Summary of the current selection
    #[must_use]
    pub fn of(state: &SeatMapState) -> Self {
        let seat_ids = state.selected_ids();
        Self {
            seat_count: seat_ids.len(),
            seat_ids,
            total: state.total_price(),
            currency: state.config.currency.clone(),
        }
    }

    /// Whether anything is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seat_ids.is_empty()
    }

    /// Summary lines as displayed
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["No Seats Selected".to_string()];
        }
        let ids: Vec<&str> = self.seat_ids.iter().map(SeatId::as_str).collect();
        vec![
            format!("Selected Seats: {}", ids.join(", ")),
            format!("Number of Seats: {}", self.seat_count),
            format!("Total: {}{}", self.currency, self.total),
        ]
    }
}

/// Caption of the book button
#[must_use]
pub fn book_button_label(summary: &BookingSummary) -> String {
    if summary.is_empty() {
        "Select Seats to Book".to_string()
    } else {
        format!(
            "Book {} Seats for {}{}",
            summary.seat_count, summary.currency, summary.total
        )
    }
}

/// Caption of the prompt's confirm button
#[must_use]
pub fn seat_count_prompt_label(count: usize) -> String {
    if count == 1 {
        "Select 1 seat".to_string()
    } else {
        format!("Select {count} seats")
    }
}

/// Visuals for every seat, row by row
#[must_use]
pub fn seat_visuals(grid: &Grid) -> Vec<Vec<SeatVisual>> {
    grid.rows()
        .map(|row| row.iter().map(SeatVisual::of).collect())
        .collect()
}

/// Draw the widget as text
///
/// Seats render as `[..]` (available), `[##]` (selected) or ` xx ` (booked).
#[must_use]
pub fn render_text(state: &SeatMapState) -> String {
    let mut out = String::new();
    let config = &state.config;

    let _ = writeln!(out, "{}", config.title);
    let _ = writeln!(out, "{}", config.subtitle);
    let _ = writeln!(out);

    if state.prompt_open {
        let _ = writeln!(out, "How many seats? [{}]", state.seat_count);
        let _ = writeln!(out, "> {}", seat_count_prompt_label(state.seat_count));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "SCREEN");
    for (index, row) in state.grid.rows().enumerate() {
        let (left, right) = row_sections(row, state.grid.layout().aisle_position);
        let _ = write!(out, "{:>3}  ", row_label(index));
        render_section(&mut out, left);
        out.push_str("   ");
        render_section(&mut out, right);
        out.push('\n');
    }
    let _ = writeln!(out);

    for entry in legend(config) {
        let _ = writeln!(out, "{:?}: {}", entry.color, entry.label);
    }
    let _ = writeln!(out);

    let summary = BookingSummary::of(state);
    let _ = writeln!(out, "Booking Summary");
    for line in summary.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out, "[ {} ]", book_button_label(&summary));

    out
}

fn render_section(out: &mut String, seats: &[Seat]) {
    for seat in seats {
        let visual = SeatVisual::of(seat);
        let cell = match visual.color {
            ColorTag::BOOKED => " xx ".to_string(),
            ColorTag::SELECTED => "[##]".to_string(),
            _ => format!("[{:>2}]", visual.label),
        };
        out.push_str(&cell);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::config::SelectionMode;
    use crate::selection::activate;
    use crate::types::SeatPosition;

    /// Stock hall with C1 and C2 sold
    fn state() -> SeatMapState {
        SeatMapState::new(SeatMapConfig {
            booked_seat_ids: vec!["C1".parse().unwrap(), "C2".parse().unwrap()],
            ..SeatMapConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn legend_lists_categories_then_states() {
        let labels: Vec<String> = legend(&SeatMapConfig::default())
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Regular (₹150)",
                "Gold (₹350)",
                "Platinum (₹650)",
                "Selected",
                "Booked"
            ]
        );
    }

    #[test]
    fn seat_visual_reflects_status() {
        let mut state = state();
        activate(
            &mut state.grid,
            &mut state.selection,
            SeatPosition::new(3, 0),
            1,
            SelectionMode::ContiguousBlock,
        )
        .unwrap();

        let visuals = seat_visuals(&state.grid);
        assert_eq!(visuals[2][0].color, ColorTag::Gray);
        assert!(!visuals[2][0].clickable);
        assert_eq!(visuals[3][0].color, ColorTag::Green);
        assert_eq!(visuals[3][1].color, ColorTag::Yellow);
        assert_eq!(visuals[3][1].label, 2);
    }

    #[test]
    fn rows_split_at_aisle() {
        let state = state();
        let row = state.grid.row(0).unwrap();
        let (left, right) = row_sections(row, 5);
        assert_eq!(left.len(), 5);
        assert_eq!(right.len(), 7);
        assert_eq!(right[0].id, "A6");

        let (left, right) = row_sections(row, 0);
        assert!(left.is_empty());
        assert_eq!(right.len(), 12);
    }

    #[test]
    fn summary_and_button_labels() {
        let mut state = state();
        let empty = BookingSummary::of(&state);
        assert_eq!(empty.lines(), vec!["No Seats Selected"]);
        assert_eq!(book_button_label(&empty), "Select Seats to Book");

        activate(
            &mut state.grid,
            &mut state.selection,
            SeatPosition::new(0, 0),
            2,
            SelectionMode::ContiguousBlock,
        )
        .unwrap();
        let summary = BookingSummary::of(&state);
        assert_eq!(
            summary.lines(),
            vec![
                "Selected Seats: A1, A2",
                "Number of Seats: 2",
                "Total: ₹300"
            ]
        );
        assert_eq!(book_button_label(&summary), "Book 2 Seats for ₹300");
    }

    #[test]
    fn prompt_label_pluralizes() {
        assert_eq!(seat_count_prompt_label(1), "Select 1 seat");
        assert_eq!(seat_count_prompt_label(10), "Select 10 seats");
    }

    #[test]
    fn row_labels_are_letters() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(7), "H");
    }

    #[test]
    fn text_rendering_shows_grid_and_summary() {
        let text = render_text(&state());
        assert!(text.starts_with("Cinema Hall Booking\n"));
        assert!(text.contains("How many seats? [2]"));
        assert!(text.contains("  C   xx  xx [ 3]"));
        assert!(text.contains("No Seats Selected"));
        assert!(text.ends_with("[ Select Seats to Book ]\n"));
    }
}
