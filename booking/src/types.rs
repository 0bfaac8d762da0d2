//! Domain types for the seat map.
//!
//! Seat identifiers, positions, prices, display colors and the booking
//! record handed to the host once a selection is finalized.

use crate::error::SeatMapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Letter for a 0-based row index (`0 → 'A'`), `None` past `'Z'`
#[must_use]
pub fn row_letter(row: usize) -> Option<char> {
    u8::try_from(row)
        .ok()
        .filter(|r| *r < 26)
        .map(|r| char::from(b'A' + r))
}

/// Position of a seat in the grid (0-based)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatPosition {
    /// Row index
    pub row: usize,
    /// Column index
    pub column: usize,
}

impl SeatPosition {
    /// Creates a new position
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Seat identifier: row letter followed by the 1-based column (`"C1"`)
///
/// Hosts match against this format when they pass pre-booked seats, so it
/// must stay stable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId(String);

impl SeatId {
    /// Builds the id for a grid position, `None` if the row has no letter
    #[must_use]
    pub fn from_position(position: SeatPosition) -> Option<Self> {
        row_letter(position.row).map(|letter| Self(format!("{letter}{}", position.column + 1)))
    }

    /// Grid position encoded by this id
    #[must_use]
    pub fn position(&self) -> SeatPosition {
        let mut chars = self.0.chars();
        let row = chars
            .next()
            .map_or(0, |letter| (letter as usize) - ('A' as usize));
        let column = chars.as_str().parse::<usize>().map_or(0, |c| c - 1);
        SeatPosition::new(row, column)
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SeatId {
    type Err = SeatMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SeatMapError::InvalidSeatId(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let digits = chars.as_str();

        if !letter.is_ascii_uppercase()
            || digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        digits.parse::<usize>().map_err(|_| invalid())?;

        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatMapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.0
    }
}

impl PartialEq<&str> for SeatId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Value Objects
// ============================================================================

/// Seat price in whole currency units
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Creates a price
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in currency units
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display color tag for seats and legend swatches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Regular seats and any unknown category
    Blue,
    /// Gold seats
    Yellow,
    /// Platinum seats
    Pink,
    /// Selected seats
    Green,
    /// Booked seats
    Gray,
}

impl ColorTag {
    /// Color shown for selected seats
    pub const SELECTED: Self = Self::Green;
    /// Color shown for booked seats
    pub const BOOKED: Self = Self::Gray;

    /// Fixed category → color lookup shared by the grid and the legend
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        match category {
            "gold" => Self::Yellow,
            "platinum" => Self::Pink,
            _ => Self::Blue,
        }
    }
}

/// Booking status of a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// Can be selected
    Available,
    /// Already booked
    Booked,
}

// ============================================================================
// Entities
// ============================================================================

/// One bookable seat
///
/// `selected` is only meaningful while `status` is `Available`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Seat id (`"A1"`)
    pub id: SeatId,
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub column: usize,
    /// Category key into the seat-type table
    pub category: String,
    /// Price captured when the grid was built
    pub price: Price,
    /// Display color derived from the category
    pub color: ColorTag,
    /// Booking status
    pub status: SeatStatus,
    /// Part of the in-progress selection
    pub selected: bool,
}

impl Seat {
    /// Position of this seat
    #[must_use]
    pub const fn position(&self) -> SeatPosition {
        SeatPosition::new(self.row, self.column)
    }

    /// Whether the seat can still be booked
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    /// Whether the seat is booked
    #[must_use]
    pub fn is_booked(&self) -> bool {
        self.status == SeatStatus::Booked
    }
}

/// Record of a finalized booking, handed to the host's completion callback
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Booked seat ids in selection order
    pub booked_seat_ids: Vec<SeatId>,
    /// Sum of the booked seats' prices
    pub total_price: Price,
}

impl BookingRecord {
    /// Number of seats in the booking
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.booked_seat_ids.len()
    }
}
