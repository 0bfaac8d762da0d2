//! Error types for the seat map.

use thiserror::Error;

/// Configuration errors, reported before any grid is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The layout has no rows
    #[error("layout must have at least one row")]
    NoRows,

    /// Row letters only cover A-Z
    #[error("layout has {0} rows, seat ids support at most 26 (A-Z)")]
    TooManyRows(usize),

    /// The layout has no seats per row
    #[error("layout must have at least one seat per row")]
    NoSeats,

    /// A row is wider than the layout allows
    #[error("layout has {0} seats per row, at most 100 are supported")]
    TooManySeats(usize),

    /// The aisle split point lies outside the row
    #[error("aisle position {aisle} is outside 0..={seats_per_row}")]
    AisleOutOfRange {
        /// Configured aisle position
        aisle: usize,
        /// Seats in each row
        seats_per_row: usize,
    },

    /// A seat category has an empty key
    #[error("seat category #{0} has an empty key")]
    EmptyCategoryKey(usize),

    /// The same category key is configured twice
    #[error("seat category '{0}' is configured more than once")]
    DuplicateCategory(String),

    /// A pre-booked seat id does not match `{letter}{column}`
    #[error("booked seat id '{0}' is malformed")]
    InvalidBookedSeat(String),

    /// The initial seat count is outside the prompt range
    #[error("initial seat count {count} is outside 1..={max}")]
    InvalidSeatCount {
        /// Configured count
        count: usize,
        /// Largest count the prompt offers
        max: usize,
    },

    /// An environment variable could not be parsed
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// A JSON configuration document could not be parsed
    #[error("invalid JSON configuration: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Errors raised by grid, selection and booking operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatMapError {
    /// Coordinates outside the grid
    #[error("seat ({row}, {column}) is outside the {rows}x{columns} grid")]
    InvalidIndex {
        /// Requested row
        row: usize,
        /// Requested column
        column: usize,
        /// Rows in the grid
        rows: usize,
        /// Seats per row in the grid
        columns: usize,
    },

    /// Finalize was requested with nothing selected
    #[error("no seats selected")]
    EmptySelection,

    /// A seat count outside `1..=max`
    #[error("seat count {count} is outside 1..={max}")]
    InvalidSeatCount {
        /// Requested count
        count: usize,
        /// Largest allowed count
        max: usize,
    },

    /// A string that is not a `{letter}{column}` seat id
    #[error("'{0}' is not a valid seat id")]
    InvalidSeatId(String),

    /// Configuration rejected while rebuilding the grid
    #[error(transparent)]
    Config(#[from] ConfigError),
}
