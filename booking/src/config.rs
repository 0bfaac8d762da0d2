//! Configuration management for the seat map.
//!
//! Defaults reproduce the stock cinema hall (8 rows of 12 seats, aisle after
//! the 5th seat, regular/gold/platinum pricing). Hosts override them from
//! environment variables, a JSON document, or by building the struct directly.

use crate::error::ConfigError;
use crate::types::{Price, SeatId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Row letters run A-Z
pub const MAX_ROWS: usize = 26;

/// Widest row a layout may declare
pub const MAX_SEATS_PER_ROW: usize = 100;

/// Largest seat count offered by the seat-count prompt
pub const MAX_SEATS_PER_BOOKING: usize = 10;

/// Category assigned to rows no seat type claims
pub const FALLBACK_CATEGORY: &str = "regular";

/// Price of the fallback category
pub const FALLBACK_PRICE: Price = Price::new(150);

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Number of rows
    pub rows: usize,
    /// Seats in each row
    pub seats_per_row: usize,
    /// Visual split point: columns `< aisle_position` form the left section
    pub aisle_position: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rows: 8,
            seats_per_row: 12,
            aisle_position: 5,
        }
    }
}

impl Layout {
    /// Check the dimensions
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty grid, more than 26 rows, more
    /// than [`MAX_SEATS_PER_ROW`] seats per row, or an aisle outside
    /// `0..=seats_per_row`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.rows > MAX_ROWS {
            return Err(ConfigError::TooManyRows(self.rows));
        }
        if self.seats_per_row == 0 {
            return Err(ConfigError::NoSeats);
        }
        if self.seats_per_row > MAX_SEATS_PER_ROW {
            return Err(ConfigError::TooManySeats(self.seats_per_row));
        }
        if self.aisle_position > self.seats_per_row {
            return Err(ConfigError::AisleOutOfRange {
                aisle: self.aisle_position,
                seats_per_row: self.seats_per_row,
            });
        }
        Ok(())
    }

    /// Total number of seats
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.seats_per_row)
    }
}

/// One seat category: which rows it covers and what a seat costs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    /// Category key (`"gold"`), also drives the display color
    pub key: String,
    /// Human-readable name (`"Gold"`)
    pub name: String,
    /// Price per seat
    pub price: Price,
    /// Row indices covered by this category
    pub rows: BTreeSet<usize>,
}

impl CategoryRule {
    /// Creates a category rule
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        price: Price,
        rows: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            price,
            rows: rows.into_iter().collect(),
        }
    }

    /// Whether this category covers `row`
    #[must_use]
    pub fn covers(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }
}

/// Ordered seat-type table
///
/// Order matters twice: the first rule covering a row wins, and the legend
/// lists categories in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatTypeConfig {
    rules: Vec<CategoryRule>,
}

impl Default for SeatTypeConfig {
    fn default() -> Self {
        Self::new(vec![
            CategoryRule::new("regular", "Regular", Price::new(150), 0..=2),
            CategoryRule::new("gold", "Gold", Price::new(350), 3..=5),
            CategoryRule::new("platinum", "Platinum", Price::new(650), 6..=7),
        ])
    }
}

impl SeatTypeConfig {
    /// Creates a table from ordered rules
    #[must_use]
    pub const fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// First rule covering `row`
    #[must_use]
    pub fn rule_for_row(&self, row: usize) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.covers(row))
    }

    /// Rule with the given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    /// Rules in configured order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no categories are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check keys are non-empty and unique
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCategoryKey`] or [`ConfigError::DuplicateCategory`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.key.trim().is_empty() {
                return Err(ConfigError::EmptyCategoryKey(index));
            }
            if !seen.insert(rule.key.as_str()) {
                return Err(ConfigError::DuplicateCategory(rule.key.clone()));
            }
        }
        Ok(())
    }
}

/// How a seat activation changes the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Select a contiguous run of the chosen size around the clicked seat
    #[default]
    ContiguousBlock,
    /// Toggle single seats up to the chosen size
    Toggle,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contiguous-block" | "contiguous" | "block" => Ok(Self::ContiguousBlock),
            "toggle" => Ok(Self::Toggle),
            other => Err(format!("unknown selection mode '{other}'")),
        }
    }
}

/// Complete seat map configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeatMapConfig {
    /// Grid dimensions
    pub layout: Layout,
    /// Ordered seat-type table
    pub seat_types: SeatTypeConfig,
    /// Seats that are already booked when the grid is built
    pub booked_seat_ids: Vec<SeatId>,
    /// Currency symbol used in labels
    pub currency: String,
    /// Heading shown above the grid
    pub title: String,
    /// Sub-heading shown above the grid
    pub subtitle: String,
    /// Click behavior
    pub selection_mode: SelectionMode,
    /// Delay between revealed seats in milliseconds (0 = select at once)
    pub reveal_delay_ms: u64,
    /// Seat count preselected in the prompt
    pub initial_seat_count: usize,
}

impl Default for SeatMapConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            seat_types: SeatTypeConfig::default(),
            booked_seat_ids: Vec::new(),
            currency: "₹".to_string(),
            title: "Cinema Hall Booking".to_string(),
            subtitle: "Select your preferred seats".to_string(),
            selection_mode: SelectionMode::default(),
            reveal_delay_ms: 100,
            initial_seat_count: 2,
        }
    }
}

impl SeatMapConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults; set variables must parse.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `SEATMAP_ROWS` | number of rows |
    /// | `SEATMAP_SEATS_PER_ROW` | seats in each row |
    /// | `SEATMAP_AISLE_POSITION` | aisle split column |
    /// | `SEATMAP_SEAT_TYPES` | JSON array of category rules |
    /// | `SEATMAP_BOOKED_SEATS` | comma-separated seat ids |
    /// | `SEATMAP_CURRENCY` | currency symbol |
    /// | `SEATMAP_TITLE`, `SEATMAP_SUBTITLE` | headings |
    /// | `SEATMAP_SELECTION_MODE` | `contiguous-block` or `toggle` |
    /// | `SEATMAP_REVEAL_DELAY_MS` | reveal step delay |
    /// | `SEATMAP_INITIAL_SEAT_COUNT` | prompt preselection |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for an unparseable variable, or
    /// any error from [`SeatMapConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seat_types = match env::var("SEATMAP_SEAT_TYPES") {
            Ok(raw) => serde_json::from_str(&raw).map_err(|_| ConfigError::InvalidEnv {
                name: "SEATMAP_SEAT_TYPES",
                value: raw,
            })?,
            Err(_) => defaults.seat_types,
        };

        let booked_seat_ids = match env::var("SEATMAP_BOOKED_SEATS") {
            Ok(raw) => parse_seat_list(&raw)?,
            Err(_) => defaults.booked_seat_ids,
        };

        let config = Self {
            layout: Layout {
                rows: env_parse("SEATMAP_ROWS", defaults.layout.rows)?,
                seats_per_row: env_parse("SEATMAP_SEATS_PER_ROW", defaults.layout.seats_per_row)?,
                aisle_position: env_parse(
                    "SEATMAP_AISLE_POSITION",
                    defaults.layout.aisle_position,
                )?,
            },
            seat_types,
            booked_seat_ids,
            currency: env::var("SEATMAP_CURRENCY").unwrap_or(defaults.currency),
            title: env::var("SEATMAP_TITLE").unwrap_or(defaults.title),
            subtitle: env::var("SEATMAP_SUBTITLE").unwrap_or(defaults.subtitle),
            selection_mode: env_parse("SEATMAP_SELECTION_MODE", defaults.selection_mode)?,
            reveal_delay_ms: env_parse("SEATMAP_REVEAL_DELAY_MS", defaults.reveal_delay_ms)?,
            initial_seat_count: env_parse(
                "SEATMAP_INITIAL_SEAT_COUNT",
                defaults.initial_seat_count,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON document
    ///
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON (including malformed
    /// booked seat ids), or any error from [`SeatMapConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the whole configuration
    ///
    /// Booked ids that fall outside the grid are allowed; they never match a seat.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.seat_types.validate()?;
        if !(1..=MAX_SEATS_PER_BOOKING).contains(&self.initial_seat_count) {
            return Err(ConfigError::InvalidSeatCount {
                count: self.initial_seat_count,
                max: MAX_SEATS_PER_BOOKING,
            });
        }
        Ok(())
    }

    /// Delay between revealed seats
    #[must_use]
    pub const fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

fn env_parse<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { name, value: raw }),
        Err(_) => Ok(default),
    }
}

fn parse_seat_list(raw: &str) -> Result<Vec<SeatId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse()
                .map_err(|_| ConfigError::InvalidBookedSeat(id.to_string()))
        })
        .collect()
}
