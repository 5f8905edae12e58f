//! Fixed game constants that are not part of the tuning tables.

/// Upper bound of a person's health.
pub const HEALTH_MAX: i32 = 500;
/// Lower bound of the "good" band.
pub const HEALTH_GOOD_FLOOR: i32 = 401;
/// Lower bound of the "fair" band.
pub const HEALTH_FAIR_FLOOR: i32 = 301;
/// Lower bound of the "poor" band.
pub const HEALTH_POOR_FLOOR: i32 = 201;
/// Lower bound of the "very poor" band; anything below is dead.
pub const HEALTH_VERY_POOR_FLOOR: i32 = 1;
pub const HEALTH_DEAD: i32 = 0;

/// Leader plus companions.
pub const PARTY_SIZE: usize = 4;

pub const DEFAULT_LEADER_NAME: &str = "Ezra";
pub const DEFAULT_COMPANION_NAMES: [&str; 3] = ["Mary", "Jed", "Sarah"];

/// Percentage rolls are drawn from `0..PERCENT_SCALE`.
pub const PERCENT_SCALE: i32 = 100;

pub const PRESS_ENTER: &str = "Press ENTER KEY to continue.";
pub const MENU_PROMPT: &str = "What is your choice?";

/// Longest rest the party can request at once.
pub const MAX_REST_DAYS: u32 = 9;

// RNG stream tags
pub(crate) const STREAM_EVENTS: &[u8] = b"events";
pub(crate) const STREAM_HEALTH: &[u8] = b"health";
pub(crate) const STREAM_CLIMATE: &[u8] = b"climate";
pub(crate) const STREAM_TRADE: &[u8] = b"trade";
