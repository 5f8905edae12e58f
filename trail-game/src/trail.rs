//! The ordered list of locations the party travels between.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mode::ModeKind;

const DEFAULT_TRAIL_DATA: &str = include_str!("../data/trail.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    /// Added to every later mile marker when this branch is taken.
    #[serde(default)]
    pub mile_delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationKind {
    Landmark,
    Settlement,
    RiverCrossing { depth_ft: u32 },
    ForkInRoad { branches: Vec<Branch> },
}

impl LocationKind {
    /// Mode pushed when the party arrives here.
    #[must_use]
    pub const fn mode(&self) -> ModeKind {
        match self {
            Self::Landmark => ModeKind::Landmark,
            Self::Settlement => ModeKind::Settlement,
            Self::RiverCrossing { .. } => ModeKind::RiverCrossing,
            Self::ForkInRoad { .. } => ModeKind::ForkInRoad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub mile_marker: u32,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: LocationKind,
}

#[derive(Debug, Deserialize)]
struct TrailData {
    locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    locations: Vec<Location>,
    index: usize,
    reached_next_point: bool,
}

impl Trail {
    /// Build a trail, starting at its first location.
    ///
    /// # Errors
    ///
    /// Returns an error when there are fewer than two locations, mile markers
    /// do not increase, or a fork offers no branches.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self, ConfigError> {
        if locations.len() < 2 {
            return Err(ConfigError::TrailTooShort(locations.len()));
        }
        for pair in locations.windows(2) {
            if pair[1].mile_marker <= pair[0].mile_marker {
                return Err(ConfigError::TrailOutOfOrder(pair[1].name.clone()));
            }
        }
        if let Some(fork) = locations.iter().find(
            |location| matches!(&location.kind, LocationKind::ForkInRoad { branches } if branches.is_empty()),
        ) {
            return Err(ConfigError::EmptyFork(fork.name.clone()));
        }
        Ok(Self {
            locations,
            index: 0,
            reached_next_point: true,
        })
    }

    /// Load a trail description from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the trail is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let data: TrailData = serde_json::from_str(json)?;
        Self::from_locations(data.locations)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_TRAIL_DATA).unwrap_or_else(|_| Self::fallback())
    }

    fn fallback() -> Self {
        let location = |name: &str, mile_marker, kind| Location {
            name: name.to_string(),
            mile_marker,
            description: String::new(),
            kind,
        };
        Self {
            locations: vec![
                location("Independence", 0, LocationKind::Settlement),
                location("Willamette Valley", 2000, LocationKind::Landmark),
            ],
            index: 0,
            reached_next_point: true,
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The location the party is at, or last left.
    #[must_use]
    pub fn current_location(&self) -> Option<&Location> {
        self.locations.get(self.index)
    }

    #[must_use]
    pub fn next_location(&self) -> Option<&Location> {
        self.locations.get(self.index + 1)
    }

    #[must_use]
    pub const fn is_first_location(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last_location(&self) -> bool {
        self.index + 1 >= self.locations.len()
    }

    /// True while the party is standing at the current location.
    #[must_use]
    pub const fn reached_next_point(&self) -> bool {
        self.reached_next_point
    }

    #[must_use]
    pub fn distance_to_next(&self, odometer: u32) -> u32 {
        self.next_location()
            .map_or(0, |next| next.mile_marker.saturating_sub(odometer))
    }

    pub const fn depart(&mut self) {
        self.reached_next_point = false;
    }

    /// Advance to the next location regardless of distance.
    pub fn arrive_at_next_location(&mut self) -> Option<&Location> {
        if self.is_last_location() {
            return None;
        }
        self.index += 1;
        self.reached_next_point = true;
        self.locations.get(self.index)
    }

    /// Arrive at the next location if the odometer has reached it.
    pub fn check_arrival(&mut self, odometer: u32) -> Option<&Location> {
        let due = !self.reached_next_point
            && self
                .next_location()
                .is_some_and(|next| odometer >= next.mile_marker);
        if due { self.arrive_at_next_location() } else { None }
    }

    /// Take a branch at the current fork, shifting every later mile marker.
    pub fn take_branch(&mut self, choice: usize) -> Option<Branch> {
        let LocationKind::ForkInRoad { branches } = &self.current_location()?.kind else {
            return None;
        };
        let branch = branches.get(choice)?.clone();
        for location in self.locations.iter_mut().skip(self.index + 1) {
            location.mile_marker = location.mile_marker.saturating_add_signed(branch.mile_delta);
        }
        Some(branch)
    }
}
