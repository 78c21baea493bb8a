//! Locations: rooms and the room selectors used by conditions and actions.
//!
//! Room names belong to the backend (`Room1`, `LivingRoom`, …) and are
//! kept verbatim. Two selectors wrap them: [`MotionArea`] for motion
//! conditions and [`LightTarget`] for light actions.

use std::fmt;

use crate::error::ValidationError;
use crate::rule::Field;

/// A room name as known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Room(String);

impl Room {
    /// Parse a room name for the given form field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the name is blank.
    pub fn parse(raw: &str, field: Field) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField { field });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name: `LivingRoom` becomes `Living Room`.
    #[must_use]
    pub fn display_name(&self) -> String {
        split_words(&self.0)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insert a space before every uppercase ASCII letter, then trim.
#[must_use]
pub fn split_words(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out.trim().to_string()
}

/// Where a motion condition looks for movement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MotionArea {
    /// Any room with a motion sensor.
    Any,
    Room(Room),
}

impl MotionArea {
    pub const ANY: &'static str = "any";

    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `raw` is blank.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            Self::ANY => Ok(Self::Any),
            other => Room::parse(other, Field::ConditionLocation).map(Self::Room),
        }
    }

    /// Wire value: `any` or the room name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => Self::ANY,
            Self::Room(room) => room.as_str(),
        }
    }

    /// Phrase used in descriptions.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Any => "any room".to_string(),
            Self::Room(room) => room.display_name(),
        }
    }
}

/// Which lights a light action addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LightTarget {
    /// Every room.
    All,
    /// The room in which the rule's motion condition fired.
    Same,
    Room(Room),
}

impl LightTarget {
    pub const ALL: &'static str = "all";
    pub const SAME: &'static str = "same";

    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when `raw` is blank.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            Self::ALL => Ok(Self::All),
            Self::SAME => Ok(Self::Same),
            other => Room::parse(other, Field::ActionLocation).map(Self::Room),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Same => Self::SAME,
            Self::Room(room) => room.as_str(),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::All => "all rooms".to_string(),
            Self::Same => "the same room".to_string(),
            Self::Room(room) => room.display_name(),
        }
    }
}
