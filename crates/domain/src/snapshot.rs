//! State snapshot: one reading of the backend's sensors and devices.
//!
//! The backend pushes (or serves on request) its whole system state; the
//! dashboard only reads it. Every field defaults so that partial payloads
//! still parse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::time::{self, Timestamp};

/// The backend's live system state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    /// Motion detected, per room.
    pub motion: BTreeMap<String, bool>,
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    pub gas_detected: bool,
    pub fans_on: bool,
    pub emergency_mode: bool,
    pub door_locked: bool,
    pub garage_door_open: bool,
    /// Epoch seconds at which an open garage door closes itself.
    pub garage_auto_close_time: Option<f64>,
    pub manual_override: ManualOverride,
}

/// Devices currently under manual (rather than rule) control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualOverride {
    pub fans: bool,
    pub lights: BTreeMap<String, bool>,
    pub door: bool,
    pub garage: bool,
}

impl StateSnapshot {
    /// Rooms in which motion is currently detected.
    #[must_use]
    pub fn rooms_with_motion(&self) -> impl Iterator<Item = &str> {
        self.motion
            .iter()
            .filter(|(_, detected)| **detected)
            .map(|(room, _)| room.as_str())
    }

    /// Every room the backend reports, from motion sensors and lights.
    #[must_use]
    pub fn rooms(&self) -> Vec<&str> {
        let mut rooms: Vec<&str> = self
            .motion
            .keys()
            .chain(self.manual_override.lights.keys())
            .map(String::as_str)
            .collect();
        rooms.sort_unstable();
        rooms.dedup();
        rooms
    }
}

/// A snapshot as delivered on the push channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub data: StateSnapshot,
    #[serde(deserialize_with = "time::deserialize_lenient")]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub connection_status: bool,
}

impl StateUpdate {
    /// Wrap a freshly fetched snapshot, stamped now.
    #[must_use]
    pub fn fetched(data: StateSnapshot) -> Self {
        Self {
            data,
            timestamp: time::now(),
            connection_status: true,
        }
    }
}
