//! # homedash-domain
//!
//! Pure domain model for the homedash smart-home dashboard client.
//!
//! ## Responsibilities
//! - Foundational types: rule identifiers, error conventions, timestamps
//! - Define **Rules** (one condition → one action, plus an active flag)
//! - Define **Conditions** (temperature, humidity, motion, gas, time)
//! - Define **Actions** (fan, light, door, alert, garage)
//! - Bind rules to raw form input and back (`RuleForm`)
//! - Describe rules as human-readable sentences
//! - Expose the field-descriptor table that drives both validation and
//!   rendering
//! - Define the **state snapshot** payload pushed by the backend
//! - Define manual **device control** commands
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod control;
pub mod location;
pub mod rule;
pub mod snapshot;
