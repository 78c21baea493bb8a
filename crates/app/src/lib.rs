//! # homedash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleApi`: CRUD, toggle and reset for the backend's rules
//!   - `StateSource`: fetch the backend's current state snapshot
//!   - `DeviceControl`: manual overrides on fans, lights, door and garage
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RuleService`: list, show, save a form, toggle, delete, reset
//!   - `ControlService`: the control panel's device buttons
//!   - `StatePoller`: keep the dashboard fed from a `StateSource`
//! - Own the dashboard's shared state (`DashboardStore`)
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dashboard;
pub mod poller;
pub mod ports;
pub mod services;
