//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod device_control;
pub mod rule_api;
pub mod state_source;

pub use device_control::DeviceControl;
pub use rule_api::RuleApi;
pub use state_source::StateSource;
