//! Domain-based type organization
//!
//! - device: payload of the status endpoint
//! - settings: editable form, cached view state, update payload
//! - polling: poll scheduling state
//! - common: shared helpers and constants

pub mod common;
pub mod device;
pub mod polling;
pub mod settings;

pub use common::*;
pub use device::*;
pub use polling::*;
pub use settings::*;
