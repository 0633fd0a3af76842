//! Policy infrastructure - default policy provisioning

mod defaults;

pub use defaults::{PolicyDefaultsProvider, PostgresPolicyDefaults};
