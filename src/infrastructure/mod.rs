//! Infrastructure layer - External service implementations

pub mod logging;
pub mod organization;
pub mod policy;
pub mod storage;
