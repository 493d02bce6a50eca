//! # API Shared
//!
//! Shared definitions for VIRA APIs.
//!
//! Contains:
//! - Wire types (`wire` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the workspace binaries.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
