//! Shared test utilities for the signing-order workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`lineup`]: compact signer-list fixtures with locked entries
//! - [`ids`]: deterministic identity generation

pub mod ids;
pub mod lineup;

pub use ids::SequentialIds;
pub use lineup::{Lineup, identities, layout, lineup, names};
