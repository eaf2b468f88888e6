//! Core library for podium
//!
//! This crate implements the **Functional Core** of the podium application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`podium_core`** (this crate): Pure transformation functions with zero I/O
//! - **`podium`**: Remote calls, retries, pacing and orchestration (the Imperative Shell)
//!
//! Everything here is deterministic and tested with fixture data: GraphQL
//! documents, response shapes, page-size arithmetic, the backoff schedule,
//! selection derivation and result rendering. The shell decides *when* to
//! call the service; this crate decides *what* the answers mean.
//!
//! # Module Organization
//!
//! - [`backoff`]: Exponential retry delay schedule
//! - [`graphql`]: Request and response envelopes
//! - [`link`]: start.gg link and slug recognition
//! - [`pagination`]: Page sizes and total-count reconciliation
//! - [`queries`]: Operation documents and variable builders
//! - [`results`]: Rank cutoff and text rendering
//! - [`startgg`]: Wire and domain types for events, standings and selections
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use podium_core::pagination::{reconcile, PageSize};
//!
//! let size = PageSize::new(100).unwrap();
//! assert_eq!(size.halve().get(), 50);
//! assert!(reconcile(36, 37).is_err());
//! ```

pub mod backoff;
pub mod graphql;
pub mod link;
pub mod pagination;
pub mod queries;
pub mod results;
pub mod startgg;
