// ABOUTME: Analytics provider contract and the Treasure Data implementation
// ABOUTME: Unifies session tracking, event recording, and user attributes behind one trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analytics provider abstractions and the Treasure Data adapter.
//!
//! [`core`] holds the contract a host application programs against;
//! [`treasure_data`] adapts it to the Treasure Data ingestion API.

/// Core analytics traits and interfaces
pub mod core;
/// Structured error types for provider construction
pub mod errors;
/// Treasure Data ingestion adapter
pub mod treasure_data;

pub use self::core::{AnalyticsProvider, ConfigAccessor, EventAttribute, ProviderConfig};
pub use self::errors::{ProviderError, ProviderResult};
pub use self::treasure_data::TreasureDataProvider;
