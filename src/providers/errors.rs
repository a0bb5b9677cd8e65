// ABOUTME: Structured error types for analytics provider construction
// ABOUTME: Factory-time failures; runtime transport failures are only ever logged
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors surfaced while constructing a provider from host configuration.
///
/// These never escape the public factory, which logs them and returns
/// `None` instead. Runtime failures (a request that never completes, a
/// non-success status) are carried in
/// [`CompletionEvent`](crate::transport::CompletionEvent) and logged by
/// the completion handler.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The host did not supply a configuration accessor.
    #[error("analytics provider configuration accessor is unbound")]
    UnboundAccessor,
}

/// Result alias for provider construction.
pub type ProviderResult<T> = Result<T, ProviderError>;
