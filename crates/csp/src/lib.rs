//! Content-Security-Policy header modeling.
//!
//! This crate parses CSP header values into an order-preserving directive
//! model, supports programmatic mutation, and serializes the model back into
//! a header value:
//! - Declaration order of directives and insertion order of source tokens
//!   survive a round trip.
//! - Repeated directives follow the CSP "first directive wins" rule.
//! - Keyword, nonce, and digest tokens are normalized to their single-quoted
//!   forms on output.
//! - Ready-made presets build nonce-based hardening policies.
//!
//! Parsing and formatting are total: malformed input degrades gracefully and
//! anomalies surface as `tracing` warning events, never as errors.

pub mod nonce;
pub mod policy;
pub mod source_set;

mod format;
mod presets;

pub use nonce::{NonceGenerator, RandomNonce, NONCE_LEN};
pub use policy::Policy;
pub use source_set::SourceSet;
