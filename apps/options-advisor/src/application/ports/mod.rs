//! Application Ports (Driven)
//!
//! Interfaces to the collaborators that supply market data and store the
//! watchlist. Adapters live in [`crate::infrastructure`].

mod position_repository_port;
mod quote_cache_port;
mod quote_source_port;

pub use position_repository_port::{PositionRepositoryPort, RepositoryError};
pub use quote_cache_port::QuoteCachePort;
pub use quote_source_port::{OptionQuote, QuoteError, QuoteSourcePort};
