//! Application Layer
//!
//! Orchestrates pricing and domain services behind ports:
//!
//! - **Ports**: quote source, quote cache, position repository
//! - **Use Cases**: option chain scan, watchlist evaluation, watchlist entry

pub mod ports;
pub mod use_cases;
