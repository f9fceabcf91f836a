//! Application Use Cases
//!
//! Use cases orchestrate domain logic over the driven ports.

mod add_to_watchlist;
mod close_position;
mod evaluate_watchlist;
mod scan_option_chain;

pub use add_to_watchlist::{AddToWatchlistRequest, AddToWatchlistUseCase, WatchlistAddition};
pub use close_position::ClosePositionUseCase;
pub use evaluate_watchlist::{EvaluateWatchlistUseCase, WatchlistEntry};
pub use scan_option_chain::{ChainScan, ScanOptionChainUseCase, ScanRequest, TradeCard};
