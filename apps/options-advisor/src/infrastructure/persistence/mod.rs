//! Persistence Adapters
//!
//! Implementations of [`PositionRepositoryPort`](crate::application::ports::PositionRepositoryPort).

pub mod in_memory;

pub use in_memory::InMemoryPositionRepository;
