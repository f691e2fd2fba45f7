//! Infrastructure module for storage.
//!
//! This module contains the repository trait, its in-memory and `PostgreSQL`
//! implementations, and the factory that picks one from configuration.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use factory::{
    ConfigurationError, FactoryError, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryTodoRepository;
pub use postgres::PostgresTodoRepository;
pub use repository::{RepositoryError, RepositoryFuture, TodoRepository};
