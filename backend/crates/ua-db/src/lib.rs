pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{connect, run_migrations};
pub use error::{DbError, Result};
pub use repositories::in_memory_user_directory::InMemoryUserDirectory;
pub use repositories::user_repository::UserRepository;
