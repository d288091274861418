pub mod directory;
pub mod error;
pub mod models;

pub use directory::user_directory::UserDirectory;
pub use error::directory_error::{DirectoryError, DirectoryResult};
pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::gender::Gender;
pub use models::login_provider::LoginProvider;
pub use models::profile_update::ProfileUpdate;
pub use models::provider_link::ProviderLink;
pub use models::user::{User, normalize_email};

#[cfg(test)]
mod tests;
