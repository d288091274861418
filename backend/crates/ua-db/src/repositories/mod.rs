pub mod in_memory_user_directory;
pub mod user_repository;
