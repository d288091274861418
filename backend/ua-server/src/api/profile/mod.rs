pub mod profile_dto;
#[allow(clippy::module_inception)]
pub mod profile;
