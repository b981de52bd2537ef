pub mod payload;
pub mod portfolio;
pub mod profile;
