pub mod apps;
pub mod database;
pub mod not_found;
pub mod services;
pub mod upload;
pub mod workflow;
