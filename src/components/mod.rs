//! Dashboard panels. Only the workflow editor is part of the library surface.

pub(crate) mod apps;
pub(crate) mod database;
pub(crate) mod layout;
pub(crate) mod modal;
pub(crate) mod pagination;
pub(crate) mod services;
pub(crate) mod upload;
pub mod workflow;
