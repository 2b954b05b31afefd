pub mod seed;
pub mod show_service;

pub use show_service::{ShowService, StoreError};
