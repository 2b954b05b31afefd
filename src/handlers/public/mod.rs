pub mod auth;
pub mod root;

pub use root::{health, root};
