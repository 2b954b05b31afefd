pub mod extract;

pub use extract::{Json, Path, Query};
