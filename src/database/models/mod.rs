pub mod show;
pub mod watch;

pub use show::{Show, ShowRow};
pub use watch::{Rating, WatchFilter};
