pub mod config;
pub mod error;
pub mod highlight;
pub mod search;

pub use config::*;
pub use error::*;
pub use highlight::HighlightRun;
pub use search::*;
