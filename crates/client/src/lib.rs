pub mod client;
pub mod config;
pub mod controller;
pub mod error_convert;
pub mod normalize;
pub mod session;

pub use client::{string_params, SearchClient};
pub use controller::{SearchCompletion, SearchController, SearchTicket, SUBMIT_KEY};
pub use normalize::normalize;
pub use session::{SearchMessage, SearchSession, SearchState, NO_RESULTS_MESSAGE};
