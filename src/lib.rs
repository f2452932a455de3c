pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod present;
pub mod sample;
pub mod summary;
pub mod view;

pub use context::AppContext;
pub use view::{SortPolicy, ViewEvent, ViewStateCoordinator};
