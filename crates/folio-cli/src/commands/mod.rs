//! Command implementations for the folio CLI

mod config;
mod live;
mod recent;
mod search;

pub use config::execute as show_config;
pub use live::execute as live_search;
pub use recent::execute as recent_searches;
pub use search::execute as search;
