pub mod config;

mod app_state;
mod query_loop;

pub use app_state::AppState;
pub use config::Settings;
pub use query_loop::{run_query_loop, SessionEnd};
