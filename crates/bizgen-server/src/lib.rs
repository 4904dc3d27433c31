pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use server::{app_config, cors, local_origins, run_server};
pub use state::AppState;
