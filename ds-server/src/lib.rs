//! In-memory document server used as the out-of-process fixture for
//! `ds-driver` end-to-end tests.

pub mod admin;
pub mod api_error;
pub mod app_state;
pub mod cli;
pub mod documents;
pub mod error;
pub mod health;
pub mod indexer;
pub mod logger;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod store;
pub mod wire;

#[cfg(test)]
mod tests;

pub use api_error::{ApiError, Result as ApiResult};
pub use app_state::AppState;
pub use cli::Cli;
pub use error::{Result as ServerErrorResult, ServerError};
pub use routes::build_router;
pub use server::run;
pub use shutdown::{ShutdownCoordinator, ShutdownGuard};
pub use store::{MemoryStore, StoredDocument};
pub use wire::{BatchResultDto, CommandDto, DocumentDto, QueryResultDto};
