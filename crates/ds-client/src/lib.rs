//! Blocking client for the document server fixture.
//!
//! ```no_run
//! use ds_client::{Conventions, DocumentStore};
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Greeting {
//!     item1: String,
//!     item2: String,
//! }
//!
//! # fn main() -> ds_client::ClientResult<()> {
//! let store = DocumentStore::new("http://127.0.0.1:8080/", Conventions::default())?;
//!
//! let mut session = store.open_session();
//! session.store(&Greeting { item1: "hello".into(), item2: "world".into() })?;
//! session.save_changes()?;
//!
//! let greeting: Greeting = store
//!     .open_session()
//!     .query::<Greeting>()
//!     .wait_for_non_stale_results(Duration::from_secs(5))
//!     .single()?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod commands;
pub(crate) mod conventions;
pub(crate) mod database_commands;
pub(crate) mod document_store;
pub(crate) mod error;
pub(crate) mod http;
pub(crate) mod query;
pub(crate) mod session;

#[cfg(test)]
mod tests;

pub use commands::{BatchResult, Command, CommandMethod, JsonDocument, QueryResult};
pub use conventions::Conventions;
pub use ds_config::{ENTITY_NAME_KEY, RUST_TYPE_KEY};
pub use database_commands::DatabaseCommands;
pub use document_store::DocumentStore;
pub use error::{ClientError, Result as ClientResult};
pub use query::Query;
pub use session::Session;
