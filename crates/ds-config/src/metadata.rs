//! Document metadata keys understood by both the server and the client.

/// Collection a document belongs to. The server uses it to assign keys and
/// to select documents for a collection's dynamic index.
pub const ENTITY_NAME_KEY: &str = "Ds-Entity-Name";

/// Rust type a document was stored from. Informational only.
pub const RUST_TYPE_KEY: &str = "Ds-Rust-Type";
