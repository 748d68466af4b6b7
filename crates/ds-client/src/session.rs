use crate::{
    BatchResult, ClientResult, Command, Conventions, DatabaseCommands, DocumentStore, Query,
};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Unit of work against a [`DocumentStore`].
///
/// Writes are buffered until [`Session::save_changes`], which sends them as
/// a single batch. Reads go to the server immediately.
pub struct Session<'a> {
    store: &'a DocumentStore,
    pending: Vec<Command>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    /// Queue `entity` for storage under a server-assigned key.
    pub fn store<T: Serialize>(&mut self, entity: &T) -> ClientResult<()> {
        self.queue_put(None, entity)
    }

    pub fn store_with_key<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        entity: &T,
    ) -> ClientResult<()> {
        self.queue_put(Some(key.into()), entity)
    }

    fn queue_put<T: Serialize>(&mut self, key: Option<String>, entity: &T) -> ClientResult<()> {
        let command = Command::put_entity(key, entity, self.conventions())?;
        self.pending.push(command);
        Ok(())
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.pending.push(Command::delete(key));
    }

    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Flush queued writes. A session without changes sends nothing.
    pub fn save_changes(&mut self) -> ClientResult<Vec<BatchResult>> {
        if self.pending.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Saving {} pending change(s)", self.pending.len());
        let results = self.database_commands().batch(&self.pending)?;
        self.pending.clear();
        Ok(results)
    }

    /// Load one document by key. `None` when the key does not exist.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        match self.database_commands().get(key)? {
            Some(doc) => Ok(Some(serde_json::from_value(doc.document)?)),
            None => Ok(None),
        }
    }

    /// Query the dynamic index of `T`'s collection.
    pub fn query<T: DeserializeOwned>(&self) -> Query<'a, T> {
        Query::new(
            self.database_commands(),
            self.conventions().collection_name::<T>(),
        )
    }

    pub fn database_commands(&self) -> DatabaseCommands<'a> {
        self.store.database_commands()
    }

    pub fn conventions(&self) -> &'a Conventions {
        self.store.conventions()
    }
}
