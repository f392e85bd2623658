//! Client pool — tracks all active connections for broadcast fan-out.

use std::sync::Arc;

use dashmap::DashMap;

use super::handle::{ClientHandle, ClientId};

/// Thread-safe pool of all connected clients.
#[derive(Debug, Default)]
pub struct ClientPool {
    /// Connection ID → handle.
    by_id: DashMap<ClientId, Arc<ClientHandle>>,
}

impl ClientPool {
    /// Creates a new empty pool.
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
        }
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ClientHandle>) {
        self.by_id.insert(handle.id, handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, id: &ClientId) -> Option<Arc<ClientHandle>> {
        self.by_id.remove(id).map(|(_, handle)| handle)
    }

    /// Returns all connection handles.
    pub fn all(&self) -> Vec<Arc<ClientHandle>> {
        self.by_id.iter().map(|e| e.value().clone()).collect()
    }

    /// Returns the number of active connections.
    pub fn count(&self) -> usize {
        self.by_id.len()
    }
}
