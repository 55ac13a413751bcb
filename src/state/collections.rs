use crate::models::{
    Announcement, Campaign, ClientBroker, ClientNetwork, Lead, Order, OurNetwork, Ticket, User,
};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory document collection
///
/// Queries clone matching documents out of the map; callers sort and cap the
/// result themselves, mirroring how the entity services issue
/// filter/sort/limit reads against the document store.
#[derive(Clone)]
pub struct Collection<T: Clone> {
    docs: Arc<DashMap<Uuid, T>>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, id: Uuid, doc: T) {
        self.docs.insert(id, doc);
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.docs.get(id).map(|entry| entry.clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.docs.remove(id).map(|(_, doc)| doc)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Collect every document matching the predicate
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.docs
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The nine entity collections the search core fans out over
///
/// Populated by the CRUD services; the search side only reads.
#[derive(Clone, Default)]
pub struct Database {
    pub leads: Collection<Lead>,
    pub orders: Collection<Order>,
    pub users: Collection<User>,
    pub campaigns: Collection<Campaign>,
    pub tickets: Collection<Ticket>,
    pub announcements: Collection<Announcement>,
    pub client_brokers: Collection<ClientBroker>,
    pub client_networks: Collection<ClientNetwork>,
    pub our_networks: Collection<OurNetwork>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
}
