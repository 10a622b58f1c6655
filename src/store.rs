//! In-process document-collection store.
//!
//! Mirrors the contract the console assumes from its hosted backend:
//! collections of schemaless JSON documents addressed by name, full-snapshot
//! push on every change (no query-level joins, no partial deltas), and
//! add/update/delete-by-id writes. Subscribers always receive the entire
//! collection as a fresh `Vec` — downstream state replaces its copy
//! wholesale and never mutates in place.
//!
//! Writes are fire-and-forget from the caller's point of view: the caller
//! gets a synchronous `Result` for contract violations, but read-side
//! consumers only ever observe the next delivered snapshot.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Collection names, as the hosted store scopes them.
pub mod collections {
    pub const VENDORS: &str = "vendors";
    pub const CLIENTS: &str = "clients";
    pub const PRODUCTS: &str = "products";
    pub const SKUS: &str = "skus";
    pub const QUOTES_RECEIVED: &str = "quotesReceived";
    pub const QUOTES_SENT: &str = "quotesSent";
    pub const TASKS: &str = "tasks";
    pub const ORDERS: &str = "orders";
    pub const CONTACTS: &str = "contacts";
    pub const USERS: &str = "users";
    pub const SETTINGS: &str = "settings";

    /// Every collection the console subscribes to.
    pub const ALL: &[&str] = &[
        VENDORS,
        CLIENTS,
        PRODUCTS,
        SKUS,
        QUOTES_RECEIVED,
        QUOTES_SENT,
        TASKS,
        ORDERS,
        CONTACTS,
        USERS,
        SETTINGS,
    ];
}

/// One stored document: a stable opaque id plus a schemaless field map.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    /// Decode into a typed entity, folding the id into the field map the way
    /// the console reads documents (`{ id, ...fields }`).
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let mut map = self.data.clone();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(map))
    }
}

type Subscriber = Box<dyn Fn(&[Document]) + Send>;

/// In-memory implementation of the store contract. Used by the composition
/// root in tests and by any embedding that does not wire a hosted backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Vec<Document>>>,
    subscribers: Mutex<HashMap<String, Vec<Subscriber>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a collection. The callback fires once immediately with
    /// the current snapshot, then again after every write to the collection.
    pub fn subscribe<F>(&self, collection: &str, callback: F)
    where
        F: Fn(&[Document]) + Send + 'static,
    {
        let snapshot = self.snapshot(collection);
        callback(&snapshot);

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers
            .entry(collection.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Current full contents of a collection. Unknown collections read as
    /// empty — a subscription may be wired before the first write.
    pub fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Insert a document with a generated id. Stamps `createdAt` (RFC 3339)
    /// store-side when the caller did not provide one.
    pub fn add(&self, collection: &str, data: Value) -> Result<String, StoreError> {
        let mut map = into_object(data)?;
        map.entry("createdAt".to_string())
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

        let id = uuid::Uuid::new_v4().to_string();
        {
            let mut inner = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            inner.entry(collection.to_string()).or_default().push(Document {
                id: id.clone(),
                data: map,
            });
        }
        self.notify(collection);
        Ok(id)
    }

    /// Merge fields into an existing document.
    pub fn update(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let patch = into_object(data)?;
        {
            let mut inner = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let docs = inner
                .get_mut(collection)
                .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
            let doc = docs
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            for (key, value) in patch {
                doc.data.insert(key, value);
            }
        }
        self.notify(collection);
        Ok(())
    }

    /// Create-or-replace a document under a caller-chosen id. The settings
    /// collection keys its option-list documents by name this way.
    pub fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let map = into_object(data)?;
        {
            let mut inner = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let docs = inner.entry(collection.to_string()).or_default();
            match docs.iter_mut().find(|d| d.id == id) {
                Some(doc) => doc.data = map,
                None => docs.push(Document {
                    id: id.to_string(),
                    data: map,
                }),
            }
        }
        self.notify(collection);
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        {
            let mut inner = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let docs = inner
                .get_mut(collection)
                .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
            let before = docs.len();
            docs.retain(|d| d.id != id);
            if docs.len() == before {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            }
        }
        self.notify(collection);
        Ok(())
    }

    /// Re-deliver the full collection to every subscriber. The snapshot is
    /// cloned out before callbacks run so a callback can read the store
    /// without deadlocking.
    fn notify(&self, collection: &str) {
        let snapshot = self.snapshot(collection);
        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(callbacks) = subscribers.get(collection) {
            for callback in callbacks {
                callback(&snapshot);
            }
        }
    }
}

fn into_object(data: Value) -> Result<Map<String, Value>, StoreError> {
    match data {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}
