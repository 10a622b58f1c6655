use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::settings::OptionLists;
use crate::store::{collections, Document, MemoryStore};
use crate::types::{Company, Config, Contact, Order, Product, Quote, Sku, Task, User};

/// The current full-collection inputs, replaced wholesale on every store
/// delivery. This is the narrow structure the aggregation functions read
/// from — they never talk to the store themselves.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub vendors: Vec<Company>,
    pub clients: Vec<Company>,
    pub products: Vec<Product>,
    pub skus: Vec<Sku>,
    pub quotes_received: Vec<Quote>,
    pub quotes_sent: Vec<Quote>,
    pub tasks: Vec<Task>,
    pub orders: Vec<Order>,
    pub contacts: Vec<Contact>,
    pub users: Vec<User>,
    pub settings: OptionLists,
}

/// Application state owned by the composition root.
pub struct AppState {
    pub config: Mutex<Option<Config>>,
    pub snapshots: Mutex<Snapshots>,
}

impl AppState {
    pub fn new() -> Self {
        let config = load_config().ok();
        Self {
            config: Mutex::new(config),
            snapshots: Mutex::new(Snapshots::default()),
        }
    }

    /// Current configuration, falling back to defaults when none is loaded.
    pub fn config_or_default(&self) -> Config {
        self.config
            .lock()
            .map(|guard| guard.clone().unwrap_or_default())
            .unwrap_or_default()
    }

    /// A clone of the current input snapshots.
    pub fn snapshots(&self) -> Snapshots {
        self.snapshots
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

}

/// Wire every console collection to the store. Each delivery decodes into a
/// fresh `Vec` and replaces that snapshot wholesale; the collections update
/// independently, so cross-references may be momentarily stale — the
/// aggregation layer tolerates that.
pub fn attach_store(state: &Arc<AppState>, store: &MemoryStore) {
    wire_typed(state, store, collections::VENDORS, |snaps, items| {
        snaps.vendors = items
    });
    wire_typed(state, store, collections::CLIENTS, |snaps, items| {
        snaps.clients = items
    });
    wire_typed(state, store, collections::PRODUCTS, |snaps, items| {
        snaps.products = items
    });
    wire_typed(state, store, collections::SKUS, |snaps, items| {
        snaps.skus = items
    });
    wire_typed(state, store, collections::QUOTES_RECEIVED, |snaps, items| {
        snaps.quotes_received = items
    });
    wire_typed(state, store, collections::QUOTES_SENT, |snaps, items| {
        snaps.quotes_sent = items
    });
    wire_typed(state, store, collections::TASKS, |snaps, items| {
        snaps.tasks = items
    });
    wire_typed(state, store, collections::ORDERS, |snaps, items| {
        snaps.orders = items
    });
    wire_typed(state, store, collections::CONTACTS, |snaps, items| {
        snaps.contacts = items
    });
    wire_typed(state, store, collections::USERS, |snaps, items| {
        snaps.users = items
    });

    let settings_state = Arc::clone(state);
    store.subscribe(collections::SETTINGS, move |docs| {
        let lists = OptionLists::from_documents(docs);
        if let Ok(mut snaps) = settings_state.snapshots.lock() {
            snaps.settings = lists;
        }
    });
}

fn wire_typed<T>(
    state: &Arc<AppState>,
    store: &MemoryStore,
    collection: &'static str,
    assign: impl Fn(&mut Snapshots, Vec<T>) + Send + 'static,
) where
    T: DeserializeOwned,
{
    let state = Arc::clone(state);
    store.subscribe(collection, move |docs| {
        let items = decode_all::<T>(collection, docs);
        if let Ok(mut snaps) = state.snapshots.lock() {
            assign(&mut snaps, items);
        }
    });
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a snapshot into typed entities. Documents that fail to decode are
/// skipped with a warning — one malformed record never blocks a delivery.
fn decode_all<T: DeserializeOwned>(collection: &str, docs: &[Document]) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match doc.decode::<T>() {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping malformed {collection} document {}: {e}", doc.id);
                None
            }
        })
        .collect()
}

/// Get the canonical config file path (~/.biowearth/config.json)
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".biowearth").join("config.json"))
}

/// Load configuration from ~/.biowearth/config.json
pub fn load_config() -> Result<Config, String> {
    read_config(&config_path()?)
}

/// Reload configuration from disk into state.
pub fn reload_config(state: &AppState) -> Result<Config, String> {
    let config = load_config()?;
    let mut guard = state.config.lock().map_err(|_| "Lock poisoned")?;
    *guard = Some(config.clone());
    Ok(config)
}

/// Create or update config.json atomically.
///
/// If config already exists in-memory, clones it, applies the mutator, and
/// writes back. If config is None (first-run), starts from defaults, applies
/// the mutator, ensures ~/.biowearth/ exists, and writes + updates
/// in-memory state.
pub fn create_or_update_config(
    state: &AppState,
    mutator: impl FnOnce(&mut Config),
) -> Result<Config, String> {
    let mut guard = state.config.lock().map_err(|_| "Lock poisoned")?;

    let mut config = guard.clone().unwrap_or_default();
    mutator(&mut config);

    write_config(&config_path()?, &config)?;
    *guard = Some(config.clone());

    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        return Err(format!("Config file not found at {}", path.display()));
    }
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
}

fn write_config(path: &Path, config: &Config) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
    }
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))
}
