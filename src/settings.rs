//! Admin-managed option lists.
//!
//! The `settings` collection holds one document per list, keyed by the list
//! name, each shaped `{ "list": [...] }`. Lists the admin has not configured
//! fall back to the embedded defaults below.

use serde::{Deserialize, Serialize};

use crate::store::Document;
use crate::types::CompanyRole;

pub const VENDOR_STATUSES: &[&str] = &["Active", "On Hold", "Potential", "Blacklisted"];
pub const CLIENT_STATUSES: &[&str] = &["Lead", "Active", "Negotiation", "Churned", "Hot Lead"];

/// Status vocabulary for one directory role.
pub fn statuses_for(role: CompanyRole) -> &'static [&'static str] {
    match role {
        CompanyRole::Vendor => VENDOR_STATUSES,
        CompanyRole::Client => CLIENT_STATUSES,
    }
}

fn default_formats() -> Vec<String> {
    ["Powder", "Liquid", "Tablet", "Capsule", "Gummy", "Sachet"]
        .map(String::from)
        .to_vec()
}

fn default_units() -> Vec<String> {
    ["g", "kg", "ml", "L", "pcs"].map(String::from).to_vec()
}

fn default_pack_types() -> Vec<String> {
    ["Jar", "Box", "Pouch", "Bottle"].map(String::from).to_vec()
}

fn default_lead_sources() -> Vec<String> {
    ["LinkedIn", "Website", "Referral", "Cold Call"]
        .map(String::from)
        .to_vec()
}

/// The filter-widget vocabularies: product formats, SKU units and pack
/// types, lead sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionLists {
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default = "default_units")]
    pub units: Vec<String>,
    #[serde(default = "default_pack_types")]
    pub pack_types: Vec<String>,
    #[serde(default = "default_lead_sources")]
    pub lead_sources: Vec<String>,
}

impl Default for OptionLists {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            units: default_units(),
            pack_types: default_pack_types(),
            lead_sources: default_lead_sources(),
        }
    }
}

impl OptionLists {
    /// Assemble from a settings-collection snapshot. A document with an
    /// empty or malformed `list` leaves that list at its default.
    pub fn from_documents(docs: &[Document]) -> Self {
        let mut lists = Self::default();
        for doc in docs {
            let Some(items) = string_list(doc) else {
                continue;
            };
            match doc.id.as_str() {
                "formats" => lists.formats = items,
                "units" => lists.units = items,
                "packTypes" => lists.pack_types = items,
                "leadSources" => lists.lead_sources = items,
                other => log::debug!("Ignoring unknown settings list '{other}'"),
            }
        }
        lists
    }
}

fn string_list(doc: &Document) -> Option<Vec<String>> {
    let items: Vec<String> = doc
        .data
        .get("list")?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str())
        .map(String::from)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn settings_doc(id: &str, list: serde_json::Value) -> Document {
        let mut data = Map::new();
        data.insert("list".to_string(), list);
        Document {
            id: id.to_string(),
            data,
        }
    }

    #[test]
    fn empty_snapshot_yields_defaults() {
        let lists = OptionLists::from_documents(&[]);
        assert_eq!(lists.formats, default_formats());
        assert_eq!(lists.lead_sources, default_lead_sources());
    }

    #[test]
    fn configured_list_replaces_default() {
        let docs = vec![settings_doc("formats", serde_json::json!(["Oil", "Paste"]))];
        let lists = OptionLists::from_documents(&docs);
        assert_eq!(lists.formats, vec!["Oil", "Paste"]);
        assert_eq!(lists.units, default_units());
    }

    #[test]
    fn malformed_list_keeps_default() {
        let docs = vec![
            settings_doc("units", serde_json::json!("kg")),
            settings_doc("leadSources", serde_json::json!([])),
        ];
        let lists = OptionLists::from_documents(&docs);
        assert_eq!(lists.units, default_units());
        assert_eq!(lists.lead_sources, default_lead_sources());
    }

    #[test]
    fn role_statuses_are_distinct() {
        assert!(statuses_for(CompanyRole::Vendor).contains(&"Blacklisted"));
        assert!(statuses_for(CompanyRole::Client).contains(&"Hot Lead"));
    }
}
