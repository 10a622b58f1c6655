use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::helpers::de_lenient_f64;

/// Configuration stored in ~/.biowearth/config.json
///
/// Every field carries a serde default so an empty `{}` file (or one written
/// by an older build) still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Tenant/application id, the path prefix the hosted store scopes data by.
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Display currency for money fields. Quotes may override per-record.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub features: HashMap<String, bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            currency: default_currency(),
            features: HashMap::new(),
        }
    }
}

fn default_app_id() -> String {
    "biowearth-os".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Which directory a company record lives in. Fixed per session: the vendor
/// directory and the client list are separate collections with separate
/// status vocabularies and quote links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyRole {
    Vendor,
    Client,
}

/// A vendor or client organization record.
///
/// `lead_source`, `lead_date`, and `product_formats` are client-side
/// relationship fields; vendor documents simply never carry them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_date: Option<String>,
    /// Declared product-format interest tags (clients only).
    #[serde(default)]
    pub product_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A packaged variant of a Product. `name` is the generated display code
/// (see `services::catalog::sku_code`); `pack_size` stays a string because
/// the source documents store it as typed-in text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub pack_size: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub pack_type: String,
    #[serde(default)]
    pub flavour: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Lifecycle statuses a sent (sales) quote moves through.
pub const QUOTE_STATUSES: &[&str] = &["Draft", "Active", "Closed", "Lost"];

/// A price offer for one SKU at one minimum order quantity.
///
/// Direction is carried by the collection the document lives in
/// (`quotesReceived` references a vendor via `vendor_id`, `quotesSent` a
/// client via `client_id`), so both link fields are optional here. Money and
/// quantity fields decode leniently: the source UI wrote `<input>` strings
/// straight to the store, so `"120"` and `120` both read as 120.0 and
/// anything unparseable reads as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub sku_id: String,
    /// Unit purchase price (received quotes).
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub price: f64,
    /// Unit selling price (sent quotes).
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub selling_price: f64,
    /// Manual base-cost reference for margin on sent quotes.
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub base_cost_price: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub moq: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Quote {
    /// The company this quote belongs to, under the given directory role.
    pub fn company_id(&self, role: CompanyRole) -> Option<&str> {
        match role {
            CompanyRole::Vendor => self.vendor_id.as_deref(),
            CompanyRole::Client => self.client_id.as_deref(),
        }
    }

    /// Direction-appropriate unit price.
    pub fn unit_price(&self, role: CompanyRole) -> f64 {
        match role {
            CompanyRole::Vendor => self.price,
            CompanyRole::Client => self.selling_price,
        }
    }

    pub fn status_or_draft(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Draft")
    }
}

pub const TASK_STATUS_PENDING: &str = "Pending";
pub const TASK_STATUS_COMPLETED: &str = "Completed";

/// A task, optionally related to a company. Older documents use `related_id`
/// plus a `context_type` discriminator; newer ones write the role-specific
/// `related_client_id` / `related_vendor_id` — a company match on any of the
/// three counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    /// Due date as `YYYY-MM-DD`; absent or unparseable dates sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TASK_STATUS_COMPLETED
    }

    /// Whether any of the task's relation fields point at `company_id`.
    pub fn relates_to(&self, company_id: &str) -> bool {
        [
            self.related_id.as_deref(),
            self.related_client_id.as_deref(),
            self.related_vendor_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|id| id == company_id)
    }
}

pub const MILESTONE_PAID: &str = "Paid";
pub const MILESTONE_PENDING: &str = "Pending";

/// One payment milestone on an order: a label, a percent of the order total,
/// and a paid/pending flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMilestone {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub percent: f64,
    #[serde(default)]
    pub status: String,
}

impl PaymentMilestone {
    pub fn is_paid(&self) -> bool {
        self.status == MILESTONE_PAID
    }
}

/// Per-document-name requirement state on an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRequirement {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub received: bool,
    #[serde(default)]
    pub link: String,
}

/// A confirmed order for one company: quantity, rate, tax, computed amount,
/// payment milestones, and a required-document checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub sku_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub qty: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub rate: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub tax_rate: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub tax_amount: f64,
    #[serde(default)]
    pub payment_terms: Vec<PaymentMilestone>,
    #[serde(default)]
    pub doc_requirements: HashMap<String, DocRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A key person at a company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A console user. Exists for assignee option lists and the admin role gate;
/// credential handling is not this crate's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "Admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_fill_empty_file() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.app_id, "biowearth-os");
        assert_eq!(config.currency, "INR");
        assert!(config.features.is_empty());
    }

    #[test]
    fn quote_decodes_stringly_numbers() {
        let quote: Quote = serde_json::from_str(
            r#"{"quoteId":"Q-1001","sellingPrice":"120.5","moq":"10","skuId":"s1"}"#,
        )
        .unwrap();
        assert_eq!(quote.selling_price, 120.5);
        assert_eq!(quote.moq, 10.0);
        assert_eq!(quote.price, 0.0);
    }

    #[test]
    fn quote_garbage_number_reads_as_zero() {
        let quote: Quote =
            serde_json::from_str(r#"{"sellingPrice":"TBD","moq":null}"#).unwrap();
        assert_eq!(quote.selling_price, 0.0);
        assert_eq!(quote.moq, 0.0);
    }

    #[test]
    fn task_relates_on_any_link_field() {
        let task = Task {
            related_vendor_id: Some("v1".to_string()),
            ..Task::default()
        };
        assert!(task.relates_to("v1"));
        assert!(!task.relates_to("v2"));
    }

    #[test]
    fn company_missing_name_reads_as_empty() {
        let company: Company = serde_json::from_str(r#"{"country":"India"}"#).unwrap();
        assert_eq!(company.company_name, "");
        assert_eq!(company.country.as_deref(), Some("India"));
    }
}
