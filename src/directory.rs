//! Directory aggregation engine.
//!
//! Joins the raw entity snapshots into one enriched row per company, then
//! applies the directory header's filters and sort. Pure functions of their
//! inputs: no hidden state, inputs never mutated, re-run wholesale on every
//! snapshot change.
//!
//! Cross-references are resolved leniently. Snapshots arrive independently,
//! so a quote can momentarily point at a SKU that has not been delivered
//! yet — unresolved references contribute nothing instead of erroring.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::helpers::{contains_ci, eq_ci};
use crate::services::tasks::compare_due_dates;
use crate::types::{Company, CompanyRole, Product, Quote, Sku, Task};

/// The earliest-due open task attached to a row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub due_date: Option<String>,
}

/// A company record augmented with engine-computed aggregate fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    #[serde(flatten)]
    pub company: Company,
    /// De-duplicated names of products this company has quotes against.
    pub product_names: Vec<String>,
    /// Vendor rows: formats supplied (implied by quotes). Client rows:
    /// declared interest formats unioned with quote-implied formats.
    pub formats: Vec<String>,
    /// Σ selling price × MOQ over the company's quotes. Sales-side concept:
    /// always 0 for vendor rows.
    pub sales_potential: f64,
    pub open_task_count: usize,
    pub next_task: Option<TaskSummary>,
}

/// Build one enriched row per company from the current snapshots.
///
/// `quotes` must already be the role-appropriate collection (received for
/// vendors, sent for clients), as delivered by the store.
pub fn compute_rows(
    role: CompanyRole,
    companies: &[Company],
    products: &[Product],
    skus: &[Sku],
    quotes: &[Quote],
    tasks: &[Task],
) -> Vec<CompanyRow> {
    // Index once per pass; the per-row work is then a scan over each
    // company's own quotes and the task list.
    let products_by_id: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();
    let skus_by_id: HashMap<&str, &Sku> = skus.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut quotes_by_company: HashMap<&str, Vec<&Quote>> = HashMap::new();
    for quote in quotes {
        if let Some(company_id) = quote.company_id(role) {
            quotes_by_company.entry(company_id).or_default().push(quote);
        }
    }

    companies
        .iter()
        .map(|company| {
            let open: Vec<&Task> = tasks
                .iter()
                .filter(|t| !t.is_completed() && t.relates_to(&company.id))
                .collect();
            let next_task = open
                .iter()
                .min_by(|a, b| compare_due_dates(a.due_date.as_deref(), b.due_date.as_deref()))
                .map(|t| TaskSummary {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    due_date: t.due_date.clone(),
                });

            let company_quotes = quotes_by_company
                .get(company.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let mut product_names = BTreeSet::new();
            let mut formats = BTreeSet::new();
            for quote in company_quotes {
                let Some(sku) = skus_by_id.get(quote.sku_id.as_str()) else {
                    continue;
                };
                let Some(product) = products_by_id.get(sku.product_id.as_str()) else {
                    continue;
                };
                if !product.name.is_empty() {
                    product_names.insert(product.name.clone());
                }
                if !product.format.is_empty() {
                    formats.insert(product.format.clone());
                }
            }
            if role == CompanyRole::Client {
                for declared in &company.product_formats {
                    if !declared.is_empty() {
                        formats.insert(declared.clone());
                    }
                }
            }

            let sales_potential = match role {
                CompanyRole::Client => company_quotes
                    .iter()
                    .map(|q| q.selling_price * q.moq)
                    .sum(),
                CompanyRole::Vendor => 0.0,
            };

            CompanyRow {
                company: company.clone(),
                product_names: product_names.into_iter().collect(),
                formats: formats.into_iter().collect(),
                sales_potential,
                open_task_count: open.len(),
                next_task,
            }
        })
        .collect()
}

/// Per-field row constraints. Every predicate with an empty value imposes no
/// constraint; non-empty predicates are AND-combined, text matching is
/// case-insensitive throughout.
#[derive(Debug, Clone, Default)]
pub struct RowFilters {
    /// Substring match against the company name.
    pub name: String,
    /// Substring match against any derived product name.
    pub product: String,
    /// Row status must be one of these (empty = no constraint).
    pub statuses: Vec<String>,
    /// Row lead source must be one of these.
    pub lead_sources: Vec<String>,
    /// Row format set must intersect these.
    pub formats: Vec<String>,
}

impl RowFilters {
    pub fn matches(&self, row: &CompanyRow) -> bool {
        if !contains_ci(&row.company.company_name, &self.name) {
            return false;
        }
        if !self.product.is_empty()
            && !row
                .product_names
                .iter()
                .any(|name| contains_ci(name, &self.product))
        {
            return false;
        }
        if !self.statuses.is_empty() {
            let status = row.company.status.as_deref().unwrap_or("");
            if !self.statuses.iter().any(|s| eq_ci(s, status)) {
                return false;
            }
        }
        if !self.lead_sources.is_empty() {
            let source = row.company.lead_source.as_deref().unwrap_or("");
            if !self.lead_sources.iter().any(|s| eq_ci(s, source)) {
                return false;
            }
        }
        if !self.formats.is_empty()
            && !row
                .formats
                .iter()
                .any(|f| self.formats.iter().any(|sel| eq_ci(sel, f)))
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CompanyName,
    Country,
    Status,
    LeadSource,
    SalesPotential,
    OpenTaskCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Current sort selection. Re-selecting the active key flips direction;
/// selecting a new key starts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::CompanyName)
    }
}

impl SortSpec {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            *self = Self::new(key);
        }
    }
}

/// Filter then sort the enriched rows. The sort is stable: rows with equal
/// keys keep their input order in either direction.
pub fn apply_filters_and_sort(
    rows: Vec<CompanyRow>,
    filters: &RowFilters,
    sort: SortSpec,
) -> Vec<CompanyRow> {
    let mut out: Vec<CompanyRow> = rows.into_iter().filter(|r| filters.matches(r)).collect();
    out.sort_by(|a, b| {
        let ordering = compare_rows(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    out
}

fn compare_rows(a: &CompanyRow, b: &CompanyRow, key: SortKey) -> std::cmp::Ordering {
    match key {
        SortKey::SalesPotential => a
            .sales_potential
            .partial_cmp(&b.sales_potential)
            .unwrap_or(std::cmp::Ordering::Equal),
        SortKey::OpenTaskCount => a.open_task_count.cmp(&b.open_task_count),
        SortKey::CompanyName => fold_cmp(&a.company.company_name, &b.company.company_name),
        SortKey::Country => fold_cmp(
            a.company.country.as_deref().unwrap_or(""),
            b.company.country.as_deref().unwrap_or(""),
        ),
        SortKey::Status => fold_cmp(
            a.company.status.as_deref().unwrap_or(""),
            b.company.status.as_deref().unwrap_or(""),
        ),
        SortKey::LeadSource => fold_cmp(
            a.company.lead_source.as_deref().unwrap_or(""),
            b.company.lead_source.as_deref().unwrap_or(""),
        ),
    }
}

fn fold_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
