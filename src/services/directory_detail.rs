// Company detail panel — the header numbers and related-record sections
// shown when a directory row is opened.

use std::collections::HashMap;

use serde::Serialize;

use crate::services::orders::{orders_for_company, orders_total};
use crate::services::quotes::deal_value;
use crate::services::tasks::open_tasks_for_company;
use crate::types::{Company, CompanyRole, Contact, Order, Product, Quote, Sku, Task};

/// One quote card in the detail panel, with its SKU and product resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCard {
    pub quote: Quote,
    pub product_name: String,
    pub variant: String,
    /// "500ml • Bottle • Mint" style pack description.
    pub pack_label: String,
    pub investment: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    pub company: Company,
    /// Σ deal value across the company's quotes. Unlike the directory row's
    /// sales potential, the detail header sums the vendor side too
    /// (purchase price × MOQ) — it reads as committed spend there.
    pub potential_value: f64,
    pub total_order_value: f64,
    pub contacts: Vec<Contact>,
    pub orders: Vec<Order>,
    pub open_tasks: Vec<Task>,
    pub quotes: Vec<QuoteCard>,
}

/// Assemble the detail panel for one company from the current snapshots.
#[allow(clippy::too_many_arguments)]
pub fn company_detail(
    role: CompanyRole,
    company: &Company,
    contacts: &[Contact],
    orders: &[Order],
    tasks: &[Task],
    quotes: &[Quote],
    skus: &[Sku],
    products: &[Product],
) -> CompanyDetail {
    let skus_by_id: HashMap<&str, &Sku> = skus.iter().map(|s| (s.id.as_str(), s)).collect();
    let products_by_id: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    let company_quotes: Vec<&Quote> = quotes
        .iter()
        .filter(|q| q.company_id(role) == Some(company.id.as_str()))
        .collect();

    let quote_cards: Vec<QuoteCard> = company_quotes
        .iter()
        .map(|quote| {
            let sku = skus_by_id.get(quote.sku_id.as_str());
            let product = sku.and_then(|s| products_by_id.get(s.product_id.as_str()));
            QuoteCard {
                product_name: product
                    .map(|p| p.name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                variant: sku.map(|s| s.variant.clone()).unwrap_or_default(),
                pack_label: sku.map(|s| pack_label(s)).unwrap_or_default(),
                investment: deal_value(quote, role),
                quote: (*quote).clone(),
            }
        })
        .collect();

    let potential_value = company_quotes.iter().map(|q| deal_value(q, role)).sum();

    let company_orders: Vec<Order> = orders_for_company(orders, &company.id)
        .into_iter()
        .cloned()
        .collect();
    let total_order_value = orders_total(&company_orders);

    CompanyDetail {
        company: company.clone(),
        potential_value,
        total_order_value,
        contacts: contacts
            .iter()
            .filter(|c| c.company_id == company.id)
            .cloned()
            .collect(),
        orders: company_orders,
        open_tasks: open_tasks_for_company(tasks, &company.id)
            .into_iter()
            .cloned()
            .collect(),
        quotes: quote_cards,
    }
}

fn pack_label(sku: &Sku) -> String {
    let mut label = format!("{}{}", sku.pack_size, sku.unit);
    if !sku.pack_type.is_empty() {
        label.push_str(&format!(" • {}", sku.pack_type));
    }
    if !sku.flavour.is_empty() {
        label.push_str(&format!(" • {}", sku.flavour));
    }
    label
}
