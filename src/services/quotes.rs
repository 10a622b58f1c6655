// Quotes service — deal economics and the joined table rows for the
// purchase (received) and sales (sent) quote views.

use std::collections::HashMap;

use serde::Serialize;

use crate::helpers::contains_ci;
use crate::types::{Company, CompanyRole, Quote, Sku};

/// Direction-appropriate unit price × MOQ.
pub fn deal_value(quote: &Quote, role: CompanyRole) -> f64 {
    quote.unit_price(role) * quote.moq
}

/// Sales margin on a sent quote: total revenue minus total base cost. The
/// base cost is a manual reference field and reads as 0 when unset.
pub fn margin(quote: &Quote) -> f64 {
    (quote.selling_price * quote.moq) - (quote.base_cost_price * quote.moq)
}

/// One row of the quotes table with its references resolved for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRow {
    pub quote: Quote,
    pub company_name: String,
    pub sku_name: String,
    pub deal_value: f64,
    /// Present on sent quotes only.
    pub margin: Option<f64>,
}

/// Join quotes against the company and SKU snapshots. Unresolved references
/// render as placeholders; the row still appears with its own stored money.
pub fn build_quote_rows(
    role: CompanyRole,
    quotes: &[Quote],
    companies: &[Company],
    skus: &[Sku],
) -> Vec<QuoteRow> {
    let companies_by_id: HashMap<&str, &Company> =
        companies.iter().map(|c| (c.id.as_str(), c)).collect();
    let skus_by_id: HashMap<&str, &Sku> = skus.iter().map(|s| (s.id.as_str(), s)).collect();

    quotes
        .iter()
        .map(|quote| {
            let company_name = quote
                .company_id(role)
                .and_then(|id| companies_by_id.get(id))
                .map(|c| c.company_name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());
            let sku_name = skus_by_id
                .get(quote.sku_id.as_str())
                .map(|s| s.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown SKU".to_string());

            QuoteRow {
                company_name,
                sku_name,
                deal_value: deal_value(quote, role),
                margin: (role == CompanyRole::Client).then(|| margin(quote)),
                quote: quote.clone(),
            }
        })
        .collect()
}

/// The header search box matches against the human quote label.
pub fn filter_by_quote_id(rows: Vec<QuoteRow>, search: &str) -> Vec<QuoteRow> {
    if search.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| contains_ci(row.quote.quote_id.as_deref().unwrap_or(""), search))
        .collect()
}
