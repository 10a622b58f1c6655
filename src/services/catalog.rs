// Catalog service — SKU display codes and the product master's
// filter/sort header.

use crate::helpers::contains_ci;
use crate::types::{Product, Sku};

/// Generate the SKU display code: `NAME_SIZEunit_TYPE[_FLAVOUR]`,
/// e.g. `ASHWA_60pcs_JAR_MINT`. Product name is uppercased with whitespace
/// stripped; flavour only appears when present.
pub fn sku_code(
    product_name: &str,
    pack_size: &str,
    unit: &str,
    pack_type: &str,
    flavour: &str,
) -> String {
    let name: String = product_name
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let name = if name.is_empty() { "PROD".to_string() } else { name };
    let size = if pack_size.is_empty() { "0" } else { pack_size };
    let flav = if flavour.is_empty() {
        String::new()
    } else {
        format!("_{}", flavour.to_uppercase())
    };
    format!("{name}_{size}{unit}_{}{flav}", pack_type.to_uppercase())
}

/// Regenerate a SKU's display code from its own pack attributes.
pub fn code_for_sku(product: &Product, sku: &Sku) -> String {
    sku_code(
        &product.name,
        &sku.pack_size,
        &sku.unit,
        &sku.pack_type,
        &sku.flavour,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
    Name,
    Format,
}

/// The product master header: a format dropdown (`None` = all formats), a
/// name search box, and a name/format sort with a direction toggle.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub format: Option<String>,
    pub search: String,
}

pub fn filter_and_sort_products(
    products: &[Product],
    filter: &ProductFilter,
    key: ProductSortKey,
    ascending: bool,
) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| match &filter.format {
            Some(format) if !format.is_empty() => p.format == *format,
            _ => true,
        })
        .filter(|p| contains_ci(&p.name, &filter.search))
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let (va, vb) = match key {
            ProductSortKey::Name => (&a.name, &b.name),
            ProductSortKey::Format => (&a.format, &b.format),
        };
        let ordering = va.to_lowercase().cmp(&vb.to_lowercase());
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
    out
}

pub fn skus_for_product<'a>(skus: &'a [Sku], product_id: &str) -> Vec<&'a Sku> {
    skus.iter().filter(|s| s.product_id == product_id).collect()
}
