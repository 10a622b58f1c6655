//! End-to-end directory scenario: seed the store, let the composition root
//! ingest snapshots, then drive the aggregation engine the way the client
//! list view does.

use std::sync::{Arc, Mutex};

use biowearth::directory::{
    apply_filters_and_sort, compute_rows, RowFilters, SortDirection, SortKey, SortSpec,
};
use biowearth::state::{attach_store, AppState, Snapshots};
use biowearth::store::{collections, MemoryStore};
use biowearth::types::CompanyRole;

fn seeded_state() -> (Arc<AppState>, MemoryStore) {
    let state = Arc::new(AppState {
        config: Mutex::new(None),
        snapshots: Mutex::new(Snapshots::default()),
    });
    let store = MemoryStore::new();
    attach_store(&state, &store);

    // Two products in different formats, one SKU each.
    store
        .add(
            collections::PRODUCTS,
            serde_json::json!({"name": "Ashwagandha", "format": "Powder"}),
        )
        .unwrap();
    store
        .add(
            collections::PRODUCTS,
            serde_json::json!({"name": "Tulsi Drops", "format": "Liquid"}),
        )
        .unwrap();
    let products = store.snapshot(collections::PRODUCTS);
    store
        .add(
            collections::SKUS,
            serde_json::json!({
                "productId": products[0].id,
                "name": "ASHWAGANDHA_60pcs_JAR",
                "packSize": "60", "unit": "pcs", "packType": "Jar"
            }),
        )
        .unwrap();
    store
        .add(
            collections::SKUS,
            serde_json::json!({
                "productId": products[1].id,
                "name": "TULSIDROPS_500ml_BOTTLE",
                "packSize": "500", "unit": "ml", "packType": "Bottle"
            }),
        )
        .unwrap();

    // C1 active via website, C2 a quiet lead.
    store
        .add(
            collections::CLIENTS,
            serde_json::json!({
                "companyName": "Verdant Naturals",
                "status": "Active",
                "leadSource": "Website"
            }),
        )
        .unwrap();
    store
        .add(
            collections::CLIENTS,
            serde_json::json!({
                "companyName": "Halcyon Foods",
                "status": "Lead",
                "leadSource": "Referral"
            }),
        )
        .unwrap();

    let clients = store.snapshot(collections::CLIENTS);
    let skus = store.snapshot(collections::SKUS);
    let c1 = clients[0].id.clone();

    // Two sent quotes for C1, one against each product; prices typed in as
    // strings the way the form widgets stored them.
    store
        .add(
            collections::QUOTES_SENT,
            serde_json::json!({
                "quoteId": "Q-1001",
                "clientId": c1,
                "skuId": skus[0].id,
                "sellingPrice": "100",
                "moq": 10,
                "status": "Active"
            }),
        )
        .unwrap();
    store
        .add(
            collections::QUOTES_SENT,
            serde_json::json!({
                "quoteId": "Q-1002",
                "clientId": c1,
                "skuId": skus[1].id,
                "sellingPrice": 50,
                "moq": "4",
                "status": "Draft"
            }),
        )
        .unwrap();

    // One open task against C1.
    store
        .add(
            collections::TASKS,
            serde_json::json!({
                "title": "Send revised quote",
                "status": "Pending",
                "dueDate": "2024-01-01",
                "relatedId": c1
            }),
        )
        .unwrap();

    (state, store)
}

#[test]
fn client_directory_rows_filter_and_sort() {
    let (state, _store) = seeded_state();
    let snaps = state.snapshots();

    let rows = compute_rows(
        CompanyRole::Client,
        &snaps.clients,
        &snaps.products,
        &snaps.skus,
        &snaps.quotes_sent,
        &snaps.tasks,
    );
    assert_eq!(rows.len(), 2);

    let c1 = rows
        .iter()
        .find(|r| r.company.company_name == "Verdant Naturals")
        .unwrap();
    assert_eq!(c1.formats, vec!["Liquid", "Powder"]);
    assert_eq!(c1.sales_potential, 1200.0);
    assert_eq!(c1.open_task_count, 1);
    assert_eq!(
        c1.next_task.as_ref().unwrap().due_date.as_deref(),
        Some("2024-01-01")
    );

    // Status filter keeps C1, then removes it.
    let active = apply_filters_and_sort(
        rows.clone(),
        &RowFilters {
            statuses: vec!["Active".to_string()],
            ..RowFilters::default()
        },
        SortSpec::default(),
    );
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].company.company_name, "Verdant Naturals");

    let none = apply_filters_and_sort(
        rows.clone(),
        &RowFilters {
            statuses: vec!["Churned".to_string()],
            ..RowFilters::default()
        },
        SortSpec::default(),
    );
    assert!(none.is_empty());

    // Busiest company first when sorting open tasks descending.
    let by_tasks = apply_filters_and_sort(
        rows,
        &RowFilters::default(),
        SortSpec {
            key: SortKey::OpenTaskCount,
            direction: SortDirection::Descending,
        },
    );
    assert_eq!(by_tasks[0].company.company_name, "Verdant Naturals");
    assert_eq!(by_tasks[1].company.company_name, "Halcyon Foods");
}

#[test]
fn rows_recompute_after_store_writes() {
    let (state, store) = seeded_state();

    // Completing the open task drains the row's task aggregates on the next
    // delivered snapshot.
    let task_id = store.snapshot(collections::TASKS)[0].id.clone();
    store
        .update(
            collections::TASKS,
            &task_id,
            serde_json::json!({"status": "Completed"}),
        )
        .unwrap();

    let snaps = state.snapshots();
    let rows = compute_rows(
        CompanyRole::Client,
        &snaps.clients,
        &snaps.products,
        &snaps.skus,
        &snaps.quotes_sent,
        &snaps.tasks,
    );
    let c1 = rows
        .iter()
        .find(|r| r.company.company_name == "Verdant Naturals")
        .unwrap();
    assert_eq!(c1.open_task_count, 0);
    assert!(c1.next_task.is_none());
}

#[test]
fn quote_before_sku_is_tolerated_then_resolves() {
    let state = Arc::new(AppState {
        config: Mutex::new(None),
        snapshots: Mutex::new(Snapshots::default()),
    });
    let store = MemoryStore::new();
    attach_store(&state, &store);

    store
        .add(
            collections::CLIENTS,
            serde_json::json!({"companyName": "Verdant Naturals", "status": "Active"}),
        )
        .unwrap();
    let c1 = store.snapshot(collections::CLIENTS)[0].id.clone();

    // The quote lands before the SKU it references exists.
    store
        .add(
            collections::QUOTES_SENT,
            serde_json::json!({
                "clientId": c1,
                "skuId": "sku-not-yet",
                "sellingPrice": 100,
                "moq": 10
            }),
        )
        .unwrap();

    let snaps = state.snapshots();
    let rows = compute_rows(
        CompanyRole::Client,
        &snaps.clients,
        &snaps.products,
        &snaps.skus,
        &snaps.quotes_sent,
        &snaps.tasks,
    );
    // Money still counts; the format contribution is simply absent.
    assert_eq!(rows[0].sales_potential, 1000.0);
    assert!(rows[0].formats.is_empty());
}
