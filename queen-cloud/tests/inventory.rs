//! Inventory engine: package creation, sells, listings

mod common;

use std::sync::Arc;

use common::{days_from_today, package, state};
use queen_cloud::db::{MemoryStore, Store};
use queen_cloud::services::inventory;
use shared::error::ErrorCode;
use shared::models::{SaleCreate, StockCreate};
use shared::util::today;
use uuid::Uuid;

fn sale(customer: &str, cells: i32) -> SaleCreate {
    SaleCreate {
        customer_name: customer.to_string(),
        cells_sold: cells,
        sale_date: None,
    }
}

#[tokio::test]
async fn new_package_has_every_cell_available() {
    let state = state();
    let owner = Uuid::new_v4();
    let pkg = package(state.store(), owner, 50, 10).await;
    assert_eq!(pkg.available_cells, 50);
    assert_eq!(pkg.sold_cells, 0);
    assert!(!pkg.is_expired);
}

#[tokio::test]
async fn package_requires_positive_cells_and_own_batch() {
    let state = state();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();
    let foreign = common::batch(state.store(), other).await;

    let err = inventory::create_package(
        state.store(),
        owner,
        StockCreate {
            batch_id: foreign.id,
            production_date: today(),
            total_cells: 10,
            expiration_date: days_from_today(5),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::StockBatchInvalid));

    let own = common::batch(state.store(), owner).await;
    let err = inventory::create_package(
        state.store(),
        owner,
        StockCreate {
            batch_id: own.id,
            production_date: today(),
            total_cells: 0,
            expiration_date: days_from_today(5),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidCellCount));
}

#[tokio::test]
async fn sell_moves_cells_and_records_the_sale() {
    let state = state();
    let owner = Uuid::new_v4();
    let pkg = package(state.store(), owner, 30, 10).await;

    let updated = inventory::sell(state.store(), pkg.id, owner, sale("Finca Sol", 12))
        .await
        .unwrap();
    assert_eq!(updated.available_cells, 18);
    assert_eq!(updated.sold_cells, 12);
    assert!(!updated.is_expired);

    let sales = inventory::sales_for(state.store(), pkg.id, owner).await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].cells_sold, 12);
    assert_eq!(sales[0].sale_date, today());
}

#[tokio::test]
async fn selling_the_last_cell_depletes_the_package() {
    let state = state();
    let owner = Uuid::new_v4();
    let pkg = package(state.store(), owner, 5, 10).await;

    let updated = inventory::sell(state.store(), pkg.id, owner, sale("Apiario Norte", 5))
        .await
        .unwrap();
    assert_eq!(updated.available_cells, 0);
    assert!(updated.is_expired);

    let err = inventory::sell(state.store(), pkg.id, owner, sale("Apiario Norte", 1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InsufficientStock));

    let active = inventory::list_active(state.store(), owner).await.unwrap();
    assert!(active.is_empty());
    let all = inventory::list_all(state.store(), owner).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn oversell_and_bad_counts_leave_the_package_untouched() {
    let state = state();
    let owner = Uuid::new_v4();
    let pkg = package(state.store(), owner, 8, 10).await;

    let err = inventory::sell(state.store(), pkg.id, owner, sale("X", 9))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InsufficientStock));

    for cells in [0, -3] {
        let err = inventory::sell(state.store(), pkg.id, owner, sale("X", cells))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidCellCount));
    }

    let after = inventory::get(state.store(), pkg.id, owner).await.unwrap();
    assert_eq!(after.available_cells, 8);
    assert_eq!(after.sold_cells, 0);
    assert!(inventory::sales_for(state.store(), pkg.id, owner)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn packages_are_invisible_to_other_owners() {
    let state = state();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let pkg = package(state.store(), owner, 10, 10).await;

    let err = inventory::sell(state.store(), pkg.id, intruder, sale("X", 1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::StockPackageNotFound));
    let err = inventory::sales_for(state.store(), pkg.id, intruder)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::StockPackageNotFound));
    assert!(inventory::list_all(state.store(), intruder)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn date_expired_packages_leave_the_active_list() {
    let state = state();
    let owner = Uuid::new_v4();
    let fresh = package(state.store(), owner, 10, 3).await;
    let stale = package(state.store(), owner, 10, -1).await;

    let active = inventory::list_active(state.store(), owner).await.unwrap();
    assert_eq!(active.iter().map(|p| p.id).collect::<Vec<_>>(), vec![fresh.id]);

    let all = inventory::list_all(state.store(), owner).await.unwrap();
    let stale_read = all.iter().find(|p| p.id == stale.id).unwrap();
    assert!(stale_read.is_expired);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sells_never_oversell() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let owner = Uuid::new_v4();
    let pkg = package(store.as_ref(), owner, 10, 10).await;

    let handles: Vec<_> = (0..25)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                inventory::sell(store.as_ref(), pkg.id, owner, sale(&format!("buyer-{i}"), 1)).await
            })
        })
        .collect();

    let mut succeeded = 0;
    for result in futures::future::join_all(handles).await {
        match result.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert_eq!(e.code(), Some(ErrorCode::InsufficientStock)),
        }
    }
    assert_eq!(succeeded, 10);

    let after = inventory::get(store.as_ref(), pkg.id, owner).await.unwrap();
    assert_eq!(after.available_cells, 0);
    assert_eq!(after.sold_cells, 10);
    assert_eq!(after.available_cells + after.sold_cells, after.total_cells);
    let sales = inventory::sales_for(store.as_ref(), pkg.id, owner).await.unwrap();
    assert_eq!(sales.len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn two_simultaneous_sells_of_six_on_ten() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let owner = Uuid::new_v4();
    let pkg = package(store.as_ref(), owner, 10, 10).await;

    let handles: Vec<_> = ["Finca Sol", "Finca Luna"]
        .into_iter()
        .map(|buyer| {
            let store = store.clone();
            tokio::spawn(async move {
                inventory::sell(store.as_ref(), pkg.id, owner, sale(buyer, 6)).await
            })
        })
        .collect();

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();
    let sold: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0].available_cells, 4);

    let refused = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(refused.code(), Some(ErrorCode::InsufficientStock));

    let after = inventory::get(store.as_ref(), pkg.id, owner).await.unwrap();
    assert_eq!(after.available_cells, 4);
    assert_eq!(after.sold_cells, 6);
    assert_eq!(
        inventory::sales_for(store.as_ref(), pkg.id, owner)
            .await
            .unwrap()
            .len(),
        1
    );
}
