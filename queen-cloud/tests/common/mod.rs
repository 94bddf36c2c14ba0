//! Shared fixtures for integration tests (in-memory store, no database)

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use queen_cloud::db::{MemoryStore, Store};
use queen_cloud::services::{inventory, orders, productions};
use queen_cloud::{AppState, Config};
use shared::models::{
    CustomerOrder, HiveCreate, OrderCreate, ProductionBatch, ProductionCreate, StockCreate,
    StockPackage,
};
use shared::util::today;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn state() -> AppState {
    let config = Config::in_memory(JWT_SECRET);
    AppState::with_store(&config, Arc::new(MemoryStore::new()))
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub fn order_payload(customer: &str, transfer_in_days: i64) -> OrderCreate {
    OrderCreate {
        customer_name: customer.to_string(),
        number_of_cells: 20,
        delivery_date: days_from_today(transfer_in_days + 16),
        larvae_transfer_date: days_from_today(transfer_in_days),
        status: None,
    }
}

pub async fn order(store: &dyn Store, owner: Uuid, customer: &str) -> CustomerOrder {
    orders::create(store, owner, order_payload(customer, 3))
        .await
        .unwrap()
}

pub fn batch_payload(hives: &[&str]) -> ProductionCreate {
    ProductionCreate {
        transfer_date: today(),
        larvae_transferred: 60,
        accepted_cells: None,
        acceptance_date: None,
        cells_produced: 0,
        order_id: None,
        notes: None,
        status: None,
        hives: hives
            .iter()
            .map(|h| HiveCreate {
                hive_name: h.to_string(),
            })
            .collect(),
    }
}

pub async fn batch(store: &dyn Store, owner: Uuid) -> ProductionBatch {
    productions::create(store, owner, batch_payload(&["H1"]))
        .await
        .unwrap()
}

pub async fn package(
    store: &dyn Store,
    owner: Uuid,
    total_cells: i32,
    expires_in_days: i64,
) -> StockPackage {
    let batch = batch(store, owner).await;
    inventory::create_package(
        store,
        owner,
        StockCreate {
            batch_id: batch.id,
            production_date: today(),
            total_cells,
            expiration_date: days_from_today(expires_in_days),
        },
    )
    .await
    .unwrap()
}
