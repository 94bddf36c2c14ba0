//! Order and production ledgers, report filters, dashboard rollups

mod common;

use common::{batch_payload, days_from_today, order, order_payload, package, state};
use queen_cloud::db::Store;
use queen_cloud::services::{dashboard, inventory, orders, productions, reports};
use shared::error::ErrorCode;
use shared::models::{
    AcceptanceUpdate, HiveCreate, OrderFilter, OrderUpdate, ProductionFilter, ProductionUpdate,
    SaleCreate,
};
use shared::util::today;
use uuid::Uuid;

#[tokio::test]
async fn orders_start_pending_and_stay_owner_scoped() {
    let state = state();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();
    let created = order(state.store(), owner, "Finca Sol").await;
    assert_eq!(created.status, "pending");

    let err = orders::get(state.store(), created.id, other).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::OrderNotFound));
    let err = orders::delete(state.store(), created.id, other).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::OrderNotFound));
    assert!(orders::list(state.store(), other).await.unwrap().is_empty());
    assert_eq!(orders::list(state.store(), owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn order_update_keeps_status_when_omitted() {
    let state = state();
    let owner = Uuid::new_v4();
    let created = order(state.store(), owner, "Finca Sol").await;

    let update = OrderUpdate {
        customer_name: "Finca Luna".into(),
        number_of_cells: 40,
        delivery_date: days_from_today(30),
        larvae_transfer_date: days_from_today(14),
        status: None,
    };
    let updated = orders::update(state.store(), created.id, owner, update)
        .await
        .unwrap();
    assert_eq!(updated.customer_name, "Finca Luna");
    assert_eq!(updated.number_of_cells, 40);
    assert_eq!(updated.status, "pending");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn blank_customer_name_is_rejected() {
    let state = state();
    let err = orders::create(state.store(), Uuid::new_v4(), order_payload("   ", 1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ValidationFailed));
}

#[tokio::test]
async fn batch_keeps_its_hives_and_replaces_them_on_update() {
    let state = state();
    let owner = Uuid::new_v4();
    let created = productions::create(state.store(), owner, batch_payload(&["H1", "H2"]))
        .await
        .unwrap();
    assert_eq!(created.status, "active");
    assert_eq!(created.hives.len(), 2);

    let fetched = productions::get(state.store(), created.id, owner).await.unwrap();
    let mut names: Vec<_> = fetched.hives.iter().map(|h| h.hive_name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["H1", "H2"]);

    let update = |hives: Option<Vec<HiveCreate>>| ProductionUpdate {
        transfer_date: today(),
        larvae_transferred: 70,
        accepted_cells: None,
        acceptance_date: None,
        cells_produced: 5,
        order_id: None,
        notes: Some("windy".into()),
        status: None,
        hives,
    };

    // omitted hive set is left alone
    let kept = productions::update(state.store(), created.id, owner, update(None))
        .await
        .unwrap();
    assert_eq!(kept.larvae_transferred, 70);
    assert_eq!(
        productions::get(state.store(), created.id, owner)
            .await
            .unwrap()
            .hives
            .len(),
        2
    );

    let replaced = update(Some(vec![HiveCreate {
        hive_name: "H9".into(),
    }]));
    productions::update(state.store(), created.id, owner, replaced)
        .await
        .unwrap();
    let fetched = productions::get(state.store(), created.id, owner).await.unwrap();
    assert_eq!(fetched.hives.len(), 1);
    assert_eq!(fetched.hives[0].hive_name, "H9");
    assert_eq!(fetched.status, "active");
}

#[tokio::test]
async fn batch_cannot_reference_a_foreign_order() {
    let state = state();
    let owner = Uuid::new_v4();
    let foreign = order(state.store(), Uuid::new_v4(), "Someone Else").await;

    let mut payload = batch_payload(&[]);
    payload.order_id = Some(foreign.id);
    let err = productions::create(state.store(), owner, payload)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ProductionOrderInvalid));
}

#[tokio::test]
async fn acceptance_can_be_recorded_again() {
    let state = state();
    let owner = Uuid::new_v4();
    let batch = common::batch(state.store(), owner).await;

    let first = productions::record_acceptance(
        state.store(),
        batch.id,
        owner,
        AcceptanceUpdate {
            accepted_cells: 40,
            acceptance_date: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(first.accepted_cells, Some(40));
    assert_eq!(first.acceptance_date, Some(today()));

    let second = productions::record_acceptance(
        state.store(),
        batch.id,
        owner,
        AcceptanceUpdate {
            accepted_cells: 38,
            acceptance_date: Some(days_from_today(-1)),
        },
    )
    .await
    .unwrap();
    assert_eq!(second.accepted_cells, Some(38));
    assert_eq!(second.acceptance_date, Some(days_from_today(-1)));

    let err = productions::record_acceptance(
        state.store(),
        batch.id,
        Uuid::new_v4(),
        AcceptanceUpdate {
            accepted_cells: 1,
            acceptance_date: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ProductionNotFound));
}

#[tokio::test]
async fn deleting_a_batch_removes_its_packages() {
    let state = state();
    let owner = Uuid::new_v4();
    let pkg = package(state.store(), owner, 10, 5).await;
    inventory::sell(
        state.store(),
        pkg.id,
        owner,
        SaleCreate {
            customer_name: "Finca Sol".into(),
            cells_sold: 2,
            sale_date: None,
        },
    )
    .await
    .unwrap();

    productions::delete(state.store(), pkg.batch_id, owner)
        .await
        .unwrap();

    let err = inventory::get(state.store(), pkg.id, owner).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::StockPackageNotFound));
    assert!(state.store().list_sales(pkg.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_order_detaches_its_batches() {
    let state = state();
    let owner = Uuid::new_v4();
    let created = order(state.store(), owner, "Finca Sol").await;
    let mut payload = batch_payload(&["H1"]);
    payload.order_id = Some(created.id);
    let linked = productions::create(state.store(), owner, payload)
        .await
        .unwrap();

    orders::delete(state.store(), created.id, owner).await.unwrap();

    let batch = productions::get(state.store(), linked.id, owner).await.unwrap();
    assert_eq!(batch.order_id, None);
}

#[tokio::test]
async fn report_filters_combine() {
    let state = state();
    let owner = Uuid::new_v4();
    order(state.store(), owner, "Finca Sol").await;
    let luna = order(state.store(), owner, "Apiario Luna").await;
    orders::update(
        state.store(),
        luna.id,
        owner,
        OrderUpdate {
            customer_name: luna.customer_name.clone(),
            number_of_cells: luna.number_of_cells,
            delivery_date: luna.delivery_date,
            larvae_transfer_date: luna.larvae_transfer_date,
            status: Some("delivered".into()),
        },
    )
    .await
    .unwrap();

    let by_name = OrderFilter {
        customer_name: Some("  LUNA ".into()),
        ..Default::default()
    };
    let found = reports::filter_orders(state.store(), owner, &by_name).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, luna.id);

    let by_status = OrderFilter {
        status: Some("pending".into()),
        start_date: Some(today()),
        end_date: Some(today()),
        ..Default::default()
    };
    let found = reports::filter_orders(state.store(), owner, &by_status).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].customer_name, "Finca Sol");

    let future = OrderFilter {
        start_date: Some(days_from_today(1)),
        ..Default::default()
    };
    assert!(reports::filter_orders(state.store(), owner, &future)
        .await
        .unwrap()
        .is_empty());

    common::batch(state.store(), owner).await;
    let active = ProductionFilter {
        status: Some("active".into()),
        end_date: Some(today()),
        ..Default::default()
    };
    assert_eq!(
        reports::filter_productions(state.store(), owner, &active)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn dashboard_rolls_up_the_owner_ledgers() {
    let state = state();
    let owner = Uuid::new_v4();

    // only the soon and later orders are upcoming; the past one is not
    orders::create(state.store(), owner, order_payload("Later", 9))
        .await
        .unwrap();
    orders::create(state.store(), owner, order_payload("Soon", 2))
        .await
        .unwrap();
    orders::create(state.store(), owner, order_payload("Past", -2))
        .await
        .unwrap();

    let soon = package(state.store(), owner, 10, 3).await;
    let far = package(state.store(), owner, 6, 30).await;
    package(state.store(), owner, 99, -1).await;
    inventory::sell(
        state.store(),
        far.id,
        owner,
        SaleCreate {
            customer_name: "Finca Sol".into(),
            cells_sold: 4,
            sale_date: None,
        },
    )
    .await
    .unwrap();

    // other owners never leak in
    package(state.store(), Uuid::new_v4(), 500, 2).await;

    let stats = dashboard::stats(state.store(), owner).await.unwrap();
    assert_eq!(stats.total_available_cells, 12);
    assert_eq!(stats.pending_orders, 3);
    assert_eq!(stats.expiring_stock, 1);
    assert_eq!(stats.total_sales_last_30_days, 4);

    let upcoming = dashboard::upcoming(state.store(), owner).await.unwrap();
    let names: Vec<_> = upcoming.iter().map(|o| o.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Soon", "Later"]);

    let expiring = dashboard::expiring(state.store(), owner).await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].id, soon.id);
}

#[tokio::test]
async fn dashboard_sales_window_and_expiry_horizon_are_inclusive() {
    let state = state();
    let owner = Uuid::new_v4();
    let stock = package(state.store(), owner, 100, 60).await;

    for (days_ago, cells) in [(0, 1), (30, 2), (31, 40)] {
        inventory::sell(
            state.store(),
            stock.id,
            owner,
            SaleCreate {
                customer_name: "Finca Sol".into(),
                cells_sold: cells,
                sale_date: Some(days_from_today(-days_ago)),
            },
        )
        .await
        .unwrap();
    }

    let edge = package(state.store(), owner, 5, 7).await;
    package(state.store(), owner, 5, 8).await;

    let stats = dashboard::stats(state.store(), owner).await.unwrap();
    assert_eq!(stats.total_sales_last_30_days, 3);
    assert_eq!(stats.expiring_stock, 1);
    assert_eq!(stats.total_available_cells, 57 + 5 + 5);

    let expiring = dashboard::expiring(state.store(), owner).await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].id, edge.id);
    assert_eq!(expiring[0].expiration_date, days_from_today(7));

    let sales = inventory::sales_for(state.store(), stock.id, owner)
        .await
        .unwrap();
    assert!(sales.iter().any(|s| s.sale_date == days_from_today(-31)));
}

#[tokio::test]
async fn upcoming_is_capped_and_includes_in_production_orders() {
    let state = state();
    let owner = Uuid::new_v4();

    for day in 1..=12 {
        orders::create(state.store(), owner, order_payload(&format!("Finca {day}"), day))
            .await
            .unwrap();
    }
    let first = orders::create(state.store(), owner, order_payload("Earliest", 0))
        .await
        .unwrap();
    orders::update(
        state.store(),
        first.id,
        owner,
        OrderUpdate {
            customer_name: first.customer_name.clone(),
            number_of_cells: first.number_of_cells,
            delivery_date: first.delivery_date,
            larvae_transfer_date: first.larvae_transfer_date,
            status: Some("in_production".into()),
        },
    )
    .await
    .unwrap();
    let delivered = orders::create(
        state.store(),
        owner,
        shared::models::OrderCreate {
            status: Some("delivered".into()),
            ..order_payload("Delivered", 0)
        },
    )
    .await
    .unwrap();

    let upcoming = dashboard::upcoming(state.store(), owner).await.unwrap();
    assert_eq!(upcoming.len(), 10);
    assert_eq!(upcoming[0].id, first.id);
    assert!(upcoming.iter().all(|o| o.id != delivered.id));
    assert!(
        upcoming
            .windows(2)
            .all(|w| w[0].larvae_transfer_date <= w[1].larvae_transfer_date)
    );
    assert_eq!(upcoming[9].customer_name, "Finca 9");
}
