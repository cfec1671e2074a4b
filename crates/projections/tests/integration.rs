//! Integration tests: ProductService commands → stored rows → ProductQueries.

use std::sync::Arc;

use catalog::{
    ActivateProduct, ApplyDiscount, ArchiveProduct, CreateProduct, DeactivateProduct,
    ProductService, UpdateProduct,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{FixedClock, ProductId};
use domain::ProductStatus;
use projections::{Pagination, PriceView, ProductListFilter, ProductQueries};
use store::InMemoryCatalogStore;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Service and queries over one store, each with its own clock.
fn setup() -> (
    ProductService<InMemoryCatalogStore>,
    ProductQueries<InMemoryCatalogStore>,
    FixedClock,
    FixedClock,
) {
    let store = InMemoryCatalogStore::new();
    let write_clock = FixedClock::new(t0());
    let read_clock = FixedClock::new(t0());
    let service = ProductService::new(store.clone(), Arc::new(write_clock.clone()));
    let queries = ProductQueries::new(store, Arc::new(read_clock.clone()));
    (service, queries, write_clock, read_clock)
}

async fn create(
    service: &ProductService<InMemoryCatalogStore>,
    name: &str,
    category: &str,
) -> ProductId {
    service
        .create_product(CreateProduct::new(name, "", category, 1999, 100))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_discount_visible_only_inside_its_window() {
    let (service, queries, _, read_clock) = setup();
    let id = create(&service, "Desk Lamp", "lighting").await;
    service
        .activate_product(ActivateProduct::new(id.clone()))
        .await
        .unwrap();
    service
        .apply_discount(ApplyDiscount::new(
            id.clone(),
            20,
            t0() + Duration::days(1),
            t0() + Duration::days(2),
        ))
        .await
        .unwrap();

    let before = queries.get_product(&id).await.unwrap();
    assert!(!before.discount_active);
    assert_eq!(before.effective_price, before.base_price);

    read_clock.advance(Duration::days(1));
    let during = queries.get_product(&id).await.unwrap();
    assert!(during.discount_active);
    assert_eq!(
        during.effective_price,
        PriceView {
            numerator: 1999 * 80,
            denominator: 10000
        }
    );

    read_clock.advance(Duration::days(2));
    let after = queries.get_product(&id).await.unwrap();
    assert!(!after.discount_active);
    assert_eq!(after.discount.map(|d| d.percentage), Some(20));
}

#[tokio::test]
async fn test_listing_reflects_lifecycle() {
    let (service, queries, write_clock, _) = setup();

    let mut ids = Vec::new();
    for name in ["Hammer", "Saw", "Drill", "Wrench", "Level"] {
        write_clock.advance(Duration::minutes(1));
        ids.push(create(&service, name, "tools").await);
    }
    for id in &ids[..4] {
        service
            .activate_product(ActivateProduct::new(id.clone()))
            .await
            .unwrap();
    }
    service
        .deactivate_product(DeactivateProduct::new(ids[3].clone()))
        .await
        .unwrap();
    service
        .archive_product(ArchiveProduct::new(ids[4].clone()))
        .await
        .unwrap();

    let active = ProductListFilter::new().category("tools").active_only();
    let page = queries
        .list_products(&active, Pagination::new(Some(2), 0))
        .await
        .unwrap();
    assert_eq!(page.total_count, 3);
    assert_eq!(page.products.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.products[0].name, "Drill");

    let last = queries
        .list_products(&active, Pagination::new(Some(2), 2))
        .await
        .unwrap();
    assert_eq!(last.products.len(), 1);
    assert!(!last.has_more);

    let visible = queries
        .list_products(&ProductListFilter::new(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(visible.total_count, 4);

    let archived = queries
        .list_products(
            &ProductListFilter::new().status(ProductStatus::Archived),
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(archived.products.len(), 1);
    assert_eq!(archived.products[0].id, ids[4]);
    assert!(archived.products[0].archived_at.is_some());

    assert_eq!(queries.count_by_category("tools").await.unwrap(), 4);
}

#[tokio::test]
async fn test_update_is_visible_to_queries() {
    let (service, queries, write_clock, _) = setup();
    let id = create(&service, "Lamp", "lighting").await;

    write_clock.advance(Duration::hours(1));
    service
        .update_product(UpdateProduct::new(
            id.clone(),
            "Floor Lamp",
            "Tall",
            "home",
        ))
        .await
        .unwrap();

    let view = queries.get_product(&id).await.unwrap();
    assert_eq!(view.name, "Floor Lamp");
    assert_eq!(view.category, "home");
    assert_eq!(view.created_at, t0());
    assert_eq!(view.updated_at, t0() + Duration::hours(1));
    assert_eq!(queries.count_by_category("lighting").await.unwrap(), 0);
    assert_eq!(queries.count_by_category("home").await.unwrap(), 1);
}
