//! Integration tests for the catalog write side.

use std::sync::Arc;

use async_trait::async_trait;
use catalog::{
    ActivateProduct, ApplyDiscount, ArchiveProduct, CatalogError, CreateProduct,
    DeactivateProduct, ProductService, RemoveDiscount, UpdateProduct,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{Clock, FixedClock, ProductId};
use domain::{DomainError, Money, ProductError, ProductStatus};
use store::{CatalogStore, CommitPlan, Committer, InMemoryCatalogStore, StoreError};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

struct Harness {
    service: ProductService<InMemoryCatalogStore>,
    store: InMemoryCatalogStore,
    clock: FixedClock,
}

impl Harness {
    fn new() -> Self {
        let store = InMemoryCatalogStore::new();
        let clock = FixedClock::new(t0());
        let service = ProductService::new(store.clone(), Arc::new(clock.clone()));
        Self {
            service,
            store,
            clock,
        }
    }

    async fn create_lamp(&self) -> ProductId {
        self.service
            .create_product(CreateProduct::new(
                "Desk Lamp",
                "Warm light",
                "lighting",
                1999,
                100,
            ))
            .await
            .unwrap()
    }

    fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn event_types(&self, id: &ProductId) -> Vec<String> {
        self.store
            .outbox_events_for(id.as_str())
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.event_type)
            .collect()
    }
}

struct RejectingCommitter;

#[async_trait]
impl Committer for RejectingCommitter {
    async fn commit(&self, _plan: CommitPlan) -> store::Result<()> {
        Err(StoreError::DuplicateKey {
            table: "products",
            key: "rejected".to_string(),
        })
    }
}

mod full_lifecycle {
    use super::*;

    #[tokio::test]
    async fn create_activate_discount_remove() {
        let h = Harness::new();
        let id = h.create_lamp().await;

        h.clock.advance(Duration::minutes(1));
        h.service
            .activate_product(ActivateProduct::new(id.clone()))
            .await
            .unwrap();

        h.clock.advance(Duration::minutes(1));
        h.service
            .apply_discount(ApplyDiscount::new(
                id.clone(),
                20,
                h.clock_now(),
                h.clock_now() + Duration::days(7),
            ))
            .await
            .unwrap();

        let loaded = h.service.handler().repository().get(&id).await.unwrap();
        assert_eq!(
            loaded.product().effective_price(h.clock_now()),
            Money::new(1999 * 80, 10000).unwrap()
        );

        h.service
            .remove_discount(RemoveDiscount::new(id.clone()))
            .await
            .unwrap();

        assert_eq!(
            h.event_types(&id).await,
            vec![
                "product.created",
                "product.activated",
                "product.discount_applied",
                "product.discount_removed",
            ]
        );

        let row = h.store.get_product(&id).await.unwrap().unwrap();
        assert_eq!(row.status, "active");
        assert!(row.discount.is_none());
        assert_eq!(row.created_at, t0());
        assert_eq!(row.updated_at, t0() + Duration::minutes(2));
    }

    #[tokio::test]
    async fn deactivate_then_archive() {
        let h = Harness::new();
        let id = h.create_lamp().await;
        h.service
            .activate_product(ActivateProduct::new(id.clone()))
            .await
            .unwrap();

        let err = h
            .service
            .archive_product(ArchiveProduct::new(id.clone()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Domain(DomainError::Product(ProductError::MustDeactivateFirst))
        ));

        h.service
            .deactivate_product(DeactivateProduct::new(id.clone()))
            .await
            .unwrap();
        h.clock.advance(Duration::hours(1));
        h.service
            .archive_product(ArchiveProduct::new(id.clone()))
            .await
            .unwrap();

        let row = h.store.get_product(&id).await.unwrap().unwrap();
        assert_eq!(row.status, ProductStatus::Archived.as_str());
        assert_eq!(row.archived_at, Some(t0() + Duration::hours(1)));

        let err = h
            .service
            .update_product(UpdateProduct::new(id.clone(), "New", "", "lighting"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Domain(DomainError::Product(ProductError::CannotUpdateArchived))
        ));
    }
}

mod updates {
    use super::*;

    #[tokio::test]
    async fn update_writes_new_values_and_event() {
        let h = Harness::new();
        let id = h.create_lamp().await;

        h.service
            .update_product(UpdateProduct::new(
                id.clone(),
                "Floor Lamp",
                "Tall",
                "lighting",
            ))
            .await
            .unwrap();

        let row = h.store.get_product(&id).await.unwrap().unwrap();
        assert_eq!(row.name, "Floor Lamp");
        assert_eq!(row.description, "Tall");

        let events = h.store.outbox_events_for(id.as_str()).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].payload["name"], "Floor Lamp");
    }

    #[tokio::test]
    async fn unchanged_update_writes_nothing() {
        let h = Harness::new();
        let id = h.create_lamp().await;
        let before = h.store.get_product(&id).await.unwrap().unwrap();

        h.clock.advance(Duration::hours(1));
        h.service
            .update_product(UpdateProduct::new(
                id.clone(),
                "Desk Lamp",
                "Warm light",
                "lighting",
            ))
            .await
            .unwrap();

        let after = h.store.get_product(&id).await.unwrap().unwrap();
        assert_eq!(before, after);
        assert_eq!(h.event_types(&id).await, vec!["product.created"]);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn rejected_commit_leaves_store_untouched() {
        let store = InMemoryCatalogStore::new();
        let service = ProductService::with_committer(
            store.clone(),
            Arc::new(RejectingCommitter),
            Arc::new(FixedClock::new(t0())),
        );

        let err = service
            .create_product(CreateProduct::new("Lamp", "", "lighting", 5, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Store(_)));
        assert_eq!(store.product_count().await, 0);
        assert_eq!(store.outbox_count().await, 0);
    }

    #[tokio::test]
    async fn business_rule_violation_writes_nothing() {
        let h = Harness::new();
        let id = h.create_lamp().await;

        let err = h
            .service
            .apply_discount(ApplyDiscount::new(
                id.clone(),
                10,
                t0(),
                t0() + Duration::days(1),
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Domain(DomainError::Product(ProductError::NotActive))
        ));
        assert_eq!(h.event_types(&id).await, vec!["product.created"]);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let h = Harness::new();

        let err = h
            .service
            .deactivate_product(DeactivateProduct::new(ProductId::new("ghost")))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(id) if id.as_str() == "ghost"));
    }
}
