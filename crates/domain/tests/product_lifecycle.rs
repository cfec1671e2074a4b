//! Integration tests for the Product aggregate.
//!
//! These tests drive a product through its whole lifecycle using only the
//! public API, checking status, change tracking and the emitted event stream.

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::ProductId;
use domain::{
    Discount, DomainError, DomainEvent, ErrorKind, Field, Money, Product, ProductError,
    ProductEvent, ProductStatus, TrackedProduct,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 29, 8, 0, 0).unwrap()
}

fn create(name: &str, price: Money) -> TrackedProduct {
    Product::create(ProductId::generate(), name, "desc", "Electronics", price, t0()).unwrap()
}

mod full_lifecycle {
    use super::*;

    #[test]
    fn create_activate_discount_remove_archive() {
        let mut tracked = create("Headphones", Money::new(1999, 100).unwrap());
        let discount = Discount::new(20, t0(), t0() + Duration::days(3)).unwrap();

        tracked.execute(|p| p.activate(t0())).unwrap();
        tracked
            .execute(|p| p.apply_discount(discount.clone(), t0()))
            .unwrap();
        assert_eq!(
            tracked.product().effective_price(t0() + Duration::hours(1)),
            Money::new(1999 * 80, 100 * 100).unwrap()
        );

        tracked.execute(|p| p.remove_discount(t0())).unwrap();
        assert_eq!(
            tracked.product().effective_price(t0() + Duration::hours(1)),
            Money::new(1999, 100).unwrap()
        );

        tracked.execute(|p| p.deactivate(t0())).unwrap();
        tracked.execute(|p| p.archive(t0())).unwrap();

        let types: Vec<_> = tracked.events().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "product.created",
                "product.activated",
                "product.discount_applied",
                "product.discount_removed",
                "product.deactivated",
                "product.archived",
            ]
        );
        assert!(tracked.is_new());
        assert_eq!(tracked.product().status(), ProductStatus::Archived);
        assert!(tracked.product().archived_at().is_some());
    }

    #[test]
    fn every_event_carries_the_aggregate_id() {
        let mut tracked = create("Mouse", Money::new(25, 1).unwrap());
        tracked.execute(|p| p.activate(t0())).unwrap();
        tracked
            .execute(|p| p.update("Mouse v2", "desc", "Electronics", t0()))
            .unwrap();

        let id = tracked.id().as_str().to_string();
        assert!(tracked.events().iter().all(|e| e.aggregate_id() == id));
    }

    #[test]
    fn archived_at_set_only_when_archived() {
        let mut tracked = create("Cable", Money::new(5, 1).unwrap());
        let check = |t: &TrackedProduct| {
            assert_eq!(
                t.product().archived_at().is_some(),
                t.product().status() == ProductStatus::Archived
            );
        };

        check(&tracked);
        tracked.execute(|p| p.activate(t0())).unwrap();
        check(&tracked);
        tracked.execute(|p| p.deactivate(t0())).unwrap();
        check(&tracked);
        tracked.execute(|p| p.archive(t0())).unwrap();
        check(&tracked);
    }
}

mod loaded_products {
    use super::*;

    fn reconstituted(status: ProductStatus) -> TrackedProduct {
        TrackedProduct::loaded(Product::reconstitute(
            ProductId::new("existing"),
            "Lamp".to_string(),
            "Desk lamp".to_string(),
            "Home".to_string(),
            Money::new(3450, 100).unwrap(),
            None,
            status,
            t0(),
            t0(),
            None,
        ))
    }

    #[test]
    fn reconstituted_product_is_clean() {
        let tracked = reconstituted(ProductStatus::Active);
        assert!(!tracked.is_new());
        assert!(!tracked.changes().has_changes());
        assert!(tracked.events().is_empty());
    }

    #[test]
    fn update_with_partial_changes() {
        let mut tracked = reconstituted(ProductStatus::Inactive);
        tracked
            .execute(|p| p.update("Lamp", "Floor lamp", "Lighting", t0()))
            .unwrap();

        assert_eq!(
            tracked.changes().dirty_fields(),
            vec![Field::Description, Field::Category]
        );
        assert!(matches!(
            tracked.events(),
            [ProductEvent::ProductUpdated(data)] if data.description == "Floor lamp"
        ));
    }

    #[test]
    fn elapsed_discount_is_stored_but_never_active() {
        let mut tracked = reconstituted(ProductStatus::Active);
        let past = Discount::new(30, t0() - Duration::days(10), t0() - Duration::days(5)).unwrap();
        tracked.execute(|p| p.apply_discount(past, t0())).unwrap();

        assert!(tracked.product().discount().is_some());
        assert!(!tracked.product().has_active_discount(t0()));
        assert_eq!(
            tracked.product().effective_price(t0()),
            Money::new(3450, 100).unwrap()
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn errors_classify_by_taxonomy() {
        let validation: DomainError = Money::new(1, 0).unwrap_err().into();
        assert_eq!(validation.kind(), ErrorKind::Validation);

        let mut tracked = create("Speaker", Money::new(80, 1).unwrap());
        let conflict: DomainError = tracked
            .execute(|p| p.remove_discount(t0()))
            .unwrap_err()
            .into();
        assert_eq!(conflict.kind(), ErrorKind::BusinessRule);
        assert_eq!(conflict, DomainError::Product(ProductError::NoDiscountToRemove));
    }
}
