//! Product aggregate implementation.

use chrono::{DateTime, Utc};
use common::ProductId;

use crate::discount::Discount;
use crate::money::Money;

use super::{ChangeTracker, Field, ProductError, ProductEvent, ProductStatus};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Product aggregate root.
///
/// Mutating methods never touch `self`. Each returns a [`Transition`]
/// describing the next state, the fields it changed and the event it emitted,
/// which a [`TrackedProduct`] then records.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    category: String,
    base_price: Money,
    discount: Option<Discount>,
    status: ProductStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a new draft product.
    pub fn create(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        base_price: Money,
        now: DateTime<Utc>,
    ) -> Result<TrackedProduct, ProductError> {
        let name = name.into();
        let description = description.into();
        let category = category.into();

        validate_name(&name)?;
        validate_category(&category)?;
        if !base_price.is_positive() {
            return Err(ProductError::ZeroPrice);
        }

        let event = ProductEvent::product_created(
            id.clone(),
            &name,
            &description,
            &category,
            base_price.clone(),
            now,
        );
        let product = Product {
            id,
            name,
            description,
            category,
            base_price,
            discount: None,
            status: ProductStatus::Draft,
            created_at: now,
            updated_at: now,
            archived_at: None,
        };

        Ok(TrackedProduct {
            product,
            is_new: true,
            changes: ChangeTracker::new(),
            events: vec![event],
        })
    }

    /// Rebuilds a product from persisted state without validation or events.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProductId,
        name: String,
        description: String,
        category: String,
        base_price: Money,
        discount: Option<Discount>,
        status: ProductStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        archived_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            category,
            base_price,
            discount,
            status,
            created_at,
            updated_at,
            archived_at,
        }
    }

    // -- Queries --

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn base_price(&self) -> &Money {
        &self.base_price
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn is_archived(&self) -> bool {
        self.status == ProductStatus::Archived
    }

    /// Returns the base price, discounted if a discount is valid at `now`.
    pub fn effective_price(&self, now: DateTime<Utc>) -> Money {
        match &self.discount {
            Some(discount) if discount.is_valid_at(now) => discount.apply(&self.base_price),
            _ => self.base_price.clone(),
        }
    }

    pub fn has_active_discount(&self, now: DateTime<Utc>) -> bool {
        self.discount
            .as_ref()
            .is_some_and(|discount| discount.is_valid_at(now))
    }

    // -- Commands --

    /// Changes name, description and category.
    ///
    /// Only fields whose value differs are marked dirty; when nothing differs
    /// the product is returned untouched and no event is emitted.
    pub fn update(
        &self,
        name: &str,
        description: &str,
        category: &str,
        now: DateTime<Utc>,
    ) -> Result<Transition, ProductError> {
        if self.is_archived() {
            return Err(ProductError::CannotUpdateArchived);
        }
        validate_name(name)?;
        validate_category(category)?;

        let mut next = self.clone();
        let mut changes = ChangeTracker::new();

        if self.name != name {
            next.name = name.to_string();
            changes.mark_dirty(Field::Name);
        }
        if self.description != description {
            next.description = description.to_string();
            changes.mark_dirty(Field::Description);
        }
        if self.category != category {
            next.category = category.to_string();
            changes.mark_dirty(Field::Category);
        }

        if !changes.has_changes() {
            return Ok(Transition::unchanged(next));
        }

        next.updated_at = now;
        let event = ProductEvent::product_updated(
            self.id.clone(),
            &next.name,
            &next.description,
            &next.category,
            now,
        );
        Ok(Transition::new(next, changes, event))
    }

    pub fn activate(&self, now: DateTime<Utc>) -> Result<Transition, ProductError> {
        match self.status {
            ProductStatus::Archived => return Err(ProductError::CannotActivateArchived),
            ProductStatus::Active => return Err(ProductError::AlreadyActive),
            ProductStatus::Draft | ProductStatus::Inactive => {}
        }

        let next = self.with_status(ProductStatus::Active, now);
        let event = ProductEvent::product_activated(self.id.clone(), now);
        Ok(Transition::new(next, [Field::Status].into_iter().collect(), event))
    }

    pub fn deactivate(&self, now: DateTime<Utc>) -> Result<Transition, ProductError> {
        match self.status {
            ProductStatus::Archived => return Err(ProductError::CannotDeactivateArchived),
            ProductStatus::Inactive => return Err(ProductError::AlreadyInactive),
            ProductStatus::Draft | ProductStatus::Active => {}
        }

        let next = self.with_status(ProductStatus::Inactive, now);
        let event = ProductEvent::product_deactivated(self.id.clone(), now);
        Ok(Transition::new(next, [Field::Status].into_iter().collect(), event))
    }

    /// Archives the product. Active products must be deactivated first.
    pub fn archive(&self, now: DateTime<Utc>) -> Result<Transition, ProductError> {
        match self.status {
            ProductStatus::Archived => return Err(ProductError::AlreadyArchived),
            ProductStatus::Active => return Err(ProductError::MustDeactivateFirst),
            ProductStatus::Draft | ProductStatus::Inactive => {}
        }

        let mut next = self.with_status(ProductStatus::Archived, now);
        next.archived_at = Some(now);
        let event = ProductEvent::product_archived(self.id.clone(), now);
        Ok(Transition::new(
            next,
            [Field::Status, Field::ArchivedAt].into_iter().collect(),
            event,
        ))
    }

    /// Attaches `discount`, replacing any existing one.
    ///
    /// Future-dated discounts are accepted so they can be scheduled ahead of
    /// their start.
    pub fn apply_discount(
        &self,
        discount: Discount,
        now: DateTime<Utc>,
    ) -> Result<Transition, ProductError> {
        if !self.status.can_apply_discount() {
            return Err(ProductError::NotActive);
        }
        if !discount.is_valid_at(now) && !discount.has_started(now) && discount.is_expired(now) {
            return Err(ProductError::DiscountExpired);
        }

        let event = ProductEvent::discount_applied(self.id.clone(), &discount, now);
        let mut next = self.clone();
        next.discount = Some(discount);
        next.updated_at = now;
        Ok(Transition::new(
            next,
            [Field::Discount].into_iter().collect(),
            event,
        ))
    }

    pub fn remove_discount(&self, now: DateTime<Utc>) -> Result<Transition, ProductError> {
        if self.discount.is_none() {
            return Err(ProductError::NoDiscountToRemove);
        }

        let mut next = self.clone();
        next.discount = None;
        next.updated_at = now;
        let event = ProductEvent::discount_removed(self.id.clone(), now);
        Ok(Transition::new(
            next,
            [Field::Discount].into_iter().collect(),
            event,
        ))
    }

    fn with_status(&self, status: ProductStatus, now: DateTime<Utc>) -> Product {
        let mut next = self.clone();
        next.status = status;
        next.updated_at = now;
        next
    }
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ProductError::NameTooLong {
            length,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ProductError> {
    if category.trim().is_empty() {
        return Err(ProductError::EmptyCategory);
    }
    let length = category.chars().count();
    if length > MAX_CATEGORY_LENGTH {
        return Err(ProductError::CategoryTooLong {
            length,
            max: MAX_CATEGORY_LENGTH,
        });
    }
    Ok(())
}

/// Outcome of one product command.
#[derive(Debug, Clone)]
pub struct Transition {
    product: Product,
    changes: ChangeTracker,
    event: Option<ProductEvent>,
}

impl Transition {
    fn new(product: Product, changes: ChangeTracker, event: ProductEvent) -> Self {
        Self {
            product,
            changes,
            event: Some(event),
        }
    }

    fn unchanged(product: Product) -> Self {
        Self {
            product,
            changes: ChangeTracker::new(),
            event: None,
        }
    }

    /// The product state after the command.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Fields the command modified.
    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// The event the command emitted, if it changed anything.
    pub fn event(&self) -> Option<&ProductEvent> {
        self.event.as_ref()
    }

    pub fn into_parts(self) -> (Product, ChangeTracker, Option<ProductEvent>) {
        (self.product, self.changes, self.event)
    }
}

/// A product together with the changes and events accumulated since it was
/// created or loaded.
#[derive(Debug, Clone)]
pub struct TrackedProduct {
    product: Product,
    is_new: bool,
    changes: ChangeTracker,
    events: Vec<ProductEvent>,
}

impl TrackedProduct {
    /// Wraps a product loaded from storage: not new, clean, no events.
    pub fn loaded(product: Product) -> Self {
        Self {
            product,
            is_new: false,
            changes: ChangeTracker::new(),
            events: Vec::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn id(&self) -> &ProductId {
        self.product.id()
    }

    /// True until the product has been persisted once.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Events in emission order.
    pub fn events(&self) -> &[ProductEvent] {
        &self.events
    }

    /// Folds a transition into the tracked state.
    pub fn record(&mut self, transition: Transition) {
        let (product, changes, event) = transition.into_parts();
        self.product = product;
        self.changes.merge(&changes);
        self.events.extend(event);
    }

    /// Runs a command against the current product and records its outcome.
    pub fn execute<F>(&mut self, command: F) -> Result<(), ProductError>
    where
        F: FnOnce(&Product) -> Result<Transition, ProductError>,
    {
        let transition = command(&self.product)?;
        self.record(transition);
        Ok(())
    }

    /// Clears tracked state once the changes have been committed.
    pub fn mark_persisted(&mut self) {
        self.is_new = false;
        self.changes.reset();
        self.events.clear();
    }
}
