//! Product service providing one entry point per catalog use case.

use std::sync::Arc;

use common::{ProductId, SharedClock};
use domain::{Discount, Money, Product, Transition};
use store::{CatalogStore, Committer};

use crate::commands::{
    ActivateProduct, ApplyDiscount, ArchiveProduct, CreateProduct, DeactivateProduct,
    RemoveDiscount, UpdateProduct,
};
use crate::error::{CatalogError, ErrorCategory, Result};
use crate::handler::{CommandHandler, CommandResult};

/// Service for managing products.
///
/// Wraps the command handler and reports a failure metric for every rejected
/// or failed command.
pub struct ProductService<S> {
    handler: CommandHandler<S>,
}

impl<S> ProductService<S>
where
    S: CatalogStore + Clone + 'static,
{
    /// Creates a service committing directly to `store`.
    pub fn new(store: S, clock: SharedClock) -> Self {
        Self {
            handler: CommandHandler::new(store, clock),
        }
    }

    /// Creates a service with a custom committer.
    pub fn with_committer(store: S, committer: Arc<dyn Committer>, clock: SharedClock) -> Self {
        Self {
            handler: CommandHandler::with_committer(store, committer, clock),
        }
    }
}

impl<S: CatalogStore> ProductService<S> {
    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S> {
        &self.handler
    }

    /// Creates a draft product and returns its new id.
    #[tracing::instrument(skip(self))]
    pub async fn create_product(&self, cmd: CreateProduct) -> Result<ProductId> {
        let result = async {
            let price = Money::new(cmd.price_numerator, cmd.price_denominator)?;
            let mut tracked = Product::create(
                ProductId::generate(),
                cmd.name,
                cmd.description,
                cmd.category,
                price,
                self.handler.now(),
            )?;
            self.handler.save(&mut tracked).await?;
            Ok::<_, CatalogError>(tracked.id().clone())
        }
        .await;

        if let Ok(product_id) = &result {
            tracing::info!(%product_id, "product created");
        }
        track("create_product", result)
    }

    /// Changes a product's name, description and category.
    #[tracing::instrument(skip(self))]
    pub async fn update_product(&self, cmd: UpdateProduct) -> Result<()> {
        let result = self
            .handler
            .execute(&cmd.product_id, |product, now| {
                product.update(&cmd.name, &cmd.description, &cmd.category, now)
            })
            .await;
        finish("update_product", &cmd.product_id, result)
    }

    /// Activates a product.
    #[tracing::instrument(skip(self))]
    pub async fn activate_product(&self, cmd: ActivateProduct) -> Result<()> {
        let result = self
            .handler
            .execute(&cmd.product_id, |product, now| product.activate(now))
            .await;
        finish("activate_product", &cmd.product_id, result)
    }

    /// Deactivates a product.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_product(&self, cmd: DeactivateProduct) -> Result<()> {
        let result = self
            .handler
            .execute(&cmd.product_id, |product, now| product.deactivate(now))
            .await;
        finish("deactivate_product", &cmd.product_id, result)
    }

    /// Archives a product.
    #[tracing::instrument(skip(self))]
    pub async fn archive_product(&self, cmd: ArchiveProduct) -> Result<()> {
        let result = self
            .handler
            .execute(&cmd.product_id, |product, now| product.archive(now))
            .await;
        finish("archive_product", &cmd.product_id, result)
    }

    /// Attaches a discount to an active product.
    ///
    /// An unknown product is reported before the discount itself is checked.
    #[tracing::instrument(skip(self))]
    pub async fn apply_discount(&self, cmd: ApplyDiscount) -> Result<()> {
        let result = self
            .handler
            .execute(&cmd.product_id, |product, now| -> Result<Transition> {
                let discount = Discount::new(cmd.percentage, cmd.start, cmd.end)?;
                Ok(product.apply_discount(discount, now)?)
            })
            .await;
        finish("apply_discount", &cmd.product_id, result)
    }

    /// Removes a product's discount.
    #[tracing::instrument(skip(self))]
    pub async fn remove_discount(&self, cmd: RemoveDiscount) -> Result<()> {
        let result = self
            .handler
            .execute(&cmd.product_id, |product, now| product.remove_discount(now))
            .await;
        finish("remove_discount", &cmd.product_id, result)
    }
}

fn finish(
    command: &'static str,
    product_id: &ProductId,
    result: Result<CommandResult>,
) -> Result<()> {
    if let Ok(outcome) = &result {
        tracing::info!(
            %product_id,
            command,
            events = outcome.events.len(),
            "command executed"
        );
    }
    track(command, result).map(|_| ())
}

fn track<T>(command: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        log_failure(command, err);
        metrics::counter!("catalog_commands_failed_total", "command" => command).increment(1);
    }
    result
}

fn log_failure(command: &'static str, err: &CatalogError) {
    match err.kind() {
        ErrorCategory::Infrastructure => {
            tracing::error!(command, error = %err, "command failed");
        }
        _ => tracing::warn!(command, error = %err, "command rejected"),
    }
}
