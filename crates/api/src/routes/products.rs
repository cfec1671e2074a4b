//! Product command and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{
    ActivateProduct, ApplyDiscount, ArchiveProduct, CreateProduct, DeactivateProduct,
    RemoveDiscount, UpdateProduct,
};
use chrono::{DateTime, Utc};
use common::ProductId;
use domain::{MAX_DISCOUNT_PERCENTAGE, MIN_DISCOUNT_PERCENTAGE, ProductStatus};
use projections::{Pagination, PriceView, ProductListFilter, ProductPage, ProductView};
use serde::{Deserialize, Serialize};
use store::CatalogStore;

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MoneyBody {
    pub numerator: i64,
    pub denominator: i64,
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub base_price: Option<MoneyBody>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Deserialize)]
pub struct ApplyDiscountRequest {
    pub percentage: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub active_only: bool,
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

// -- Response types --

#[derive(Serialize)]
pub struct DiscountResponse {
    pub percentage: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub base_price: MoneyBody,
    pub effective_price: MoneyBody,
    pub discount: Option<DiscountResponse>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductResponse>,
    pub total_count: u64,
    pub has_more: bool,
}

#[derive(Serialize)]
pub struct ProductCreatedResponse {
    pub product_id: String,
}

#[derive(Serialize)]
pub struct CategoryCountResponse {
    pub category: String,
    pub count: u64,
}

impl From<PriceView> for MoneyBody {
    fn from(price: PriceView) -> Self {
        Self {
            numerator: price.numerator,
            denominator: price.denominator,
        }
    }
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        let active = view.discount_active;
        Self {
            id: view.id.into_inner(),
            name: view.name,
            description: view.description,
            category: view.category,
            base_price: view.base_price.into(),
            effective_price: view.effective_price.into(),
            discount: view.discount.map(|d| DiscountResponse {
                percentage: d.percentage,
                start_date: d.start,
                end_date: d.end,
                active,
            }),
            status: view.status.as_str(),
            created_at: view.created_at,
            updated_at: view.updated_at,
            archived_at: view.archived_at,
        }
    }
}

impl From<ProductPage> for ListProductsResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.products.into_iter().map(Into::into).collect(),
            total_count: page.total_count,
            has_more: page.has_more,
        }
    }
}

// -- Validation --

fn validate_create(req: &CreateProductRequest) -> Result<MoneyBody, ApiError> {
    require(&req.name, "name")?;
    require(&req.category, "category")?;
    let price = req
        .base_price
        .ok_or_else(|| ApiError::BadRequest("base_price is required".to_string()))?;
    if price.denominator <= 0 {
        return Err(ApiError::BadRequest(
            "base_price denominator must be positive".to_string(),
        ));
    }
    if price.numerator <= 0 {
        return Err(ApiError::BadRequest(
            "base_price numerator must be positive".to_string(),
        ));
    }
    Ok(price)
}

fn validate_discount(
    req: &ApplyDiscountRequest,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    if !(MIN_DISCOUNT_PERCENTAGE..=MAX_DISCOUNT_PERCENTAGE).contains(&req.percentage) {
        return Err(ApiError::BadRequest(format!(
            "percentage must be between {MIN_DISCOUNT_PERCENTAGE} and {MAX_DISCOUNT_PERCENTAGE}"
        )));
    }
    let start = req
        .start_date
        .ok_or_else(|| ApiError::BadRequest("start_date is required".to_string()))?;
    let end = req
        .end_date
        .ok_or_else(|| ApiError::BadRequest("end_date is required".to_string()))?;
    Ok((start, end))
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

fn list_filter(params: &ListProductsParams) -> Result<ProductListFilter, ApiError> {
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<ProductStatus>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(ProductListFilter {
        category: params.category.clone(),
        status,
        active_only: params.active_only,
    })
}

// -- Handlers --

/// POST /products — create a product in draft status.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>), ApiError> {
    let price = validate_create(&req)?;
    let product_id = state
        .products
        .create_product(CreateProduct::new(
            req.name,
            req.description,
            req.category,
            price.numerator,
            price.denominator,
        ))
        .await?;

    let response = ProductCreatedResponse {
        product_id: product_id.into_inner(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /products — filtered, paginated list.
#[tracing::instrument(skip(state))]
pub async fn list<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<ListProductsResponse>, ApiError> {
    let filter = list_filter(&params)?;
    let page = state
        .queries
        .list_products(&filter, Pagination::new(params.limit, params.offset))
        .await?;
    Ok(Json(page.into()))
}

/// GET /products/{id} — one product, archived ones included.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let view = state.queries.get_product(&ProductId::new(id)).await?;
    Ok(Json(view.into()))
}

/// PUT /products/{id} — replace name, description and category.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<StatusCode, ApiError> {
    require(&req.name, "name")?;
    require(&req.category, "category")?;
    state
        .products
        .update_product(UpdateProduct::new(
            ProductId::new(id),
            req.name,
            req.description,
            req.category,
        ))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/{id}/activate
#[tracing::instrument(skip(state))]
pub async fn activate<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .activate_product(ActivateProduct::new(ProductId::new(id)))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/{id}/deactivate
#[tracing::instrument(skip(state))]
pub async fn deactivate<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .deactivate_product(DeactivateProduct::new(ProductId::new(id)))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/{id}/archive
#[tracing::instrument(skip(state))]
pub async fn archive<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .archive_product(ArchiveProduct::new(ProductId::new(id)))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/{id}/discount — attach or replace the discount.
#[tracing::instrument(skip(state, req))]
pub async fn apply_discount<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<ApplyDiscountRequest>,
) -> Result<StatusCode, ApiError> {
    let (start, end) = validate_discount(&req)?;
    state
        .products
        .apply_discount(ApplyDiscount::new(
            ProductId::new(id),
            req.percentage,
            start,
            end,
        ))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/{id}/discount
#[tracing::instrument(skip(state))]
pub async fn remove_discount<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .remove_discount(RemoveDiscount::new(ProductId::new(id)))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /categories/{category}/count — non-archived products in a category.
#[tracing::instrument(skip(state))]
pub async fn count_by_category<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(category): Path<String>,
) -> Result<Json<CategoryCountResponse>, ApiError> {
    let count = state.queries.count_by_category(&category).await?;
    Ok(Json(CategoryCountResponse { category, count }))
}
