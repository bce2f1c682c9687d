use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::{Category, PriceOrdering, Product, ProductQuery};
use crate::errors::AppError;
use crate::state::{AppState, MediaUrls};

use super::{blocking, money};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub product_name: String,
    pub slug: String,
    pub short_desc: String,
    pub description: String,
    pub category: String,
    /// Decimal price as a string, e.g. "99.00"
    pub price: String,
    /// Absolute discount, not a percentage
    pub discount: String,
    pub available_quantity: i32,
    pub image1: String,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub tags: Option<String>,
    pub created_at: String,
}

impl ProductResponse {
    pub fn new(p: &Product, media: &MediaUrls) -> Self {
        Self {
            id: p.id,
            product_name: p.name.clone(),
            slug: p.slug.clone(),
            short_desc: p.short_desc.clone(),
            description: p.description.clone(),
            category: p.category.to_string(),
            price: money(&p.price),
            discount: money(&p.discount),
            available_quantity: p.available_quantity,
            image1: media.url(&p.image1),
            image2: p.image2.as_deref().map(|i| media.url(i)),
            image3: p.image3.as_deref().map(|i| media.url(i)),
            image4: p.image4.as_deref().map(|i| media.url(i)),
            tags: p.tags.clone(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductFilterParams {
    pub category: Option<String>,
    pub search: Option<String>,
    /// `price` or `-price`
    pub ordering: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    ProductQuery::DEFAULT_PAGE_SIZE
}

impl ProductFilterParams {
    fn into_query(self) -> Result<ProductQuery, AppError> {
        let category = self
            .category
            .filter(|c| !c.is_empty())
            .map(|c| c.parse::<Category>())
            .transpose()?;
        let ordering = self
            .ordering
            .filter(|o| !o.is_empty())
            .map(|o| o.parse::<PriceOrdering>())
            .transpose()?;
        Ok(ProductQuery {
            category,
            search: self.search,
            ordering,
            page: self.page,
            page_size: self.page_size,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPageResponse {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<ProductResponse>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/products/
#[utoipa::path(
    get,
    path = "/api/products/",
    responses(
        (status = 200, description = "All products, newest first", body = [ProductResponse]),
    ),
    tag = "products"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let st = state.clone();
    let products = blocking(move || st.catalog.list_products()).await?;

    let body: Vec<ProductResponse> = products
        .iter()
        .map(|p| ProductResponse::new(p, &state.media))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/products-filter/
///
/// Filter by `category`, search the name with `search`, sort with
/// `ordering=price|-price`, paginate with `page` and `page_size`.
#[utoipa::path(
    get,
    path = "/api/products-filter/",
    params(
        ("category" = Option<String>, Query, description = "Exact category name"),
        ("search" = Option<String>, Query, description = "Case-insensitive name search"),
        ("ordering" = Option<String>, Query, description = "price or -price"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 10, max 100)"),
    ),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPageResponse),
        (status = 400, description = "Unknown category or ordering"),
    ),
    tag = "products"
)]
pub async fn filter_products(
    state: web::Data<AppState>,
    query: web::Query<ProductFilterParams>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner().into_query()?;

    let st = state.clone();
    let page = blocking(move || st.catalog.search_products(query)).await?;

    Ok(HttpResponse::Ok().json(ProductPageResponse {
        count: page.total,
        next: page.next_page(),
        previous: page.previous_page(),
        results: page
            .items
            .iter()
            .map(|p| ProductResponse::new(p, &state.media))
            .collect(),
    }))
}

/// GET /api/products/{slug}/
#[utoipa::path(
    get,
    path = "/api/products/{slug}/",
    params(
        ("slug" = String, Path, description = "Product slug"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();

    let st = state.clone();
    let product = blocking(move || st.catalog.get_product(&slug)).await?;

    Ok(HttpResponse::Ok().json(ProductResponse::new(&product, &state.media)))
}
