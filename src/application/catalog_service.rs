use std::sync::Arc;

use uuid::Uuid;

use crate::domain::catalog::{slugify, unique_slug, NewProduct, Page, Product, ProductQuery};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;

pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub fn create_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        product.validate()?;
        let slug = unique_slug(&slugify(&product.name), |s| self.repo.slug_exists(s))?;
        let created = self.repo.create(product, slug)?;
        log::info!("Created product {} ({})", created.slug, created.id);
        Ok(created)
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list()
    }

    pub fn search_products(&self, mut query: ProductQuery) -> Result<Page<Product>, DomainError> {
        query.page = query.page.clamp(1, ProductQuery::MAX_PAGE);
        query.page_size = query.page_size.clamp(1, ProductQuery::MAX_PAGE_SIZE);
        self.repo.search(&query)
    }

    pub fn get_product(&self, slug: &str) -> Result<Product, DomainError> {
        self.repo
            .find_by_slug(slug)?
            .ok_or_else(|| DomainError::not_found("Product does not exist"))
    }

    pub fn get_product_by_id(&self, id: Uuid) -> Result<Product, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Product does not exist"))
    }
}
