use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{NewProduct, Page, PriceOrdering, Product, ProductQuery, DEFAULT_IMAGE};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::products;

use super::models::{NewProductRow, ProductRow};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn filtered(query: &ProductQuery) -> products::BoxedQuery<'static, Pg> {
    let mut q = products::table.into_boxed();
    if let Some(category) = query.category {
        q = q.filter(products::category.eq(category.as_str()));
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        q = q.filter(products::name.ilike(like_pattern(term)));
    }
    q
}

fn to_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, DomainError> {
    rows.into_iter().map(Product::try_from).collect()
}

impl CatalogRepository for DieselCatalogRepository {
    fn create(&self, product: NewProduct, slug: String) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: product.name,
                slug,
                short_desc: product.short_desc,
                description: product.description,
                category: product.category.as_str().to_string(),
                price: product.price,
                discount: product.discount,
                available_quantity: product.available_quantity,
                image1: product.image1.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
                image2: product.image2,
                image3: product.image3,
                image4: product.image4,
                tags: product.tags,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let taken = diesel::select(exists(products::table.filter(products::slug.eq(slug))))
            .get_result(&mut conn)?;
        Ok(taken)
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::created_at.desc())
            .load(&mut conn)?;
        to_products(rows)
    }

    fn search(&self, query: &ProductQuery) -> Result<Page<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = filtered(query).count().get_result(conn)?;

            let items = filtered(query).select(ProductRow::as_select());
            let items = match query.ordering {
                Some(PriceOrdering::Ascending) => items.order((products::price.asc(), products::id.asc())),
                Some(PriceOrdering::Descending) => items.order((products::price.desc(), products::id.asc())),
                None => items.order((products::created_at.desc(), products::id.asc())),
            };
            let rows = items
                .limit(query.page_size)
                .offset(query.offset())
                .load(conn)?;

            Ok(Page {
                items: to_products(rows)?,
                total,
                page: query.page,
                page_size: query.page_size,
            })
        })
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        products::table
            .filter(products::slug.eq(slug))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Product::try_from)
            .transpose()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Product::try_from)
            .transpose()
    }
}
