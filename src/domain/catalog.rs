use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

pub const DEFAULT_IMAGE: &str = "default.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MobilePhones,
    Tablets,
    Laptops,
    Headphones,
    Earbuds,
    Camera,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::MobilePhones,
        Category::Tablets,
        Category::Laptops,
        Category::Headphones,
        Category::Earbuds,
        Category::Camera,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MobilePhones => "Mobile Phones",
            Category::Tablets => "Tablets",
            Category::Laptops => "Laptops",
            Category::Headphones => "Headphones",
            Category::Earbuds => "Earbuds",
            Category::Camera => "Camera",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::invalid(format!("'{}' is not a valid category", s)))
    }
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub short_desc: String,
    pub description: String,
    pub category: Category,
    pub price: BigDecimal,
    pub discount: BigDecimal,
    pub available_quantity: i32,
    pub image1: String,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a product. The slug is derived from `name`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub short_desc: String,
    pub description: String,
    pub category: Category,
    pub price: BigDecimal,
    pub discount: BigDecimal,
    pub available_quantity: i32,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub tags: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid("product name must not be empty"));
        }
        let zero = BigDecimal::from(0);
        if self.price < zero || self.discount < zero {
            return Err(DomainError::invalid("price and discount must be non-negative"));
        }
        if self.discount > self.price {
            return Err(DomainError::invalid("discount must not exceed price"));
        }
        if self.available_quantity < 0 {
            return Err(DomainError::invalid("available quantity must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrdering {
    Ascending,
    Descending,
}

impl FromStr for PriceOrdering {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(PriceOrdering::Ascending),
            "-price" => Ok(PriceOrdering::Descending),
            other => Err(DomainError::invalid(format!("cannot order by '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub ordering: Option<PriceOrdering>,
    pub page: i64,
    pub page_size: i64,
}

impl ProductQuery {
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 100;
    /// Highest page whose offset still fits an `i64` at the largest page size.
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_PAGE_SIZE;

    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn next_page(&self) -> Option<i64> {
        (self.page.saturating_mul(self.page_size) < self.total).then_some(self.page + 1)
    }

    pub fn previous_page(&self) -> Option<i64> {
        (self.page > 1).then_some(self.page - 1)
    }
}

/// Lower-case ASCII alphanumerics, every other run of characters collapsed to
/// a single `-`, no leading or trailing separator.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("product");
    }
    slug
}

/// First of `base`, `base-2`, `base-3`, ... for which `taken` answers false.
pub fn unique_slug<F>(base: &str, mut taken: F) -> Result<String, DomainError>
where
    F: FnMut(&str) -> Result<bool, DomainError>,
{
    if !taken(base)? {
        return Ok(base.to_string());
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate)? {
            return Ok(candidate);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Apple iPhone 15 Pro"), "apple-iphone-15-pro");
        assert_eq!(slugify("  Sony -- WH/1000XM5 "), "sony-wh-1000xm5");
    }

    #[test]
    fn slugify_falls_back_when_nothing_survives() {
        assert_eq!(slugify("***"), "product");
    }

    #[test]
    fn unique_slug_appends_first_free_suffix() {
        let taken = ["pixel-8", "pixel-8-2"];
        let slug = unique_slug("pixel-8", |s| Ok(taken.contains(&s))).unwrap();
        assert_eq!(slug, "pixel-8-3");
    }

    #[test]
    fn unique_slug_keeps_base_when_free() {
        let slug = unique_slug("pixel-8", |_| Ok(false)).unwrap();
        assert_eq!(slug, "pixel-8");
    }

    #[test]
    fn category_parses_display_names() {
        assert_eq!("Mobile Phones".parse::<Category>().unwrap(), Category::MobilePhones);
        assert!("Phones".parse::<Category>().is_err());
    }

    #[test]
    fn page_links() {
        let page = Page::<()> {
            items: vec![],
            total: 25,
            page: 2,
            page_size: 10,
        };
        assert_eq!(page.next_page(), Some(3));
        assert_eq!(page.previous_page(), Some(1));

        let last = Page::<()> { page: 3, ..page };
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn page_arithmetic_saturates() {
        let query = ProductQuery {
            category: None,
            search: None,
            ordering: None,
            page: i64::MAX,
            page_size: ProductQuery::MAX_PAGE_SIZE,
        };
        assert_eq!(query.offset(), i64::MAX);

        let page = Page::<()> {
            items: vec![],
            total: 1,
            page: i64::MAX,
            page_size: ProductQuery::MAX_PAGE_SIZE,
        };
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn discount_above_price_is_rejected() {
        let product = NewProduct {
            name: "Pixel 8".to_string(),
            short_desc: String::new(),
            description: String::new(),
            category: Category::MobilePhones,
            price: BigDecimal::from(10),
            discount: BigDecimal::from(11),
            available_quantity: 1,
            image1: None,
            image2: None,
            image3: None,
            image4: None,
            tags: None,
        };
        assert!(matches!(product.validate(), Err(DomainError::InvalidInput(_))));
    }
}
