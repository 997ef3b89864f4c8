//! Product queries
//!
//! Filters the backend can apply are pushed down through [`ProductFilter`];
//! the rest (category, free-text search, sorting) runs locally on validated
//! products.

use crate::backend::ProductFilter;
use shared::models::Product;
use std::cmp::Ordering;

/// Category value that matches every product
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Category name, compared case-insensitively; `None` or `"all"` matches any
    pub category: Option<String>,
    /// Substring of the name or the category, case-insensitive
    pub search: Option<String>,
    pub featured_only: bool,
    pub best_sellers_only: bool,
    pub gender: Option<String>,
    pub sort: SortOrder,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn best_sellers(mut self) -> Self {
        self.best_sellers_only = true;
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into().to_lowercase());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Part of the query the backend evaluates
    pub fn backend_filter(&self) -> ProductFilter {
        ProductFilter {
            featured: self.featured_only.then_some(true),
            is_best_seller: self.best_sellers_only.then_some(true),
            gender: self.gender.clone(),
            limit: None,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => true,
            Some(c) => product.category.to_lowercase() == c.to_lowercase(),
        };
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.category.to_lowercase().contains(&needle)
            }
        };
        let gender_ok = self
            .gender
            .as_deref()
            .is_none_or(|g| product.gender.as_deref() == Some(g));

        category_ok
            && search_ok
            && gender_ok
            && (!self.featured_only || product.featured)
            && (!self.best_sellers_only || product.is_best_seller)
    }

    /// Filter and sort products
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut matched: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self.sort {
            // rows without a timestamp sort last
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
        .then(a.id.cmp(&b.id))
    }
}

/// Named category routes with a fixed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPreset {
    BestSelling,
    Men,
    Women,
}

impl CategoryPreset {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "best-selling" => Some(Self::BestSelling),
            "men" => Some(Self::Men),
            "women" => Some(Self::Women),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::BestSelling => "best-selling",
            Self::Men => "men",
            Self::Women => "women",
        }
    }

    /// Page heading, e.g. "best selling"
    pub fn title(&self) -> String {
        self.slug().replace('-', " ")
    }

    pub fn query(&self) -> ProductQuery {
        match self {
            Self::BestSelling => ProductQuery::new().best_sellers(),
            Self::Men => ProductQuery::new().gender("men"),
            Self::Women => ProductQuery::new().gender("women"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, category: &str, price: i64) -> Product {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price: Decimal::from(price),
            image_url: String::new(),
            category: category.into(),
            stock: 10,
            featured: false,
            is_best_seller: false,
            gender: None,
            created_at: Some(Utc.with_ymd_and_hms(2025, 1, id as u32, 0, 0, 0).unwrap()),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Rose Noir", "Floral", 90),
            product(2, "Cedar Smoke", "Woody", 120),
            product(3, "Sea Salt", "Fresh", 60),
            product(4, "Amber Nights", "Oriental", 150),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_query_newest_first() {
        assert_eq!(ids(&ProductQuery::new().apply(catalog())), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_category_case_insensitive() {
        let q = ProductQuery::new().category("floral");
        assert_eq!(ids(&q.apply(catalog())), vec![1]);
        let q = ProductQuery::new().category("ALL");
        assert_eq!(q.apply(catalog()).len(), 4);
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let q = ProductQuery::new().search("wood");
        assert_eq!(ids(&q.apply(catalog())), vec![2]);
        let q = ProductQuery::new().search("  SEA ").sort(SortOrder::Name);
        assert_eq!(ids(&q.apply(catalog())), vec![3]);
        let q = ProductQuery::new().search("n").sort(SortOrder::Name);
        assert_eq!(ids(&q.apply(catalog())), vec![4, 1]);
    }

    #[test]
    fn test_price_sorts() {
        let asc = ProductQuery::new().sort(SortOrder::PriceAsc).apply(catalog());
        assert_eq!(ids(&asc), vec![3, 1, 2, 4]);
        let desc = ProductQuery::new().sort(SortOrder::PriceDesc).apply(catalog());
        assert_eq!(ids(&desc), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_flags_and_gender() {
        let mut products = catalog();
        products[0].featured = true;
        products[1].is_best_seller = true;
        products[1].gender = Some("men".into());

        assert_eq!(ids(&ProductQuery::new().featured().apply(products.clone())), vec![1]);
        assert_eq!(
            ids(&CategoryPreset::BestSelling.query().apply(products.clone())),
            vec![2]
        );
        assert_eq!(ids(&ProductQuery::new().gender("Men").apply(products)), vec![2]);
    }

    #[test]
    fn test_backend_filter() {
        let filter = CategoryPreset::Women.query().backend_filter();
        assert_eq!(filter.gender.as_deref(), Some("women"));
        assert_eq!(filter.featured, None);
        assert_eq!(ProductQuery::new().featured().backend_filter().featured, Some(true));
    }

    #[test]
    fn test_presets() {
        assert_eq!(CategoryPreset::from_slug("best-selling"), Some(CategoryPreset::BestSelling));
        assert_eq!(CategoryPreset::from_slug("kids"), None);
        assert_eq!(CategoryPreset::BestSelling.title(), "best selling");
    }
}
