use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Presentation of a perfume in the catalog.
///
/// `sealed` and `decant` are the two formats the shop sells; any other value
/// coming from the catalog feed is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    /// Full bottle, factory sealed.
    Sealed,
    /// 5ml sample decanted from a bottle.
    Decant,
    /// Unrecognised type, stored as received (`"none"` when unspecified).
    Other(String),
}

impl ProductType {
    /// Stored representation of the type.
    pub fn as_str(&self) -> &str {
        match self {
            ProductType::Sealed => "sealed",
            ProductType::Decant => "decant",
            ProductType::Other(value) => value.as_str(),
        }
    }

    /// Label shown to the merchant in checkout messages.
    pub fn label(&self) -> &str {
        match self {
            ProductType::Sealed => "Sellado",
            ProductType::Decant => "Decant 5ml",
            ProductType::Other(value) => value.as_str(),
        }
    }
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Other("none".to_string())
    }
}

impl From<&str> for ProductType {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "sealed" | "sellado" => ProductType::Sealed,
            "decant" => ProductType::Decant,
            "" => ProductType::default(),
            _ => ProductType::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for ProductType {
    fn from(value: String) -> Self {
        ProductType::from(value.as_str())
    }
}

impl From<ProductType> for String {
    fn from(value: ProductType) -> Self {
        match value {
            ProductType::Other(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Perfume name.
    pub name: String,
    /// Perfume house.
    pub brand: String,
    /// Sealed bottle, decant or other presentation.
    pub product_type: ProductType,
    /// Bottle size in millilitres.
    pub size_ml: i32,
    /// Current unit price in the smallest currency unit.
    pub price_cents: i64,
    /// Units currently available.
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub fragrance_family: Option<String>,
    pub notes_top: Option<String>,
    pub notes_heart: Option<String>,
    pub notes_base: Option<String>,
    pub image_url: Option<String>,
    /// Inactive products are hidden from the catalog and cannot be added to carts.
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether `quantity` units can currently be supplied.
    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }
}

/// Payload required to insert a new product, also used by the catalog importer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub hub_id: i32,
    pub name: String,
    pub brand: String,
    pub product_type: ProductType,
    pub size_ml: i32,
    pub price_cents: i64,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub fragrance_family: Option<String>,
    pub notes_top: Option<String>,
    pub notes_heart: Option<String>,
    pub notes_base: Option<String>,
    pub image_url: Option<String>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(
        hub_id: i32,
        name: impl Into<String>,
        brand: impl Into<String>,
        price_cents: i64,
        stock_quantity: i32,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            hub_id,
            name: name.into(),
            brand: brand.into(),
            product_type: ProductType::default(),
            size_ml: 0,
            price_cents,
            stock_quantity,
            description: None,
            fragrance_family: None,
            notes_top: None,
            notes_heart: None,
            notes_base: None,
            image_url: None,
            updated_at: now,
        }
    }

    pub fn with_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn with_size_ml(mut self, size_ml: i32) -> Self {
        self.size_ml = size_ml;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_fragrance_family(mut self, family: impl Into<String>) -> Self {
        self.fragrance_family = Some(family.into());
        self
    }

    /// Attach the top, heart and base notes of the fragrance.
    pub fn with_notes(
        mut self,
        top: Option<String>,
        heart: Option<String>,
        base: Option<String>,
    ) -> Self {
        self.notes_top = top;
        self.notes_heart = heart;
        self.notes_base = base;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Patch data applied when an administrator edits a product.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    /// Optional price update in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// Optional absolute stock level.
    pub stock_quantity: Option<i32>,
    /// Whether the product should be listed.
    pub is_active: Option<bool>,
    /// Optional image URL update, using `Some(None)` to clear it.
    pub image_url: Option<Option<String>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            price_cents: None,
            stock_quantity: None,
            is_active: None,
            image_url: None,
            updated_at: now,
        }
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn stock_quantity(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = Some(stock_quantity);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn image_url(mut self, image_url: Option<impl Into<String>>) -> Self {
        self.image_url = Some(image_url.map(|value| value.into()));
        self
    }

    /// True when the patch carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.price_cents.is_none()
            && self.stock_quantity.is_none()
            && self.is_active.is_none()
            && self.image_url.is_none()
    }
}

/// Counters reported by a bulk catalog upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertCounts {
    pub added: usize,
    pub updated: usize,
}

/// Query definition used to list products for a hub.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Exact product type filter.
    pub product_type: Option<ProductType>,
    /// Substring match on the brand.
    pub brand: Option<String>,
    /// Substring match on name, description or brand.
    pub search: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    /// Only products with stock above zero.
    pub in_stock_only: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all active products belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            ..Default::default()
        }
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Filter the results by a search term applied to name, description or brand.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict prices to the inclusive range, either bound optional.
    pub fn price_range(mut self, min_cents: Option<i64>, max_cents: Option<i64>) -> Self {
        self.min_price_cents = min_cents;
        self.max_price_cents = max_cents;
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
