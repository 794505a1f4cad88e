use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductType,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub brand: String,
    pub product_type: String,
    pub size_ml: i32,
    pub price_cents: i64,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub fragrance_family: Option<String>,
    pub notes_top: Option<String>,
    pub notes_heart: Option<String>,
    pub notes_base: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct NewProduct<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub brand: &'a str,
    pub product_type: &'a str,
    pub size_ml: i32,
    pub price_cents: i64,
    pub stock_quantity: i32,
    pub description: Option<&'a str>,
    pub fragrance_family: Option<&'a str>,
    pub notes_top: Option<&'a str>,
    pub notes_heart: Option<&'a str>,
    pub notes_base: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub price_cents: Option<i64>,
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
    pub image_url: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            brand: value.brand,
            product_type: ProductType::from(value.product_type),
            size_ml: value.size_ml,
            price_cents: value.price_cents,
            stock_quantity: value.stock_quantity,
            description: value.description,
            fragrance_family: value.fragrance_family,
            notes_top: value.notes_top,
            notes_heart: value.notes_heart,
            notes_base: value.notes_base,
            image_url: value.image_url,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            brand: value.brand.as_str(),
            product_type: value.product_type.as_str(),
            size_ml: value.size_ml,
            price_cents: value.price_cents,
            stock_quantity: value.stock_quantity,
            description: value.description.as_deref(),
            fragrance_family: value.fragrance_family.as_deref(),
            notes_top: value.notes_top.as_deref(),
            notes_heart: value.notes_heart.as_deref(),
            notes_base: value.notes_base.as_deref(),
            image_url: value.image_url.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            price_cents: value.price_cents,
            stock_quantity: value.stock_quantity,
            is_active: value.is_active,
            image_url: value
                .image_url
                .as_ref()
                .map(|image_url| image_url.as_deref()),
            updated_at: value.updated_at,
        }
    }
}
