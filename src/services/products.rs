use std::fs::File;
use std::path::Path;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::money::{cents_to_units, units_to_cents};
use crate::domain::product::{Product, ProductListQuery, ProductType};
use crate::domain::user::User;
use crate::forms::products::{
    AddProductForm, CatalogRows, EditProductForm, UploadProductsForm, parse_catalog_csv,
};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// `sealed`, `decant` or any stored type.
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub in_stock_only: bool,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// JSON representation of a catalog product.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub product_type: ProductType,
    pub size_ml: i32,
    pub price: f64,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub fragrance_family: Option<String>,
    pub notes_top: Option<String>,
    pub notes_heart: Option<String>,
    pub notes_base: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            brand: product.brand,
            product_type: product.product_type,
            size_ml: product.size_ml,
            price: cents_to_units(product.price_cents),
            stock_quantity: product.stock_quantity,
            description: product.description,
            fragrance_family: product.fragrance_family,
            notes_top: product.notes_top,
            notes_heart: product.notes_heart,
            notes_base: product.notes_base,
            image_url: product.image_url,
            is_active: product.is_active,
        }
    }
}

/// Outcome of a catalog import.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
    /// Rows that could not be imported.
    pub errors: Vec<String>,
}

/// Lists active products of the user's hub.
pub fn list_products<R>(
    repo: &R,
    user: &User,
    query: ProductsQuery,
) -> ServiceResult<Paginated<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        product_type,
        brand,
        search,
        min_price,
        max_price,
        in_stock_only,
        page,
    } = query;

    let page = page.unwrap_or(1).max(1);
    let min_cents = price_bound(min_price, "min_price")?;
    let max_cents = price_bound(max_price, "max_price")?;

    let mut list_query = ProductListQuery::new(user.hub_id)
        .price_range(min_cents, max_cents)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(product_type) = product_type.as_deref().filter(|value| !value.trim().is_empty()) {
        list_query = list_query.product_type(ProductType::from(product_type));
    }

    if let Some(brand) = brand.filter(|value| !value.trim().is_empty()) {
        list_query = list_query.brand(brand.trim());
    }

    if let Some(search) = search.filter(|value| !value.trim().is_empty()) {
        list_query = list_query.search(search.trim());
    }

    if in_stock_only {
        list_query = list_query.in_stock_only();
    }

    let (total, products) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let items = products.into_iter().map(ProductView::from).collect();
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(Paginated::new(items, page, total_pages))
}

/// Returns an active product of the user's hub.
pub fn get_product<R>(repo: &R, user: &User, product_id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .filter(|product| product.is_active)
        .map(ProductView::from)
        .ok_or_else(|| ServiceError::not_found("Product", product_id))
}

/// Creates a product for the administrator's hub.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<ProductView>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form.into_new_product(user.hub_id)?;

    let existing = repo
        .get_product_by_name(&new_product.name, &new_product.brand, user.hub_id)
        .map_err(ServiceError::from)?;
    if existing.is_some() {
        return Err(ServiceError::Duplicate {
            entity: "Product",
            field: "name",
            value: format!("{} {}", new_product.brand, new_product.name),
        });
    }

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!("Created product {} in hub {}", created.id, created.hub_id);

    Ok(ProductView::from(created))
}

/// Changes price, stock, visibility or image of a product.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form.into_update_product()?;

    let updated = match repo.update_product(product_id, user.hub_id, &updates) {
        Ok(product) => product,
        Err(RepositoryError::NotFound) => {
            return Err(ServiceError::not_found("Product", product_id));
        }
        Err(err) => return Err(ServiceError::from(err)),
    };

    log::info!(
        "Updated product {} (price {}, stock {})",
        updated.id,
        updated.price_cents,
        updated.stock_quantity
    );

    Ok(ProductView::from(updated))
}

/// Imports products from an uploaded CSV file.
pub fn import_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: UploadProductsForm,
) -> ServiceResult<ImportSummary>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let rows = form.parse(user.hub_id)?;
    apply_catalog(repo, rows)
}

/// Syncs the catalog from a CSV file on disk.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn sync_catalog_from_path<R>(
    repo: &R,
    path: impl AsRef<Path>,
    hub_id: i32,
) -> ServiceResult<Option<ImportSummary>>
where
    R: ProductWriter + ?Sized,
{
    let path = path.as_ref();
    if !path.exists() {
        log::info!("Catalog file {} not found, skipping sync", path.display());
        return Ok(None);
    }

    let file = File::open(path).map_err(|err| ServiceError::Internal(err.to_string()))?;
    let rows = parse_catalog_csv(file, hub_id)?;
    let summary = apply_catalog(repo, rows)?;

    log::info!(
        "Catalog sync from {}: {} added, {} updated, {} errors",
        path.display(),
        summary.added,
        summary.updated,
        summary.errors.len()
    );

    Ok(Some(summary))
}

fn apply_catalog<R>(repo: &R, rows: CatalogRows) -> ServiceResult<ImportSummary>
where
    R: ProductWriter + ?Sized,
{
    let CatalogRows { products, errors } = rows;

    for error in &errors {
        log::warn!("{error}");
    }

    if products.is_empty() {
        return Ok(ImportSummary {
            errors,
            ..Default::default()
        });
    }

    let counts = repo
        .upsert_products(&products)
        .map_err(ServiceError::from)?;

    Ok(ImportSummary {
        added: counts.added,
        updated: counts.updated,
        errors,
    })
}

fn price_bound(value: Option<f64>, name: &str) -> ServiceResult<Option<i64>> {
    value
        .map(|units| {
            units_to_cents(units)
                .ok_or_else(|| ServiceError::Validation(format!("Invalid {name}")))
        })
        .transpose()
}
