use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::{MAX_AMOUNT_UNITS, parse_amount, units_to_cents};
use crate::domain::product::{NewProduct, ProductType, UpdateProduct};

/// Maximum allowed length for a product name or brand.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("product brand cannot be empty")]
    EmptyBrand,
    #[error("invalid price")]
    InvalidPrice,
    #[error("no changes supplied")]
    EmptyUpdate,
    /// The uploaded CSV is missing required columns.
    #[error("upload is missing the required name (`Nombre`) or brand (`Marca`) headers")]
    MissingRequiredHeaders,
    #[error("failed to read the uploaded file")]
    FileRead(#[from] std::io::Error),
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// JSON body used by administrators to add a single product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub brand: String,
    /// `sealed`, `decant` or a free-form type.
    pub product_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub size_ml: i32,
    /// Unit price in currency units.
    #[validate(range(min = 0.0, max = MAX_AMOUNT_UNITS))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub fragrance_family: Option<String>,
    pub notes_top: Option<String>,
    pub notes_heart: Option<String>,
    pub notes_base: Option<String>,
    pub image_url: Option<String>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let brand = sanitize_inline_text(&self.brand);
        if brand.is_empty() {
            return Err(ProductFormError::EmptyBrand);
        }

        let price_cents = units_to_cents(self.price).ok_or(ProductFormError::InvalidPrice)?;

        let mut product = NewProduct::new(hub_id, name, brand, price_cents, self.stock_quantity)
            .with_type(
                self.product_type
                    .as_deref()
                    .map(ProductType::from)
                    .unwrap_or_default(),
            )
            .with_size_ml(self.size_ml)
            .with_notes(
                optional_inline(self.notes_top.as_deref()),
                optional_inline(self.notes_heart.as_deref()),
                optional_inline(self.notes_base.as_deref()),
            );

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            product = product.with_description(description);
        }

        if let Some(family) = optional_inline(self.fragrance_family.as_deref()) {
            product = product.with_fragrance_family(family);
        }

        if let Some(image_url) = optional_inline(self.image_url.as_deref()) {
            product = product.with_image_url(image_url);
        }

        Ok(product)
    }
}

/// JSON body used by administrators to change price, stock or visibility.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(range(min = 0.0, max = MAX_AMOUNT_UNITS))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
    /// Empty string clears the image.
    pub image_url: Option<String>,
}

impl EditProductForm {
    /// Validates the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(price) = self.price {
            let cents = units_to_cents(price).ok_or(ProductFormError::InvalidPrice)?;
            updates = updates.price_cents(cents);
        }

        if let Some(stock) = self.stock_quantity {
            updates = updates.stock_quantity(stock);
        }

        if let Some(is_active) = self.is_active {
            updates = updates.active(is_active);
        }

        if let Some(image_url) = self.image_url {
            updates = updates.image_url(optional_inline(Some(&image_url)));
        }

        if updates.is_empty() {
            return Err(ProductFormError::EmptyUpdate);
        }

        Ok(updates)
    }
}

#[derive(MultipartForm)]
/// Multipart form for uploading the catalog feed as CSV.
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file containing catalog rows.
    pub csv: TempFile,
}

impl UploadProductsForm {
    /// Parse the uploaded CSV file into catalog rows.
    pub fn parse(&mut self, hub_id: i32) -> ProductFormResult<CatalogRows> {
        self.csv.file.rewind()?;
        parse_catalog_csv(self.csv.file.by_ref(), hub_id)
    }
}

/// Outcome of parsing a catalog feed.
#[derive(Debug, Default)]
pub struct CatalogRows {
    /// Rows that parsed successfully.
    pub products: Vec<NewProduct>,
    /// One message per rejected row, e.g. `Error en fila 3: ...`.
    pub errors: Vec<String>,
}

/// Parses a catalog feed.
///
/// Spanish headers from the shop spreadsheet are recognised, as are their
/// English equivalents. Rows without a name or brand are skipped silently;
/// rows with malformed numbers are reported and skipped.
pub fn parse_catalog_csv<R: Read>(reader: R, hub_id: i32) -> ProductFormResult<CatalogRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = CatalogColumns::locate(&headers);

    let (Some(name_index), Some(brand_index)) = (columns.name, columns.brand) else {
        return Err(ProductFormError::MissingRequiredHeaders);
    };

    let mut rows = CatalogRows::default();

    for (index, record) in reader.records().enumerate() {
        let row_number = index + 2; // account for header row

        let record = match record {
            Ok(record) => record,
            Err(err) => {
                rows.errors.push(format!("Error en fila {row_number}: {err}"));
                continue;
            }
        };

        let name = sanitize_inline_text(record.get(name_index).unwrap_or(""));
        let brand = sanitize_inline_text(record.get(brand_index).unwrap_or(""));
        if name.is_empty() || brand.is_empty() {
            continue;
        }

        match columns.build_product(&record, hub_id, name, brand) {
            Ok(product) => rows.products.push(product),
            Err(message) => rows
                .errors
                .push(format!("Error en fila {row_number}: {message}")),
        }
    }

    Ok(rows)
}

struct CatalogColumns {
    name: Option<usize>,
    brand: Option<usize>,
    product_type: Option<usize>,
    size_ml: Option<usize>,
    price: Option<usize>,
    stock: Option<usize>,
    description: Option<usize>,
    fragrance_family: Option<usize>,
    notes_top: Option<usize>,
    notes_heart: Option<usize>,
    notes_base: Option<usize>,
    image_url: Option<usize>,
}

impl CatalogColumns {
    fn locate(headers: &StringRecord) -> Self {
        Self {
            name: locate_header(headers, &["Nombre", "name"]),
            brand: locate_header(headers, &["Marca", "brand"]),
            product_type: locate_header(headers, &["Tipo", "type"]),
            size_ml: locate_header(headers, &["ML", "size_ml"]),
            price: locate_header(headers, &["Precio", "price"]),
            stock: locate_header(headers, &["Stock", "stock_quantity"]),
            description: locate_header(headers, &["Descripcion", "description"]),
            fragrance_family: locate_header(headers, &["Familia Olfativa", "fragrance_family"]),
            notes_top: locate_header(headers, &["Notas Salida", "notes_top"]),
            notes_heart: locate_header(headers, &["Notas Corazon", "notes_heart"]),
            notes_base: locate_header(headers, &["Notas Fondo", "notes_base"]),
            image_url: locate_header(headers, &["Imagen", "image_url"]),
        }
    }

    fn build_product(
        &self,
        record: &StringRecord,
        hub_id: i32,
        name: String,
        brand: String,
    ) -> Result<NewProduct, String> {
        let field = |index: Option<usize>| {
            index
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let size_ml = match field(self.size_ml) {
            Some(value) => parse_count(value).ok_or(format!("ML inválido `{value}`"))?,
            None => 0,
        };

        let price_cents = match field(self.price) {
            Some(value) => parse_amount(value).ok_or(format!("Precio inválido `{value}`"))?,
            None => 0,
        };

        let stock = match field(self.stock) {
            Some(value) => parse_count(value).ok_or(format!("Stock inválido `{value}`"))?,
            None => 0,
        };

        let mut product = NewProduct::new(hub_id, name, brand, price_cents, stock)
            .with_type(
                field(self.product_type)
                    .map(ProductType::from)
                    .unwrap_or_default(),
            )
            .with_size_ml(size_ml)
            .with_notes(
                optional_inline(field(self.notes_top)),
                optional_inline(field(self.notes_heart)),
                optional_inline(field(self.notes_base)),
            );

        if let Some(description) = field(self.description).map(sanitize_multiline_text) {
            product = product.with_description(description);
        }

        if let Some(family) = optional_inline(field(self.fragrance_family)) {
            product = product.with_fragrance_family(family);
        }

        if let Some(image_url) = field(self.image_url) {
            product = product.with_image_url(image_url);
        }

        Ok(product)
    }
}

fn locate_header(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim_start_matches('\u{feff}').trim();
        aliases
            .iter()
            .any(|alias| header.eq_ignore_ascii_case(alias))
    })
}

/// Parses a non-negative whole number, accepting spreadsheet exports like `"100.0"`.
fn parse_count(value: &str) -> Option<i32> {
    if let Ok(count) = value.parse::<i32>() {
        return (count >= 0).then_some(count);
    }

    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= f64::from(i32::MAX) {
        Some(float as i32)
    } else {
        None
    }
}

fn optional_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && result.last().is_none_or(|previous| previous.is_empty()) {
            continue;
        }
        result.push(line);
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}
