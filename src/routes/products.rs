use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::products::{AddProductForm, EditProductForm, UploadProductsForm};
use crate::repository::DieselRepository;
use crate::routes::{as_user, blocking, error_response};
use crate::services::products as product_service;

#[get("/products")]
pub async fn list_products(
    params: web::Query<product_service::ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = params.into_inner();
    match as_user(&repo, user, move |repo, user| {
        product_service::list_products(repo, user, query)
    })
    .await
    {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response("list products", err),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    match as_user(&repo, user, move |repo, user| {
        product_service::get_product(repo, user, product_id)
    })
    .await
    {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response("load product", err),
    }
}

#[post("/products")]
/// Create a product. Requires the role stored in `crate::SERVICE_ACCESS_ROLE`.
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let form = form.into_inner();
    match blocking(move || product_service::create_product(&repo, &user, form)).await {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response("create product", err),
    }
}

#[put("/products/{product_id}")]
/// Change price, stock or visibility. Requires the role stored in `crate::SERVICE_ACCESS_ROLE`.
pub async fn edit_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let product_id = product_id.into_inner();
    let form = form.into_inner();
    match blocking(move || product_service::update_product(&repo, &user, product_id, form)).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response("update product", err),
    }
}

#[post("/products/upload")]
/// Import the catalog from a multipart `csv` field.
pub async fn upload_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadProductsForm>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    match blocking(move || product_service::import_products(&repo, &user, form)).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => error_response("import products", err),
    }
}
