use std::env;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::models::config::CommonServerConfig;

use perfume_shop::config::ShopConfig;
use perfume_shop::repository::DieselRepository;
use perfume_shop::routes::cart::{
    add_cart_item, clear_cart, remove_cart_item, show_cart, update_cart_item,
};
use perfume_shop::routes::json_config;
use perfume_shop::routes::orders::{checkout_cart, list_orders, record_order, show_order};
use perfume_shop::routes::products::{
    add_product, edit_product, list_products, show_product, upload_products,
};
use perfume_shop::routes::users::{delete_current_user, show_current_user};
use perfume_shop::services::products::sync_catalog_from_path;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = env::var("AUTH_SERVICE_URL");
    let auth_service_url = match auth_service_url {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let shop_config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    if let Err(e) = sync_catalog_from_path(
        &repo,
        &shop_config.catalog_csv_path,
        shop_config.catalog_hub_id,
    ) {
        log::error!("Catalog sync failed: {e}");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(json_config())
            .service(
                web::scope("/api/v1")
                    .service(show_cart)
                    .service(add_cart_item)
                    .service(update_cart_item)
                    .service(remove_cart_item)
                    .service(clear_cart)
                    .service(checkout_cart)
                    .service(record_order)
                    .service(list_orders)
                    .service(show_order)
                    .service(list_products)
                    .service(upload_products)
                    .service(show_product)
                    .service(add_product)
                    .service(edit_product)
                    .service(show_current_user)
                    .service(delete_current_user),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(shop_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
