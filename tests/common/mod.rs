//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};

use perfume_shop::domain::product::{NewProduct, Product};
use perfume_shop::domain::user::{NewUser, User};
use perfume_shop::repository::{DieselRepository, ProductWriter, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub const HUB_ID: i32 = 1;

/// SQLite file with all migrations applied, removed on drop.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok();

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn create_user(repo: &DieselRepository, email: &str) -> User {
    repo.upsert_user(&NewUser::new(HUB_ID, "Ana".to_string(), email.to_string()))
        .expect("create user")
}

pub fn create_product(
    repo: &DieselRepository,
    name: &str,
    price_cents: i64,
    stock_quantity: i32,
) -> Product {
    repo.create_product(&NewProduct::new(
        HUB_ID,
        name,
        "Lattafa",
        price_cents,
        stock_quantity,
    ))
    .expect("create product")
}
