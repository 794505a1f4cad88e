use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct, UpsertCounts,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::hub_id.eq(hub_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn get_product_by_name(
        &self,
        name: &str,
        brand: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::hub_id.eq(hub_id))
            .filter(products::name.eq(name))
            .filter(products::brand.eq(brand))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let type_filter = query
            .product_type
            .as_ref()
            .map(|product_type| product_type.as_str().to_string());
        let brand_pattern = query.brand.as_ref().map(|brand| format!("%{}%", brand));
        let search_pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let query_builder = || {
            let mut items = products::table
                .filter(products::hub_id.eq(query.hub_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            items = items.filter(products::is_active.eq(true));

            if let Some(product_type) = &type_filter {
                items = items.filter(products::product_type.eq(product_type.clone()));
            }

            if let Some(pattern) = &brand_pattern {
                items = items.filter(products::brand.like(pattern.clone()));
            }

            if let Some(pattern) = &search_pattern {
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .or(products::description.like(pattern.clone()))
                        .or(products::brand.like(pattern.clone())),
                );
            }

            if let Some(min) = query.min_price_cents {
                items = items.filter(products::price_cents.ge(min));
            }

            if let Some(max) = query.max_price_cents {
                items = items.filter(products::price_cents.le(max));
            }

            if query.in_stock_only {
                items = items.filter(products::stock_quantity.gt(0));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((products::brand.asc(), products::name.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        Ok((total, db_products.into_iter().map(Into::into).collect()))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn upsert_products(&self, new_products: &[DomainNewProduct]) -> RepositoryResult<UpsertCounts> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<UpsertCounts, RepositoryError, _>(|conn| {
            let mut counts = UpsertCounts::default();

            for new_product in new_products {
                let db_new = DbNewProduct::from(new_product);

                let existing = products::table
                    .filter(products::hub_id.eq(db_new.hub_id))
                    .filter(products::name.eq(db_new.name))
                    .filter(products::brand.eq(db_new.brand))
                    .select(products::id)
                    .first::<i32>(conn)
                    .optional()?;

                match existing {
                    Some(product_id) => {
                        diesel::update(products::table.find(product_id))
                            .set(&db_new)
                            .execute(conn)?;
                        counts.updated += 1;
                    }
                    None => {
                        diesel::insert_into(products::table)
                            .values(&db_new)
                            .execute(conn)?;
                        counts.added += 1;
                    }
                }
            }

            Ok(counts)
        })
    }
}
