use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::cart::{
        Cart as DomainCart, CartItem as DomainCartItem, CheckoutCart as DomainCheckoutCart,
        NewCartItem as DomainNewCartItem, UpdateCartItem as DomainUpdateCartItem,
    },
    models::cart::{
        Cart as DbCart, CartItem as DbCartItem, NewCart as DbNewCart,
        NewCartItem as DbNewCartItem, UpdateCartItem as DbUpdateCartItem,
    },
    models::product::Product as DbProduct,
    repository::{CartReader, CartWriter, DieselRepository},
};

impl CartReader for DieselRepository {
    fn get_cart_item(&self, item_id: i32) -> RepositoryResult<Option<DomainCartItem>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let item = cart_items::table
            .find(item_id)
            .first::<DbCartItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }
}

impl CartWriter for DieselRepository {
    fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<DomainCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCart, RepositoryError, _>(|conn| {
            let cart = ensure_cart(conn, user_id)?;

            let items = cart_items::table
                .filter(cart_items::cart_id.eq(cart.id))
                .order(cart_items::id.asc())
                .load::<DbCartItem>(conn)?;

            Ok(DomainCart::from((cart, items)))
        })
    }

    fn load_cart_for_checkout(&self, user_id: i32) -> RepositoryResult<DomainCheckoutCart> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCheckoutCart, RepositoryError, _>(|conn| {
            let cart = ensure_cart(conn, user_id)?;

            let rows = cart_items::table
                .inner_join(products::table)
                .filter(cart_items::cart_id.eq(cart.id))
                .order(cart_items::id.asc())
                .select((DbCartItem::as_select(), DbProduct::as_select()))
                .load::<(DbCartItem, DbProduct)>(conn)?;

            Ok(DomainCheckoutCart::from((cart, rows)))
        })
    }

    fn upsert_cart_item(&self, new_item: &DomainNewCartItem) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let db_new = DbNewCartItem::from(new_item);

        conn.immediate_transaction::<DomainCartItem, RepositoryError, _>(|conn| {
            diesel::insert_into(cart_items::table)
                .values(&db_new)
                .on_conflict((cart_items::cart_id, cart_items::product_id))
                .do_update()
                .set((
                    cart_items::quantity.eq(cart_items::quantity + excluded(cart_items::quantity)),
                    cart_items::price_at_addition_cents
                        .eq(excluded(cart_items::price_at_addition_cents)),
                    cart_items::updated_at.eq(excluded(cart_items::updated_at)),
                ))
                .execute(conn)?;

            let item = cart_items::table
                .filter(cart_items::cart_id.eq(db_new.cart_id))
                .filter(cart_items::product_id.eq(db_new.product_id))
                .first::<DbCartItem>(conn)?;

            touch_cart(conn, db_new.cart_id, db_new.updated_at)?;

            Ok(item.into())
        })
    }

    fn update_cart_item(
        &self,
        item_id: i32,
        cart_id: i32,
        updates: &DomainUpdateCartItem,
    ) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCartItem::from(updates);

        conn.immediate_transaction::<DomainCartItem, RepositoryError, _>(|conn| {
            let target = cart_items::table
                .filter(cart_items::id.eq(item_id))
                .filter(cart_items::cart_id.eq(cart_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbCartItem>(conn)
                .optional()?;

            let Some(updated) = updated else {
                return Err(RepositoryError::NotFound);
            };

            touch_cart(conn, cart_id, db_updates.updated_at)?;

            Ok(updated.into())
        })
    }

    fn delete_cart_item(&self, item_id: i32, cart_id: i32) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let target = cart_items::table
                .filter(cart_items::id.eq(item_id))
                .filter(cart_items::cart_id.eq(cart_id));

            let deleted = diesel::delete(target).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            touch_cart(conn, cart_id, chrono::Local::now().naive_utc())?;

            Ok(())
        })
    }

    fn clear_cart(&self, cart_id: i32) -> RepositoryResult<usize> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<usize, RepositoryError, _>(|conn| {
            let deleted = diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(cart_id)))
                .execute(conn)?;

            if deleted > 0 {
                touch_cart(conn, cart_id, chrono::Local::now().naive_utc())?;
            }

            Ok(deleted)
        })
    }
}

/// Insert the user's cart unless it exists, then read it back.
///
/// The unique index on `carts.user_id` turns concurrent first accesses into a
/// single row.
fn ensure_cart(conn: &mut SqliteConnection, user_id: i32) -> QueryResult<DbCart> {
    use crate::schema::carts;

    diesel::insert_into(carts::table)
        .values(&DbNewCart { user_id })
        .on_conflict(carts::user_id)
        .do_nothing()
        .execute(conn)?;

    carts::table
        .filter(carts::user_id.eq(user_id))
        .first::<DbCart>(conn)
}

fn touch_cart(
    conn: &mut SqliteConnection,
    cart_id: i32,
    updated_at: NaiveDateTime,
) -> QueryResult<usize> {
    use crate::schema::carts;

    diesel::update(carts::table.find(cart_id))
        .set(carts::updated_at.eq(updated_at))
        .execute(conn)
}
