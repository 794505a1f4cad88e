use diesel::prelude::*;
use diesel::upsert::excluded;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::user::{NewUser as DomainNewUser, User as DomainUser},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{DieselRepository, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .find(id)
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .filter(users::hub_id.eq(hub_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }
}

impl UserWriter for DieselRepository {
    fn upsert_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        conn.immediate_transaction::<DomainUser, RepositoryError, _>(|conn| {
            diesel::insert_into(users::table)
                .values(&db_new)
                .on_conflict((users::hub_id, users::email))
                .do_update()
                .set((
                    users::name.eq(excluded(users::name)),
                    users::updated_at.eq(excluded(users::updated_at)),
                ))
                .execute(conn)?;

            let user = users::table
                .filter(users::hub_id.eq(db_new.hub_id))
                .filter(users::email.eq(db_new.email))
                .first::<DbUser>(conn)?;

            Ok(user.into())
        })
    }

    fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::{cart_items, carts, order_items, orders, users};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let cart_ids = carts::table
                .filter(carts::user_id.eq(user_id))
                .select(carts::id);
            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq_any(cart_ids)))
                .execute(conn)?;
            diesel::delete(carts::table.filter(carts::user_id.eq(user_id))).execute(conn)?;

            let order_ids = orders::table
                .filter(orders::user_id.eq(user_id))
                .select(orders::id);
            diesel::delete(order_items::table.filter(order_items::order_id.eq_any(order_ids)))
                .execute(conn)?;
            diesel::delete(orders::table.filter(orders::user_id.eq(user_id))).execute(conn)?;

            let deleted = diesel::delete(users::table.find(user_id)).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
