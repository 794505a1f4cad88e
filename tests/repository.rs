use perfume_shop::domain::cart::{NewCartItem, UpdateCartItem};
use perfume_shop::domain::order::{NewOrder, OrderItem, OrderListQuery, OrderStatus};
use perfume_shop::domain::product::{NewProduct, ProductListQuery, ProductType, UpdateProduct};
use perfume_shop::domain::user::NewUser;
use perfume_shop::repository::{
    CartReader, CartWriter, OrderReader, OrderWriter, ProductReader, ProductWriter, UserReader,
    UserWriter,
};
use pushkind_common::repository::errors::RepositoryError;

mod common;

use common::{HUB_ID, TestDb, create_product, create_user};

#[test]
fn get_or_create_cart_is_idempotent() {
    let test_db = TestDb::new("test_get_or_create_cart_is_idempotent.db");
    let repo = test_db.repo();
    let user = create_user(&repo, "ana@example.com");

    let first = repo.get_or_create_cart(user.id).expect("first cart");
    let second = repo.get_or_create_cart(user.id).expect("second cart");

    assert_eq!(first.id, second.id);
    assert_eq!(first.user_id, user.id);
    assert!(second.items.is_empty());
}

#[test]
fn upsert_cart_item_merges_lines_for_same_product() {
    let test_db = TestDb::new("test_upsert_cart_item_merges_lines.db");
    let repo = test_db.repo();
    let user = create_user(&repo, "ana@example.com");
    let product = create_product(&repo, "Khamrah", 10_000, 5);
    let cart = repo.get_or_create_cart(user.id).expect("cart");

    let first = repo
        .upsert_cart_item(&NewCartItem::new(cart.id, product.id, 2, 10_000))
        .expect("first add");
    let second = repo
        .upsert_cart_item(&NewCartItem::new(cart.id, product.id, 3, 12_000))
        .expect("second add");

    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 5);
    assert_eq!(second.price_at_addition_cents, 12_000);

    let cart = repo.get_or_create_cart(user.id).expect("reload");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.totals().total_amount_cents, 60_000);
    assert_eq!(cart.totals().total_items, 5);
}

#[test]
fn cart_item_writes_are_scoped_to_cart() {
    let test_db = TestDb::new("test_cart_item_writes_are_scoped.db");
    let repo = test_db.repo();
    let ana = create_user(&repo, "ana@example.com");
    let bruno = create_user(&repo, "bruno@example.com");
    let product = create_product(&repo, "Khamrah", 10_000, 5);

    let ana_cart = repo.get_or_create_cart(ana.id).expect("ana cart");
    let bruno_cart = repo.get_or_create_cart(bruno.id).expect("bruno cart");
    assert_ne!(ana_cart.id, bruno_cart.id);

    let item = repo
        .upsert_cart_item(&NewCartItem::new(ana_cart.id, product.id, 1, 10_000))
        .expect("add");

    let err = repo
        .update_cart_item(item.id, bruno_cart.id, &UpdateCartItem::new(3))
        .expect_err("update through another cart");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .delete_cart_item(item.id, bruno_cart.id)
        .expect_err("delete through another cart");
    assert!(matches!(err, RepositoryError::NotFound));

    let unchanged = repo
        .get_cart_item(item.id)
        .expect("lookup")
        .expect("item still present");
    assert_eq!(unchanged.quantity, 1);

    let updated = repo
        .update_cart_item(item.id, ana_cart.id, &UpdateCartItem::new(3))
        .expect("owner update");
    assert_eq!(updated.quantity, 3);

    repo.delete_cart_item(item.id, ana_cart.id)
        .expect("owner delete");
    assert!(repo.get_cart_item(item.id).expect("lookup").is_none());
}

#[test]
fn clear_cart_is_idempotent() {
    let test_db = TestDb::new("test_clear_cart_is_idempotent.db");
    let repo = test_db.repo();
    let user = create_user(&repo, "ana@example.com");
    let khamrah = create_product(&repo, "Khamrah", 10_000, 5);
    let asad = create_product(&repo, "Asad", 8_000, 5);
    let cart = repo.get_or_create_cart(user.id).expect("cart");

    repo.upsert_cart_item(&NewCartItem::new(cart.id, khamrah.id, 1, 10_000))
        .expect("add khamrah");
    repo.upsert_cart_item(&NewCartItem::new(cart.id, asad.id, 2, 8_000))
        .expect("add asad");

    assert_eq!(repo.clear_cart(cart.id).expect("clear"), 2);
    assert_eq!(repo.clear_cart(cart.id).expect("clear again"), 0);

    let reloaded = repo.get_or_create_cart(user.id).expect("reload");
    assert_eq!(reloaded.id, cart.id);
    assert!(reloaded.is_empty());
}

#[test]
fn load_cart_for_checkout_reads_live_product_rows() {
    let test_db = TestDb::new("test_load_cart_for_checkout_live.db");
    let repo = test_db.repo();
    let user = create_user(&repo, "ana@example.com");
    let product = create_product(&repo, "Khamrah", 10_000, 5);
    let cart = repo.get_or_create_cart(user.id).expect("cart");

    repo.upsert_cart_item(&NewCartItem::new(cart.id, product.id, 2, 10_000))
        .expect("add");
    repo.update_product(
        product.id,
        HUB_ID,
        &UpdateProduct::new().stock_quantity(1).price_cents(15_000),
    )
    .expect("admin update");

    let checkout = repo.load_cart_for_checkout(user.id).expect("checkout");

    assert_eq!(checkout.lines.len(), 1);
    let line = &checkout.lines[0];
    assert_eq!(line.product.stock_quantity, 1);
    assert_eq!(line.product.price_cents, 15_000);
    assert_eq!(line.item.price_at_addition_cents, 10_000);
}

#[test]
fn upsert_user_refreshes_name_for_same_email() {
    let test_db = TestDb::new("test_upsert_user_refreshes_name.db");
    let repo = test_db.repo();

    let first = repo
        .upsert_user(&NewUser::new(HUB_ID, "Ana".to_string(), "Ana@Example.com".to_string()))
        .expect("insert");
    let second = repo
        .upsert_user(&NewUser::new(HUB_ID, "Ana María".to_string(), "ana@example.com".to_string()))
        .expect("update");

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Ana María");
    let found = repo
        .get_user_by_email("ANA@example.com", HUB_ID)
        .expect("lookup")
        .expect("user present");
    assert_eq!(found.id, first.id);
}

#[test]
fn delete_user_removes_cart_and_orders() {
    let test_db = TestDb::new("test_delete_user_cascades.db");
    let repo = test_db.repo();
    let user = create_user(&repo, "ana@example.com");
    let product = create_product(&repo, "Khamrah", 10_000, 5);
    let cart = repo.get_or_create_cart(user.id).expect("cart");
    let item = repo
        .upsert_cart_item(&NewCartItem::new(cart.id, product.id, 1, 10_000))
        .expect("add");
    let order = repo
        .create_order(&NewOrder::new(
            user.id,
            10_000,
            vec![OrderItem {
                product_id: product.id,
                quantity: 1,
                price_at_purchase_cents: 10_000,
            }],
        ))
        .expect("order");

    repo.delete_user(user.id).expect("delete");

    assert!(repo.get_user_by_id(user.id).expect("lookup").is_none());
    assert!(repo.get_cart_item(item.id).expect("lookup").is_none());
    assert!(
        repo.get_order_by_id(order.id, user.id)
            .expect("lookup")
            .is_none()
    );

    let err = repo.delete_user(user.id).expect_err("second delete");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn orders_are_listed_per_user_with_items() {
    let test_db = TestDb::new("test_orders_are_listed_per_user.db");
    let repo = test_db.repo();
    let ana = create_user(&repo, "ana@example.com");
    let bruno = create_user(&repo, "bruno@example.com");
    let product = create_product(&repo, "Khamrah", 10_000, 5);

    let created = repo
        .create_order(
            &NewOrder::new(
                ana.id,
                20_000,
                vec![OrderItem {
                    product_id: product.id,
                    quantity: 2,
                    price_at_purchase_cents: 10_000,
                }],
            )
            .with_message_sent(true),
        )
        .expect("order");
    assert_eq!(created.status, OrderStatus::Pending);
    assert!(created.whatsapp_message_sent);
    assert_eq!(created.items.len(), 1);

    let (total, orders) = repo
        .list_orders(OrderListQuery::new(ana.id).paginate(1, 10))
        .expect("list");
    assert_eq!(total, 1);
    assert_eq!(orders[0].items[0].quantity, 2);

    let (total, _) = repo
        .list_orders(OrderListQuery::new(bruno.id))
        .expect("list other user");
    assert_eq!(total, 0);
    assert!(
        repo.get_order_by_id(created.id, bruno.id)
            .expect("lookup")
            .is_none()
    );
}

#[test]
fn product_listing_filters_and_hides_inactive() {
    let test_db = TestDb::new("test_product_listing_filters.db");
    let repo = test_db.repo();

    let sealed = create_product(&repo, "Khamrah", 45_000, 5);
    repo.create_product(
        &NewProduct::new(HUB_ID, "Club de Nuit", "Armaf", 8_000, 0)
            .with_type(ProductType::Decant)
            .with_description("Ahumado y frutal"),
    )
    .expect("create decant");
    let hidden = create_product(&repo, "Asad", 20_000, 3);
    repo.update_product(hidden.id, HUB_ID, &UpdateProduct::new().active(false))
        .expect("hide");

    let (total, items) = repo
        .list_products(ProductListQuery::new(HUB_ID))
        .expect("list");
    assert_eq!(total, 2);
    assert_eq!(items[0].brand, "Armaf");

    let (total, items) = repo
        .list_products(ProductListQuery::new(HUB_ID).in_stock_only())
        .expect("in stock");
    assert_eq!(total, 1);
    assert_eq!(items[0].id, sealed.id);

    let (total, _) = repo
        .list_products(ProductListQuery::new(HUB_ID).search("frutal"))
        .expect("search");
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_products(ProductListQuery::new(HUB_ID).product_type(ProductType::Decant))
        .expect("by type");
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_products(ProductListQuery::new(HUB_ID).price_range(Some(10_000), Some(50_000)))
        .expect("by price");
    assert_eq!(total, 1);

    let stored = repo
        .get_product_by_id(hidden.id, HUB_ID)
        .expect("lookup hidden")
        .expect("hidden product kept");
    assert!(!stored.is_active);

    assert!(
        repo.get_product_by_id(sealed.id, HUB_ID + 1)
            .expect("lookup")
            .is_none()
    );
}

#[test]
fn upsert_products_updates_by_name_and_brand() {
    let test_db = TestDb::new("test_upsert_products_by_name_and_brand.db");
    let repo = test_db.repo();
    create_product(&repo, "Khamrah", 45_000, 5);

    let counts = repo
        .upsert_products(&[
            NewProduct::new(HUB_ID, "Khamrah", "Lattafa", 47_000, 2),
            NewProduct::new(HUB_ID, "Asad", "Lattafa", 20_000, 4),
        ])
        .expect("upsert");

    assert_eq!(counts.added, 1);
    assert_eq!(counts.updated, 1);

    let khamrah = repo
        .get_product_by_name("Khamrah", "Lattafa", HUB_ID)
        .expect("lookup")
        .expect("product present");
    assert_eq!(khamrah.price_cents, 47_000);
    assert_eq!(khamrah.stock_quantity, 2);
}
