use serde::Deserialize;
use validator::Validate;

/// JSON body of `POST /cart/items`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCartItemForm {
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i32,
}

/// JSON body of `PUT /cart/items/{item_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartItemForm {
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_cart_item_form_rejects_non_positive_quantity() {
        for quantity in [0, -3] {
            let form = AddCartItemForm {
                product_id: 1,
                quantity,
            };
            assert!(form.validate().is_err(), "quantity {quantity} accepted");
        }
    }

    #[test]
    fn add_cart_item_form_accepts_positive_quantity() {
        let form: AddCartItemForm =
            serde_json::from_str(r#"{"product_id": 7, "quantity": 2}"#).expect("deserialize");

        assert!(form.validate().is_ok());
        assert_eq!(form.product_id, 7);
        assert_eq!(form.quantity, 2);
    }

    #[test]
    fn add_cart_item_form_leaves_product_lookup_to_the_catalog() {
        let form = AddCartItemForm {
            product_id: 0,
            quantity: 1,
        };

        assert!(form.validate().is_ok());
    }

    #[test]
    fn update_cart_item_form_rejects_zero() {
        let form = UpdateCartItemForm { quantity: 0 };

        assert!(form.validate().is_err());
    }
}
