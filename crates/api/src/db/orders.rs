//! Order store binding.
//!
//! Orders carry the handler-level creation rules (positive owning customer,
//! non-blank product name, positive amount); everything else is shared with
//! the customer pipeline through the generic repository and handler.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use dualstore_core::{Order, OrderId};

use super::Store;
use super::entity::{PgQuery, PgQueryAs, StoreEntity};

impl StoreEntity for Order {
    type Id = OrderId;

    const STORE: Store = Store::Order;
    const TABLE: &'static str = "orders";
    const API_PATH: &'static str = "/api/Orders";

    const CREATE_TABLE: &'static str = "\
        CREATE TABLE IF NOT EXISTS orders (
            id SERIAL PRIMARY KEY,
            customer_id INTEGER NOT NULL,
            product_name VARCHAR(200) NOT NULL,
            amount NUMERIC(18,2) NOT NULL,
            order_date TIMESTAMPTZ NOT NULL,
            row_version INTEGER NOT NULL DEFAULT 0
        )";

    const SELECT_ALL: &'static str =
        "SELECT id, customer_id, product_name, amount, order_date FROM orders";

    const SELECT_BY_ID: &'static str =
        "SELECT id, customer_id, product_name, amount, order_date FROM orders WHERE id = $1";

    const SELECT_VERSION: &'static str = "SELECT row_version FROM orders WHERE id = $1";

    const EXISTS: &'static str = "SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)";

    const INSERT: &'static str = "\
        INSERT INTO orders (customer_id, product_name, amount, order_date)
        VALUES ($1, $2, $3, $4)
        RETURNING id, customer_id, product_name, amount, order_date";

    // order_date is immutable after insert and stays out of the SET list.
    const UPDATE: &'static str = "\
        UPDATE orders
        SET customer_id = $1, product_name = $2, amount = $3, row_version = row_version + 1
        WHERE id = $4 AND row_version = $5";

    const DELETE: &'static str = "DELETE FROM orders WHERE id = $1";

    fn id(&self) -> OrderId {
        self.id
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        self.order_date = Some(now);
    }

    fn validate_create(&self) -> Result<(), &'static str> {
        if self.customer_id.as_i32() <= 0 {
            return Err("Valid CustomerId is required.");
        }
        if self.product_name.trim().is_empty() {
            return Err("Product name is required.");
        }
        if self.amount <= Decimal::ZERO {
            return Err("Amount must be greater than zero.");
        }
        Ok(())
    }

    fn bind_insert<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.customer_id)
            .bind(self.product_name.as_str())
            .bind(self.amount)
            .bind(self.order_date)
    }

    fn bind_update<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.customer_id)
            .bind(self.product_name.as_str())
            .bind(self.amount)
    }
}
