//! Customer store binding.
//!
//! The handler applies no business validation of its own for customers; the
//! required/length constraints live in the table schema and violations come
//! back as store errors.

use chrono::{DateTime, Utc};

use dualstore_core::{Customer, CustomerId};

use super::Store;
use super::entity::{PgQuery, PgQueryAs, StoreEntity};

impl StoreEntity for Customer {
    type Id = CustomerId;

    const STORE: Store = Store::Customer;
    const TABLE: &'static str = "customers";
    const API_PATH: &'static str = "/api/Customers";

    const CREATE_TABLE: &'static str = "\
        CREATE TABLE IF NOT EXISTS customers (
            id SERIAL PRIMARY KEY,
            name VARCHAR(200) NOT NULL,
            email VARCHAR(200) NOT NULL,
            created_date TIMESTAMPTZ NOT NULL,
            row_version INTEGER NOT NULL DEFAULT 0
        )";

    const SELECT_ALL: &'static str = "SELECT id, name, email, created_date FROM customers";

    const SELECT_BY_ID: &'static str =
        "SELECT id, name, email, created_date FROM customers WHERE id = $1";

    const SELECT_VERSION: &'static str = "SELECT row_version FROM customers WHERE id = $1";

    const EXISTS: &'static str = "SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)";

    const INSERT: &'static str = "\
        INSERT INTO customers (name, email, created_date)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, created_date";

    // created_date is immutable after insert and stays out of the SET list.
    const UPDATE: &'static str = "\
        UPDATE customers
        SET name = $1, email = $2, row_version = row_version + 1
        WHERE id = $3 AND row_version = $4";

    const DELETE: &'static str = "DELETE FROM customers WHERE id = $1";

    fn id(&self) -> CustomerId {
        self.id
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        self.created_date = Some(now);
    }

    fn validate_create(&self) -> Result<(), &'static str> {
        Ok(())
    }

    fn bind_insert<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.name.as_str())
            .bind(self.email.as_str())
            .bind(self.created_date)
    }

    fn bind_update<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.name.as_str()).bind(self.email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            id: CustomerId::default(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            created_date: None,
        }
    }

    #[test]
    fn test_stamp_overwrites_client_timestamp() {
        let mut customer = customer();
        customer.created_date = Some(Utc::now() - chrono::Duration::days(30));

        let now = Utc::now();
        customer.stamp(now);
        assert_eq!(customer.created_date, Some(now));
    }

    #[test]
    fn test_create_has_no_handler_level_rules() {
        // Even an empty payload passes; the store schema is the gatekeeper.
        let blank = Customer {
            id: CustomerId::default(),
            name: String::new(),
            email: String::new(),
            created_date: None,
        };
        assert_eq!(blank.validate_create(), Ok(()));
    }

    #[test]
    fn test_update_never_touches_created_date() {
        assert!(!Customer::UPDATE.contains("created_date"));
    }

    #[test]
    fn test_schema_bootstrap_is_create_if_absent() {
        assert!(Customer::CREATE_TABLE.contains("CREATE TABLE IF NOT EXISTS"));
    }
}
