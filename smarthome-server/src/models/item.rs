use serde::{Deserialize, Serialize};

use crate::models::Table;

/// A JSON document stored under `key` in the key space `table_name`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub table_name: String,
    pub key: String,
    pub item: String,
}

#[derive(Clone)]
pub struct ItemTable;

impl Table for ItemTable {
    fn name(&self) -> &'static str {
        "items"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                table_name TEXT NOT NULL,
                key TEXT NOT NULL,
                item TEXT NOT NULL,
                PRIMARY KEY (table_name, key)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS items;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
