use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, SqlitePool};

use crate::configs::schema::SchemaManager;
use crate::configs::settings::Database;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database, schema_manager: SchemaManager) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1) // in memory db might drop connection when 0
            .max_connections(if database.url.contains(":memory:") { 1 } else { 10 })
            .connect(&database.url)
            .await?;

        Self::create_schema(&pool, &schema_manager, &database).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(
        pool: &SqlitePool,
        schema: &SchemaManager,
        database: &Database,
    ) -> Result<(), Error> {
        let mut statements = Vec::new();

        if database.clean_start {
            statements.extend(schema.dispose_schema());
            tracing::warn!("perform a clean boot: clean and recreate schema");
        }

        statements.extend(schema.create_schema());

        sqlx::raw_sql(&statements.join("\n")).execute(pool).await?;

        Ok(())
    }
}
