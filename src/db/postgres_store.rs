use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::db::document_store::{
    new_document_id, Document, DocumentData, DocumentStore, Query, StoreError,
};

/// Document store kept in a single JSONB table (see `migrations/`).
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

fn into_document(id: String, data: Value) -> Result<Document, StoreError> {
    match data {
        Value::Object(data) => Ok(Document { id, data }),
        other => Err(StoreError::InvalidDocument(format!(
            "document {} is not a JSON object: {}",
            id, other
        ))),
    }
}

fn build_select(query: &Query) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new("SELECT id, data FROM documents WHERE collection = ");
    builder.push_bind(query.collection.as_str());

    // Containment keeps the filter on the GIN index; equal for scalar values
    for filter in &query.filters {
        let mut fragment = Map::new();
        fragment.insert(filter.field.clone(), filter.value.clone());
        builder.push(" AND data @> ");
        builder.push_bind(Json(Value::Object(fragment)));
    }

    if let Some(order) = &query.order_by {
        builder.push(" AND data ? ");
        builder.push_bind(order.field.as_str());
        builder.push(" ORDER BY data -> ");
        builder.push_bind(order.field.as_str());
        builder.push(" ");
        builder.push(order.direction.as_sql());
        builder.push(", inserted_at ");
        builder.push(order.direction.as_sql());
    } else {
        builder.push(" ORDER BY inserted_at ASC");
    }

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ");
        builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    }

    builder
}

#[async_trait]
impl DocumentStore for PostgresStore {
    #[tracing::instrument(name = "Insert document", skip(self, data))]
    async fn add(&self, collection: &str, data: DocumentData) -> Result<String, StoreError> {
        let id = new_document_id();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Json(Value::Object(data)))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    #[tracing::instrument(name = "Fetch document", skip(self))]
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let Json(data): Json<Value> = row.try_get("data")?;
                into_document(id.to_string(), data).map(Some)
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "Merge document fields", skip(self, fields))]
    async fn update(&self, collection: &str, id: &str, fields: DocumentData) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    #[tracing::instrument(name = "Delete document", skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "Run document query", skip(self), fields(collection = %query.collection))]
    async fn run_query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let rows = build_select(query).build().fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let Json(data): Json<Value> = row.try_get("data")?;
                into_document(id, data)
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
