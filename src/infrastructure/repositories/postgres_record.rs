// src/infrastructure/repositories/postgres_record.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{CollectionName, Condition, Record, RecordId, RecordRepository};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, types::Json};

/// All collections share one `records` table; each record's fields live in
/// a JSONB `data` column and the id in a `BIGSERIAL` key.
#[derive(Clone)]
pub struct PostgresRecordRepository {
    pool: PgPool,
}

impl PostgresRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns `false` when a condition can never match, so the query can
    /// be skipped.
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        conditions: &'a [Condition],
    ) -> bool {
        for condition in conditions {
            if condition.is_id() {
                let Some(id) = RecordId::from_value(&condition.value) else {
                    return false;
                };
                builder.push(" AND id = ");
                builder.push_bind(i64::from(id));
            } else if condition.value.is_null() {
                builder.push(" AND (data -> ");
                builder.push_bind(condition.field.as_str());
                builder.push(" IS NULL OR data -> ");
                builder.push_bind(condition.field.as_str());
                builder.push(" = 'null'::jsonb)");
            } else {
                builder.push(" AND data -> ");
                builder.push_bind(condition.field.as_str());
                builder.push(" = ");
                builder.push_bind(Json(condition.value.clone()));
            }
        }
        true
    }
}

#[derive(Debug, FromRow)]
struct RecordRow {
    id: i64,
    data: Json<Value>,
}

impl TryFrom<RecordRow> for Record {
    type Error = DomainError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let fields = match row.data.0 {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            _ => {
                return Err(DomainError::Persistence(format!(
                    "record {} is not a JSON object",
                    row.id
                )));
            }
        };
        let mut record = Record::from_map(fields);
        record.set_id(RecordId::new(row.id)?);
        Ok(record)
    }
}

fn stored_data(record: Record) -> Json<Value> {
    Json(Value::Object(record.without_id().into_map()))
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn query(
        &self,
        collection: &CollectionName,
        conditions: &[Condition],
    ) -> DomainResult<Vec<Record>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, data FROM records WHERE collection = ");
        builder.push_bind(collection.as_str());
        if !Self::apply_conditions(&mut builder, conditions) {
            return Ok(Vec::new());
        }
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<RecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Record::try_from).collect()
    }

    async fn insert(&self, collection: &CollectionName, record: Record) -> DomainResult<RecordId> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO records (collection, data) VALUES ($1, $2) RETURNING id",
        )
        .bind(collection.as_str())
        .bind(stored_data(record))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        RecordId::new(id)
    }

    async fn replace(
        &self,
        collection: &CollectionName,
        id: RecordId,
        record: Record,
    ) -> DomainResult<()> {
        let result = sqlx::query("UPDATE records SET data = $3 WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(i64::from(id))
            .bind(stored_data(record))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(collection.as_str(), id));
        }
        Ok(())
    }

    async fn delete(&self, collection: &CollectionName, id: RecordId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(collection.as_str(), id));
        }
        Ok(())
    }
}
