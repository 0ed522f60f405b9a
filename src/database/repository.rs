use serde_json::Value;
use sqlx::{self, postgres::PgArguments, postgres::PgRow, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::Filter;

/// Typed read access over a `Filter`; all reads execute the parameterized
/// SQL the filter produced.
pub struct Repository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all(&self, filter: &Filter) -> Result<Vec<T>, DatabaseError> {
        let sql_result = filter.to_sql();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(&self, filter: &Filter) -> Result<Option<T>, DatabaseError> {
        let sql_result = filter.to_sql();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(&self.pool).await?;
        Ok(row)
    }

    pub async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError> {
        let sql_result = filter.to_count_sql();
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        other => q.bind(other.clone()), // JSONB
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        other => q.bind(other.clone()), // JSONB
    }
}
