use serde_json::Value;

use super::error::FilterError;
use super::types::{SortDirection, SqlResult};

/// Conjunctive filter builder producing parameterized SQL.
///
/// Every clause added through `and_*` joins the WHERE conjunction; clauses
/// for absent search fields are simply never added. Ownership predicates and
/// search filters go through the same builder so a compound `(id, owner)`
/// lookup is always a single query.
pub struct Filter {
    table_name: String,
    conditions: Vec<String>,
    params: Vec<Value>,
    order_data: Vec<(String, SortDirection)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        Self::validate_table_name(&table_name)?;
        Ok(Self {
            table_name,
            conditions: vec![],
            params: vec![],
            order_data: vec![],
            limit: None,
            offset: None,
        })
    }

    /// `column = value`
    pub fn and_eq(&mut self, column: &str, value: impl Into<Value>) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        let placeholder = self.param(value.into());
        self.conditions.push(format!("\"{}\" = {}", column, placeholder));
        Ok(self)
    }

    /// Substring containment: `column LIKE %needle%` with wildcards escaped.
    /// Case-sensitive (store default collation).
    pub fn and_contains(&mut self, column: &str, needle: &str) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        let placeholder = self.param(Value::String(Self::contains_pattern(needle)));
        self.conditions.push(format!("\"{}\" LIKE {}", column, placeholder));
        Ok(self)
    }

    /// Containment across any of several columns, as one parenthesized
    /// OR-group inside the conjunction.
    pub fn and_contains_any(&mut self, columns: &[&str], needle: &str) -> Result<&mut Self, FilterError> {
        for column in columns {
            Self::validate_column(column)?;
        }
        let pattern = Self::contains_pattern(needle);
        let parts: Vec<String> = columns
            .iter()
            .map(|column| {
                let placeholder = self.param(Value::String(pattern.clone()));
                format!("\"{}\" LIKE {}", column, placeholder)
            })
            .collect();
        self.conditions.push(format!("({})", parts.join(" OR ")));
        Ok(self)
    }

    pub fn order_by(&mut self, column: &str, direction: SortDirection) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        self.order_data.push((column.to_string(), direction));
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        if let Some(off) = offset {
            if off < 0 {
                return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
            }
        }

        // Apply max limit from config
        let max_limit = crate::config::CONFIG.pagination.max_size;
        self.limit = Some(limit.min(max_limit));
        self.offset = offset;
        Ok(self)
    }

    /// Page-based pagination: skip `(page-1)*size` rows, take `size`.
    pub fn paginate(&mut self, page: i64, size: i64) -> Result<&mut Self, FilterError> {
        if page < 1 {
            return Err(FilterError::InvalidOffset("Page must be at least 1".to_string()));
        }
        if size < 1 {
            return Err(FilterError::InvalidLimit("Size must be at least 1".to_string()));
        }
        self.limit(size, Some(size * (page - 1)))
    }

    pub fn to_sql(&self) -> SqlResult {
        let query = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            self.build_where_clause(),
            self.build_order_clause(),
            self.build_limit_clause(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params: self.params.clone() }
    }

    /// COUNT over the same conjunction, ignoring order and pagination. The
    /// total must reflect the whole matching set, not the current page.
    pub fn to_count_sql(&self) -> SqlResult {
        let query = [
            format!("SELECT COUNT(*) as count FROM \"{}\"", self.table_name),
            self.build_where_clause(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params: self.params.clone() }
    }

    fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    fn build_order_clause(&self) -> String {
        if self.order_data.is_empty() {
            String::new()
        } else {
            let parts: Vec<String> = self
                .order_data
                .iter()
                .map(|(column, direction)| format!("\"{}\" {}", column, direction.to_sql()))
                .collect();
            format!("ORDER BY {}", parts.join(", "))
        }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// `%needle%` with LIKE wildcards in the needle escaped so user input
    /// matches literally.
    fn contains_pattern(needle: &str) -> String {
        let escaped = needle
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }

    fn validate_table_name(name: &str) -> Result<(), FilterError> {
        Self::validate_identifier(name)
            .map_err(|_| FilterError::InvalidTableName(name.to_string()))
    }

    fn validate_column(name: &str) -> Result<(), FilterError> {
        Self::validate_identifier(name).map_err(|_| FilterError::InvalidColumn(name.to_string()))
    }

    fn validate_identifier(name: &str) -> Result<(), ()> {
        let mut chars = name.chars();
        let first = chars.next().ok_or(())?;
        if !first.is_alphabetic() && first != '_' {
            return Err(());
        }
        if name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(())
        }
    }
}
