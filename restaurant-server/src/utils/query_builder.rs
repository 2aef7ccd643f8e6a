use sqlx::{Sqlite, query::Query};

/// Query builder for SQL with dynamic WHERE conditions
///
/// The predicate starts as `1=1` and every added condition is AND-ed onto
/// it. Values only ever travel as bound parameters; the condition text is
/// built from column names supplied by the caller, never from input.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conditions: Vec<String>,
    bindings: Vec<QueryValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw condition; bindings for its `?` placeholders follow
    pub fn add_condition(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    pub fn bind_text(&mut self, value: String) -> &mut Self {
        self.bindings.push(QueryValue::Text(value));
        self
    }

    pub fn bind_i64(&mut self, value: i64) -> &mut Self {
        self.bindings.push(QueryValue::Integer(value));
        self
    }

    /// `field = ?`
    pub fn add_eq(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(&format!("{field} = ?"))
            .bind_text(value.to_string())
    }

    /// `field >= ?`, only for rows whose stored value is numeric
    pub fn add_min(&mut self, field: &str, value: i64) -> &mut Self {
        self.add_condition(&numeric_condition(field, ">="))
            .bind_i64(value)
    }

    /// `field <= ?`, only for rows whose stored value is numeric
    pub fn add_max(&mut self, field: &str, value: i64) -> &mut Self {
        self.add_condition(&numeric_condition(field, "<="))
            .bind_i64(value)
    }

    /// Case-sensitive substring containment
    pub fn add_contains(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(&format!("instr({field}, ?) > 0"))
            .bind_text(value.to_string())
    }

    /// Build the WHERE clause; always present, `1=1` when unconstrained
    pub fn build_where_clause(&self) -> String {
        let mut clause = String::from(" WHERE 1=1");
        for condition in &self.conditions {
            clause.push_str(" AND ");
            clause.push_str(condition);
        }
        clause
    }

    /// Append the WHERE clause to a base SELECT
    pub fn build(&self, select: &str) -> String {
        format!("{select}{}", self.build_where_clause())
    }

    pub fn bindings(&self) -> &[QueryValue] {
        &self.bindings
    }

    /// Apply bindings to a SQLx query
    pub fn apply_bindings<'a, 'b>(
        &'b self,
        mut query: Query<'a, Sqlite, <Sqlite as sqlx::Database>::Arguments<'a>>,
    ) -> Query<'a, Sqlite, <Sqlite as sqlx::Database>::Arguments<'a>>
    where
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                QueryValue::Text(s) => query.bind(s),
                QueryValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }
}

fn numeric_condition(field: &str, op: &str) -> String {
    format!("(typeof({field}) IN ('integer', 'real') AND {field} {op} ?)")
}
