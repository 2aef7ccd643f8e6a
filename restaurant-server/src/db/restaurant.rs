//! Restaurant Repository
//!
//! Statements against the single `restaurants` table. Every function works
//! on a caller-provided connection; [`super::Store`] owns connection
//! lifetime.

use shared::schema::{self, DATA_COLUMN_COUNT, TABLE_NAME};
use shared::{Cell, MenuDetails, Restaurant};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnection};
use sqlx::{Connection, Sqlite};

use super::filter::RestaurantFilter;
use super::{RepoError, RepoResult};

/// Outcome of a bulk insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertStats {
    pub inserted: usize,
    /// Rows shorter than the column count, padded with empty text
    pub padded: usize,
    /// Rows longer than the column count, cut to it
    pub truncated: usize,
}

/// How a source row was fitted to the column count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFit {
    Exact,
    Padded(usize),
    Truncated(usize),
}

/// Fit a source row to exactly [`DATA_COLUMN_COUNT`] cells
pub fn fit_row(row: &[Cell]) -> (Vec<Cell>, RowFit) {
    let mut cells: Vec<Cell> = row.iter().take(DATA_COLUMN_COUNT).cloned().collect();
    let fit = match row.len() {
        n if n < DATA_COLUMN_COUNT => {
            cells.resize(DATA_COLUMN_COUNT, Cell::empty());
            RowFit::Padded(DATA_COLUMN_COUNT - n)
        }
        n if n > DATA_COLUMN_COUNT => RowFit::Truncated(n - DATA_COLUMN_COUNT),
        _ => RowFit::Exact,
    };
    (cells, fit)
}

/// Drop the table if present and create it empty
pub async fn init_schema(conn: &mut SqliteConnection) -> RepoResult<()> {
    let drop = schema::drop_table_sql();
    let create = schema::create_table_sql();

    let mut tx = conn.begin().await?;
    sqlx::query(&drop).execute(&mut *tx).await?;
    sqlx::query(&create).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

/// Insert rows positionally, one transaction for the whole batch
///
/// Cells are stored as given; no content or type validation happens here.
pub async fn bulk_insert(
    conn: &mut SqliteConnection,
    rows: &[Vec<Cell>],
    headers: &[String],
) -> RepoResult<InsertStats> {
    if !headers.is_empty() && headers.len() != DATA_COLUMN_COUNT {
        tracing::warn!(
            headers = headers.len(),
            expected = DATA_COLUMN_COUNT,
            "Header count differs from column count; rows are still mapped by position"
        );
    }

    let sql = schema::insert_sql();
    let mut stats = InsertStats::default();
    let mut tx = conn.begin().await?;

    for (index, row) in rows.iter().enumerate() {
        let (cells, fit) = fit_row(row);
        match fit {
            RowFit::Exact => {}
            RowFit::Padded(_) => stats.padded += 1,
            RowFit::Truncated(extra) => {
                tracing::warn!(row = index, extra, "Dropping cells beyond the last column");
                stats.truncated += 1;
            }
        }

        let mut query = sqlx::query(&sql);
        for cell in &cells {
            query = bind_cell(query, cell);
        }
        query.execute(&mut *tx).await?;
        stats.inserted += 1;
    }

    tx.commit().await?;
    Ok(stats)
}

fn bind_cell<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    cell: &'q Cell,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match cell {
        Cell::Null => query.bind(None::<String>),
        Cell::Integer(i) => query.bind(*i),
        Cell::Real(f) => query.bind(*f),
        Cell::Text(s) => query.bind(s.as_str()),
    }
}

/// Rows matching every present criterion, in storage order
pub async fn query_by_filter(
    conn: &mut SqliteConnection,
    filter: &RestaurantFilter,
) -> RepoResult<Vec<Restaurant>> {
    let builder = filter.to_query();
    let sql = builder.build(&schema::select_sql());
    tracing::debug!(sql = %sql, bindings = builder.bindings().len(), "Restaurant filter query");

    let rows = builder
        .apply_bindings(sqlx::query(&sql))
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| -> RepoResult<Restaurant> {
            Ok(Restaurant::from_row(&Cell::read_row(row)?)?)
        })
        .collect()
}

pub async fn query_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{} WHERE id = ?", schema::select_sql());
    let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;

    match row {
        Some(row) => Ok(Some(Restaurant::from_row(&Cell::read_row(&row)?)?)),
        None => Ok(None),
    }
}

pub async fn find_menu(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<MenuDetails>> {
    let sql = format!("SELECT menu, drink_menu FROM {TABLE_NAME} WHERE id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;

    match row {
        Some(row) => Ok(Some(MenuDetails::from_row(&Cell::read_row(&row)?)?)),
        None => Ok(None),
    }
}

/// Distinct values of one data column, in storage order
pub async fn distinct_values(
    conn: &mut SqliteConnection,
    column: &'static str,
) -> RepoResult<Vec<String>> {
    if schema::column(column).is_none() {
        return Err(RepoError::UnknownColumn(column));
    }

    let sql = format!("SELECT DISTINCT {column} FROM {TABLE_NAME}");
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;

    rows.iter()
        .map(|row| -> RepoResult<String> { Ok(Cell::read_column(row, 0)?.to_text()) })
        .collect()
}

pub async fn count(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {TABLE_NAME}");
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(len: usize) -> Vec<Cell> {
        (0..len).map(|i| Cell::from(format!("c{i}"))).collect()
    }

    #[test]
    fn test_fit_exact_row() {
        let (cells, fit) = fit_row(&text_row(DATA_COLUMN_COUNT));
        assert_eq!(fit, RowFit::Exact);
        assert_eq!(cells.len(), DATA_COLUMN_COUNT);
    }

    #[test]
    fn test_fit_pads_short_row() {
        let (cells, fit) = fit_row(&text_row(3));
        assert_eq!(fit, RowFit::Padded(DATA_COLUMN_COUNT - 3));
        assert_eq!(cells.len(), DATA_COLUMN_COUNT);
        assert_eq!(cells[2], Cell::from("c2"));
        assert!(cells[3..].iter().all(|c| *c == Cell::empty()));
    }

    #[test]
    fn test_fit_truncates_long_row() {
        let (cells, fit) = fit_row(&text_row(DATA_COLUMN_COUNT + 2));
        assert_eq!(fit, RowFit::Truncated(2));
        assert_eq!(cells.len(), DATA_COLUMN_COUNT);
        assert_eq!(cells[DATA_COLUMN_COUNT - 1], Cell::from("c28"));
    }

    #[test]
    fn test_fit_empty_row() {
        let (cells, fit) = fit_row(&[]);
        assert_eq!(fit, RowFit::Padded(DATA_COLUMN_COUNT));
        assert!(cells.iter().all(|c| *c == Cell::empty()));
    }
}
