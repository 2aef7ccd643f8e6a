//! Database Module
//!
//! The record store is one SQLite file with one table. There is no pool:
//! every operation opens its own connection, runs its statements and
//! closes the connection before returning.

pub mod filter;
pub mod restaurant;

pub use filter::RestaurantFilter;
pub use restaurant::{InsertStats, RowFit};

use shared::{Cell, MenuDetails, Restaurant, RowError};
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Mapping(#[from] RowError),

    #[error("unknown column: {0}")]
    UnknownColumn(&'static str),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Handle on the record store file
#[derive(Debug, Clone)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    /// Store backed by an existing database file
    ///
    /// Opening a missing file fails at connect time, so serving against a
    /// store that was never imported surfaces as a store error.
    pub fn open(db_path: impl AsRef<Path>) -> Self {
        Self::with_options(db_path, false)
    }

    /// Store that creates the database file on first connect
    pub fn create(db_path: impl AsRef<Path>) -> Self {
        Self::with_options(db_path, true)
    }

    fn with_options(db_path: impl AsRef<Path>, create_if_missing: bool) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        Self { options }
    }

    /// Open a fresh connection
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        SqliteConnection::connect_with(&self.options).await
    }

    /// Drop and recreate the restaurant table. Destroys all stored rows.
    pub async fn init_schema(&self) -> RepoResult<()> {
        let mut conn = self.connect().await?;
        let result = restaurant::init_schema(&mut conn).await;
        close(conn).await;
        if result.is_ok() {
            tracing::info!("Restaurant table recreated");
        }
        result
    }

    /// Insert source rows positionally (short rows padded with empty text)
    pub async fn bulk_insert(&self, rows: &[Vec<Cell>], headers: &[String]) -> RepoResult<InsertStats> {
        let mut conn = self.connect().await?;
        let result = restaurant::bulk_insert(&mut conn, rows, headers).await;
        close(conn).await;
        result
    }

    /// Rows satisfying every present criterion; storage order, unspecified
    pub async fn query_by_filter(&self, filter: &RestaurantFilter) -> RepoResult<Vec<Restaurant>> {
        let mut conn = self.connect().await?;
        let result = restaurant::query_by_filter(&mut conn, filter).await;
        close(conn).await;
        result
    }

    pub async fn query_by_id(&self, id: i64) -> RepoResult<Option<Restaurant>> {
        let mut conn = self.connect().await?;
        let result = restaurant::query_by_id(&mut conn, id).await;
        close(conn).await;
        result
    }

    pub async fn find_menu(&self, id: i64) -> RepoResult<Option<MenuDetails>> {
        let mut conn = self.connect().await?;
        let result = restaurant::find_menu(&mut conn, id).await;
        close(conn).await;
        result
    }

    pub async fn distinct_areas(&self) -> RepoResult<Vec<String>> {
        self.distinct_values("area").await
    }

    pub async fn distinct_genres(&self) -> RepoResult<Vec<String>> {
        self.distinct_values("category").await
    }

    async fn distinct_values(&self, column: &'static str) -> RepoResult<Vec<String>> {
        let mut conn = self.connect().await?;
        let result = restaurant::distinct_values(&mut conn, column).await;
        close(conn).await;
        result
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let mut conn = self.connect().await?;
        let result = restaurant::count(&mut conn).await;
        close(conn).await;
        result
    }
}

async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close database connection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Numeric;
    use shared::schema::{self, DATA_COLUMN_COUNT, RESTAURANT_COLUMNS};

    /// Source row in sheet order with the given overrides, other cells empty
    fn sheet_row(values: &[(&str, &str)]) -> Vec<Cell> {
        RESTAURANT_COLUMNS
            .iter()
            .map(|c| {
                values
                    .iter()
                    .find(|(name, _)| *name == c.name)
                    .map_or_else(Cell::empty, |(_, v)| Cell::from(*v))
            })
            .collect()
    }

    fn cafe_a() -> Vec<Cell> {
        sheet_row(&[
            ("name", "Cafe A"),
            ("address", "123 St"),
            ("phone_number", "555-0100"),
            ("tabelog_rating", "3.5"),
            ("menu", "Yakitori"),
            ("drink_menu", "Sake"),
            ("area", "Shinjuku"),
            ("capacity", "100"),
            ("category", "Izakaya"),
            ("budget_min", "5000"),
            ("budget_max", "10000"),
            ("has_private_room", "yes"),
            ("has_drink_all_included", "no"),
        ])
    }

    fn bistro_b() -> Vec<Cell> {
        sheet_row(&[
            ("name", "Bistro B"),
            ("area", "Shibuya"),
            ("capacity", "12"),
            ("category", "French, Wine bar"),
            ("budget_min", "8000"),
            ("budget_max", "15000"),
            ("has_private_room", "no"),
            ("has_drink_all_included", "yes"),
        ])
    }

    fn ramen_c() -> Vec<Cell> {
        sheet_row(&[
            ("name", "Ramen C"),
            ("area", "Shinjuku"),
            ("capacity", ""),
            ("category", "Ramen"),
            ("budget_min", "1000"),
            ("budget_max", "2000"),
            ("has_private_room", "no"),
            ("has_drink_all_included", "no"),
        ])
    }

    async fn seeded_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::create(dir.path().join("restaurants.db"));
        store.init_schema().await.unwrap();
        store
            .bulk_insert(&[cafe_a(), bistro_b(), ramen_c()], &[])
            .await
            .unwrap();
        (dir, store)
    }

    fn names(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_init_schema_is_destructive_and_repeatable() {
        let (_dir, store) = seeded_store().await;
        assert_eq!(store.count().await.unwrap(), 3);

        store.init_schema().await.unwrap();
        store.init_schema().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("missing.db"));
        assert!(matches!(
            store.query_by_id(1).await,
            Err(RepoError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_bulk_insert_pads_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::create(dir.path().join("restaurants.db"));
        store.init_schema().await.unwrap();

        let short = vec![Cell::from("Tiny"), Cell::from("1 Ave"), Cell::from("555")];
        let stats = store.bulk_insert(&[short, cafe_a()], &[]).await.unwrap();
        assert_eq!(
            stats,
            InsertStats {
                inserted: 2,
                padded: 1,
                truncated: 0
            }
        );

        let tiny = store.query_by_id(1).await.unwrap().unwrap();
        assert_eq!(tiny.name, "Tiny");
        assert_eq!(tiny.phone_number, "555");
        assert_eq!(tiny.area, "");
        assert_eq!(tiny.capacity, Some(Numeric::Text(String::new())));
        assert_eq!(tiny.detail_image1, "");
        assert_eq!(tiny.detail_image3, "");
    }

    #[tokio::test]
    async fn test_padded_row_maps_back_to_stored_cells() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::create(dir.path().join("restaurants.db"));
        store.init_schema().await.unwrap();

        let mut odd = cafe_a();
        odd[schema::row_position("capacity").unwrap() - 1] = Cell::from("100名");
        let short = vec![Cell::from("Cafe A"), Cell::from("1 St"), Cell::from("555")];
        store.bulk_insert(&[short, odd], &[]).await.unwrap();

        let mut conn = store.connect().await.unwrap();
        let rows = sqlx::query(&schema::select_sql())
            .fetch_all(&mut conn)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        for row in &rows {
            let cells = Cell::read_row(row).unwrap();
            let restaurant = Restaurant::from_row(&cells).unwrap();
            assert_eq!(restaurant.to_row(), cells[1..].to_vec());
        }

        let odd = store.query_by_id(2).await.unwrap().unwrap();
        assert_eq!(odd.capacity, Some(Numeric::Text("100名".into())));
    }

    #[tokio::test]
    async fn test_bulk_insert_truncates_long_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::create(dir.path().join("restaurants.db"));
        store.init_schema().await.unwrap();

        let mut long = cafe_a();
        long.push(Cell::from("overflow"));
        let stats = store.bulk_insert(&[long], &[]).await.unwrap();
        assert_eq!(stats.truncated, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_insert_order() {
        let (_dir, store) = seeded_store().await;
        assert_eq!(store.query_by_id(1).await.unwrap().unwrap().name, "Cafe A");
        assert_eq!(store.query_by_id(2).await.unwrap().unwrap().name, "Bistro B");
        assert_eq!(store.query_by_id(3).await.unwrap().unwrap().name, "Ramen C");
        assert!(store.query_by_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_numeric_text_is_stored_with_affinity() {
        let (_dir, store) = seeded_store().await;
        let cafe = store.query_by_id(1).await.unwrap().unwrap();
        assert_eq!(cafe.tabelog_rating, Some(Numeric::Real(3.5)));
        assert_eq!(cafe.capacity, Some(Numeric::Integer(100)));
        assert_eq!(cafe.budget_min, Some(Numeric::Integer(5000)));
        assert_eq!(cafe.google_rating, Some(Numeric::Text(String::new())));
    }

    #[tokio::test]
    async fn test_no_filter_returns_everything() {
        let (_dir, store) = seeded_store().await;
        let all = store
            .query_by_filter(&RestaurantFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_example_filter() {
        let (_dir, store) = seeded_store().await;
        let filter = RestaurantFilter::from_pairs([
            ("area", "Shinjuku"),
            ("guests", "5"),
            ("genre", "Izakaya"),
        ]);
        let found = store.query_by_filter(&filter).await.unwrap();
        assert_eq!(names(&found), vec!["Cafe A"]);

        let filter = RestaurantFilter::from_pairs([
            ("area", "Shinjuku"),
            ("guests", "200"),
            ("genre", "Izakaya"),
        ]);
        assert!(store.query_by_filter(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_capacity_never_satisfies_guests() {
        let (_dir, store) = seeded_store().await;
        let filter = RestaurantFilter::from_pairs([("area", "Shinjuku"), ("guests", "1")]);
        let found = store.query_by_filter(&filter).await.unwrap();
        assert_eq!(names(&found), vec!["Cafe A"]);
    }

    #[tokio::test]
    async fn test_genre_is_case_sensitive_substring() {
        let (_dir, store) = seeded_store().await;

        let found = store
            .query_by_filter(&RestaurantFilter::from_pairs([("genre", "Wine")]))
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Bistro B"]);

        let found = store
            .query_by_filter(&RestaurantFilter::from_pairs([("genre", "wine")]))
            .await
            .unwrap();
        assert!(found.is_empty());

        let found = store
            .query_by_filter(&RestaurantFilter::from_pairs([("genre", "%")]))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_budget_band() {
        let (_dir, store) = seeded_store().await;
        let filter = RestaurantFilter::from_pairs([("budgetMin", "4000"), ("budgetMax", "12000")]);
        let found = store.query_by_filter(&filter).await.unwrap();
        assert_eq!(names(&found), vec!["Cafe A"]);
    }

    #[tokio::test]
    async fn test_enum_filters() {
        let (_dir, store) = seeded_store().await;
        let filter = RestaurantFilter::from_pairs([("privateRoom", "no"), ("drinkIncluded", "no")]);
        let found = store.query_by_filter(&filter).await.unwrap();
        assert_eq!(names(&found), vec!["Ramen C"]);
    }

    #[tokio::test]
    async fn test_filters_narrow_monotonically() {
        let (_dir, store) = seeded_store().await;
        let all = store
            .query_by_filter(&RestaurantFilter::default())
            .await
            .unwrap();

        let steps: [(&str, &str); 5] = [
            ("area", "Shinjuku"),
            ("budgetMax", "20000"),
            ("drinkIncluded", "no"),
            ("guests", "2"),
            ("genre", "Iza"),
        ];
        let mut previous = all.clone();
        for n in 1..=steps.len() {
            let filter = RestaurantFilter::from_pairs(steps[..n].iter().copied());
            let found = store.query_by_filter(&filter).await.unwrap();
            assert!(found.iter().all(|r| previous.contains(r)));
            assert!(found.iter().all(|r| all.contains(r)));
            previous = found;
        }
        assert_eq!(names(&previous), vec!["Cafe A"]);
    }

    #[tokio::test]
    async fn test_menu_and_distinct_values() {
        let (_dir, store) = seeded_store().await;

        let menu = store.find_menu(1).await.unwrap().unwrap();
        assert_eq!(menu.food_menu, "Yakitori");
        assert_eq!(menu.drink_menu, "Sake");
        assert!(store.find_menu(99).await.unwrap().is_none());

        let mut areas = store.distinct_areas().await.unwrap();
        areas.sort();
        assert_eq!(areas, vec!["Shibuya", "Shinjuku"]);

        let genres = store.distinct_genres().await.unwrap();
        assert_eq!(genres.len(), 3);
    }

    #[tokio::test]
    async fn test_typed_round_trip_through_store() {
        let (_dir, store) = seeded_store().await;
        let cafe = store.query_by_id(1).await.unwrap().unwrap();

        store.init_schema().await.unwrap();
        store.bulk_insert(&[cafe.to_row()], &[]).await.unwrap();
        let again = store.query_by_id(1).await.unwrap().unwrap();
        assert_eq!(again, cafe);
        assert_eq!(cafe.to_row().len(), DATA_COLUMN_COUNT);
    }
}
