use anyhow::{Context, Result};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::model::{
    Id, Owner, PagedResult, Property, PropertyFilter, PropertyImage, PropertyTrace,
};
use crate::store::traits::{
    OwnerStore, PropertyImageStore, PropertyStore, PropertyTraceStore, Store,
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS owners (
        id_owner INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        photo TEXT NOT NULL DEFAULT '',
        birthday TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS properties (
        id_property INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        price NUMERIC NOT NULL,
        code_internal TEXT NOT NULL UNIQUE,
        year INTEGER NOT NULL,
        id_owner INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS property_images (
        id_property_image INTEGER PRIMARY KEY,
        id_property INTEGER NOT NULL,
        file TEXT NOT NULL,
        enabled BOOLEAN NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS property_traces (
        id_property_trace INTEGER PRIMARY KEY,
        id_property INTEGER NOT NULL,
        date_sale TIMESTAMPTZ NOT NULL,
        name TEXT NOT NULL,
        value NUMERIC NOT NULL,
        tax NUMERIC NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS id_counters (
        collection TEXT PRIMARY KEY,
        next_id INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_properties_price ON properties (price)",
    "CREATE INDEX IF NOT EXISTS idx_property_images_property ON property_images (id_property)",
    "CREATE INDEX IF NOT EXISTS idx_property_traces_property ON property_traces (id_property)",
];

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// First-start DDL: the four collections, the identity counters, and
    /// the listing indexes. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to apply schema statement")?;
        }
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Atomically reserve the next identity for a collection. The counter
    /// row doubles as the high-water mark, so explicit-id inserts (seeding)
    /// stay ahead of it via `bump_counter`.
    async fn reserve_id(&self, collection: &str) -> Result<Id> {
        let row = sqlx::query(
            r#"
            INSERT INTO id_counters (collection, next_id) VALUES ($1, 1)
            ON CONFLICT (collection) DO UPDATE SET next_id = id_counters.next_id + 1
            RETURNING next_id
            "#,
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await
        .context("Failed to reserve identity")?;

        Ok(row.get("next_id"))
    }

    async fn bump_counter(&self, collection: &str, id: Id) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO id_counters (collection, next_id) VALUES ($1, $2)
            ON CONFLICT (collection) DO UPDATE
                SET next_id = GREATEST(id_counters.next_id, EXCLUDED.next_id)
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to advance identity counter")?;

        Ok(())
    }
}

fn owner_from_row(row: &PgRow) -> Owner {
    Owner {
        id_owner: row.get("id_owner"),
        name: row.get("name"),
        address: row.get("address"),
        photo: row.get("photo"),
        birthday: row.get("birthday"),
    }
}

fn property_from_row(row: &PgRow) -> Property {
    Property {
        id_property: row.get("id_property"),
        name: row.get("name"),
        address: row.get("address"),
        price: row.get("price"),
        code_internal: row.get("code_internal"),
        year: row.get("year"),
        id_owner: row.get("id_owner"),
    }
}

fn image_from_row(row: &PgRow) -> PropertyImage {
    PropertyImage {
        id_property_image: row.get("id_property_image"),
        id_property: row.get("id_property"),
        file: row.get("file"),
        enabled: row.get("enabled"),
    }
}

fn trace_from_row(row: &PgRow) -> PropertyTrace {
    PropertyTrace {
        id_property_trace: row.get("id_property_trace"),
        id_property: row.get("id_property"),
        date_sale: row.get("date_sale"),
        name: row.get("name"),
        value: row.get("value"),
        tax: row.get("tax"),
    }
}

/// Append the filter's active constraints as a conjoined WHERE clause.
/// Semantics match `PropertyFilter::matches`: case-insensitive substring
/// on name/address, inclusive price bounds.
fn push_property_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PropertyFilter) {
    builder.push(" WHERE TRUE");

    if let Some(name) = filter.name_contains() {
        builder.push(" AND name ILIKE ").push_bind(like_pattern(name));
    }
    if let Some(address) = filter.address_contains() {
        builder
            .push(" AND address ILIKE ")
            .push_bind(like_pattern(address));
    }
    if let Some(min) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
}

fn like_pattern(term: &str) -> String {
    // LIKE metacharacters in user input are literal search text.
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait::async_trait]
impl OwnerStore for PostgresStore {
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>> {
        let row = sqlx::query(
            "SELECT id_owner, name, address, photo, birthday FROM owners WHERE id_owner = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch owner")?;

        Ok(row.as_ref().map(owner_from_row))
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        let rows = sqlx::query(
            "SELECT id_owner, name, address, photo, birthday FROM owners ORDER BY id_owner",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list owners")?;

        Ok(rows.iter().map(owner_from_row).collect())
    }

    async fn insert_owner(&self, owner: Owner) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO owners (id_owner, name, address, photo, birthday)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(owner.id_owner)
        .bind(&owner.name)
        .bind(&owner.address)
        .bind(&owner.photo)
        .bind(owner.birthday)
        .execute(&self.pool)
        .await
        .context("Failed to insert owner")?;

        self.bump_counter("owners", owner.id_owner).await
    }

    async fn replace_owner(&self, owner: Owner) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE owners SET name = $2, address = $3, photo = $4, birthday = $5
            WHERE id_owner = $1
            "#,
        )
        .bind(owner.id_owner)
        .bind(&owner.name)
        .bind(&owner.address)
        .bind(&owner.photo)
        .bind(owner.birthday)
        .execute(&self.pool)
        .await
        .context("Failed to replace owner")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owner(&self, id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM owners WHERE id_owner = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete owner")?;

        Ok(result.rows_affected() > 0)
    }

    async fn owner_exists(&self, id: Id) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM owners WHERE id_owner = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check owner existence")?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn count_owners(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM owners")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count owners")?;

        Ok(row.get("count"))
    }

    async fn next_owner_id(&self) -> Result<Id> {
        self.reserve_id("owners").await
    }
}

#[async_trait::async_trait]
impl PropertyStore for PostgresStore {
    async fn get_property(&self, id: Id) -> Result<Option<Property>> {
        let row = sqlx::query(
            r#"
            SELECT id_property, name, address, price, code_internal, year, id_owner
            FROM properties WHERE id_property = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch property")?;

        Ok(row.as_ref().map(property_from_row))
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query(
            r#"
            SELECT id_property, name, address, price, code_internal, year, id_owner
            FROM properties ORDER BY id_property
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list properties")?;

        Ok(rows.iter().map(property_from_row).collect())
    }

    async fn list_properties_paged(
        &self,
        filter: &PropertyFilter,
    ) -> Result<PagedResult<Property>> {
        // Count first, over the same predicate as the window. The two reads
        // may observe different snapshots under concurrent writes.
        let total_count = self.count_properties(filter).await?;

        let mut builder = QueryBuilder::new(
            "SELECT id_property, name, address, price, code_internal, year, id_owner FROM properties",
        );
        push_property_filter(&mut builder, filter);
        builder.push(" ORDER BY id_property");
        builder.push(" LIMIT ").push_bind(filter.page_size() as i64);
        builder.push(" OFFSET ").push_bind(filter.skip());

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch property page")?;

        Ok(PagedResult::new(
            rows.iter().map(property_from_row).collect(),
            total_count,
            filter.page(),
            filter.page_size(),
        ))
    }

    async fn insert_property(&self, property: Property) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO properties (id_property, name, address, price, code_internal, year, id_owner)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(property.id_property)
        .bind(&property.name)
        .bind(&property.address)
        .bind(property.price)
        .bind(&property.code_internal)
        .bind(property.year)
        .bind(property.id_owner)
        .execute(&self.pool)
        .await
        .context("Failed to insert property")?;

        self.bump_counter("properties", property.id_property).await
    }

    async fn replace_property(&self, property: Property) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET name = $2, address = $3, price = $4, code_internal = $5, year = $6, id_owner = $7
            WHERE id_property = $1
            "#,
        )
        .bind(property.id_property)
        .bind(&property.name)
        .bind(&property.address)
        .bind(property.price)
        .bind(&property.code_internal)
        .bind(property.year)
        .bind(property.id_owner)
        .execute(&self.pool)
        .await
        .context("Failed to replace property")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_property(&self, id: Id) -> Result<bool> {
        // No cascade: images and traces stay behind, queryable by property.
        let result = sqlx::query("DELETE FROM properties WHERE id_property = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete property")?;

        Ok(result.rows_affected() > 0)
    }

    async fn property_exists(&self, id: Id) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM properties WHERE id_property = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check property existence")?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn count_properties(&self, filter: &PropertyFilter) -> Result<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) AS count FROM properties");
        push_property_filter(&mut builder, filter);

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count properties")?;

        Ok(row.get("count"))
    }

    async fn next_property_id(&self) -> Result<Id> {
        self.reserve_id("properties").await
    }
}

#[async_trait::async_trait]
impl PropertyImageStore for PostgresStore {
    async fn insert_image(&self, image: PropertyImage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO property_images (id_property_image, id_property, file, enabled)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(image.id_property_image)
        .bind(image.id_property)
        .bind(&image.file)
        .bind(image.enabled)
        .execute(&self.pool)
        .await
        .context("Failed to insert property image")?;

        self.bump_counter("property_images", image.id_property_image)
            .await
    }

    async fn images_for_property(&self, property_id: Id) -> Result<Vec<PropertyImage>> {
        let rows = sqlx::query(
            r#"
            SELECT id_property_image, id_property, file, enabled
            FROM property_images WHERE id_property = $1
            ORDER BY id_property_image
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list property images")?;

        Ok(rows.iter().map(image_from_row).collect())
    }

    async fn first_enabled_image(&self, property_id: Id) -> Result<Option<PropertyImage>> {
        let row = sqlx::query(
            r#"
            SELECT id_property_image, id_property, file, enabled
            FROM property_images WHERE id_property = $1 AND enabled
            ORDER BY id_property_image
            LIMIT 1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch first enabled image")?;

        Ok(row.as_ref().map(image_from_row))
    }

    async fn next_image_id(&self) -> Result<Id> {
        self.reserve_id("property_images").await
    }
}

#[async_trait::async_trait]
impl PropertyTraceStore for PostgresStore {
    async fn insert_trace(&self, trace: PropertyTrace) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO property_traces (id_property_trace, id_property, date_sale, name, value, tax)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(trace.id_property_trace)
        .bind(trace.id_property)
        .bind(trace.date_sale)
        .bind(&trace.name)
        .bind(trace.value)
        .bind(trace.tax)
        .execute(&self.pool)
        .await
        .context("Failed to insert property trace")?;

        self.bump_counter("property_traces", trace.id_property_trace)
            .await
    }

    async fn traces_for_property(&self, property_id: Id) -> Result<Vec<PropertyTrace>> {
        let rows = sqlx::query(
            r#"
            SELECT id_property_trace, id_property, date_sale, name, value, tax
            FROM property_traces WHERE id_property = $1
            ORDER BY id_property_trace
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list property traces")?;

        Ok(rows.iter().map(trace_from_row).collect())
    }

    async fn next_trace_id(&self) -> Result<Id> {
        self.reserve_id("property_traces").await
    }
}

impl Store for PostgresStore {}
