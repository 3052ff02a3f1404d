use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nf_core::{Article, ArticleStore, Category, InsertOutcome, NewArticle, Result};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        slug TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        link TEXT NOT NULL UNIQUE,
        published_at TEXT NOT NULL,
        image_url TEXT,
        source TEXT NOT NULL,
        category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
        country TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_articles_published_at
    ON articles(published_at DESC)
    "#,
    // Add future migrations here
];

pub struct SqliteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl SqliteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                nf_core::Error::Storage(format!("Failed to create database directory: {}", e))
            })?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| nf_core::Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| {
                    nf_core::Error::Storage(format!("Failed to run migration {}: {}", i, e))
                })?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| nf_core::Error::Storage(format!("Failed to parse stored date: {}", e)))?
        .with_timezone(&Utc))
}

fn article_from_row(row: &SqliteRow) -> Result<Article> {
    let published_at: String = row.get("published_at");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(Article {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        link: row.get("link"),
        published_at: parse_instant(&published_at)?,
        image_url: row.get("image_url"),
        source: row.get("source"),
        category_id: row.get("category_id"),
        country: row.get("country"),
        created_at: parse_instant(&created_at)?,
        updated_at: parse_instant(&updated_at)?,
    })
}

fn category_from_row(row: &SqliteRow) -> Result<Category> {
    let created_at: String = row.get("created_at");
    Ok(Category {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
        created_at: parse_instant(&created_at)?,
    })
}

#[async_trait]
impl ArticleStore for SqliteStorage {
    async fn find_article_by_link(&self, link: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE link = ?")
            .bind(link)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| nf_core::Error::Storage(format!("Failed to query article: {}", e)))?;

        row.as_ref().map(article_from_row).transpose()
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<InsertOutcome> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO articles
            (title, description, link, published_at, image_url, source,
             category_id, country, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(link) DO NOTHING
            "#,
        )
        .bind(&article.title)
        .bind(article.description.as_deref())
        .bind(&article.link)
        .bind(article.published_at.to_rfc3339())
        .bind(article.image_url.as_deref())
        .bind(&article.source)
        .bind(article.category_id)
        .bind(article.country.as_deref())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| nf_core::Error::Storage(format!("Failed to insert article: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(InsertOutcome::Duplicate);
        }

        let stored = self
            .find_article_by_link(&article.link)
            .await?
            .ok_or_else(|| {
                nf_core::Error::Storage("inserted article not found by link".to_string())
            })?;
        Ok(InsertOutcome::Inserted(stored))
    }

    async fn get_or_create_category(&self, name: &str, slug_default: &str) -> Result<Category> {
        // Only a name conflict is a no-op; a slug collision between two
        // distinct names surfaces as a storage error.
        sqlx::query(
            r#"
            INSERT INTO categories (name, slug, description, created_at)
            VALUES (?, ?, '', ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(slug_default)
        .bind(Utc::now().to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| nf_core::Error::Storage(format!("Failed to insert category: {}", e)))?;

        let row = sqlx::query("SELECT * FROM categories WHERE name = ?")
            .bind(name)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| nf_core::Error::Storage(format!("Failed to query category: {}", e)))?;

        category_from_row(&row)
    }
}
