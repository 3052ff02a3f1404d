use async_trait::async_trait;

use crate::types::{Article, Category, NewArticle};
use crate::Result;

/// Result of an insert-if-absent attempt.
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(Article),
    /// An article with the same link already exists; nothing was written.
    Duplicate,
}

impl InsertOutcome {
    pub fn was_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// Storage collaborator consumed by the ingestion pipeline. Persistence
/// mechanics live behind this trait; the pipeline only needs the three
/// operations below.
///
/// `insert_article` and `get_or_create_category` must be atomic in the
/// backend: a second overlapping run of the job must not be able to mint a
/// duplicate link or a duplicate category name.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_article_by_link(&self, link: &str) -> Result<Option<Article>>;

    /// Insert unless an article with the same link already exists. A
    /// duplicate is a skip, never an update.
    async fn insert_article(&self, article: &NewArticle) -> Result<InsertOutcome>;

    /// Fetch the category with this name, creating it with `slug_default`
    /// if absent.
    async fn get_or_create_category(&self, name: &str, slug_default: &str) -> Result<Category>;
}
