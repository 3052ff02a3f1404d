use async_trait::async_trait;
use chrono::Utc;
use nf_core::{Article, ArticleStore, Category, InsertOutcome, NewArticle, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Plain in-memory article store; the locked wrapper below implements the
/// storage trait. Check-and-insert sections run under a single write lock.
pub struct MemoryStore {
    articles: Vec<Article>,
    categories: Vec<Category>,
    next_article_id: i64,
    next_category_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            categories: Vec::new(),
            next_article_id: 1,
            next_category_id: 1,
        }
    }

    pub fn find_article_by_link(&self, link: &str) -> Option<Article> {
        self.articles.iter().find(|a| a.link == link).cloned()
    }

    pub fn insert_article(&mut self, new: &NewArticle) -> InsertOutcome {
        if self.articles.iter().any(|a| a.link == new.link) {
            return InsertOutcome::Duplicate;
        }
        let now = Utc::now();
        let article = Article {
            id: self.next_article_id,
            title: new.title.clone(),
            description: new.description.clone(),
            link: new.link.clone(),
            published_at: new.published_at,
            image_url: new.image_url.clone(),
            source: new.source.clone(),
            category_id: new.category_id,
            country: new.country.clone(),
            created_at: now,
            updated_at: now,
        };
        self.next_article_id += 1;
        self.articles.push(article.clone());
        InsertOutcome::Inserted(article)
    }

    pub fn get_or_create_category(&mut self, name: &str, slug_default: &str) -> Category {
        if let Some(existing) = self.categories.iter().find(|c| c.name == name) {
            return existing.clone();
        }
        let category = Category {
            id: self.next_category_id,
            name: name.to_string(),
            slug: slug_default.to_string(),
            description: String::new(),
            created_at: Utc::now(),
        };
        self.next_category_id += 1;
        self.categories.push(category.clone());
        category
    }
}

pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub async fn new() -> Result<Self> {
        Ok(Self {
            store: Arc::new(RwLock::new(MemoryStore::new())),
        })
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn find_article_by_link(&self, link: &str) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.find_article_by_link(link))
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<InsertOutcome> {
        let mut store = self.store.write().await;
        Ok(store.insert_article(article))
    }

    async fn get_or_create_category(&self, name: &str, slug_default: &str) -> Result<Category> {
        let mut store = self.store.write().await;
        Ok(store.get_or_create_category(name, slug_default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_article(link: &str, title: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            description: None,
            link: link.to_string(),
            published_at: Utc::now(),
            image_url: None,
            source: "test".to_string(),
            category_id: None,
            country: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_link_is_skipped_keeping_first() {
        let storage = MemoryStorage::new().await.unwrap();

        let first = storage
            .insert_article(&new_article("http://example.com/a", "First"))
            .await
            .unwrap();
        assert!(first.was_inserted());

        let second = storage
            .insert_article(&new_article("http://example.com/a", "Second"))
            .await
            .unwrap();
        assert!(!second.was_inserted());

        let stored = storage
            .find_article_by_link("http://example.com/a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "First");
    }

    #[tokio::test]
    async fn test_get_or_create_category_is_stable() {
        let storage = MemoryStorage::new().await.unwrap();

        let a = storage
            .get_or_create_category("World", "world")
            .await
            .unwrap();
        let b = storage
            .get_or_create_category("World", "ignored-slug")
            .await
            .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(b.slug, "world");
    }

    #[tokio::test]
    async fn test_concurrent_get_or_create_yields_one_category() {
        let storage = Arc::new(MemoryStorage::new().await.unwrap());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .get_or_create_category("Technology", "technology")
                    .await
                    .unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_find_missing_link_is_none() {
        let storage = MemoryStorage::new().await.unwrap();
        assert!(storage
            .find_article_by_link("http://nowhere")
            .await
            .unwrap()
            .is_none());
    }
}
