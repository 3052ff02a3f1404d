pub mod dates;
pub mod error;
pub mod sanitize;
pub mod storage;
pub mod types;

pub use error::Error;
pub use storage::{ArticleStore, InsertOutcome};
pub use types::{Article, Category, NewArticle};

pub type Result<T> = std::result::Result<T, Error>;
