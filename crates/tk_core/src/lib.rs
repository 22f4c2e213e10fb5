pub mod categories;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod types;

pub use categories::{CategoryDef, CategoryTone, ALL_CATEGORY, CATEGORIES, DEFAULT_CATEGORY};
pub use error::Error;
pub use fetcher::NewsFetcher;
pub use parser::{parse, parse_report, ParseReport};
pub use types::{Article, Citation, FetchResult};

pub type Result<T> = std::result::Result<T, Error>;
