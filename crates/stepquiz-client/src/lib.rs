mod client;
pub mod content;
pub mod error;
pub mod sink;

pub use client::base::{ApiUrl, BaseClient, Config};
pub use content::cms::{CmsConfig, CmsContentSource};
pub use content::file::FileContentSource;
pub use sink::{SearchIndexConfig, SearchIndexSink};
