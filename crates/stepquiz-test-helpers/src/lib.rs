mod content;
mod fake_http;
mod sink;
pub mod fixtures;

pub use content::*;
pub use fake_http::*;
pub use sink::*;
