pub mod health;
pub mod helpers;
pub mod index;
pub mod types;
pub mod url;

pub use health::{HealthService, health_routes};
pub use index::{ApiIndexService, ApiIndexSettings, index_routes};
pub use url::{UrlService, url_routes};
