pub mod error;
pub mod extractor;
pub mod http;
pub mod link;
pub mod parallel;

pub use error::{ApiError, ConfigError, FetchError, SessionError};
pub use extractor::{Extractor, ExtractorRegistry, ResolveOptions};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use link::{ExtractorLink, ProviderLink, Quality};
pub use parallel::parallel_map;
