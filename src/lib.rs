pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod resolver;
pub mod store;
pub mod utils;

pub use core::{Extractor, ExtractorLink, ExtractorRegistry, ProviderLink, Quality, ResolveOptions};
pub use extractors::Vidstream;
pub use resolver::AniResolver;
