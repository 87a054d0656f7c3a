pub mod doodstream;
pub mod mp4upload;
pub mod multi_quality;
pub mod packer;
pub mod shiro;
pub mod streamtape;
pub mod vidoza;
pub mod vidstream;

pub use doodstream::DoodStream;
pub use mp4upload::Mp4Upload;
pub use multi_quality::MultiQuality;
pub use shiro::Shiro;
pub use streamtape::StreamTape;
pub use vidoza::Vidoza;
pub use vidstream::{Resolution, Vidstream};

use crate::core::{ExtractorRegistry, HttpClient};
use std::sync::Arc;

/// Registry with every built-in extractor.
pub fn builtin_registry(http: Arc<dyn HttpClient>) -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();

    registry.register_direct(Arc::new(Shiro::new(http.clone())));
    registry.register_direct(Arc::new(MultiQuality::new(http.clone())));

    registry.register_linked(Arc::new(StreamTape::new(http.clone())));
    registry.register_linked(Arc::new(Mp4Upload::new(http.clone())));
    registry.register_linked(Arc::new(DoodStream::new(http.clone())));
    registry.register_linked(Arc::new(Vidoza::new(http)));

    registry
}
