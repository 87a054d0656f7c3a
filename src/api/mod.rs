pub mod client;
pub mod home;
pub mod session;
pub mod types;

pub use client::AniApi;
pub use home::{HomeCache, HomeEvent, LoadError};
pub use session::{ScrapedSessionSource, Session, SessionSource};
pub use types::{BookmarkedTitle, Card, EpisodeResponse, HomePageResponse, LastEpisodeInfo, SearchResponse};
