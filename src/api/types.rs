use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Title {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl Title {
    pub fn display(&self) -> &str {
        self.english
            .as_deref()
            .or(self.romaji.as_deref())
            .or(self.native.as_deref())
            .unwrap_or("Untitled")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverImage {
    pub large: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullEpisode {
    pub file: String,
    pub title: Option<String>,
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub episodes: Vec<FullEpisode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnData {
    pub seasons: Vec<Season>,
}

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub anilist_id: String,
    pub title: Title,
    pub episodes: u32,
    pub duration: u32,
    pub trailer: Option<String>,
    pub average_score: u32,
    pub is_adult: bool,
    pub status: String,
    pub cover_image: CoverImage,
    pub banner_image: Option<String>,
    pub description: String,
    pub cdn_data: CdnData,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimeData {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    pub anime_data: AnimeData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeResponse {
    pub anime: Card,
    pub next_episode: u32,
}

/// Bookmark record as written by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookmarkedTitle {
    pub id: String,
    pub anilist_id: String,
    pub title: Title,
    pub poster: String,
}

/// Watch progress record as written by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LastEpisodeInfo {
    pub id: String,
    pub anilist_id: String,
    pub title: Title,
    pub season_index: u32,
    pub episode_index: u32,
    pub pos: u64,
    pub dur: u64,
    pub poster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomePageResponse {
    pub anime_data: AnimeData,
    pub home_slides_data: Vec<Card>,
    pub recently_added_data: Vec<Card>,
    pub trending_data: Vec<Card>,
    /// Filled from the local store, never by the server.
    #[serde(skip_deserializing)]
    pub favorites: Vec<BookmarkedTitle>,
    #[serde(skip_deserializing)]
    pub recently_seen: Vec<LastEpisodeInfo>,
}
