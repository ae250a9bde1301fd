use serde::{Deserialize, Serialize};

/// One row of the `anime` table.
///
/// Serialized with the canonical attribute names (`Title`, `mediaType`,
/// `Season_of_Release`, ...) so JSON payloads match the field names users
/// request through the lookup commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub id: i32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub episodes: i32,
    pub duration: String,
    pub ongoing: String,
    pub start_year: Option<String>,
    pub finish_year: Option<String>,
    #[serde(rename = "Season_of_Release")]
    pub season_of_release: String,
    pub description: String,
    pub studios: String,
    pub tags: String,
    pub content_warning: String,
    pub watched: i32,
    pub watching: i32,
    pub want_to_watch: i32,
    pub dropped: i32,
    pub rating: String,
    pub votes: i32,
}

impl AnimeRecord {
    #[must_use]
    pub fn from_new(id: i32, anime: NewAnime) -> Self {
        Self {
            id,
            title: anime.title,
            media_type: anime.media_type,
            episodes: anime.episodes,
            duration: anime.duration,
            ongoing: anime.ongoing,
            start_year: anime.start_year,
            finish_year: anime.finish_year,
            season_of_release: anime.season_of_release,
            description: anime.description,
            studios: anime.studios,
            tags: anime.tags,
            content_warning: anime.content_warning,
            watched: anime.watched,
            watching: anime.watching,
            want_to_watch: anime.want_to_watch,
            dropped: anime.dropped,
            rating: anime.rating,
            votes: anime.votes,
        }
    }
}

/// Write-side payload. Every attribute is optional on the wire; an `id` sent
/// by the client is ignored because the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAnime {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub episodes: i32,
    pub duration: String,
    pub ongoing: String,
    pub start_year: Option<String>,
    pub finish_year: Option<String>,
    #[serde(rename = "Season_of_Release")]
    pub season_of_release: String,
    pub description: String,
    pub studios: String,
    pub tags: String,
    pub content_warning: String,
    pub watched: i32,
    pub watching: i32,
    pub want_to_watch: i32,
    pub dropped: i32,
    pub rating: String,
    pub votes: i32,
}

impl NewAnime {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for NewAnime {
    fn default() -> Self {
        Self {
            title: "Unknown".to_string(),
            media_type: "Unknown".to_string(),
            episodes: 0,
            duration: "Unknown".to_string(),
            ongoing: "Unknown".to_string(),
            start_year: None,
            finish_year: None,
            season_of_release: "Unknown".to_string(),
            description: "No description available".to_string(),
            studios: "Unknown".to_string(),
            tags: "Unknown".to_string(),
            content_warning: "Unknown".to_string(),
            watched: 0,
            watching: 0,
            want_to_watch: 0,
            dropped: 0,
            rating: "Unknown".to_string(),
            votes: 0,
        }
    }
}
