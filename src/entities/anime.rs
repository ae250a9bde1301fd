use sea_orm::entity::prelude::*;

use crate::models::anime::{AnimeRecord, NewAnime};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "Title")]
    pub title: String,
    #[sea_orm(column_name = "mediaType")]
    pub media_type: String,
    pub episodes: i32,
    pub duration: String,
    pub ongoing: String,
    pub start_year: Option<String>,
    pub finish_year: Option<String>,
    #[sea_orm(column_name = "Season_of_Release")]
    pub season_of_release: String,
    #[sea_orm(column_type = "Text")]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AnimeRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            media_type: model.media_type,
            episodes: model.episodes,
            duration: model.duration,
            ongoing: model.ongoing,
            start_year: model.start_year,
            finish_year: model.finish_year,
            season_of_release: model.season_of_release,
            description: model.description,
            studios: model.studios,
            tags: model.tags,
            content_warning: model.content_warning,
            watched: model.watched,
            watching: model.watching,
            want_to_watch: model.want_to_watch,
            dropped: model.dropped,
            rating: model.rating,
            votes: model.votes,
        }
    }
}

impl From<NewAnime> for ActiveModel {
    fn from(anime: NewAnime) -> Self {
        use sea_orm::Set;

        Self {
            title: Set(anime.title),
            media_type: Set(anime.media_type),
            episodes: Set(anime.episodes),
            duration: Set(anime.duration),
            ongoing: Set(anime.ongoing),
            start_year: Set(anime.start_year),
            finish_year: Set(anime.finish_year),
            season_of_release: Set(anime.season_of_release),
            description: Set(anime.description),
            studios: Set(anime.studios),
            tags: Set(anime.tags),
            content_warning: Set(anime.content_warning),
            watched: Set(anime.watched),
            watching: Set(anime.watching),
            want_to_watch: Set(anime.want_to_watch),
            dropped: Set(anime.dropped),
            rating: Set(anime.rating),
            votes: Set(anime.votes),
            ..Default::default()
        }
    }
}
