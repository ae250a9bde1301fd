use crate::db::StoreError;
use crate::entities::anime;
use crate::models::anime::{AnimeRecord, NewAnime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::info;

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<AnimeRecord>, StoreError> {
        let model = anime::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(model.map(AnimeRecord::from))
    }

    /// Exact, case-sensitive title match. Titles are not unique, so the row
    /// with the lowest id wins.
    pub async fn get_by_title(&self, title: &str) -> Result<Option<AnimeRecord>, StoreError> {
        let model = anime::Entity::find()
            .filter(anime::Column::Title.eq(title))
            .order_by_asc(anime::Column::Id)
            .one(&self.conn)
            .await?;
        Ok(model.map(AnimeRecord::from))
    }

    pub async fn list_titles(&self) -> Result<Vec<(i32, String)>, StoreError> {
        let rows = anime::Entity::find()
            .select_only()
            .column(anime::Column::Id)
            .column(anime::Column::Title)
            .order_by_asc(anime::Column::Id)
            .into_tuple::<(i32, String)>()
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn add(&self, anime: NewAnime) -> Result<AnimeRecord, StoreError> {
        let model = anime::ActiveModel::from(anime).insert(&self.conn).await?;
        info!("Added anime: {} (id {})", model.title, model.id);
        Ok(AnimeRecord::from(model))
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        use sea_orm::PaginatorTrait;

        Ok(anime::Entity::find().count(&self.conn).await?)
    }
}
