use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::task;

/// A task as the rest of the workspace sees it. `id` stays `None` until the
/// record has been saved once. `title` may be null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, description: Option<String>, completed: bool) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description,
            completed,
        }
    }

    /// Identity comparison: two records are the same task only when both have
    /// been assigned the same id.
    pub fn same_identity(&self, other: &Task) -> bool {
        self.id.is_some() && self.id == other.id
    }

    fn from_model(model: task::Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            description: model.description,
            completed: model.completed,
        }
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let models = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Self>, DbErr> {
        let record = task::Entity::find_by_id(id).one(db).await?;
        Ok(record.map(Self::from_model))
    }

    /// Upsert. Without an id the store assigns one; with an id the row is
    /// overwritten, or inserted under that id when it no longer exists.
    pub async fn save<C: ConnectionTrait>(db: &C, data: Task) -> Result<Self, DbErr> {
        let mut active = task::ActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            completed: Set(data.completed),
            ..Default::default()
        };

        let model = match data.id {
            None => active.insert(db).await?,
            Some(id) => {
                active.id = Set(id);
                let exists = task::Entity::find_by_id(id).one(db).await?.is_some();
                if exists {
                    active.update(db).await?
                } else {
                    tracing::debug!(task_id = id, "Saving task under an unknown id, inserting");
                    active.insert(db).await?
                }
            }
        };

        Ok(Self::from_model(model))
    }

    /// Overwrites the row with the given id. Returns `None` without writing
    /// anything when no such row exists.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i64,
        data: Task,
    ) -> Result<Option<Self>, DbErr> {
        let active = task::ActiveModel {
            title: Set(data.title.clone()),
            description: Set(data.description.clone()),
            completed: Set(data.completed),
            ..Default::default()
        };

        let result = task::Entity::update_many()
            .set(active)
            .filter(task::Column::Id.eq(id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Some(Self {
            id: Some(id),
            ..data
        }))
    }

    /// Removes the row if present and reports how many rows went away.
    pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, DbErr> {
        let result = task::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
