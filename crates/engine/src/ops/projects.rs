use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, QueryOrder, TransactionTrait,
};

use crate::{Project, ProjectNew, ProjectPatch, ResultEngine, projects};

use super::{Engine, not_found, require_text, with_tx};

const NOT_FOUND: &str = "Projeto não encontrado";
const NAME_REQUIRED: &str = "O nome do projeto é obrigatório";

async fn find_project(db: &impl ConnectionTrait, id: i32) -> ResultEngine<Project> {
    projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(NOT_FOUND))
}

impl Engine {
    pub async fn list_projects(&self) -> ResultEngine<Vec<Project>> {
        with_tx!(self, |db_tx| {
            let projects = projects::Entity::find()
                .order_by_asc(projects::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(projects)
        })
    }

    pub async fn project(&self, id: i32) -> ResultEngine<Project> {
        with_tx!(self, |db_tx| find_project(&db_tx, id).await)
    }

    pub async fn create_project(&self, new: ProjectNew) -> ResultEngine<i32> {
        let name = require_text(&new.name, NAME_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = projects::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                start_date: ActiveValue::Set(new.start_date),
                end_date: ActiveValue::Set(new.end_date),
                color: ActiveValue::Set(new.color),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_project(&self, id: i32, patch: ProjectPatch) -> ResultEngine<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_text(n, NAME_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: projects::ActiveModel = find_project(&db_tx, id).await?.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(start_date) = patch.start_date {
                active.start_date = ActiveValue::Set(Some(start_date));
            }
            if let Some(end_date) = patch.end_date {
                active.end_date = ActiveValue::Set(Some(end_date));
            }
            if let Some(color) = patch.color {
                active.color = ActiveValue::Set(Some(color));
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a project. Transactions keep their loose `project_id`.
    pub async fn delete_project(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_project(&db_tx, id).await?;
            projects::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
