use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    Category, CategoryNew, CategoryPatch, ResultEngine, Subcategory, SubcategoryNew,
    SubcategoryPatch, categories, subcategories, transactions,
};

use super::{Engine, ensure_no_dependents, not_found, require_text, with_tx};

const CATEGORY_NOT_FOUND: &str = "Categoria não encontrada";
const CATEGORY_NAME_REQUIRED: &str = "O nome e a classe da categoria são obrigatórios";
const SUBCATEGORY_NOT_FOUND: &str = "Subcategoria não encontrada";
const SUBCATEGORY_NAME_REQUIRED: &str = "O nome da subcategoria é obrigatório";

/// A category together with its subcategories, ordered by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryWithSubcategories {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

async fn find_category(db: &impl ConnectionTrait, id: i32) -> ResultEngine<Category> {
    categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(CATEGORY_NOT_FOUND))
}

pub(super) async fn find_subcategory(
    db: &impl ConnectionTrait,
    id: i32,
) -> ResultEngine<Subcategory> {
    subcategories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(SUBCATEGORY_NOT_FOUND))
}

fn with_sorted_children(
    (category, mut subcategories): (Category, Vec<Subcategory>),
) -> CategoryWithSubcategories {
    subcategories.sort_by_key(|s| s.id);
    CategoryWithSubcategories {
        category,
        subcategories,
    }
}

impl Engine {
    /// All categories with their subcategories, loaded in one query.
    pub async fn list_categories(&self) -> ResultEngine<Vec<CategoryWithSubcategories>> {
        with_tx!(self, |db_tx| {
            let rows = categories::Entity::find()
                .order_by_asc(categories::Column::Id)
                .find_with_related(subcategories::Entity)
                .all(&db_tx)
                .await?;
            Ok(rows.into_iter().map(with_sorted_children).collect())
        })
    }

    pub async fn category(&self, id: i32) -> ResultEngine<CategoryWithSubcategories> {
        with_tx!(self, |db_tx| {
            let category = find_category(&db_tx, id).await?;
            let subcategories = subcategories::Entity::find()
                .filter(subcategories::Column::CategoryId.eq(id))
                .order_by_asc(subcategories::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(CategoryWithSubcategories {
                category,
                subcategories,
            })
        })
    }

    pub async fn create_category(&self, new: CategoryNew) -> ResultEngine<i32> {
        let name = require_text(&new.name, CATEGORY_NAME_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = categories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                class: ActiveValue::Set(new.class),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_category(&self, id: i32, patch: CategoryPatch) -> ResultEngine<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_text(n, CATEGORY_NAME_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: categories::ActiveModel = find_category(&db_tx, id).await?.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(class) = patch.class {
                active.class = ActiveValue::Set(class);
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a category. Refused while it still has subcategories.
    pub async fn delete_category(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_category(&db_tx, id).await?;
            let children = subcategories::Entity::find()
                .filter(subcategories::Column::CategoryId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(children, "Categoria possui subcategorias vinculadas")?;

            categories::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Subcategories of `category_id`. Fails when the category is missing.
    pub async fn subcategories_of(&self, category_id: i32) -> ResultEngine<Vec<Subcategory>> {
        with_tx!(self, |db_tx| {
            find_category(&db_tx, category_id).await?;
            let subcategories = subcategories::Entity::find()
                .filter(subcategories::Column::CategoryId.eq(category_id))
                .order_by_asc(subcategories::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(subcategories)
        })
    }

    /// Insert a subcategory under `category_id`. A missing category is
    /// reported before the name is validated.
    pub async fn create_subcategory(
        &self,
        category_id: i32,
        new: SubcategoryNew,
    ) -> ResultEngine<i32> {
        with_tx!(self, |db_tx| {
            find_category(&db_tx, category_id).await?;
            let name = require_text(&new.name, SUBCATEGORY_NAME_REQUIRED)?;
            let model = subcategories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                class: ActiveValue::Set(new.class),
                category_id: ActiveValue::Set(category_id),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn subcategory(&self, id: i32) -> ResultEngine<Subcategory> {
        with_tx!(self, |db_tx| find_subcategory(&db_tx, id).await)
    }

    pub async fn update_subcategory(&self, id: i32, patch: SubcategoryPatch) -> ResultEngine<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_text(n, SUBCATEGORY_NAME_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: subcategories::ActiveModel = find_subcategory(&db_tx, id).await?.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(class) = patch.class {
                active.class = ActiveValue::Set(Some(class));
            }
            if let Some(category_id) = patch.category_id {
                find_category(&db_tx, category_id).await?;
                active.category_id = ActiveValue::Set(category_id);
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a subcategory. Refused while transactions are classified under it.
    pub async fn delete_subcategory(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_subcategory(&db_tx, id).await?;
            let used_by = transactions::Entity::find()
                .filter(transactions::Column::SubcategoryId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(used_by, "Subcategoria possui lançamentos vinculados")?;

            subcategories::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
