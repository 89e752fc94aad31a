//! Recurrence rules and recurring templates.
//!
//! Both are plain records: nothing here materialises future transactions.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, QueryOrder, TransactionTrait,
};

use crate::{
    RecurrenceRule, RecurrenceRuleNew, RecurrenceRulePatch, RecurringTemplate,
    RecurringTemplateNew, RecurringTemplatePatch, ResultEngine, recurrence_rules,
    recurring_templates,
};

use super::{Engine, not_found, require_text, transactions::find_transaction, with_tx};

const RULE_NOT_FOUND: &str = "Regra de recorrência não encontrada";
const TEMPLATE_NOT_FOUND: &str = "Template de lançamento recorrente não encontrado";
const FIELDS_REQUIRED: &str = "Campos obrigatórios incompletos";

async fn find_rule(db: &impl ConnectionTrait, id: i32) -> ResultEngine<RecurrenceRule> {
    recurrence_rules::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RULE_NOT_FOUND))
}

async fn find_template(db: &impl ConnectionTrait, id: i32) -> ResultEngine<RecurringTemplate> {
    recurring_templates::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(TEMPLATE_NOT_FOUND))
}

impl Engine {
    pub async fn list_recurrence_rules(&self) -> ResultEngine<Vec<RecurrenceRule>> {
        with_tx!(self, |db_tx| {
            let rules = recurrence_rules::Entity::find()
                .order_by_asc(recurrence_rules::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(rules)
        })
    }

    pub async fn recurrence_rule(&self, id: i32) -> ResultEngine<RecurrenceRule> {
        with_tx!(self, |db_tx| find_rule(&db_tx, id).await)
    }

    /// Insert a rule for an existing transaction. `status` defaults to `"Ativo"`.
    pub async fn create_recurrence_rule(&self, new: RecurrenceRuleNew) -> ResultEngine<i32> {
        let frequency = require_text(&new.frequency, FIELDS_REQUIRED)?;
        let status = new
            .status
            .unwrap_or_else(|| recurrence_rules::DEFAULT_STATUS.to_string());
        with_tx!(self, |db_tx| {
            find_transaction(&db_tx, new.transaction_id).await?;
            let model = recurrence_rules::ActiveModel {
                id: ActiveValue::NotSet,
                transaction_id: ActiveValue::Set(new.transaction_id),
                description: ActiveValue::Set(new.description),
                frequency: ActiveValue::Set(frequency),
                start_date: ActiveValue::Set(new.start_date),
                end_date: ActiveValue::Set(new.end_date),
                status: ActiveValue::Set(status),
                last_posted_date: ActiveValue::Set(new.last_posted_date),
                business_days: ActiveValue::Set(new.business_days),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_recurrence_rule(
        &self,
        id: i32,
        patch: RecurrenceRulePatch,
    ) -> ResultEngine<()> {
        let frequency = patch
            .frequency
            .as_deref()
            .map(|f| require_text(f, FIELDS_REQUIRED))
            .transpose()?;
        let status = patch
            .status
            .as_deref()
            .map(|s| require_text(s, FIELDS_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: recurrence_rules::ActiveModel = find_rule(&db_tx, id).await?.into();
            if let Some(transaction_id) = patch.transaction_id {
                find_transaction(&db_tx, transaction_id).await?;
                active.transaction_id = ActiveValue::Set(transaction_id);
            }
            if let Some(frequency) = frequency {
                active.frequency = ActiveValue::Set(frequency);
            }
            if let Some(status) = status {
                active.status = ActiveValue::Set(status);
            }
            if let Some(description) = patch.description {
                active.description = ActiveValue::Set(Some(description));
            }
            if let Some(start_date) = patch.start_date {
                active.start_date = ActiveValue::Set(start_date);
            }
            if let Some(end_date) = patch.end_date {
                active.end_date = ActiveValue::Set(Some(end_date));
            }
            if let Some(last_posted) = patch.last_posted_date {
                active.last_posted_date = ActiveValue::Set(Some(last_posted));
            }
            if let Some(business_days) = patch.business_days {
                active.business_days = ActiveValue::Set(business_days);
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    pub async fn delete_recurrence_rule(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_rule(&db_tx, id).await?;
            recurrence_rules::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }

    pub async fn list_recurring_templates(&self) -> ResultEngine<Vec<RecurringTemplate>> {
        with_tx!(self, |db_tx| {
            let templates = recurring_templates::Entity::find()
                .order_by_asc(recurring_templates::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(templates)
        })
    }

    pub async fn recurring_template(&self, id: i32) -> ResultEngine<RecurringTemplate> {
        with_tx!(self, |db_tx| find_template(&db_tx, id).await)
    }

    /// Insert a template. Its ids are loose references and are not checked.
    pub async fn create_recurring_template(&self, new: RecurringTemplateNew) -> ResultEngine<i32> {
        let description = require_text(&new.description, FIELDS_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = recurring_templates::ActiveModel {
                id: ActiveValue::NotSet,
                posting_date: ActiveValue::Set(new.posting_date),
                description: ActiveValue::Set(description),
                account_id: ActiveValue::Set(new.account_id),
                amount: ActiveValue::Set(new.amount.cents()),
                type_id: ActiveValue::Set(new.type_id),
                category_id: ActiveValue::Set(new.category_id),
                statement_id: ActiveValue::Set(new.statement_id),
                lead_time: ActiveValue::Set(new.lead_time),
                validated: ActiveValue::Set(new.validated),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_recurring_template(
        &self,
        id: i32,
        patch: RecurringTemplatePatch,
    ) -> ResultEngine<()> {
        let description = patch
            .description
            .as_deref()
            .map(|d| require_text(d, FIELDS_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: recurring_templates::ActiveModel =
                find_template(&db_tx, id).await?.into();
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(amount) = patch.amount {
                active.amount = ActiveValue::Set(amount.cents());
            }
            if let Some(type_id) = patch.type_id {
                active.type_id = ActiveValue::Set(type_id);
            }
            if let Some(category_id) = patch.category_id {
                active.category_id = ActiveValue::Set(category_id);
            }
            if let Some(posting_date) = patch.posting_date {
                active.posting_date = ActiveValue::Set(Some(posting_date));
            }
            if let Some(account_id) = patch.account_id {
                active.account_id = ActiveValue::Set(Some(account_id));
            }
            if let Some(statement_id) = patch.statement_id {
                active.statement_id = ActiveValue::Set(Some(statement_id));
            }
            if let Some(lead_time) = patch.lead_time {
                active.lead_time = ActiveValue::Set(Some(lead_time));
            }
            if let Some(validated) = patch.validated {
                active.validated = ActiveValue::Set(validated);
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    pub async fn delete_recurring_template(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_template(&db_tx, id).await?;
            recurring_templates::Entity::delete_by_id(id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
