use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::{OnConflict, Query},
};

use crate::{EngineError, ResultEngine, flows_tags, tags};

use super::{Engine, with_tx};

impl Engine {
    /// Return the id of tag `text`, creating it if needed.
    ///
    /// Tags are matched on their exact, case-sensitive text.
    pub async fn resolve_or_create_tag(&self, text: &str) -> ResultEngine<i32> {
        with_tx!(self, |db_tx| self.tag_id(&db_tx, text).await)
    }

    /// Remove every tag of `flow_id` and sweep tags left without flows.
    ///
    /// Returns how many orphaned tags were deleted.
    pub async fn detach_tags(&self, flow_id: &str) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| self.detach_all_tags(&db_tx, flow_id).await)
    }

    pub(super) async fn tag_id(&self, db_tx: &DatabaseTransaction, text: &str) -> ResultEngine<i32> {
        if text.is_empty() {
            return Err(EngineError::EmptyTag);
        }

        let tag = tags::ActiveModel {
            id: ActiveValue::NotSet,
            tag: ActiveValue::Set(text.to_string()),
        };
        tags::Entity::insert(tag)
            .on_conflict(OnConflict::column(tags::Column::Tag).do_nothing().to_owned())
            .exec_without_returning(db_tx)
            .await?;

        let model = tags::Entity::find()
            .filter(tags::Column::Tag.eq(text))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("tag not exists".to_string()))?;
        Ok(model.id)
    }

    /// Associate `tags` to the flow. Empty tags are skipped.
    pub(super) async fn attach_tags(
        &self,
        db_tx: &DatabaseTransaction,
        flow_id: &str,
        tags: &[String],
    ) -> ResultEngine<()> {
        for tag in tags {
            let tag_id = match self.tag_id(db_tx, tag).await {
                Ok(tag_id) => tag_id,
                Err(EngineError::EmptyTag) => {
                    tracing::debug!("skipping empty tag for flow {flow_id}");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let link = flows_tags::ActiveModel {
                flow_id: ActiveValue::Set(flow_id.to_string()),
                tag_id: ActiveValue::Set(tag_id),
            };
            flows_tags::Entity::insert(link)
                .on_conflict(
                    OnConflict::columns([flows_tags::Column::FlowId, flows_tags::Column::TagId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(db_tx)
                .await?;
        }
        Ok(())
    }

    pub(super) async fn detach_all_tags(
        &self,
        db_tx: &DatabaseTransaction,
        flow_id: &str,
    ) -> ResultEngine<u64> {
        flows_tags::Entity::delete_many()
            .filter(flows_tags::Column::FlowId.eq(flow_id))
            .exec(db_tx)
            .await?;

        // The sweep is global: orphans left by earlier edits of other flows go too.
        let swept = tags::Entity::delete_many()
            .filter(
                tags::Column::Id.not_in_subquery(
                    Query::select()
                        .column(flows_tags::Column::TagId)
                        .from(flows_tags::Entity)
                        .to_owned(),
                ),
            )
            .exec(db_tx)
            .await?;
        if swept.rows_affected > 0 {
            tracing::debug!("swept {} orphaned tags", swept.rows_affected);
        }
        Ok(swept.rows_affected)
    }
}

/// Tag texts of a flow, ascending.
pub(super) async fn flow_tags(db_tx: &DatabaseTransaction, flow_id: &str) -> ResultEngine<Vec<String>> {
    let models = tags::Entity::find()
        .inner_join(flows_tags::Entity)
        .filter(flows_tags::Column::FlowId.eq(flow_id))
        .order_by_asc(tags::Column::Tag)
        .all(db_tx)
        .await?;
    Ok(models.into_iter().map(|model| model.tag).collect())
}
