use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Flow, FlowDraft, ResultEngine, content_hash, flows, icons};

use super::{Engine, query::load_flow, with_tx};

fn flow_not_found() -> EngineError {
    EngineError::KeyNotFound("flow not exists".to_string())
}

impl Engine {
    /// Create a new flow.
    ///
    /// Without an icon payload the flow gets the default icon through the
    /// column default. Empty tags are skipped.
    pub async fn create_flow(&self, draft: &FlowDraft) -> ResultEngine<Flow> {
        draft.validate()?;
        let flow_id = Uuid::new_v4().to_string();

        with_tx!(self, |db_tx| {
            let icon_id = if draft.has_icon() {
                Some(self.store_icon(&db_tx, &draft.icon).await?)
            } else {
                None
            };

            flows::Entity::insert(flows::ActiveModel::from_draft(&flow_id, draft, icon_id))
                .exec_without_returning(&db_tx)
                .await?;
            self.attach_tags(&db_tx, &flow_id, &draft.tags).await?;

            tracing::info!("created flow {flow_id}");
            load_flow(&db_tx, &flow_id).await
        })
    }

    /// Replace name, description, amount, icon and tags of a flow.
    ///
    /// An empty icon payload keeps the current icon. When the payload differs
    /// from the current icon, the old icon is deleted once no flow uses it.
    pub async fn update_flow(&self, flow_id: &str, draft: &FlowDraft) -> ResultEngine<Flow> {
        draft.validate()?;

        with_tx!(self, |db_tx| {
            let (current, current_icon) = flows::Entity::find_by_id(flow_id.to_string())
                .find_also_related(icons::Entity)
                .one(&db_tx)
                .await?
                .ok_or_else(flow_not_found)?;

            let replaces_icon = draft.has_icon()
                && current_icon
                    .as_ref()
                    .is_none_or(|icon| icon.hash != content_hash(&draft.icon));
            let icon_id = if replaces_icon {
                Some(self.store_icon(&db_tx, &draft.icon).await?)
            } else {
                None
            };

            flows::ActiveModel::from_draft(flow_id, draft, icon_id.clone())
                .update(&db_tx)
                .await?;

            if let Some(icon_id) = icon_id
                && icon_id != current.icon_id
            {
                self.release_icon(&db_tx, &current.icon_id).await?;
            }

            self.detach_all_tags(&db_tx, flow_id).await?;
            self.attach_tags(&db_tx, flow_id, &draft.tags).await?;

            tracing::info!("updated flow {flow_id}");
            load_flow(&db_tx, flow_id).await
        })
    }

    /// Delete a flow, its tag links, orphaned tags and its icon if unused.
    pub async fn delete_flow(&self, flow_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = flows::Entity::find_by_id(flow_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(flow_not_found)?;

            self.detach_all_tags(&db_tx, flow_id).await?;
            flows::Entity::delete_by_id(flow_id.to_string())
                .exec(&db_tx)
                .await?;
            self.release_icon(&db_tx, &model.icon_id).await?;

            tracing::info!("deleted flow {flow_id}");
            Ok(())
        })
    }

    /// Id of the icon a flow points at.
    pub async fn flow_icon_id(&self, flow_id: &str) -> ResultEngine<String> {
        with_tx!(self, |db_tx| {
            let model = flows::Entity::find()
                .filter(flows::Column::Id.eq(flow_id))
                .one(&db_tx)
                .await?
                .ok_or_else(flow_not_found)?;
            Ok(model.icon_id)
        })
    }
}
