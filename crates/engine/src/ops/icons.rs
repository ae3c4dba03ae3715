use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, TransactionTrait,
    prelude::*, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, content_hash, flows, icons};

use super::{Engine, with_tx};

impl Engine {
    /// Store `payload` unless an icon with the same content already exists.
    ///
    /// Returns the id of the icon holding the payload. An existing icon is
    /// never rewritten.
    pub async fn resolve_or_store_icon(&self, payload: &str) -> ResultEngine<String> {
        with_tx!(self, |db_tx| self.store_icon(&db_tx, payload).await)
    }

    /// Delete `icon_id` when no flow points at it anymore.
    ///
    /// The default icon is never deleted. Returns whether a row was removed.
    pub async fn release_icon_if_unused(&self, icon_id: &str) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| self.release_icon(&db_tx, icon_id).await)
    }

    pub(super) async fn store_icon(
        &self,
        db_tx: &DatabaseTransaction,
        payload: &str,
    ) -> ResultEngine<String> {
        let hash = content_hash(payload);
        if let Some(model) = find_by_hash(db_tx, &hash).await? {
            tracing::debug!("icon {} already stored", model.id);
            return Ok(model.id);
        }

        let icon = icons::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            data: ActiveValue::Set(payload.to_string()),
            hash: ActiveValue::Set(hash.clone()),
        };
        // A concurrent writer may have stored the same payload in between.
        icons::Entity::insert(icon)
            .on_conflict(OnConflict::column(icons::Column::Hash).do_nothing().to_owned())
            .exec_without_returning(db_tx)
            .await?;

        let model = find_by_hash(db_tx, &hash)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("icon not exists".to_string()))?;
        Ok(model.id)
    }

    pub(super) async fn release_icon(
        &self,
        db_tx: &DatabaseTransaction,
        icon_id: &str,
    ) -> ResultEngine<bool> {
        if self.is_default_icon(icon_id) {
            return Ok(false);
        }

        let references = flows::Entity::find()
            .filter(flows::Column::IconId.eq(icon_id))
            .count(db_tx)
            .await?;
        if references > 0 {
            return Ok(false);
        }

        let res = icons::Entity::delete_by_id(icon_id.to_string())
            .exec(db_tx)
            .await?;
        tracing::debug!("released icon {icon_id}");
        Ok(res.rows_affected > 0)
    }

    pub(super) async fn seed_default_icon(&self) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let exists = icons::Entity::find_by_id(self.default_icon.id.clone())
                .one(&db_tx)
                .await?
                .is_some();
            if !exists {
                let icon = icons::ActiveModel {
                    id: ActiveValue::Set(self.default_icon.id.clone()),
                    data: ActiveValue::Set(self.default_icon.data.clone()),
                    hash: ActiveValue::Set(content_hash(&self.default_icon.data)),
                };
                icons::Entity::insert(icon)
                    .exec_without_returning(&db_tx)
                    .await?;
                tracing::info!("seeded default icon {}", self.default_icon.id);
            }
            Ok(())
        })
    }
}

async fn find_by_hash(
    db_tx: &DatabaseTransaction,
    hash: &str,
) -> ResultEngine<Option<icons::Model>> {
    Ok(icons::Entity::find()
        .filter(icons::Column::Hash.eq(hash))
        .one(db_tx)
        .await?)
}
