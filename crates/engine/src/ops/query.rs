//! Read side: assembles the flow views returned to clients.
//!
//! Flow rows and their icon payload come from a single `flows LEFT JOIN icons`
//! query. Tags are then fetched with one query per flow.

use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Flow, ResultEngine, flows, icons};

use super::{Engine, tags::flow_tags, with_tx};

impl Engine {
    /// All flows, by amount descending then name ascending.
    pub async fn list_flows(&self) -> ResultEngine<Vec<Flow>> {
        with_tx!(self, |db_tx| assemble(&db_tx, None).await)
    }

    /// A single flow.
    pub async fn flow(&self, flow_id: &str) -> ResultEngine<Flow> {
        with_tx!(self, |db_tx| load_flow(&db_tx, flow_id).await)
    }
}

pub(super) async fn load_flow(db_tx: &DatabaseTransaction, flow_id: &str) -> ResultEngine<Flow> {
    assemble(db_tx, Some(flow_id))
        .await?
        .pop()
        .ok_or_else(|| EngineError::KeyNotFound("flow not exists".to_string()))
}

async fn assemble(db_tx: &DatabaseTransaction, flow_id: Option<&str>) -> ResultEngine<Vec<Flow>> {
    let mut query = flows::Entity::find();
    if let Some(flow_id) = flow_id {
        query = query.filter(flows::Column::Id.eq(flow_id));
    }

    let rows: Vec<(flows::Model, Option<icons::Model>)> = query
        .find_also_related(icons::Entity)
        .order_by_desc(flows::Column::Amount)
        .order_by_asc(flows::Column::Name)
        .all(db_tx)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for (flow, icon) in rows {
        let tags = flow_tags(db_tx, &flow.id).await?;
        out.push(Flow {
            id: flow.id,
            name: flow.name,
            description: flow.description,
            amount: flow.amount,
            icon: icon.map(|icon| icon.data).unwrap_or_default(),
            tags,
        });
    }
    Ok(out)
}
