//! Flows API endpoints.

use api_types::{
    flow::{Flow, FlowInput},
    response::Ack,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::FlowDraft;

use crate::{ServerError, server::ServerState};

fn map_flow(flow: engine::Flow) -> Flow {
    Flow {
        id: flow.id,
        name: flow.name,
        description: flow.description,
        amount: flow.amount,
        icon: flow.icon,
        tags: flow.tags,
    }
}

fn map_input(input: FlowInput) -> FlowDraft {
    FlowDraft {
        name: input.name,
        description: input.description,
        amount: input.amount,
        icon: input.icon,
        tags: input.tags,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Flow>>, ServerError> {
    let flows = state
        .engine
        .list_flows()
        .await?
        .into_iter()
        .map(map_flow)
        .collect();
    Ok(Json(flows))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(flow_id): Path<String>,
) -> Result<Json<Flow>, ServerError> {
    let flow = state.engine.flow(&flow_id).await?;
    Ok(Json(map_flow(flow)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<FlowInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Flow>), ServerError> {
    let Json(input) = payload?;
    let flow = state.engine.create_flow(&map_input(input)).await?;
    Ok((StatusCode::CREATED, Json(map_flow(flow))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(flow_id): Path<String>,
    payload: Result<Json<FlowInput>, JsonRejection>,
) -> Result<Json<Flow>, ServerError> {
    let Json(input) = payload?;
    let flow = state.engine.update_flow(&flow_id, &map_input(input)).await?;
    Ok(Json(map_flow(flow)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(flow_id): Path<String>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_flow(&flow_id).await?;
    Ok(Json(Ack {
        ok: "Flow deleted".to_string(),
    }))
}
