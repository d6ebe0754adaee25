//! Request API endpoints

use api_types::request::{RequestList, RequestNew, RequestStatusUpdate, RequestUpdate};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{CurrencyAmount, RequestDetail, RequestListItem};

use crate::{ServerError, server::ServerState, user};

fn payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

/// Handle requests for listing requests, optionally of one contract
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<RequestList>, QueryRejection>,
) -> Result<Json<Vec<RequestListItem>>, ServerError> {
    let Query(query) = query.map_err(|rejection| ServerError::Generic(rejection.body_text()))?;
    let items = match query.contract_id {
        Some(contract_id) => state.engine.list_requests_by_contract(&contract_id).await?,
        None => state.engine.list_requests().await?,
    };
    Ok(Json(items))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<RequestDetail>, ServerError> {
    Ok(Json(state.engine.request(&id).await?))
}

/// Handle requests for creating a new request with its time sheets
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    body: Result<Json<RequestNew>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestDetail>), ServerError> {
    let body = payload(body)?;
    let detail = state
        .engine
        .create_request(&body.contract_id, &body.call_off_order_ids)
        .await?;
    tracing::debug!(user = user.username, request_id = detail.id, "request created via API");
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn update_composition(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<RequestUpdate>, JsonRejection>,
) -> Result<Json<RequestDetail>, ServerError> {
    let body = payload(body)?;
    let detail = state
        .engine
        .update_composition(&id, &body.call_off_order_ids, &user.actor())
        .await?;
    Ok(Json(detail))
}

pub async fn update_status(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<RequestStatusUpdate>, JsonRejection>,
) -> Result<Json<RequestDetail>, ServerError> {
    let body = payload(body)?;
    let detail = state
        .engine
        .update_status(&id, &body.status, &user.actor())
        .await?;
    Ok(Json(detail))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_request(&id, &user.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for the contracted amount left per currency
pub async fn available_amount(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CurrencyAmount>>, ServerError> {
    Ok(Json(state.engine.check_available_amount(&id).await?))
}
