use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    application::patient_service::DeactivationPolicy,
    domain::patient::{PatientPayload, PatientRecord},
    interface::http::api_error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

const DELETED_MESSAGE: &str = "Paciente eliminado permanentemente";

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Empty 200 for cross-origin preflight requests; the headers come from the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn list_patients(State(state): State<AppState>) -> ApiResult<Json<Vec<PatientRecord>>> {
    let patients = state.patient_service.list_patients().await?;
    Ok(Json(patients))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
) -> ApiResult<Json<PatientRecord>> {
    let patient = state.patient_service.get_patient(&cedula).await?;
    Ok(Json(patient))
}

pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<PatientPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PatientRecord>)> {
    let Json(candidate) = payload.map_err(ApiError::from_rejection)?;
    let created = state.patient_service.create_patient(candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
    payload: Result<Json<PatientPayload>, JsonRejection>,
) -> ApiResult<Json<PatientRecord>> {
    let Json(body) = payload.map_err(ApiError::from_rejection)?;
    let updated = state.patient_service.update_patient(&cedula, body).await?;
    Ok(Json(updated))
}

pub async fn activate_patient(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.patient_service.activate_patient(&cedula).await?;
    Ok(Json(MessageResponse {
        message: "Paciente activado",
    }))
}

pub async fn deactivate_patient(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.patient_service.deactivate_patient(&cedula).await?;

    let message = match state.patient_service.deactivation_policy() {
        DeactivationPolicy::Delete => DELETED_MESSAGE,
        DeactivationPolicy::Flag => "Paciente desactivado",
    };
    Ok(Json(MessageResponse { message }))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.patient_service.delete_patient(&cedula).await?;
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE,
    }))
}
