//! Car handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::CarId;

use crate::dto::cars::*;
use crate::{error::ApiError, AppState};

fn car_id(path: Result<Path<CarId>, PathRejection>) -> Result<CarId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Lists all cars with their owners
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarDto>>, ApiError> {
    let cars = state.service.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarDto::from).collect()))
}

/// Checks whether a car is insured on the `date` query parameter
///
/// A missing parameter is reported the same way as a malformed one.
pub async fn insurance_valid(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    query: Result<Query<ValidityQuery>, QueryRejection>,
) -> Result<Json<InsuranceValidityResponse>, ApiError> {
    let car_id = car_id(path)?;
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let date = query.date.unwrap_or_default();

    let validity = state.service.is_insurance_valid(car_id, &date).await?;
    Ok(Json(validity.into()))
}

/// Registers a claim against a car
pub async fn create_claim(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    payload: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let car_id = car_id(path)?;
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    request.validate()?;

    let claim = state.service.create_claim(car_id, request.into()).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Returns a car's policies and claims in date order
pub async fn car_history(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
) -> Result<Json<CarHistoryResponse>, ApiError> {
    let car_id = car_id(path)?;
    let history = state.service.get_car_history(car_id).await?;
    Ok(Json(history.into()))
}
