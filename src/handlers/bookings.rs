use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BookingStatus, NewBooking};
use crate::services::notifications;
use crate::state::AppState;

// POST /api/bookings
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub service_id: Option<i64>,
    pub service_name: Option<String>,
    pub mode_of_payment: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub message: String,
    pub booking_id: i64,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let name = require(req.name, "name")?;
    let email = require(req.email, "email")?;
    let phone_number = require(req.phone_number, "phoneNumber")?;
    let check_in_raw = require(req.check_in_date, "checkInDate")?;
    let check_out_raw = require(req.check_out_date, "checkOutDate")?;
    let service_name = require(req.service_name, "serviceName")?;
    let mode_of_payment = require(req.mode_of_payment, "modeOfPayment")?;
    let service_id = req
        .service_id
        .ok_or_else(|| AppError::Validation("serviceId is required".to_string()))?;

    let check_in_date = normalize_date(&check_in_raw)
        .ok_or_else(|| AppError::Validation("checkInDate is not a valid date".to_string()))?;
    let check_out_date = normalize_date(&check_out_raw)
        .ok_or_else(|| AppError::Validation("checkOutDate is not a valid date".to_string()))?;

    let new_booking = NewBooking {
        name,
        email,
        phone_number,
        service_id,
        service_name,
        check_in_date,
        check_out_date,
        mode_of_payment,
    };

    let booking_id = {
        let db = state.db.lock().unwrap();

        if queries::has_booking_on_date(&db, service_id, check_in_date)? {
            return Err(AppError::Conflict(
                "Already booked for that check-in date".to_string(),
            ));
        }

        // The unique index closes the race the read above still leaves open:
        // a concurrent insert for the same (service, date) surfaces here as a
        // constraint violation and gets the same 409.
        match queries::create_booking(&db, &new_booking) {
            Ok(id) => id,
            Err(e) if queries::is_unique_violation(&e) => {
                return Err(AppError::Conflict(
                    "Already booked for that check-in date".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }
    };

    tracing::info!(booking_id, service_id, "booking created");

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            message: "Booking created".to_string(),
            booking_id,
        }),
    ))
}

// GET /api/bookings
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub service_id: i64,
    pub service_name: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub mode_of_payment: String,
    pub status: String,
    pub created_at: String,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(&db)?
    };

    let response = bookings
        .into_iter()
        .map(|b| BookingResponse {
            id: b.id,
            name: b.name,
            email: b.email,
            phone_number: b.phone_number,
            service_id: b.service_id,
            service_name: b.service_name,
            check_in_date: b.check_in_date.format("%Y-%m-%d").to_string(),
            check_out_date: b.check_out_date.format("%Y-%m-%d").to_string(),
            mode_of_payment: b.mode_of_payment,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Ok(Json(response))
}

// GET /api/bookings/service/:id
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDateResponse {
    pub check_in_date: String,
}

pub async fn service_check_in_dates(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<i64>,
) -> Result<Json<Vec<CheckInDateResponse>>, AppError> {
    let dates = {
        let db = state.db.lock().unwrap();
        queries::get_check_in_dates(&db, service_id)?
    };

    let response = dates
        .into_iter()
        .map(|d| CheckInDateResponse {
            check_in_date: d.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Ok(Json(response))
}

// PUT /api/bookings/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status_raw = req
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("status is required".to_string()))?;

    let status = BookingStatus::from_str(&status_raw).ok_or_else(|| {
        AppError::Validation(format!("invalid status: {status_raw}"))
    })?;

    // The status write commits on its own. The notification below is a
    // separate step and can fail after the update has already persisted.
    let booking = {
        let db = state.db.lock().unwrap();

        let updated = queries::update_booking_status(&db, booking_id, &status)?;
        if !updated {
            return Err(AppError::NotFound(format!(
                "booking {booking_id} not found"
            )));
        }

        queries::get_booking_by_id(&db, booking_id)?
    };

    let booking = booking
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id} not found")))?;

    if let Some((subject, body)) = notifications::status_email(&booking) {
        state
            .mailer
            .send_email(&booking.email, &subject, &body)
            .await
            .map_err(|e| {
                tracing::error!(booking_id, error = %e, "status notification failed");
                AppError::Notification(e.to_string())
            })?;

        tracing::info!(booking_id, status = status.as_str(), "guest notified");
    }

    Ok(Json(serde_json::json!({
        "message": "Booking status updated"
    })))
}

fn require(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// Accepts anything parseable to a calendar date and drops any time-of-day
/// component. Stored values are always plain ISO dates.
fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}
