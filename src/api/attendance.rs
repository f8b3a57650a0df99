use crate::auth::auth::AuthUser;
use crate::model::employee::Employee;
use crate::model::policy::AttendanceWindowPolicy;
use crate::repo::MySqlStore;
use crate::scheduling::clock::{CurrentStatus, clock_in, clock_out, current_status};
use crate::scheduling::error::ClockError;
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde_json::json;

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Clocked in successfully", body = Object, example = json!({
            "message": "Clocked in successfully"
        })),
        (status = 400, description = "Clock-in refused", body = Object, example = json!({
            "message": "Already clocked in"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let nik = auth
        .nik
        .ok_or_else(|| actix_web::error::ErrorForbidden("No employee profile"))?;

    let employee = load_employee(&store, &nik).await?;
    let policy = store.window_policy().await.map_err(|e| {
        tracing::error!(error = %e, nik = %nik, "Failed to load attendance policy");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let now = Local::now().naive_local();
    match clock_in(store.get_ref(), &policy, &employee, now).await {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({
            "message": "Clocked in successfully",
            "record": record
        }))),
        Err(e) => clock_denied(e, &nik, "clock-in"),
    }
}

/// Clock-out endpoint
#[utoipa::path(
    put,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Clocked out successfully", body = Object, example = json!({
            "message": "Clocked out successfully"
        })),
        (status = 400, description = "Clock-out refused", body = Object, example = json!({
            "message": "No active clock-in found"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let nik = auth
        .nik
        .ok_or_else(|| actix_web::error::ErrorForbidden("No employee profile"))?;

    let employee = load_employee(&store, &nik).await?;
    let policy = store.window_policy().await.map_err(|e| {
        tracing::error!(error = %e, nik = %nik, "Failed to load attendance policy");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let now = Local::now().naive_local();
    match clock_out(store.get_ref(), &policy, &employee, now).await {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({
            "message": "Clocked out successfully",
            "record": record
        }))),
        Err(e) => clock_denied(e, &nik, "clock-out"),
    }
}

/// Current shift and open-record view for the authenticated employee.
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Current shift status", body = CurrentStatus),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn today_status(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let nik = auth
        .nik
        .ok_or_else(|| actix_web::error::ErrorForbidden("No employee profile"))?;

    let employee = load_employee(&store, &nik).await?;
    let policy = store.window_policy().await.map_err(|e| {
        tracing::error!(error = %e, nik = %nik, "Failed to load attendance policy");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let now = Local::now().naive_local();
    let status = current_status(store.get_ref(), &policy, &employee, now)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, nik = %nik, "Failed to compute current status");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(status))
}

/// Window policy read endpoint
#[utoipa::path(
    get,
    path = "/api/attendance/policy",
    responses(
        (status = 200, description = "Attendance window policy", body = AttendanceWindowPolicy),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn get_policy(store: web::Data<MySqlStore>) -> actix_web::Result<impl Responder> {
    let policy = store.window_policy().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load attendance policy");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(policy))
}

async fn load_employee(store: &MySqlStore, nik: &str) -> actix_web::Result<Employee> {
    match store.employee_by_nik(nik).await {
        Ok(Some(employee)) => Ok(employee),
        Ok(None) => Err(actix_web::error::ErrorForbidden("No employee profile")),
        Err(e) => {
            tracing::error!(error = %e, nik = %nik, "Failed to load employee");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Maps an engine denial to the user-facing response. Denials carry the
/// concrete boundary the request needed to meet.
fn clock_denied(e: ClockError, nik: &str, action: &str) -> actix_web::Result<HttpResponse> {
    match e {
        ClockError::NoScheduleToday => Ok(HttpResponse::BadRequest().json(json!({
            "message": "You have no shift scheduled today"
        }))),
        ClockError::AlreadyClockedIn => Ok(HttpResponse::BadRequest().json(json!({
            "message": "Already clocked in"
        }))),
        ClockError::NotClockedIn => Ok(HttpResponse::BadRequest().json(json!({
            "message": "No active clock-in found"
        }))),
        ClockError::TooEarly { boundary } => Ok(HttpResponse::BadRequest().json(json!({
            "message": format!("Too early for {action}"),
            "boundary": boundary
        }))),
        ClockError::WindowClosed { boundary } => Ok(HttpResponse::BadRequest().json(json!({
            "message": format!("The {action} window has closed"),
            "boundary": boundary
        }))),
        ClockError::Storage(e) => {
            tracing::error!(error = %e, nik = %nik, action = %action, "Clock action failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}
