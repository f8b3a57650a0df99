use crate::auth::auth::AuthUser;
use crate::repo::MySqlStore;
use crate::scheduling::calendar::{DayView, project_month};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlyQuery {
    /// Calendar year of the projection
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Another employee's NIK; requires HR/Admin role
    pub nik: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyScheduleResponse {
    #[schema(example = "G-0451")]
    pub nik: String,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 2)]
    pub month: u32,
    pub data: Vec<DayView>,
}

/// Monthly schedule projection: resolved shift, actual clock times and
/// leave for every day of the month.
#[utoipa::path(
    get,
    path = "/api/schedule/monthly",
    params(MonthlyQuery),
    responses(
        (status = 200, description = "Monthly schedule", body = MonthlyScheduleResponse),
        (status = 400, description = "Invalid month", body = Object, example = json!({
            "message": "month must be between 1 and 12"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Schedule"
)]
pub async fn monthly_schedule(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    query: web::Query<MonthlyQuery>,
) -> actix_web::Result<impl Responder> {
    if !(1..=12).contains(&query.month) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "month must be between 1 and 12"
        })));
    }

    let own_nik = auth.nik.clone();
    let target_nik = match query.nik.clone().or_else(|| own_nik.clone()) {
        Some(nik) => nik,
        None => return Err(actix_web::error::ErrorForbidden("No employee profile")),
    };

    // Guards may only look at their own calendar.
    if own_nik.as_deref() != Some(target_nik.as_str()) {
        auth.require_hr_or_admin()?;
    }

    let employee = match store.employee_by_nik(&target_nik).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Employee not found"
            })));
        }
        Err(e) => {
            tracing::error!(error = %e, nik = %target_nik, "Failed to load employee");
            return Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ));
        }
    };

    let days = project_month(store.get_ref(), &employee, query.year, query.month)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, nik = %target_nik, "Failed to project month");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(MonthlyScheduleResponse {
        nik: target_nik,
        year: query.year,
        month: query.month,
        data: days,
    }))
}
