use actix_web::{HttpResponse, Responder, http::header, http::header::ContentType, web};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    model::punch_action::{PunchAction, PunchOutcome},
    store, views,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PunchForm {
    #[schema(example = "Alice")]
    pub employee_name: String,
    #[schema(example = "check_in")]
    pub action: String,
}

/// Punch-entry page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Punch form", body = String, content_type = "text/html")
    ),
    tag = "Punch"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::render_index())
}

/// Applies one punch to the employee's shifts.
pub async fn record_punch(
    conn: &mut SqliteConnection,
    employee_name: &str,
    action: PunchAction,
) -> Result<PunchOutcome, sqlx::Error> {
    match action {
        PunchAction::CheckIn => {
            let record_id = store::open_shift(conn, employee_name).await?;
            Ok(PunchOutcome::ShiftOpened(record_id))
        }
        PunchAction::CheckOut => {
            if store::close_latest_open_shift(conn, employee_name).await? {
                Ok(PunchOutcome::ShiftClosed)
            } else {
                Ok(PunchOutcome::NothingToClose)
            }
        }
    }
}

/// Check-in / check-out
#[utoipa::path(
    post,
    path = "/punch",
    request_body(
        content = PunchForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 302, description = "Punch accepted, redirects to the punch form"),
        (status = 400, description = "Missing field or empty employee name", body = Object, example = json!({
            "message": "employee_name must not be empty"
        })),
        (status = 429, description = "Too many punches from this client, only when RATE_PUNCH_PER_MIN is set"),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Internal Server Error"
        }))
    ),
    tag = "Punch"
)]
#[instrument(
    name = "punch",
    skip(pool, form),
    fields(employee_name = %form.employee_name, action = %form.action)
)]
pub async fn punch(
    pool: web::Data<SqlitePool>,
    form: web::Form<PunchForm>,
) -> Result<HttpResponse, AppError> {
    let PunchForm {
        employee_name,
        action,
    } = form.into_inner();

    if employee_name.is_empty() {
        return Err(AppError::BadRequest(
            "employee_name must not be empty".to_string(),
        ));
    }

    let Ok(action) = action.parse::<PunchAction>() else {
        // unknown tokens are accepted and ignored
        warn!("Ignoring unrecognized punch action");
        return Ok(redirect_home());
    };

    let mut conn = pool.acquire().await?;
    match record_punch(&mut conn, &employee_name, action).await? {
        PunchOutcome::ShiftOpened(record_id) => info!(record_id, "Shift opened"),
        PunchOutcome::ShiftClosed => info!("Shift closed"),
        PunchOutcome::NothingToClose => debug!("Check-out with no open shift"),
    }

    Ok(redirect_home())
}

fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
