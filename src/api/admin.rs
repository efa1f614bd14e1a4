use actix_web::{HttpResponse, http::header::ContentType, web};
use sqlx::SqlitePool;
use tracing::debug;

use crate::{error::AppError, model::punch_card::to_views, store, views};

/// Admin log page
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Every punch record, newest first", body = String, content_type = "text/html"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn admin(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let rows = {
        let mut conn = pool.acquire().await?;
        store::list_all(&mut conn).await?
    };

    let records = to_views(rows);
    debug!(count = records.len(), "Rendering admin log");

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::render_admin(&records)))
}
