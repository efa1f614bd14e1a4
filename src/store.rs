//! Persistence for `punch_cards`.
//!
//! Every function takes a connection the caller acquired for the current
//! request, so the handle is released when the request is done with it.

use chrono::Local;
use sqlx::SqliteConnection;

use crate::model::punch_card::PunchCard;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time, e.g. `2024-04-01 09:00:00`.
pub fn now_stamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Inserts a new open shift and returns its id.
pub async fn open_shift(
    conn: &mut SqliteConnection,
    employee_name: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO punch_cards (employee_name, check_in_time)
        VALUES (?, ?)
        "#,
    )
    .bind(employee_name)
    .bind(now_stamp())
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Closes the employee's highest-id open shift.
///
/// Finding and updating the row happen in one statement, so two concurrent
/// check-outs cannot both close the same shift. Returns `false` when the
/// employee has nothing open.
pub async fn close_latest_open_shift(
    conn: &mut SqliteConnection,
    employee_name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE punch_cards
        SET check_out_time = ?
        WHERE id = (
            SELECT id FROM punch_cards
            WHERE employee_name = ?
            AND check_out_time IS NULL
            ORDER BY id DESC
            LIMIT 1
        )
        "#,
    )
    .bind(now_stamp())
    .bind(employee_name)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Every record, newest first.
pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<PunchCard>, sqlx::Error> {
    sqlx::query_as::<_, PunchCard>(
        r#"
        SELECT id, employee_name, check_in_time, check_out_time
        FROM punch_cards
        ORDER BY id DESC
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}
