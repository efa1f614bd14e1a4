use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shown in place of a timestamp that has not been punched yet ("not yet recorded").
pub const NOT_RECORDED: &str = "未打刻";

/// A raw `punch_cards` row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PunchCard {
    pub id: Option<i64>,
    pub employee_name: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
}

/// Display-ready record for the admin page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_name": "Alice",
        "check_in_time": "2024-04-01 09:00:00",
        "check_out_time": "未打刻"
    })
)]
pub struct PunchCardView {
    pub id: i64,
    pub employee_name: String,
    pub check_in_time: String,
    pub check_out_time: String,
}

impl From<PunchCard> for PunchCardView {
    fn from(row: PunchCard) -> Self {
        Self {
            id: row.id.unwrap_or(0),
            employee_name: row.employee_name.unwrap_or_default(),
            check_in_time: row.check_in_time.unwrap_or_else(|| NOT_RECORDED.to_string()),
            check_out_time: row.check_out_time.unwrap_or_else(|| NOT_RECORDED.to_string()),
        }
    }
}

pub fn to_views(rows: Vec<PunchCard>) -> Vec<PunchCardView> {
    rows.into_iter().map(PunchCardView::from).collect()
}
