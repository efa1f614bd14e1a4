use crate::api::punch::PunchForm;
use crate::model::punch_card::PunchCardView;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Punch Clock API",
        version = "0.1.0",
        description = r#"
## Employee punch clock

Employees record check-in and check-out from a phone-sized form; an
administrator reads the full log in the browser.

### Endpoints
- **GET /** punch form
- **POST /punch** `employee_name` + `action` (`check_in` | `check_out`), answers 302 to `/`
- **GET /admin** every punch record, newest first
- **GET /health** liveness probe

A check-out closes the employee's most recent open shift. A check-out with
nothing open, or an unrecognized action, is accepted and changes nothing.

---
Built with **Rust**, **Actix Web**, **SQLx** (SQLite), and **Utoipa**.
"#,
    ),
    paths(
        crate::api::punch::index,
        crate::api::punch::punch,
        crate::api::admin::admin,
        crate::api::health::health
    ),
    components(
        schemas(
            PunchForm,
            PunchCardView
        )
    ),
    tags(
        (name = "Punch", description = "Employee check-in / check-out"),
        (name = "Admin", description = "Punch record log"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
