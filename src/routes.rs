use crate::{
    api::{admin, health, punch},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

// Per-client limiter; None when requests_per_min is 0.
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Missing form fields become a JSON 400 like every other client error
    let form_config = web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    cfg.service(web::resource("/").route(web::get().to(punch::index)))
        .service(web::resource("/admin").route(web::get().to(admin::admin)))
        .service(web::resource("/health").route(web::get().to(health::health)));

    let punch_resource = web::resource("/punch")
        .app_data(form_config)
        .route(web::post().to(punch::punch));

    match build_limiter(config.rate_punch_per_min) {
        Some(limiter) => cfg.service(punch_resource.wrap(limiter)),
        None => cfg.service(punch_resource),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::DEFAULT_RATE_PUNCH_PER_MIN, db::test_pool, model::punch_card::NOT_RECORDED, store,
    };
    use actix_web::{App, http::StatusCode, http::header, test, web::Data};

    macro_rules! app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new($pool.clone()))
                    .configure(|cfg| configure(cfg, &Config::for_tests())),
            )
            .await
        };
    }

    fn punch_request(body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/punch")
            .insert_header(header::ContentType::form_url_encoded())
            .set_payload(body.to_string())
    }

    #[actix_web::test]
    async fn zero_rate_disables_limiter() {
        assert!(build_limiter(0).is_none());
        assert!(build_limiter(120).is_some());
    }

    #[actix_web::test]
    async fn health_reports_healthy() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, r#"{"status":"healthy"}"#);
    }

    #[actix_web::test]
    async fn index_renders_form() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[actix_web::test]
    async fn check_in_and_out_over_http() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = punch_request("employee_name=Alice&action=check_in").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        {
            let mut conn = pool.acquire().await.unwrap();
            let rows = store::list_all(&mut conn).await.unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].id, Some(1));
            assert_eq!(rows[0].employee_name.as_deref(), Some("Alice"));
            assert!(rows[0].check_out_time.is_none());
        }

        let req = punch_request("employee_name=Alice&action=check_out").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let mut conn = pool.acquire().await.unwrap();
        let rows = store::list_all(&mut conn).await.unwrap();
        assert_eq!(rows.len(), 1);
        let check_in = rows[0].check_in_time.clone().unwrap();
        let check_out = rows[0].check_out_time.clone().unwrap();
        assert!(check_out >= check_in);
    }

    #[actix_web::test]
    async fn check_out_with_nothing_open_still_redirects() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = punch_request("employee_name=Alice&action=check_out").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let mut conn = pool.acquire().await.unwrap();
        assert!(store::list_all(&mut conn).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn unknown_action_is_ignored() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = punch_request("employee_name=Alice&action=lunch").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let mut conn = pool.acquire().await.unwrap();
        assert!(store::list_all(&mut conn).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn missing_field_is_a_client_error() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = punch_request("employee_name=Alice").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = punch_request("action=check_in").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn empty_name_is_rejected() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = punch_request("employee_name=&action=check_in").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut conn = pool.acquire().await.unwrap();
        assert!(store::list_all(&mut conn).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn whitespace_name_is_stored_verbatim() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = punch_request("employee_name=+Alice+&action=check_in").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let mut conn = pool.acquire().await.unwrap();
        let rows = store::list_all(&mut conn).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name.as_deref(), Some(" Alice "));
    }

    #[actix_web::test]
    async fn default_config_never_throttles_punches() {
        let pool = test_pool().await;
        let config = Config {
            rate_punch_per_min: DEFAULT_RATE_PUNCH_PER_MIN,
            ..Config::for_tests()
        };
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .configure(|cfg| configure(cfg, &config)),
        )
        .await;

        for i in 0..150 {
            let req = punch_request(&format!("employee_name=worker{i}&action=check_in"))
                .peer_addr("10.0.0.1:40000".parse().unwrap())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND, "punch {i}");
        }

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(store::list_all(&mut conn).await.unwrap().len(), 150);
    }

    #[actix_web::test]
    async fn admin_lists_newest_first_with_sentinel() {
        let pool = test_pool().await;
        let app = app!(pool);

        for body in [
            "employee_name=Alice&action=check_in",
            "employee_name=Bob&action=check_in",
            "employee_name=Alice&action=check_out",
        ] {
            let resp = test::call_service(&app, punch_request(body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
        }

        let req = test::TestRequest::get().uri("/admin").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        let bob = html.find("<td>2</td><td>Bob</td>").unwrap();
        let alice = html.find("<td>1</td><td>Alice</td>").unwrap();
        assert!(bob < alice);
        assert_eq!(html.matches(NOT_RECORDED).count(), 1);
    }

    #[actix_web::test]
    async fn get_on_punch_is_not_allowed() {
        let pool = test_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::get().uri("/punch").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
