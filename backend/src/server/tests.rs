//! Tests for server bootstrap and the assembled application.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test;
use fleet_backend::inbound::http::session_config::SessionSettings;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

fn memory_deps(health_state: web::Data<HealthState>, session: SessionSettings) -> AppDependencies {
    let config = ServerConfig::new(session, ([127, 0, 0, 1], 0).into());
    AppDependencies {
        health_state,
        http_state: build_http_state(&config),
        key: config.key,
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    }
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let config = ServerConfig::new(session_settings, ([127, 0, 0, 1], 0).into());
    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn probes_and_trace_header_are_wired(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    health_state.mark_ready();
    let app = test::init_service(build_app(memory_deps(health_state, session_settings))).await;

    for path in ["/health/ready", "/health/live"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert!(res.headers().contains_key("trace-id"), "{path}");
    }
}

#[rstest]
#[actix_rt::test]
async fn session_cookie_is_private_and_http_only(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    let app = test::init_service(build_app(memory_deps(health_state, session_settings))).await;

    let register_req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"email": "ada@example.com", "name": "Ada", "password": "analytical"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, register_req).await.status(),
        StatusCode::CREATED
    );

    let login_req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "ada@example.com", "password": "analytical"}))
        .to_request();
    let res = test::call_service(&app, login_req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert!(cookie.max_age().is_some(), "persistent session carries a TTL");

    let me = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, me).await;
    assert_eq!(body["email"], "ada@example.com");
}

#[rstest]
#[actix_rt::test]
async fn malformed_json_uses_error_envelope(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    let app = test::init_service(build_app(memory_deps(health_state, session_settings))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
