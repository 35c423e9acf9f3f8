//! In-process HTTP harness for behaviour tests over the in-memory adapters.
//!
//! The world keeps the handler state and session key, and builds a fresh
//! `App` for every request. Repositories live behind the shared state and the
//! cookie key is stable, so sessions survive between requests.

use std::cell::RefCell;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::http::Method;
use actix_web::{App, test as actix_test, web};
use fleet_backend::Trace;
use fleet_backend::domain::TRACE_ID_HEADER;
use fleet_backend::inbound::http::companies::{
    create_company, delete_company, get_company, list_companies, patch_company, replace_company,
};
use fleet_backend::inbound::http::drivers::{
    create_driver, delete_driver, get_driver, list_drivers, patch_driver, replace_driver,
};
use fleet_backend::inbound::http::error::{json_error_handler, path_error_handler};
use fleet_backend::inbound::http::state::HttpState;
use fleet_backend::inbound::http::users::{
    current_user, login, logout, patch_current_user, register, replace_current_user,
};
use fleet_backend::test_support::memory_http_state;
use serde_json::{Value, json};

/// Response fields the steps assert on.
#[derive(Debug, Default)]
pub struct LastResponse {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Scenario state shared by step functions.
pub struct FleetWorld {
    runtime: actix_rt::Runtime,
    state: HttpState,
    key: Key,
    cookie: RefCell<Option<Cookie<'static>>>,
    last: RefCell<Option<LastResponse>>,
    /// Id of the most recently created company, as returned by the API.
    pub last_company_id: RefCell<Option<String>>,
    /// Id of the most recently created driver, as returned by the API.
    pub last_driver_id: RefCell<Option<String>>,
}

impl FleetWorld {
    /// A world over empty in-memory repositories.
    pub fn new() -> Self {
        Self {
            runtime: actix_rt::Runtime::new().expect("actix runtime"),
            state: memory_http_state(),
            key: Key::generate(),
            cookie: RefCell::new(None),
            last: RefCell::new(None),
            last_company_id: RefCell::new(None),
            last_driver_id: RefCell::new(None),
        }
    }

    /// Send a JSON request, remembering the session cookie when one is set.
    pub fn send(&self, method: Method, path: &str, payload: Option<Value>) -> u16 {
        let state = web::Data::new(self.state.clone());
        let key = self.key.clone();
        let cookie = self.cookie.borrow().clone();
        let path = path.to_owned();

        let (response, new_cookie) = self.runtime.block_on(async move {
            let app = actix_test::init_service(build_app(state, key)).await;
            let mut request = actix_test::TestRequest::default()
                .method(method)
                .uri(&path);
            if let Some(cookie) = cookie {
                request = request.cookie(cookie);
            }
            if let Some(payload) = payload {
                request = request.set_json(payload);
            }
            let res = actix_test::call_service(&app, request.to_request()).await;

            let status = res.status().as_u16();
            let trace_id = res
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let new_cookie = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(Cookie::into_owned);
            let bytes = actix_test::read_body(res).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            (
                LastResponse {
                    status,
                    trace_id,
                    body,
                },
                new_cookie,
            )
        });

        if let Some(cookie) = new_cookie {
            *self.cookie.borrow_mut() = Some(cookie);
        }
        let status = response.status;
        *self.last.borrow_mut() = Some(response);
        status
    }

    /// Register an account and sign in with it.
    pub fn sign_in(&self, email: &str, password: &str) {
        let status = self.send(
            Method::POST,
            "/api/v1/users",
            Some(json!({"email": email, "name": "Fleet Manager", "password": password})),
        );
        assert_eq!(status, 201, "registration should succeed");
        let status = self.send(
            Method::POST,
            "/api/v1/login",
            Some(json!({"email": email, "password": password})),
        );
        assert_eq!(status, 200, "login should succeed");
        assert!(self.cookie.borrow().is_some(), "login sets a session cookie");
    }

    /// Forget the session cookie.
    pub fn sign_out_locally(&self) {
        *self.cookie.borrow_mut() = None;
    }

    /// Inspect the last response.
    pub fn with_last<R>(&self, f: impl FnOnce(&LastResponse) -> R) -> R {
        let last = self.last.borrow();
        f(last.as_ref().expect("a request was sent"))
    }
}

impl Default for FleetWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn build_app(
    state: web::Data<HttpState>,
    key: Key,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build();

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(register)
                .service(login)
                .service(logout)
                .service(current_user)
                .service(replace_current_user)
                .service(patch_current_user)
                .service(list_companies)
                .service(create_company)
                .service(get_company)
                .service(replace_company)
                .service(patch_company)
                .service(delete_company)
                .service(list_drivers)
                .service(create_driver)
                .service(get_driver)
                .service(replace_driver)
                .service(patch_driver)
                .service(delete_driver),
        )
}
