//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use serde_json::json;

use crate::domain::ports::{
    MockCompanyCommand, MockCompanyQuery, MockDriverCommand, MockDriverQuery, MockLoginService,
    MockUserAccounts,
};
use crate::domain::UserId;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation and drops the `Secure` flag so plain HTTP
/// test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Port mocks for assembling an [`HttpState`] in handler tests.
///
/// Untouched mocks carry no expectations, so any unexpected call panics.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub accounts: MockUserAccounts,
    pub companies: MockCompanyCommand,
    pub companies_query: MockCompanyQuery,
    pub drivers: MockDriverCommand,
    pub drivers_query: MockDriverQuery,
}

impl MockPorts {
    /// Accept any login and sign the caller in as `user_id`.
    pub fn expect_login(&mut self, user_id: UserId) {
        self.login
            .expect_authenticate()
            .return_once(move |_| Ok(user_id));
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            accounts: Arc::new(self.accounts),
            companies: Arc::new(self.companies),
            companies_query: Arc::new(self.companies_query),
            drivers: Arc::new(self.drivers),
            drivers_query: Arc::new(self.drivers_query),
        }
    }
}

/// `POST /api/v1/login` with well-formed credentials.
pub fn login_request() -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "ada@example.com", "password": "analytical"}))
}
