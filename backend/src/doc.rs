//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request, response and error schemas, plus the session cookie
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use crate::inbound::http::companies::{CompanyRequest, CompanyResponse};
use crate::inbound::http::drivers::{DriverRequest, DriverResponse};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, FieldErrorDetailsSchema};
use crate::inbound::http::users::{LoginRequest, ProfileRequest, RegisterRequest, UserResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Fleet registry API",
        description = "Session-authenticated access to user accounts, companies and drivers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::replace_current_user,
        crate::inbound::http::users::patch_current_user,
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::replace_company,
        crate::inbound::http::companies::patch_company,
        crate::inbound::http::companies::delete_company,
        crate::inbound::http::drivers::list_drivers,
        crate::inbound::http::drivers::create_driver,
        crate::inbound::http::drivers::get_driver,
        crate::inbound::http::drivers::replace_driver,
        crate::inbound::http::drivers::patch_driver,
        crate::inbound::http::drivers::delete_driver,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        ProfileRequest,
        UserResponse,
        CompanyRequest,
        CompanyResponse,
        DriverRequest,
        DriverResponse,
        ProbeStatus,
        ErrorSchema,
        ErrorCodeSchema,
        FieldErrorDetailsSchema
    )),
    tags(
        (name = "users", description = "Registration, login and the signed-in profile"),
        (name = "companies", description = "Companies identified by CNPJ"),
        (name = "drivers", description = "Drivers and the company they work for"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/users",
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/users/me",
            "/api/v1/companies",
            "/api/v1/companies/{id}",
            "/api/v1/drivers",
            "/api/v1/drivers/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn company_schema_exposes_both_tax_id_forms() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let company = schemas.get("CompanyResponse").expect("CompanyResponse schema");

        assert_object_schema_has_field(company, "taxId");
        assert_object_schema_has_field(company, "formattedTaxId");
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        for field in ["code", "message", "traceId", "details"] {
            assert_object_schema_has_field(error, field);
        }
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
