//! Drivers API handlers.
//!
//! ```text
//! GET    /api/v1/drivers
//! POST   /api/v1/drivers        {"name":"Rita","licenseNumber":"97270429357","companyId":"..."}
//! GET    /api/v1/drivers/{id}
//! PUT    /api/v1/drivers/{id}
//! PATCH  /api/v1/drivers/{id}   {"companyId":"..."}
//! DELETE /api/v1/drivers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Driver, DriverDraft, DriverId, DriverPatch, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    COMPANY_ID, LICENSE_NUMBER, NAME, parse_company_id, parse_license_number, parse_name,
    parse_optional, require,
};

/// Driver payload for create, replace and patch.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverRequest {
    #[schema(example = "Rita Lobo")]
    pub name: Option<String>,
    /// Eleven-digit driving licence number.
    #[schema(example = "97270429357")]
    pub license_number: Option<String>,
    /// Identifier of the employing company.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub company_id: Option<String>,
}

impl TryFrom<DriverRequest> for DriverDraft {
    type Error = Error;

    fn try_from(value: DriverRequest) -> Result<Self, Self::Error> {
        let name = require(value.name, NAME)?;
        let license = require(value.license_number, LICENSE_NUMBER)?;
        let company_id = require(value.company_id, COMPANY_ID)?;
        Ok(Self {
            name: parse_name(&name, NAME)?,
            license: parse_license_number(&license)?,
            company_id: parse_company_id(&company_id)?,
        })
    }
}

impl TryFrom<DriverRequest> for DriverPatch {
    type Error = Error;

    fn try_from(value: DriverRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: parse_optional(value.name.as_deref(), |raw| parse_name(raw, NAME))?,
            license: parse_optional(value.license_number.as_deref(), parse_license_number)?,
            company_id: parse_optional(value.company_id.as_deref(), parse_company_id)?,
        })
    }
}

/// Driver as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: String,
    pub name: String,
    pub license_number: String,
    pub company_id: String,
}

impl From<&Driver> for DriverResponse {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            name: driver.name.to_string(),
            license_number: driver.license.to_string(),
            company_id: driver.company_id.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/drivers",
    responses(
        (status = 200, description = "Drivers", body = [DriverResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "listDrivers"
)]
#[get("/drivers")]
pub async fn list_drivers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DriverResponse>>> {
    session.require_user_id()?;
    let drivers = state.drivers_query.list_drivers().await?;
    Ok(web::Json(drivers.iter().map(DriverResponse::from).collect()))
}

/// Register a driver under an existing company.
#[utoipa::path(
    post,
    path = "/api/v1/drivers",
    request_body = DriverRequest,
    responses(
        (status = 201, description = "Driver created", body = DriverResponse),
        (status = 400, description = "Invalid request or unknown company", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Licence number already registered", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "createDriver"
)]
#[post("/drivers")]
pub async fn create_driver(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DriverRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = DriverDraft::try_from(payload.into_inner())?;
    let driver = state.drivers.create_driver(draft).await?;
    Ok(HttpResponse::Created().json(DriverResponse::from(&driver)))
}

#[utoipa::path(
    get,
    path = "/api/v1/drivers/{id}",
    params(("id" = Uuid, Path, description = "Driver identifier")),
    responses(
        (status = 200, description = "Driver", body = DriverResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown driver", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "getDriver"
)]
#[get("/drivers/{id}")]
pub async fn get_driver(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<DriverResponse>> {
    session.require_user_id()?;
    let id = DriverId::from_uuid(path.into_inner());
    let driver = state.drivers_query.get_driver(&id).await?;
    Ok(web::Json(DriverResponse::from(&driver)))
}

#[utoipa::path(
    put,
    path = "/api/v1/drivers/{id}",
    params(("id" = Uuid, Path, description = "Driver identifier")),
    request_body = DriverRequest,
    responses(
        (status = 200, description = "Updated driver", body = DriverResponse),
        (status = 400, description = "Invalid request or unknown company", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown driver", body = ErrorSchema),
        (status = 409, description = "Licence number already registered", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "replaceDriver"
)]
#[put("/drivers/{id}")]
pub async fn replace_driver(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<DriverRequest>,
) -> ApiResult<web::Json<DriverResponse>> {
    session.require_user_id()?;
    let id = DriverId::from_uuid(path.into_inner());
    let draft = DriverDraft::try_from(payload.into_inner())?;
    let driver = state.drivers.replace_driver(&id, draft).await?;
    Ok(web::Json(DriverResponse::from(&driver)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/drivers/{id}",
    params(("id" = Uuid, Path, description = "Driver identifier")),
    request_body = DriverRequest,
    responses(
        (status = 200, description = "Updated driver", body = DriverResponse),
        (status = 400, description = "Invalid request or unknown company", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown driver", body = ErrorSchema),
        (status = 409, description = "Licence number already registered", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "patchDriver"
)]
#[patch("/drivers/{id}")]
pub async fn patch_driver(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<DriverRequest>,
) -> ApiResult<web::Json<DriverResponse>> {
    session.require_user_id()?;
    let id = DriverId::from_uuid(path.into_inner());
    let patch = DriverPatch::try_from(payload.into_inner())?;
    let driver = state.drivers.patch_driver(&id, patch).await?;
    Ok(web::Json(DriverResponse::from(&driver)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/drivers/{id}",
    params(("id" = Uuid, Path, description = "Driver identifier")),
    responses(
        (status = 204, description = "Driver deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown driver", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "deleteDriver"
)]
#[delete("/drivers/{id}")]
pub async fn delete_driver(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = DriverId::from_uuid(path.into_inner());
    state.drivers.delete_driver(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
