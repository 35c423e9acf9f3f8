//! Companies API handlers.
//!
//! ```text
//! GET    /api/v1/companies
//! POST   /api/v1/companies        {"name":"Acme Logistica","taxId":"39.417.743/0001-05"}
//! GET    /api/v1/companies/{id}
//! PUT    /api/v1/companies/{id}   {"name":"Acme","taxId":"39417743000105"}
//! PATCH  /api/v1/companies/{id}   {"name":"Acme Transportes"}
//! DELETE /api/v1/companies/{id}
//! ```
//!
//! Every route requires a signed-in session.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Company, CompanyDraft, CompanyId, CompanyPatch, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    NAME, TAX_ID, parse_name, parse_optional, parse_patch_tax_id, parse_tax_id, require,
};

/// Company payload for create, replace and patch.
///
/// Create and replace need both fields; patch accepts any subset.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyRequest {
    /// Trading name.
    #[schema(example = "Acme Logistica")]
    pub name: Option<String>,
    /// CNPJ, with or without punctuation.
    #[schema(example = "39.417.743/0001-05")]
    pub tax_id: Option<String>,
}

impl TryFrom<CompanyRequest> for CompanyDraft {
    type Error = Error;

    fn try_from(value: CompanyRequest) -> Result<Self, Self::Error> {
        let name = require(value.name, NAME)?;
        let tax_id = require(value.tax_id, TAX_ID)?;
        Ok(Self {
            name: parse_name(&name, NAME)?,
            tax_id: parse_tax_id(&tax_id)?,
        })
    }
}

impl TryFrom<CompanyRequest> for CompanyPatch {
    type Error = Error;

    fn try_from(value: CompanyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: parse_optional(value.name.as_deref(), |raw| parse_name(raw, NAME))?,
            tax_id: parse_patch_tax_id(value.tax_id.as_deref())?,
        })
    }
}

/// Company as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    /// Normalised fourteen-digit CNPJ.
    #[schema(example = "39417743000105")]
    pub tax_id: String,
    /// CNPJ with the conventional punctuation.
    #[schema(example = "39.417.743/0001-05")]
    pub formatted_tax_id: String,
}

impl From<&Company> for CompanyResponse {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.to_string(),
            name: company.name.to_string(),
            tax_id: company.tax_id.to_string(),
            formatted_tax_id: company.tax_id.formatted(),
        }
    }
}

/// List companies ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    responses(
        (status = 200, description = "Companies", body = [CompanyResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "listCompanies"
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CompanyResponse>>> {
    session.require_user_id()?;
    let companies = state.companies_query.list_companies().await?;
    Ok(web::Json(companies.iter().map(CompanyResponse::from).collect()))
}

/// Register a company after validating its CNPJ.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Tax id already registered", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = CompanyDraft::try_from(payload.into_inner())?;
    let company = state.companies.create_company(draft).await?;
    Ok(HttpResponse::Created().json(CompanyResponse::from(&company)))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown company", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "getCompany"
)]
#[get("/companies/{id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CompanyResponse>> {
    session.require_user_id()?;
    let id = CompanyId::from_uuid(path.into_inner());
    let company = state.companies_query.get_company(&id).await?;
    Ok(web::Json(CompanyResponse::from(&company)))
}

/// Replace every attribute of a company.
#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company identifier")),
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Updated company", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown company", body = ErrorSchema),
        (status = 409, description = "Tax id already registered", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "replaceCompany"
)]
#[put("/companies/{id}")]
pub async fn replace_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<web::Json<CompanyResponse>> {
    session.require_user_id()?;
    let id = CompanyId::from_uuid(path.into_inner());
    let draft = CompanyDraft::try_from(payload.into_inner())?;
    let company = state.companies.replace_company(&id, draft).await?;
    Ok(web::Json(CompanyResponse::from(&company)))
}

/// Change only the supplied attributes.
#[utoipa::path(
    patch,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company identifier")),
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Updated company", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown company", body = ErrorSchema),
        (status = 409, description = "Tax id already registered", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "patchCompany"
)]
#[patch("/companies/{id}")]
pub async fn patch_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<web::Json<CompanyResponse>> {
    session.require_user_id()?;
    let id = CompanyId::from_uuid(path.into_inner());
    let patch = CompanyPatch::try_from(payload.into_inner())?;
    let company = state.companies.patch_company(&id, patch).await?;
    Ok(web::Json(CompanyResponse::from(&company)))
}

/// Remove a company that no longer has drivers.
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company identifier")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown company", body = ErrorSchema),
        (status = 409, description = "Company still has drivers", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany"
)]
#[delete("/companies/{id}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = CompanyId::from_uuid(path.into_inner());
    state.companies.delete_company(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
