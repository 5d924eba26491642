//! REST handlers for the records API.
//!
//! Handlers are thin: parse input, call the domain service, map errors to
//! Problem. Successful create, edit and delete answer `303 See Other`
//! pointing back at the entity's listing.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use super::dto::{
    CollegeDto, CollegeRequest, DashboardDto, DeleteConfirmRequest, DeleteSummaryDto, DeployError,
    DeployStatus, HealthResponse, ListParams, OrgMemberDto, OrgMemberRequest, OrgMemberRowDto,
    OrganizationDto, OrganizationRequest, OrganizationRowDto, PageDto, ProgramDto,
    ProgramRequest, ProgramRowDto, StudentDto, StudentRequest, StudentRowDto,
};
use super::problem::{ApiResult, Problem};
use crate::domain::error::DomainError;
use crate::domain::query::{MemberSort, ProgramSort};
use crate::domain::service::{DeployService, Service};
use crate::domain::validation::require_confirmation;

pub const COLLEGES: &str = "/colleges/";
pub const PROGRAMS: &str = "/programs/";
pub const STUDENTS: &str = "/students/";
pub const ORGANIZATIONS: &str = "/organizations/";
pub const ORGMEMBERS: &str = "/orgmembers/";

fn saved<T: Serialize>(location: &'static str, body: T) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)], Json(body)).into_response()
}

fn deleted(location: &'static str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

// === Health & dashboard ===

/// GET /health - Liveness check.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, body = HealthResponse)))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// GET / - Summary counts.
#[utoipa::path(get, path = "/", tag = "Dashboard",
    responses((status = 200, body = DashboardDto), (status = 500, body = Problem)))]
#[tracing::instrument(skip(svc))]
pub async fn dashboard(Extension(svc): Extension<Arc<Service>>) -> ApiResult<Json<DashboardDto>> {
    Ok(Json(svc.dashboard().await?.into()))
}

// === Colleges ===

#[utoipa::path(get, path = "/colleges/", tag = "Colleges", params(ListParams),
    responses((status = 200, body = PageDto<CollegeDto>)))]
#[tracing::instrument(skip(svc))]
pub async fn list_colleges(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<PageDto<CollegeDto>>> {
    let page = svc.list_colleges(&params.list_query()).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[utoipa::path(get, path = "/colleges/{id}", tag = "Colleges",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = CollegeDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(college_id = %id))]
pub async fn get_college(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CollegeDto>> {
    Ok(Json(svc.get_college(id).await?.into()))
}

#[utoipa::path(post, path = "/colleges/new", tag = "Colleges", request_body = CollegeRequest,
    responses((status = 303, body = CollegeDto), (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req))]
pub async fn create_college(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CollegeRequest>,
) -> ApiResult<Response> {
    let college = svc.create_college(req.into()).await?;
    Ok(saved(COLLEGES, CollegeDto::from(college)))
}

#[utoipa::path(post, path = "/colleges/{id}/edit", tag = "Colleges",
    params(("id" = Uuid, Path)), request_body = CollegeRequest,
    responses((status = 303, body = CollegeDto), (status = 404, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(college_id = %id))]
pub async fn update_college(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<CollegeRequest>,
) -> ApiResult<Response> {
    let college = svc.update_college(id, req.into()).await?;
    Ok(saved(COLLEGES, CollegeDto::from(college)))
}

#[utoipa::path(get, path = "/colleges/{id}/delete", tag = "Colleges",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = DeleteSummaryDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(college_id = %id))]
pub async fn college_delete_summary(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteSummaryDto>> {
    Ok(Json(svc.college_delete_summary(id).await?.into()))
}

#[utoipa::path(post, path = "/colleges/{id}/delete", tag = "Colleges",
    params(("id" = Uuid, Path)),
    request_body = DeleteConfirmRequest,
    responses((status = 303), (status = 404, body = Problem), (status = 409, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(college_id = %id))]
pub async fn delete_college(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<DeleteConfirmRequest>,
) -> ApiResult<Response> {
    require_confirmation(req.confirm)?;
    svc.delete_college(id).await?;
    Ok(deleted(COLLEGES))
}

// === Programs ===

#[utoipa::path(get, path = "/programs/", tag = "Programs", params(ListParams),
    responses((status = 200, body = PageDto<ProgramRowDto>)))]
#[tracing::instrument(skip(svc))]
pub async fn list_programs(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<PageDto<ProgramRowDto>>> {
    let sort = ProgramSort::resolve(params.sort_by.as_deref());
    let page = svc.list_programs(&params.list_query(), sort).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[utoipa::path(get, path = "/programs/{id}", tag = "Programs",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = ProgramDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(program_id = %id))]
pub async fn get_program(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProgramDto>> {
    Ok(Json(svc.get_program(id).await?.into()))
}

#[utoipa::path(post, path = "/programs/new", tag = "Programs", request_body = ProgramRequest,
    responses((status = 303, body = ProgramDto), (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req))]
pub async fn create_program(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<ProgramRequest>,
) -> ApiResult<Response> {
    let program = svc.create_program(req.into()).await?;
    Ok(saved(PROGRAMS, ProgramDto::from(program)))
}

#[utoipa::path(post, path = "/programs/{id}/edit", tag = "Programs",
    params(("id" = Uuid, Path)), request_body = ProgramRequest,
    responses((status = 303, body = ProgramDto), (status = 404, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(program_id = %id))]
pub async fn update_program(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProgramRequest>,
) -> ApiResult<Response> {
    let program = svc.update_program(id, req.into()).await?;
    Ok(saved(PROGRAMS, ProgramDto::from(program)))
}

#[utoipa::path(get, path = "/programs/{id}/delete", tag = "Programs",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = DeleteSummaryDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(program_id = %id))]
pub async fn program_delete_summary(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteSummaryDto>> {
    Ok(Json(svc.program_delete_summary(id).await?.into()))
}

#[utoipa::path(post, path = "/programs/{id}/delete", tag = "Programs",
    params(("id" = Uuid, Path)),
    request_body = DeleteConfirmRequest,
    responses((status = 303), (status = 404, body = Problem), (status = 409, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(program_id = %id))]
pub async fn delete_program(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<DeleteConfirmRequest>,
) -> ApiResult<Response> {
    require_confirmation(req.confirm)?;
    svc.delete_program(id).await?;
    Ok(deleted(PROGRAMS))
}

// === Students ===

#[utoipa::path(get, path = "/students/", tag = "Students", params(ListParams),
    responses((status = 200, body = PageDto<StudentRowDto>)))]
#[tracing::instrument(skip(svc))]
pub async fn list_students(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<PageDto<StudentRowDto>>> {
    let page = svc.list_students(&params.list_query()).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[utoipa::path(get, path = "/students/{id}", tag = "Students",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = StudentDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(student_pk = %id))]
pub async fn get_student(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StudentDto>> {
    Ok(Json(svc.get_student(id).await?.into()))
}

#[utoipa::path(post, path = "/students/new", tag = "Students", request_body = StudentRequest,
    responses((status = 303, body = StudentDto), (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req))]
pub async fn create_student(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<StudentRequest>,
) -> ApiResult<Response> {
    let student = svc.create_student(req.into()).await?;
    Ok(saved(STUDENTS, StudentDto::from(student)))
}

#[utoipa::path(post, path = "/students/{id}/edit", tag = "Students",
    params(("id" = Uuid, Path)), request_body = StudentRequest,
    responses((status = 303, body = StudentDto), (status = 404, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(student_pk = %id))]
pub async fn update_student(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<StudentRequest>,
) -> ApiResult<Response> {
    let student = svc.update_student(id, req.into()).await?;
    Ok(saved(STUDENTS, StudentDto::from(student)))
}

#[utoipa::path(get, path = "/students/{id}/delete", tag = "Students",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = DeleteSummaryDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(student_pk = %id))]
pub async fn student_delete_summary(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteSummaryDto>> {
    Ok(Json(svc.student_delete_summary(id).await?.into()))
}

#[utoipa::path(post, path = "/students/{id}/delete", tag = "Students",
    params(("id" = Uuid, Path)),
    request_body = DeleteConfirmRequest,
    responses((status = 303), (status = 404, body = Problem), (status = 409, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(student_pk = %id))]
pub async fn delete_student(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<DeleteConfirmRequest>,
) -> ApiResult<Response> {
    require_confirmation(req.confirm)?;
    svc.delete_student(id).await?;
    Ok(deleted(STUDENTS))
}

// === Organizations ===

#[utoipa::path(get, path = "/organizations/", tag = "Organizations", params(ListParams),
    responses((status = 200, body = PageDto<OrganizationRowDto>)))]
#[tracing::instrument(skip(svc))]
pub async fn list_organizations(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<PageDto<OrganizationRowDto>>> {
    let page = svc.list_organizations(&params.list_query()).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[utoipa::path(get, path = "/organizations/{id}", tag = "Organizations",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = OrganizationDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(organization_id = %id))]
pub async fn get_organization(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrganizationDto>> {
    Ok(Json(svc.get_organization(id).await?.into()))
}

#[utoipa::path(post, path = "/organizations/new", tag = "Organizations",
    request_body = OrganizationRequest,
    responses((status = 303, body = OrganizationDto), (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req))]
pub async fn create_organization(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<OrganizationRequest>,
) -> ApiResult<Response> {
    let organization = svc.create_organization(req.into()).await?;
    Ok(saved(ORGANIZATIONS, OrganizationDto::from(organization)))
}

#[utoipa::path(post, path = "/organizations/{id}/edit", tag = "Organizations",
    params(("id" = Uuid, Path)),
    request_body = OrganizationRequest,
    responses((status = 303, body = OrganizationDto), (status = 404, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(organization_id = %id))]
pub async fn update_organization(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<OrganizationRequest>,
) -> ApiResult<Response> {
    let organization = svc.update_organization(id, req.into()).await?;
    Ok(saved(ORGANIZATIONS, OrganizationDto::from(organization)))
}

#[utoipa::path(get, path = "/organizations/{id}/delete", tag = "Organizations",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = DeleteSummaryDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(organization_id = %id))]
pub async fn organization_delete_summary(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteSummaryDto>> {
    Ok(Json(svc.organization_delete_summary(id).await?.into()))
}

#[utoipa::path(post, path = "/organizations/{id}/delete", tag = "Organizations",
    params(("id" = Uuid, Path)),
    request_body = DeleteConfirmRequest,
    responses((status = 303), (status = 404, body = Problem), (status = 409, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(organization_id = %id))]
pub async fn delete_organization(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<DeleteConfirmRequest>,
) -> ApiResult<Response> {
    require_confirmation(req.confirm)?;
    svc.delete_organization(id).await?;
    Ok(deleted(ORGANIZATIONS))
}

// === Organization members ===

#[utoipa::path(get, path = "/orgmembers/", tag = "Organization members", params(ListParams),
    responses((status = 200, body = PageDto<OrgMemberRowDto>)))]
#[tracing::instrument(skip(svc))]
pub async fn list_members(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<PageDto<OrgMemberRowDto>>> {
    let sort = MemberSort::resolve(params.sort_by.as_deref(), params.sort_order.as_deref());
    let page = svc.list_members(&params.list_query(), sort).await?;
    Ok(Json(PageDto::from_page(page)))
}

#[utoipa::path(get, path = "/orgmembers/{id}", tag = "Organization members",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = OrgMemberDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(member_id = %id))]
pub async fn get_member(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrgMemberDto>> {
    Ok(Json(svc.get_member(id).await?.into()))
}

#[utoipa::path(post, path = "/orgmembers/new", tag = "Organization members",
    request_body = OrgMemberRequest,
    responses((status = 303, body = OrgMemberDto), (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req))]
pub async fn create_member(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<OrgMemberRequest>,
) -> ApiResult<Response> {
    let member = svc.create_member(req.into()).await?;
    Ok(saved(ORGMEMBERS, OrgMemberDto::from(member)))
}

#[utoipa::path(post, path = "/orgmembers/{id}/edit", tag = "Organization members",
    params(("id" = Uuid, Path)),
    request_body = OrgMemberRequest,
    responses((status = 303, body = OrgMemberDto), (status = 404, body = Problem),
        (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(member_id = %id))]
pub async fn update_member(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<OrgMemberRequest>,
) -> ApiResult<Response> {
    let member = svc.update_member(id, req.into()).await?;
    Ok(saved(ORGMEMBERS, OrgMemberDto::from(member)))
}

#[utoipa::path(get, path = "/orgmembers/{id}/delete", tag = "Organization members",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = DeleteSummaryDto), (status = 404, body = Problem)))]
#[tracing::instrument(skip(svc), fields(member_id = %id))]
pub async fn member_delete_summary(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteSummaryDto>> {
    Ok(Json(svc.member_delete_summary(id).await?.into()))
}

#[utoipa::path(post, path = "/orgmembers/{id}/delete", tag = "Organization members",
    params(("id" = Uuid, Path)),
    request_body = DeleteConfirmRequest,
    responses((status = 303), (status = 404, body = Problem), (status = 422, body = Problem)))]
#[tracing::instrument(skip(svc, req), fields(member_id = %id))]
pub async fn delete_member(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<DeleteConfirmRequest>,
) -> ApiResult<Response> {
    require_confirmation(req.confirm)?;
    svc.delete_member(id).await?;
    Ok(deleted(ORGMEMBERS))
}

// === Deploy ===

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// POST /deploy - Authenticated trigger for the deployment pipeline.
///
/// Answers with its own JSON bodies rather than Problem Details.
#[utoipa::path(post, path = "/deploy", tag = "System",
    responses((status = 200, body = DeployStatus), (status = 403, body = DeployError),
        (status = 500, body = DeployError)))]
#[tracing::instrument(skip_all)]
pub async fn deploy(
    Extension(deploy): Extension<Arc<DeployService>>,
    headers: HeaderMap,
) -> Response {
    match deploy.trigger(bearer_token(&headers)).await {
        Ok(()) => Json(DeployStatus {
            status: "Deployed successfully".to_owned(),
        })
        .into_response(),
        Err(DomainError::Unauthorized) => (
            StatusCode::FORBIDDEN,
            Json(DeployError {
                error: "Unauthorized".to_owned(),
                details: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DeployError {
                error: "Deployment failed".to_owned(),
                details: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}
