//! REST route registration for the records API.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use utoipa::OpenApi;

use super::handlers;
use super::problem::attach_instance;
use crate::domain::service::{DeployService, Service};

#[derive(OpenApi)]
#[openapi(
    info(title = "Student organization records", description = "Colleges, programs, students, organizations and memberships"),
    paths(
        handlers::health,
        handlers::dashboard,
        handlers::deploy,
        handlers::list_colleges,
        handlers::get_college,
        handlers::create_college,
        handlers::update_college,
        handlers::college_delete_summary,
        handlers::delete_college,
        handlers::list_programs,
        handlers::get_program,
        handlers::create_program,
        handlers::update_program,
        handlers::program_delete_summary,
        handlers::delete_program,
        handlers::list_students,
        handlers::get_student,
        handlers::create_student,
        handlers::update_student,
        handlers::student_delete_summary,
        handlers::delete_student,
        handlers::list_organizations,
        handlers::get_organization,
        handlers::create_organization,
        handlers::update_organization,
        handlers::organization_delete_summary,
        handlers::delete_organization,
        handlers::list_members,
        handlers::get_member,
        handlers::create_member,
        handlers::update_member,
        handlers::member_delete_summary,
        handlers::delete_member,
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the module router with both services injected as extensions.
pub fn router(service: Arc<Service>, deploy: Arc<DeployService>) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi_json))
        .route("/deploy", post(handlers::deploy))
        // colleges
        .route("/colleges/", get(handlers::list_colleges))
        .route("/colleges/new", post(handlers::create_college))
        .route("/colleges/{id}", get(handlers::get_college))
        .route("/colleges/{id}/edit", post(handlers::update_college))
        .route(
            "/colleges/{id}/delete",
            get(handlers::college_delete_summary).post(handlers::delete_college),
        )
        // programs
        .route("/programs/", get(handlers::list_programs))
        .route("/programs/new", post(handlers::create_program))
        .route("/programs/{id}", get(handlers::get_program))
        .route("/programs/{id}/edit", post(handlers::update_program))
        .route(
            "/programs/{id}/delete",
            get(handlers::program_delete_summary).post(handlers::delete_program),
        )
        // students
        .route("/students/", get(handlers::list_students))
        .route("/students/new", post(handlers::create_student))
        .route("/students/{id}", get(handlers::get_student))
        .route("/students/{id}/edit", post(handlers::update_student))
        .route(
            "/students/{id}/delete",
            get(handlers::student_delete_summary).post(handlers::delete_student),
        )
        // organizations
        .route("/organizations/", get(handlers::list_organizations))
        .route("/organizations/new", post(handlers::create_organization))
        .route("/organizations/{id}", get(handlers::get_organization))
        .route("/organizations/{id}/edit", post(handlers::update_organization))
        .route(
            "/organizations/{id}/delete",
            get(handlers::organization_delete_summary).post(handlers::delete_organization),
        )
        // organization members
        .route("/orgmembers/", get(handlers::list_members))
        .route("/orgmembers/new", post(handlers::create_member))
        .route("/orgmembers/{id}", get(handlers::get_member))
        .route("/orgmembers/{id}/edit", post(handlers::update_member))
        .route(
            "/orgmembers/{id}/delete",
            get(handlers::member_delete_summary).post(handlers::delete_member),
        )
        .layer(axum::middleware::from_fn(attach_instance))
        .layer(Extension(service))
        .layer(Extension(deploy))
}
