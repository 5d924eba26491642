//! StudentOrg module definition.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::api::rest::routes;
use crate::config::DeployConfig;
use crate::domain::ports::DeployPipeline;
use crate::domain::repos::{
    CollegesRepository, OrgMembersRepository, OrganizationsRepository, ProgramsRepository,
    StudentsRepository,
};
use crate::domain::service::{DeployService, Service};
use crate::infra::deploy::{DisabledPipeline, HttpPipelineClient};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmCollegesRepository, OrmOrgMembersRepository, OrmOrganizationsRepository,
    OrmProgramsRepository, OrmStudentsRepository,
};

/// Wired records service and deploy trigger, ready to serve.
///
/// - Runs the schema migrations
/// - Wires the `SeaORM` repositories into the domain service
/// - Picks the deploy pipeline adapter from configuration
/// - Exposes the REST router
pub struct StudentOrgModule {
    service: Arc<Service>,
    deploy: Arc<DeployService>,
}

impl StudentOrgModule {
    /// # Errors
    /// Fails when the deploy HTTP client cannot be built.
    pub fn init(conn: &DatabaseConnection, cfg: &DeployConfig) -> anyhow::Result<Self> {
        info!("Initializing studentorg module");

        let colleges: Arc<dyn CollegesRepository> =
            Arc::new(OrmCollegesRepository::new(conn.clone()));
        let programs: Arc<dyn ProgramsRepository> =
            Arc::new(OrmProgramsRepository::new(conn.clone()));
        let students: Arc<dyn StudentsRepository> =
            Arc::new(OrmStudentsRepository::new(conn.clone()));
        let organizations: Arc<dyn OrganizationsRepository> =
            Arc::new(OrmOrganizationsRepository::new(conn.clone()));
        let members: Arc<dyn OrgMembersRepository> =
            Arc::new(OrmOrgMembersRepository::new(conn.clone()));

        let service = Arc::new(Service::new(
            colleges,
            programs,
            students,
            organizations,
            members,
        ));

        let pipeline: Arc<dyn DeployPipeline> = match &cfg.pipeline_url {
            Some(url) => {
                info!(pipeline_url = %url, "Deploy pipeline configured");
                Arc::new(HttpPipelineClient::new(
                    url.clone(),
                    Duration::from_secs(cfg.timeout_secs),
                )?)
            }
            None => {
                warn!("No deploy pipeline URL configured; deploy requests will fail");
                Arc::new(DisabledPipeline)
            }
        };
        let token = cfg.effective_token();
        if token.is_none() {
            warn!("No deploy token configured; every deploy request will be rejected");
        }

        Ok(Self::from_parts(
            service,
            Arc::new(DeployService::new(token, pipeline)),
        ))
    }

    /// Assemble from already-built services.
    pub fn from_parts(service: Arc<Service>, deploy: Arc<DeployService>) -> Self {
        Self { service, deploy }
    }

    /// # Errors
    /// Propagates migration failures.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running studentorg database migrations");
        Migrator::up(conn, None).await?;
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn router(&self) -> axum::Router {
        info!("Registering studentorg REST routes");
        routes::router(self.service.clone(), self.deploy.clone())
    }
}
