//! Infrastructure storage layer: `SeaORM` entities, migrations and repositories.
//!
//! All `SeaORM` imports live here. Repositories translate between entity
//! models and SDK types and turn driver errors into `DomainError`s.

pub mod entity;
pub mod mapper;
pub mod migrations;

mod colleges_sea_repo;
mod db;
mod members_sea_repo;
mod organizations_sea_repo;
mod pagination;
mod programs_sea_repo;
mod search;
mod students_sea_repo;

pub use colleges_sea_repo::OrmCollegesRepository;
pub use members_sea_repo::OrmOrgMembersRepository;
pub use organizations_sea_repo::OrmOrganizationsRepository;
pub use programs_sea_repo::OrmProgramsRepository;
pub use students_sea_repo::OrmStudentsRepository;
