mod colleges_repo;
mod members_repo;
mod organizations_repo;
mod programs_repo;
mod students_repo;

pub use colleges_repo::CollegesRepository;
pub use members_repo::OrgMembersRepository;
pub use organizations_repo::OrganizationsRepository;
pub use programs_repo::ProgramsRepository;
pub use students_repo::StudentsRepository;
