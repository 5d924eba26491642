use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use studentorg_sdk::{
    College, Dependents, EntityKind, NewCollege, NewOrgMember, NewProgram, NewStudent, OrgMember,
    OrgMemberRow, Organization, OrganizationRow, Page, PageInfo, Program, ProgramRow, Student,
    StudentRow,
};
use uuid::Uuid;

use super::Service;
use crate::domain::error::DomainError;
use crate::domain::query::{ListQuery, MemberSort, ProgramSort};
use crate::domain::repos::{
    CollegesRepository, OrgMembersRepository, OrganizationsRepository, ProgramsRepository,
    StudentsRepository,
};

// One stub backs every repository: ids in `known` exist, everything else
// does not. Writes are counted so tests can assert nothing was persisted.
#[derive(Default)]
struct StubStore {
    known: Vec<Uuid>,
    student_id_holder: Option<Uuid>,
    dependents: Vec<Dependents>,
    writes: AtomicUsize,
}

impl StubStore {
    fn has(&self, id: Uuid) -> bool {
        self.known.contains(&id)
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn empty_page<T>() -> Page<T> {
        Page::new(Vec::new(), PageInfo::new(1, 0))
    }
}

fn student(id: Uuid, student_id: &str) -> Student {
    let now = Utc::now();
    Student {
        id,
        student_id: student_id.to_owned(),
        lastname: "Reyes".to_owned(),
        firstname: "Ana".to_owned(),
        middlename: None,
        program_id: Uuid::nil(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl CollegesRepository for StubStore {
    async fn get(&self, id: Uuid) -> Result<Option<College>, DomainError> {
        let now = Utc::now();
        Ok(self.has(id).then(|| College {
            id,
            college_name: "College of Science".to_owned(),
            created_at: now,
            updated_at: now,
        }))
    }
    async fn list_page(&self, _query: &ListQuery) -> Result<Page<College>, DomainError> {
        Ok(Self::empty_page())
    }
    async fn create(&self, college: College) -> Result<College, DomainError> {
        self.write();
        Ok(college)
    }
    async fn update(&self, college: College) -> Result<College, DomainError> {
        self.write();
        Ok(college)
    }
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.write();
        Ok(self.has(id))
    }
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.has(id))
    }
    async fn dependents(&self, _id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        Ok(self.dependents.clone())
    }
}

#[async_trait]
impl ProgramsRepository for StubStore {
    async fn get(&self, id: Uuid) -> Result<Option<Program>, DomainError> {
        let now = Utc::now();
        Ok(self.has(id).then(|| Program {
            id,
            prog_name: "BS Biology".to_owned(),
            college_id: Uuid::nil(),
            created_at: now,
            updated_at: now,
        }))
    }
    async fn list_page(
        &self,
        _query: &ListQuery,
        _sort: ProgramSort,
    ) -> Result<Page<ProgramRow>, DomainError> {
        Ok(Self::empty_page())
    }
    async fn create(&self, program: Program) -> Result<Program, DomainError> {
        self.write();
        Ok(program)
    }
    async fn update(&self, program: Program) -> Result<Program, DomainError> {
        self.write();
        Ok(program)
    }
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.write();
        Ok(self.has(id))
    }
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.has(id))
    }
    async fn dependents(&self, _id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        Ok(self.dependents.clone())
    }
    async fn count(&self) -> Result<u64, DomainError> {
        Ok(2)
    }
}

#[async_trait]
impl StudentsRepository for StubStore {
    async fn get(&self, id: Uuid) -> Result<Option<Student>, DomainError> {
        Ok(self.has(id).then(|| student(id, "2020-00001")))
    }
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Student>, DomainError> {
        Ok(self.student_id_holder.map(|id| student(id, student_id)))
    }
    async fn list_page(&self, _query: &ListQuery) -> Result<Page<StudentRow>, DomainError> {
        Ok(Self::empty_page())
    }
    async fn create(&self, student: Student) -> Result<Student, DomainError> {
        self.write();
        Ok(student)
    }
    async fn update(&self, student: Student) -> Result<Student, DomainError> {
        self.write();
        Ok(student)
    }
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.write();
        Ok(self.has(id))
    }
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.has(id))
    }
    async fn dependents(&self, _id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        Ok(self.dependents.clone())
    }
    async fn count(&self) -> Result<u64, DomainError> {
        Ok(7)
    }
}

#[async_trait]
impl OrganizationsRepository for StubStore {
    async fn get(&self, id: Uuid) -> Result<Option<Organization>, DomainError> {
        let now = Utc::now();
        Ok(self.has(id).then(|| Organization {
            id,
            name: "Chess Club".to_owned(),
            description: "Board games".to_owned(),
            college_id: Uuid::nil(),
            created_at: now,
            updated_at: now,
        }))
    }
    async fn list_page(&self, _query: &ListQuery) -> Result<Page<OrganizationRow>, DomainError> {
        Ok(Self::empty_page())
    }
    async fn create(&self, organization: Organization) -> Result<Organization, DomainError> {
        self.write();
        Ok(organization)
    }
    async fn update(&self, organization: Organization) -> Result<Organization, DomainError> {
        self.write();
        Ok(organization)
    }
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.write();
        Ok(self.has(id))
    }
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.has(id))
    }
    async fn dependents(&self, _id: Uuid) -> Result<Vec<Dependents>, DomainError> {
        Ok(self.dependents.clone())
    }
    async fn count(&self) -> Result<u64, DomainError> {
        Ok(3)
    }
}

#[async_trait]
impl OrgMembersRepository for StubStore {
    async fn get(&self, id: Uuid) -> Result<Option<OrgMember>, DomainError> {
        let now = Utc::now();
        Ok(self.has(id).then(|| OrgMember {
            id,
            student_id: Uuid::nil(),
            organization_id: Uuid::nil(),
            date_joined: now.date_naive(),
            created_at: now,
            updated_at: now,
        }))
    }
    async fn list_page(
        &self,
        _query: &ListQuery,
        _sort: MemberSort,
    ) -> Result<Page<OrgMemberRow>, DomainError> {
        Ok(Self::empty_page())
    }
    async fn create(&self, member: OrgMember) -> Result<OrgMember, DomainError> {
        self.write();
        Ok(member)
    }
    async fn update(&self, member: OrgMember) -> Result<OrgMember, DomainError> {
        self.write();
        Ok(member)
    }
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.write();
        Ok(self.has(id))
    }
    async fn count_distinct_students_joined(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<u64, DomainError> {
        assert!(from < until);
        Ok(4)
    }
}

fn service(store: &Arc<StubStore>) -> Service {
    Service::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

fn violation_fields(err: DomainError) -> Vec<String> {
    match err {
        DomainError::Validation { violations } => {
            violations.into_iter().map(|v| v.field).collect()
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn create_college_trims_and_persists() {
    let store = Arc::new(StubStore::default());
    let college = service(&store)
        .create_college(NewCollege {
            college_name: "  College of Arts ".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(college.college_name, "College of Arts");
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn create_program_with_missing_college_writes_nothing() {
    let store = Arc::new(StubStore::default());
    let err = service(&store)
        .create_program(NewProgram {
            prog_name: String::new(),
            college_id: Uuid::now_v7(),
        })
        .await
        .unwrap_err();

    assert_eq!(violation_fields(err), vec!["prog_name", "college_id"]);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn duplicate_student_id_is_rejected_without_write() {
    let program_id = Uuid::now_v7();
    let store = Arc::new(StubStore {
        known: vec![program_id],
        student_id_holder: Some(Uuid::now_v7()),
        ..StubStore::default()
    });

    let err = service(&store)
        .create_student(NewStudent {
            student_id: "2020-00001".to_owned(),
            lastname: "Cruz".to_owned(),
            firstname: "Ben".to_owned(),
            middlename: None,
            program_id,
        })
        .await
        .unwrap_err();

    assert_eq!(violation_fields(err), vec!["student_id"]);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn update_keeps_own_student_id() {
    let program_id = Uuid::now_v7();
    let student_pk = Uuid::now_v7();
    let store = Arc::new(StubStore {
        known: vec![program_id, student_pk],
        student_id_holder: Some(student_pk),
        ..StubStore::default()
    });

    let updated = service(&store)
        .update_student(
            student_pk,
            NewStudent {
                student_id: "2020-00001".to_owned(),
                lastname: "Reyes".to_owned(),
                firstname: "Ana Marie".to_owned(),
                middlename: Some("  ".to_owned()),
                program_id,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.firstname, "Ana Marie");
    assert_eq!(updated.middlename, None);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let store = Arc::new(StubStore::default());
    let id = Uuid::now_v7();
    let err = service(&store)
        .update_college(
            id,
            NewCollege {
                college_name: "Anything".to_owned(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound { entity: EntityKind::College, id: missing } if missing == id
    ));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn delete_with_dependents_is_a_conflict() {
    let college_id = Uuid::now_v7();
    let store = Arc::new(StubStore {
        known: vec![college_id],
        dependents: vec![Dependents {
            relation: "programs",
            count: 2,
        }],
        ..StubStore::default()
    });

    let err = service(&store).delete_college(college_id).await.unwrap_err();

    match err {
        DomainError::Conflict {
            entity, blocking, ..
        } => {
            assert_eq!(entity, EntityKind::College);
            assert_eq!(blocking[0].relation, "programs");
            assert_eq!(blocking[0].count, 2);
        }
        other => panic!("expected conflict, got {other}"),
    }
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn member_join_date_in_future_is_rejected() {
    let student_pk = Uuid::now_v7();
    let organization_id = Uuid::now_v7();
    let store = Arc::new(StubStore {
        known: vec![student_pk, organization_id],
        ..StubStore::default()
    });
    let tomorrow = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap();

    let err = service(&store)
        .create_member(NewOrgMember {
            student_id: student_pk,
            organization_id,
            date_joined: Some(tomorrow),
        })
        .await
        .unwrap_err();

    assert_eq!(violation_fields(err), vec!["date_joined"]);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn member_without_join_date_is_rejected() {
    let student_pk = Uuid::now_v7();
    let organization_id = Uuid::now_v7();
    let store = Arc::new(StubStore {
        known: vec![student_pk, organization_id],
        ..StubStore::default()
    });

    let err = service(&store)
        .create_member(NewOrgMember {
            student_id: student_pk,
            organization_id,
            date_joined: None,
        })
        .await
        .unwrap_err();

    assert_eq!(violation_fields(err), vec!["date_joined"]);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn dashboard_reports_current_year() {
    let store = Arc::new(StubStore::default());
    let dashboard = service(&store).dashboard().await.unwrap();

    assert_eq!(dashboard.total_students, 7);
    assert_eq!(dashboard.total_programs, 2);
    assert_eq!(dashboard.total_organizations, 3);
    assert_eq!(dashboard.students_joined_this_year, 4);
    assert_eq!(dashboard.year, chrono::Datelike::year(&Utc::now()));
}
