#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures: an in-memory SQLite store with the real migrations.

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use studentorg::StudentOrgModule;
use studentorg::config::DeployConfig;
use studentorg::domain::service::Service;
use studentorg_sdk::{
    College, NewCollege, NewOrgMember, NewOrganization, NewProgram, NewStudent, OrgMember,
    Organization, Program, Student,
};

pub struct Fixture {
    pub conn: DatabaseConnection,
    pub svc: Arc<Service>,
}

/// A single pooled connection keeps every query on the same in-memory database.
pub async fn connect() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.expect("connect sqlite");
    StudentOrgModule::migrate(&conn).await.expect("migrate");
    conn
}

pub async fn setup() -> Fixture {
    let conn = connect().await;
    let module = StudentOrgModule::init(&conn, &DeployConfig::default()).unwrap();
    Fixture {
        svc: module.service(),
        conn,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

impl Fixture {
    pub async fn college(&self, name: &str) -> College {
        self.svc
            .create_college(NewCollege {
                college_name: name.to_owned(),
            })
            .await
            .unwrap()
    }

    pub async fn program(&self, name: &str, college: &College) -> Program {
        self.svc
            .create_program(NewProgram {
                prog_name: name.to_owned(),
                college_id: college.id,
            })
            .await
            .unwrap()
    }

    pub async fn student(
        &self,
        student_id: &str,
        lastname: &str,
        firstname: &str,
        program: &Program,
    ) -> Student {
        self.svc
            .create_student(NewStudent {
                student_id: student_id.to_owned(),
                lastname: lastname.to_owned(),
                firstname: firstname.to_owned(),
                middlename: None,
                program_id: program.id,
            })
            .await
            .unwrap()
    }

    pub async fn organization(&self, name: &str, college: &College) -> Organization {
        self.svc
            .create_organization(NewOrganization {
                name: name.to_owned(),
                description: format!("{name} description"),
                college_id: college.id,
            })
            .await
            .unwrap()
    }

    pub async fn member(
        &self,
        student: &Student,
        organization: &Organization,
        date_joined: NaiveDate,
    ) -> OrgMember {
        self.svc
            .create_member(NewOrgMember {
                student_id: student.id,
                organization_id: organization.id,
                date_joined: Some(date_joined),
            })
            .await
            .unwrap()
    }
}
