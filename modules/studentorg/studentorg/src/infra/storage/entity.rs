//! SeaORM entities for the student organization records.

/// College entity module.
pub mod college {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "colleges")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub college_name: String,
        pub college_name_folded: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::program::Entity")]
        Programs,
        #[sea_orm(has_many = "super::organization::Entity")]
        Organizations,
    }

    impl Related<super::program::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Programs.def()
        }
    }

    impl Related<super::organization::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Organizations.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Program entity module.
pub mod program {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "programs")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub prog_name: String,
        pub prog_name_folded: String,
        pub college_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::college::Entity",
            from = "Column::CollegeId",
            to = "super::college::Column::Id"
        )]
        College,
        #[sea_orm(has_many = "super::student::Entity")]
        Students,
    }

    impl Related<super::college::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::College.def()
        }
    }

    impl Related<super::student::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Students.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Student entity module.
pub mod student {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    /// `student_id` is the business key (unique index); `id` is the row key.
    /// The `*_folded` columns hold the lowercased text that searches match.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "students")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub student_id: String,
        pub lastname: String,
        pub firstname: String,
        pub middlename: Option<String>,
        pub student_id_folded: String,
        pub lastname_folded: String,
        pub firstname_folded: String,
        pub middlename_folded: Option<String>,
        pub program_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::program::Entity",
            from = "Column::ProgramId",
            to = "super::program::Column::Id"
        )]
        Program,
        #[sea_orm(has_many = "super::org_member::Entity")]
        Memberships,
    }

    impl Related<super::program::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Program.def()
        }
    }

    impl Related<super::org_member::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Memberships.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Organization entity module.
pub mod organization {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "organizations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub name_folded: String,
        pub description_folded: String,
        pub college_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::college::Entity",
            from = "Column::CollegeId",
            to = "super::college::Column::Id"
        )]
        College,
        #[sea_orm(has_many = "super::org_member::Entity")]
        Memberships,
    }

    impl Related<super::college::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::College.def()
        }
    }

    impl Related<super::org_member::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Memberships.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Organization membership entity module.
pub mod org_member {
    use chrono::{DateTime, NaiveDate, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    /// `student_id` here references `students.id`, not the business key.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "org_members")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub student_id: Uuid,
        pub organization_id: Uuid,
        pub date_joined: NaiveDate,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::student::Entity",
            from = "Column::StudentId",
            to = "super::student::Column::Id"
        )]
        Student,
        #[sea_orm(
            belongs_to = "super::organization::Entity",
            from = "Column::OrganizationId",
            to = "super::organization::Column::Id"
        )]
        Organization,
    }

    impl Related<super::student::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Student.def()
        }
    }

    impl Related<super::organization::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Organization.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
