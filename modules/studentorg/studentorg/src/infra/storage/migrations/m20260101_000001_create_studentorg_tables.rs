//! Initial migration for the records tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Colleges::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Colleges::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Colleges::CollegeName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Colleges::CollegeNameFolded).text().not_null())
                    .col(
                        ColumnDef::new(Colleges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Colleges::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Programs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Programs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Programs::ProgName).string_len(150).not_null())
                    .col(ColumnDef::new(Programs::ProgNameFolded).text().not_null())
                    .col(ColumnDef::new(Programs::CollegeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Programs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Programs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_programs_college")
                            .from(Programs::Table, Programs::CollegeId)
                            .to(Colleges::Table, Colleges::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::StudentId).string_len(15).not_null())
                    .col(ColumnDef::new(Students::Lastname).string_len(25).not_null())
                    .col(ColumnDef::new(Students::Firstname).string_len(25).not_null())
                    .col(ColumnDef::new(Students::Middlename).string_len(25).null())
                    .col(ColumnDef::new(Students::StudentIdFolded).text().not_null())
                    .col(ColumnDef::new(Students::LastnameFolded).text().not_null())
                    .col(ColumnDef::new(Students::FirstnameFolded).text().not_null())
                    .col(ColumnDef::new(Students::MiddlenameFolded).text().null())
                    .col(ColumnDef::new(Students::ProgramId).uuid().not_null())
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_program")
                            .from(Students::Table, Students::ProgramId)
                            .to(Programs::Table, Programs::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_students_student_id")
                    .table(Students::Table)
                    .col(Students::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Name).string_len(250).not_null())
                    .col(
                        ColumnDef::new(Organizations::Description)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Organizations::NameFolded).text().not_null())
                    .col(
                        ColumnDef::new(Organizations::DescriptionFolded)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Organizations::CollegeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organizations_college")
                            .from(Organizations::Table, Organizations::CollegeId)
                            .to(Colleges::Table, Colleges::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrgMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrgMembers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OrgMembers::StudentId).uuid().not_null())
                    .col(ColumnDef::new(OrgMembers::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(OrgMembers::DateJoined).date().not_null())
                    .col(
                        ColumnDef::new(OrgMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrgMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_org_members_student")
                            .from(OrgMembers::Table, OrgMembers::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_org_members_organization")
                            .from(OrgMembers::Table, OrgMembers::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // FK lookups for dependent counts and the dashboard date window
        create_index(manager, "idx_programs_college", Programs::Table, Programs::CollegeId).await?;
        create_index(manager, "idx_students_program", Students::Table, Students::ProgramId).await?;
        create_index(
            manager,
            "idx_organizations_college",
            Organizations::Table,
            Organizations::CollegeId,
        )
        .await?;
        create_index(
            manager,
            "idx_org_members_student",
            OrgMembers::Table,
            OrgMembers::StudentId,
        )
        .await?;
        create_index(
            manager,
            "idx_org_members_organization",
            OrgMembers::Table,
            OrgMembers::OrganizationId,
        )
        .await?;
        create_index(
            manager,
            "idx_org_members_date_joined",
            OrgMembers::Table,
            OrgMembers::DateJoined,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrgMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Colleges::Table).to_owned())
            .await?;

        Ok(())
    }
}

async fn create_index<T, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: T,
    col: C,
) -> Result<(), DbErr>
where
    T: Iden + 'static,
    C: Iden + 'static,
{
    manager
        .create_index(Index::create().name(name).table(table).col(col).to_owned())
        .await
}

#[derive(DeriveIden)]
enum Colleges {
    Table,
    Id,
    CollegeName,
    CollegeNameFolded,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Programs {
    Table,
    Id,
    ProgName,
    ProgNameFolded,
    CollegeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    StudentId,
    Lastname,
    Firstname,
    Middlename,
    StudentIdFolded,
    LastnameFolded,
    FirstnameFolded,
    MiddlenameFolded,
    ProgramId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    Description,
    NameFolded,
    DescriptionFolded,
    CollegeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrgMembers {
    Table,
    Id,
    StudentId,
    OrganizationId,
    DateJoined,
    CreatedAt,
    UpdatedAt,
}
