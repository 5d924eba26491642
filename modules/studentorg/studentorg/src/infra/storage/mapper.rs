//! Conversions between SeaORM models and SDK types.

use sea_orm::ActiveValue::{Set, Unchanged};
use studentorg_sdk::{College, OrgMember, Organization, Program, Student};

use super::entity::{college, org_member, organization, program, student};
use super::search::fold;

impl From<college::Model> for College {
    fn from(m: college::Model) -> Self {
        Self {
            id: m.id,
            college_name: m.college_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<program::Model> for Program {
    fn from(m: program::Model) -> Self {
        Self {
            id: m.id,
            prog_name: m.prog_name,
            college_id: m.college_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<student::Model> for Student {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            lastname: m.lastname,
            firstname: m.firstname,
            middlename: m.middlename,
            program_id: m.program_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<organization::Model> for Organization {
    fn from(m: organization::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            college_id: m.college_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<org_member::Model> for OrgMember {
    fn from(m: org_member::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            organization_id: m.organization_id,
            date_joined: m.date_joined,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// Active models for insert (`id` and `created_at` set) and for a full update
// (`id` and `created_at` unchanged).

pub fn college_insert(c: College) -> college::ActiveModel {
    college::ActiveModel {
        id: Set(c.id),
        college_name_folded: Set(fold(&c.college_name)),
        college_name: Set(c.college_name),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

pub fn college_update(c: College) -> college::ActiveModel {
    college::ActiveModel {
        id: Unchanged(c.id),
        college_name_folded: Set(fold(&c.college_name)),
        college_name: Set(c.college_name),
        created_at: Unchanged(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

pub fn program_insert(p: Program) -> program::ActiveModel {
    program::ActiveModel {
        id: Set(p.id),
        prog_name_folded: Set(fold(&p.prog_name)),
        prog_name: Set(p.prog_name),
        college_id: Set(p.college_id),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

pub fn program_update(p: Program) -> program::ActiveModel {
    program::ActiveModel {
        id: Unchanged(p.id),
        prog_name_folded: Set(fold(&p.prog_name)),
        prog_name: Set(p.prog_name),
        college_id: Set(p.college_id),
        created_at: Unchanged(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

pub fn student_insert(s: Student) -> student::ActiveModel {
    student::ActiveModel {
        id: Set(s.id),
        student_id_folded: Set(fold(&s.student_id)),
        lastname_folded: Set(fold(&s.lastname)),
        firstname_folded: Set(fold(&s.firstname)),
        middlename_folded: Set(s.middlename.as_deref().map(fold)),
        student_id: Set(s.student_id),
        lastname: Set(s.lastname),
        firstname: Set(s.firstname),
        middlename: Set(s.middlename),
        program_id: Set(s.program_id),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

pub fn student_update(s: Student) -> student::ActiveModel {
    student::ActiveModel {
        id: Unchanged(s.id),
        student_id_folded: Set(fold(&s.student_id)),
        lastname_folded: Set(fold(&s.lastname)),
        firstname_folded: Set(fold(&s.firstname)),
        middlename_folded: Set(s.middlename.as_deref().map(fold)),
        student_id: Set(s.student_id),
        lastname: Set(s.lastname),
        firstname: Set(s.firstname),
        middlename: Set(s.middlename),
        program_id: Set(s.program_id),
        created_at: Unchanged(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

pub fn organization_insert(o: Organization) -> organization::ActiveModel {
    organization::ActiveModel {
        id: Set(o.id),
        name_folded: Set(fold(&o.name)),
        description_folded: Set(fold(&o.description)),
        name: Set(o.name),
        description: Set(o.description),
        college_id: Set(o.college_id),
        created_at: Set(o.created_at),
        updated_at: Set(o.updated_at),
    }
}

pub fn organization_update(o: Organization) -> organization::ActiveModel {
    organization::ActiveModel {
        id: Unchanged(o.id),
        name_folded: Set(fold(&o.name)),
        description_folded: Set(fold(&o.description)),
        name: Set(o.name),
        description: Set(o.description),
        college_id: Set(o.college_id),
        created_at: Unchanged(o.created_at),
        updated_at: Set(o.updated_at),
    }
}

pub fn member_insert(m: OrgMember) -> org_member::ActiveModel {
    org_member::ActiveModel {
        id: Set(m.id),
        student_id: Set(m.student_id),
        organization_id: Set(m.organization_id),
        date_joined: Set(m.date_joined),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    }
}

pub fn member_update(m: OrgMember) -> org_member::ActiveModel {
    org_member::ActiveModel {
        id: Unchanged(m.id),
        student_id: Set(m.student_id),
        organization_id: Set(m.organization_id),
        date_joined: Set(m.date_joined),
        created_at: Unchanged(m.created_at),
        updated_at: Set(m.updated_at),
    }
}
