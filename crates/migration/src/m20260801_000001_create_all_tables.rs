use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Major).string().not_null())
                    .col(ColumnDef::new(Students::YearLevel).small_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-user_id")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create professors table
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Professors::EmployeeNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professors::Department).string().not_null())
                    .col(ColumnDef::new(Professors::Position).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professors-user_id")
                            .from(Professors::Table, Professors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::Credits).small_integer().not_null())
                    .col(ColumnDef::new(Courses::Prerequisites).json().not_null())
                    .col(
                        ColumnDef::new(Courses::DefaultCapacity)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create course_sections table
        manager
            .create_table(
                Table::create()
                    .table(CourseSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseSections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseSections::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseSections::ProfessorId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseSections::SectionNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseSections::Semester).string().not_null())
                    .col(
                        ColumnDef::new(CourseSections::Year)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseSections::Schedule).string().not_null())
                    .col(ColumnDef::new(CourseSections::Room).string().not_null())
                    .col(
                        ColumnDef::new(CourseSections::MaxCapacity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSections::CurrentEnrollment)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CourseSections::Status).string().not_null())
                    .col(
                        ColumnDef::new(CourseSections::GradesSubmitted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseSections::SemesterEnded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseSections::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSections::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_sections-course_id")
                            .from(CourseSections::Table, CourseSections::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_sections-professor_id")
                            .from(CourseSections::Table, CourseSections::ProfessorId)
                            .to(Professors::Table, Professors::UserId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One section per (course, number, term)
        manager
            .create_index(
                Index::create()
                    .name("idx-course_sections-term-unique")
                    .table(CourseSections::Table)
                    .col(CourseSections::CourseId)
                    .col(CourseSections::SectionNumber)
                    .col(CourseSections::Semester)
                    .col(CourseSections::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create enrollments table
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::SectionId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(ColumnDef::new(Enrollments::Grade).text())
                    .col(ColumnDef::new(Enrollments::GradePoints).float())
                    .col(
                        ColumnDef::new(Enrollments::CanDisenroll)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Enrollments::EnrolledAt).date_time().not_null())
                    .col(ColumnDef::new(Enrollments::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-section_id")
                            .from(Enrollments::Table, Enrollments::SectionId)
                            .to(CourseSections::Table, CourseSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One enrollment row per (student, section); drops revive it
        manager
            .create_index(
                Index::create()
                    .name("idx-enrollments-student-section-unique")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::SectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseSections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    PasswordHash,
    Role,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Students {
    Table,
    UserId,
    StudentNumber,
    Major,
    YearLevel,
}

#[derive(Iden)]
enum Professors {
    Table,
    UserId,
    EmployeeNumber,
    Department,
    Position,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Code,
    Title,
    Description,
    Credits,
    Prerequisites,
    DefaultCapacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CourseSections {
    Table,
    Id,
    CourseId,
    ProfessorId,
    SectionNumber,
    Semester,
    Year,
    Schedule,
    Room,
    MaxCapacity,
    CurrentEnrollment,
    Status,
    GradesSubmitted,
    SemesterEnded,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    SectionId,
    Status,
    Grade,
    GradePoints,
    CanDisenroll,
    EnrolledAt,
    UpdatedAt,
}
