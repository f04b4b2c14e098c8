use crate::entities::{course_sections, courses, professors, users};
use crate::error::{RegistrarError, ValidationError};
use chrono::Utc;
use futures::future::try_join;
use log::info;
use models::schedule::MeetingPattern;
use models::status::SectionStatus;
use models::term::Term;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    TransactionTrait,
};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i16,
    pub prerequisites: Vec<String>,
    pub default_capacity: i32,
}

/// Admin edit of a catalog entry; `None` fields are left alone
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i16>,
    pub prerequisites: Option<Vec<String>>,
    pub default_capacity: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewSection {
    pub course_id: Uuid,
    pub professor_id: Uuid,
    pub section_number: String,
    pub semester: String,
    pub year: i16,
    pub schedule: String,
    pub room: String,
    /// Defaults to the course's capacity when absent
    pub capacity: Option<i32>,
}

/// A section joined with its course and teaching professor
#[derive(Debug, Clone)]
pub struct SectionDetail {
    pub section: course_sections::Model,
    pub course: courses::Model,
    pub professor: users::Model,
}

/// Decodes the stored JSON prerequisite list. Anything other than an
/// array of strings decodes to no prerequisites.
pub(crate) fn prereq_codes(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn prereqs_to_json(codes: Vec<String>) -> Value {
    Value::Array(codes.into_iter().map(Value::String).collect())
}

pub struct CatalogService;

impl CatalogService {
    pub async fn create_course(
        db: &DatabaseConnection,
        new: NewCourse,
    ) -> Result<Uuid, RegistrarError> {
        let duplicate = courses::Entity::find()
            .filter(courses::Column::Code.eq(&new.code))
            .one(db)
            .await?;
        if duplicate.is_some() {
            return Err(ValidationError::DuplicateCourse.into());
        }

        let course_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        courses::Entity::insert(courses::ActiveModel {
            id: Set(course_id),
            code: Set(new.code.clone()),
            title: Set(new.title),
            description: Set(new.description),
            credits: Set(new.credits),
            prerequisites: Set(prereqs_to_json(new.prerequisites)),
            default_capacity: Set(new.default_capacity),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(db)
        .await?;

        info!("created course {}", new.code);
        Ok(course_id)
    }

    pub async fn update_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        update: CourseUpdate,
    ) -> Result<(), RegistrarError> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(ValidationError::CourseNotFound)?;

        let mut edited: courses::ActiveModel = course.into();
        if let Some(title) = update.title {
            edited.title = Set(title);
        }
        if let Some(description) = update.description {
            edited.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            edited.credits = Set(credits);
        }
        if let Some(prerequisites) = update.prerequisites {
            edited.prerequisites = Set(prereqs_to_json(prerequisites));
        }
        if let Some(default_capacity) = update.default_capacity {
            edited.default_capacity = Set(default_capacity);
        }
        edited.updated_at = Set(Utc::now().naive_utc());
        courses::Entity::update(edited).exec(db).await?;

        Ok(())
    }

    pub async fn get_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<courses::Model, RegistrarError> {
        courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| ValidationError::CourseNotFound.into())
    }

    /// Catalog listing with pagination and optional filters
    pub async fn list_courses(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        search: Option<String>,
        credits: Option<Vec<i16>>,
    ) -> Result<(Vec<courses::Model>, u64), RegistrarError> {
        let mut condition = Condition::all();

        if let Some(search) = search {
            condition = condition.add(
                Condition::any()
                    .add(courses::Column::Code.like(format!("%{search}%")))
                    .add(courses::Column::Title.like(format!("%{search}%")))
                    .add(courses::Column::Description.like(format!("%{search}%"))),
            );
        }

        if let Some(credits) = credits
            && !credits.is_empty()
        {
            condition = condition.add(courses::Column::Credits.is_in(credits));
        }

        let query = courses::Entity::find().filter(condition);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let page_items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((page_items, total_items))
    }

    /// Schedules a section of a course for a term. The meeting schedule
    /// must parse so the conflict rule can work with it later.
    pub async fn create_section(
        db: &DatabaseConnection,
        new: NewSection,
    ) -> Result<Uuid, RegistrarError> {
        new.schedule
            .parse::<MeetingPattern>()
            .map_err(|e| ValidationError::InvalidSchedule(e.to_string()))?;

        let txn = db.begin().await?;

        let course = courses::Entity::find_by_id(new.course_id)
            .one(&txn)
            .await?
            .ok_or(ValidationError::CourseNotFound)?;

        professors::Entity::find_by_id(new.professor_id)
            .one(&txn)
            .await?
            .ok_or(ValidationError::ProfessorNotFound)?;

        let duplicate = course_sections::Entity::find()
            .filter(course_sections::Column::CourseId.eq(new.course_id))
            .filter(course_sections::Column::SectionNumber.eq(&new.section_number))
            .filter(course_sections::Column::Semester.eq(&new.semester))
            .filter(course_sections::Column::Year.eq(new.year))
            .one(&txn)
            .await?;
        if duplicate.is_some() {
            return Err(ValidationError::DuplicateSection.into());
        }

        let section_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        course_sections::Entity::insert(course_sections::ActiveModel {
            id: Set(section_id),
            course_id: Set(new.course_id),
            professor_id: Set(new.professor_id),
            section_number: Set(new.section_number),
            semester: Set(new.semester),
            year: Set(new.year),
            schedule: Set(new.schedule),
            room: Set(new.room),
            max_capacity: Set(new.capacity.unwrap_or(course.default_capacity)),
            current_enrollment: Set(0),
            status: Set(SectionStatus::Open.to_string()),
            grades_submitted: Set(false),
            semester_ended: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("created section {section_id} of course {}", course.code);
        Ok(section_id)
    }

    pub async fn get_section_detail(
        db: &DatabaseConnection,
        section_id: Uuid,
    ) -> Result<SectionDetail, RegistrarError> {
        let section = course_sections::Entity::find_by_id(section_id)
            .one(db)
            .await?
            .ok_or(ValidationError::SectionNotFound)?;

        let (course, professor) = try_join(
            courses::Entity::find_by_id(section.course_id).one(db),
            users::Entity::find_by_id(section.professor_id).one(db),
        )
        .await?;

        Ok(SectionDetail {
            section,
            course: course.ok_or(ValidationError::CourseNotFound)?,
            professor: professor.ok_or(ValidationError::ProfessorNotFound)?,
        })
    }

    pub async fn list_sections(
        db: &DatabaseConnection,
        semester: Option<String>,
        year: Option<i16>,
        course_id: Option<Uuid>,
    ) -> Result<Vec<course_sections::Model>, RegistrarError> {
        let mut condition = Condition::all();
        if let Some(semester) = semester {
            condition = condition.add(course_sections::Column::Semester.eq(semester));
        }
        if let Some(year) = year {
            condition = condition.add(course_sections::Column::Year.eq(year));
        }
        if let Some(course_id) = course_id {
            condition = condition.add(course_sections::Column::CourseId.eq(course_id));
        }

        Ok(course_sections::Entity::find()
            .filter(condition)
            .all(db)
            .await?)
    }

    pub async fn set_section_status(
        db: &DatabaseConnection,
        section_id: Uuid,
        status: SectionStatus,
    ) -> Result<(), RegistrarError> {
        let section = course_sections::Entity::find_by_id(section_id)
            .one(db)
            .await?
            .ok_or(ValidationError::SectionNotFound)?;

        let mut edited: course_sections::ActiveModel = section.into();
        edited.status = Set(status.to_string());
        edited.updated_at = Set(Utc::now().naive_utc());
        course_sections::Entity::update(edited).exec(db).await?;

        Ok(())
    }

    /// Marks every section of the term as ended. From then on students
    /// cannot disenroll and professors cannot post grades; admins keep
    /// their override. Returns how many sections were flipped.
    pub async fn end_term(db: &DatabaseConnection, term: &Term) -> Result<u64, RegistrarError> {
        let result = course_sections::Entity::update_many()
            .col_expr(course_sections::Column::SemesterEnded, Expr::value(true))
            .col_expr(
                course_sections::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(course_sections::Column::Semester.eq(&term.semester))
            .filter(course_sections::Column::Year.eq(term.year))
            .exec(db)
            .await?;

        info!("ended term {term}: {} sections closed out", result.rows_affected);
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prereq_codes_round_trip() {
        let json = prereqs_to_json(vec!["CS101".to_string(), "MATH201".to_string()]);
        assert_eq!(prereq_codes(&json), vec!["CS101", "MATH201"]);
    }

    #[test]
    fn malformed_prereq_json_means_no_prereqs() {
        assert!(prereq_codes(&json!("CS101")).is_empty());
        assert!(prereq_codes(&json!({"code": "CS101"})).is_empty());
        // Non-string members are skipped, not errors.
        assert_eq!(prereq_codes(&json!(["CS101", 42])), vec!["CS101"]);
    }
}
