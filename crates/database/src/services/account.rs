use crate::entities::{professors, students, users};
use crate::error::{RegistrarError, ValidationError};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::Utc;
use log::info;
use models::role::UserRole;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use uuid::Uuid;

/// Identity fields shared by every registration
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub identity: NewIdentity,
    pub student_number: String,
    pub major: String,
    pub year_level: i16,
}

#[derive(Debug, Clone)]
pub struct NewProfessor {
    pub identity: NewIdentity,
    pub employee_number: String,
    pub department: String,
    pub position: String,
}

pub struct AccountService;

impl AccountService {
    /// Creates a student: the user row and the student payload row are
    /// written in the same transaction so no half-registered identity
    /// can exist.
    pub async fn register_student(
        db: &DatabaseConnection,
        new: NewStudent,
    ) -> Result<Uuid, RegistrarError> {
        let txn = db.begin().await?;
        let user_id = Self::insert_user(&txn, &new.identity, UserRole::Student).await?;

        students::Entity::insert(students::ActiveModel {
            user_id: Set(user_id),
            student_number: Set(new.student_number),
            major: Set(new.major),
            year_level: Set(new.year_level),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("registered student {user_id}");
        Ok(user_id)
    }

    pub async fn register_professor(
        db: &DatabaseConnection,
        new: NewProfessor,
    ) -> Result<Uuid, RegistrarError> {
        let txn = db.begin().await?;
        let user_id = Self::insert_user(&txn, &new.identity, UserRole::Professor).await?;

        professors::Entity::insert(professors::ActiveModel {
            user_id: Set(user_id),
            employee_number: Set(new.employee_number),
            department: Set(new.department),
            position: Set(new.position),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("registered professor {user_id}");
        Ok(user_id)
    }

    /// Admins carry no payload row, only the role tag
    pub async fn register_admin(
        db: &DatabaseConnection,
        identity: NewIdentity,
    ) -> Result<Uuid, RegistrarError> {
        let txn = db.begin().await?;
        let user_id = Self::insert_user(&txn, &identity, UserRole::Admin).await?;
        txn.commit().await?;
        info!("registered admin {user_id}");
        Ok(user_id)
    }

    /// Verifies a username/password pair against the stored hash.
    /// The rejection never says which half was wrong.
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<users::Model, RegistrarError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?
            .ok_or(ValidationError::InvalidCredentials)?;

        if !user.active {
            return Err(ValidationError::InvalidCredentials.into());
        }

        Self::verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    pub async fn deactivate(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<(), RegistrarError> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(ValidationError::UserNotFound)?;

        let mut inactive: users::ActiveModel = user.into();
        inactive.active = Set(false);
        inactive.updated_at = Set(Utc::now().naive_utc());
        users::Entity::update(inactive).exec(db).await?;
        Ok(())
    }

    async fn insert_user(
        conn: &impl ConnectionTrait,
        identity: &NewIdentity,
        role: UserRole,
    ) -> Result<Uuid, RegistrarError> {
        let taken = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(&identity.username))
                    .add(users::Column::Email.eq(&identity.email)),
            )
            .one(conn)
            .await?;
        if taken.is_some() {
            return Err(ValidationError::DuplicateUser.into());
        }

        let user_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        users::Entity::insert(users::ActiveModel {
            id: Set(user_id),
            username: Set(identity.username.clone()),
            email: Set(identity.email.clone()),
            first_name: Set(identity.first_name.clone()),
            last_name: Set(identity.last_name.clone()),
            password_hash: Set(Self::hash_password(&identity.password)?),
            role: Set(role.to_string()),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(conn)
        .await?;

        Ok(user_id)
    }

    fn hash_password(password: &str) -> Result<String, RegistrarError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| RegistrarError::PasswordHash(e.to_string()))
    }

    fn verify_password(password: &str, stored: &str) -> Result<(), RegistrarError> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| RegistrarError::PasswordHash(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| RegistrarError::Validation(ValidationError::InvalidCredentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_reject() {
        let hash = AccountService::hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));

        assert!(AccountService::verify_password("correct horse", &hash).is_ok());

        let err = AccountService::verify_password("wrong horse", &hash).unwrap_err();
        assert!(matches!(
            err,
            RegistrarError::Validation(ValidationError::InvalidCredentials)
        ));
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let a = AccountService::hash_password("same input").unwrap();
        let b = AccountService::hash_password("same input").unwrap();
        assert_ne!(a, b);
    }
}
