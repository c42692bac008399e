//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records. It handles
//! registration (user plus empty profile), credential lookups, account updates, admin
//! management queries and role statistics, converting entity models to domain models at
//! the infrastructure boundary.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    model::user::UserRole,
    server::{
        model::{
            parse_column,
            user::{CreateUserParams, UpdateUserParams, User, UserCredentials, UserFilter},
        },
        util::pagination::PageRequest,
    },
};

/// Repository providing database operations for user management.
///
/// This struct holds a reference to the database connection and provides methods
/// for creating, reading, updating, and querying user records.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user together with an empty profile.
    ///
    /// Both rows are inserted in one transaction so an account never exists without
    /// its profile. The email must already be normalized.
    ///
    /// # Arguments
    /// - `params` - User fields with the already hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let user = entity::user::ActiveModel {
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            phone: ActiveValue::Set(params.phone),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            is_active: ActiveValue::Set(true),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        entity::user_profile::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            email_notifications: ActiveValue::Set(true),
            sms_notifications: ActiveValue::Set(false),
            push_notifications: ActiveValue::Set(true),
            preferred_language: ActiveValue::Set("en".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        User::from_entity(user)
    }

    /// Finds a user by id regardless of active state.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Checks whether an account with the normalized email exists.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Finds a user and their password hash by normalized email for login.
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DbErr> {
        let Some(entity) = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let password_hash = entity.password_hash.clone();

        Ok(Some(UserCredentials {
            user: User::from_entity(entity)?,
            password_hash,
        }))
    }

    /// Gets the stored password hash of a user.
    pub async fn find_password_hash(&self, id: i32) -> Result<Option<String>, DbErr> {
        Ok(entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(|u| u.password_hash))
    }

    /// Applies a partial account update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        if let Some(first_name) = params.first_name {
            active.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = params.last_name {
            active.last_name = ActiveValue::Set(last_name);
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(Some(phone).filter(|p| !p.is_empty()));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)?))
    }

    pub async fn update_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Records a successful login.
    pub async fn update_last_login(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::LastLoginAt, Expr::value(Some(Utc::now())))
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Activates or deactivates an account.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)?))
    }

    /// Changes the role of an account.
    pub async fn set_role(&self, id: i32, role: UserRole) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        active.role = ActiveValue::Set(role.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)?))
    }

    /// Checks if any active admin exists.
    ///
    /// Used during startup to decide whether the bootstrap admin must be created.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::Admin.as_str()))
            .filter(entity::user::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets users matching the filter, newest first.
    ///
    /// # Arguments
    /// - `filter` - Optional role, active state and search term
    /// - `page` - Page request (1-based)
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users on the requested page and the total number of matches
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::user::Column::IsActive.eq(is_active));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Email.contains(search.to_lowercase()))
                    .add(entity::user::Column::FirstName.contains(search))
                    .add(entity::user::Column::LastName.contains(search)),
            );
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Counts accounts per role.
    pub async fn count_by_role(&self) -> Result<HashMap<UserRole, u64>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Role)
            .column_as(entity::user::Column::Id.count(), "count")
            .group_by(entity::user::Column::Role)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(role, count)| Ok::<_, DbErr>((parse_column("user.role", &role)?, count as u64)))
            .collect()
    }
}
