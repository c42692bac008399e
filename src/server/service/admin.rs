use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserRole,
    server::{
        data::{
            booking::BookingRepository, business::BusinessRepository,
            offering::OfferingRepository, pet::PetRepository,
            refresh_token::RefreshTokenRepository, user::UserRepository,
        },
        error::{validation::ValidationError, AppError},
        model::{
            admin::PlatformStats,
            business::Business,
            user::{CreateUserParams, User, UserFilter, MIN_PASSWORD_LENGTH},
        },
        service::password::hash_password,
        util::pagination::{Page, PageRequest},
    },
};

/// Platform administration. Callers are checked for the admin role by the guard.
pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Collects dashboard counters.
    pub async fn stats(&self) -> Result<PlatformStats, AppError> {
        let businesses = BusinessRepository::new(self.db);
        let bookings = BookingRepository::new(self.db);

        Ok(PlatformStats {
            users_by_role: UserRepository::new(self.db).count_by_role().await?,
            active_pets: PetRepository::new(self.db).count_active().await?,
            businesses: businesses.count(false).await?,
            verified_businesses: businesses.count(true).await?,
            active_services: OfferingRepository::new(self.db).count_active().await?,
            bookings_by_status: bookings.count_by_status().await?,
            revenue: bookings.paid_revenue().await?,
        })
    }

    pub async fn get_users(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Page::new(users, total, page))
    }

    /// Activates or deactivates an account.
    ///
    /// Deactivation signs the user out everywhere. Admins cannot deactivate themselves.
    pub async fn set_user_status(
        &self,
        admin: &User,
        user_id: i32,
        is_active: bool,
    ) -> Result<User, AppError> {
        if admin.id == user_id && !is_active {
            return Err(
                ValidationError::field("is_active", "You cannot deactivate your own account")
                    .into(),
            );
        }

        let user = UserRepository::new(self.db)
            .set_active(user_id, is_active)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        if !is_active {
            RefreshTokenRepository::new(self.db)
                .delete_all_for_user(user_id)
                .await?;
        }

        tracing::info!(
            "Admin {} set user {} active={}",
            admin.id,
            user_id,
            is_active
        );

        Ok(user)
    }

    pub async fn set_user_role(
        &self,
        admin: &User,
        user_id: i32,
        role: UserRole,
    ) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        tracing::info!(
            "Admin {} set role of user {} to {}",
            admin.id,
            user_id,
            role.as_str()
        );

        Ok(user)
    }

    pub async fn verify_business(
        &self,
        admin: &User,
        business_id: i32,
        is_verified: bool,
    ) -> Result<Business, AppError> {
        let business = BusinessRepository::new(self.db)
            .set_verified(business_id, is_verified)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business {} not found", business_id)))?;

        tracing::info!(
            "Admin {} set business {} verified={}",
            admin.id,
            business_id,
            is_verified
        );

        Ok(business)
    }

    /// Creates the first admin account when none exists.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Admin created
    /// - `Ok(None)` - An active admin already exists, or no credentials were given
    pub async fn bootstrap_admin(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let users = UserRepository::new(self.db);
        if users.admin_exists().await? {
            return Ok(None);
        }

        let (Some(email), Some(password)) = (email, password) else {
            tracing::warn!(
                "No admin account exists; set ADMIN_EMAIL and ADMIN_PASSWORD to create one"
            );
            return Ok(None);
        };

        let email = email.trim().to_lowercase();
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::field(
                "ADMIN_PASSWORD",
                "Password must be at least 8 characters",
            )
            .into());
        }
        if users.email_exists(&email).await? {
            tracing::warn!(
                "Cannot create admin: {} is already registered with another role",
                email
            );
            return Ok(None);
        }

        let admin = users
            .create(CreateUserParams {
                email,
                password_hash: hash_password(password)?,
                first_name: "Platform".to_string(),
                last_name: "Admin".to_string(),
                phone: None,
                role: UserRole::Admin,
            })
            .await?;

        tracing::info!("Created admin account {} ({})", admin.id, admin.email);

        Ok(Some(admin))
    }
}

fn user_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}
