use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        file::{EntityType, FileCategory},
        user::{UpdateProfileDto, UpdateUserDto, UserProfileDto},
    },
    server::{
        data::{
            refresh_token::RefreshTokenRepository, user::UserRepository,
            user_profile::UserProfileRepository,
        },
        error::AppError,
        model::user::{UpdateProfileParams, UpdateUserParams, User, UserAccount, UserProfile},
        service::{file::constraint::bucket_for, storage::ObjectStorage},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn ObjectStorage,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn ObjectStorage) -> Self {
        Self { db, storage }
    }

    /// Gets a user with their profile.
    ///
    /// # Access Control
    /// - The user themselves or an admin
    ///
    /// # Returns
    /// - `Ok(UserAccount)` - User with profile and picture URL
    /// - `Err(AppError::Forbidden)` - Caller is neither the user nor an admin
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn get_account(&self, caller: &User, user_id: i32) -> Result<UserAccount, AppError> {
        if !caller.owns_or_admin(user_id) {
            return Err(AppError::Forbidden(
                "You may only view your own account".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let profile = UserProfileRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?;
        let profile_picture_url = profile.as_ref().and_then(|p| self.picture_url(p));

        Ok(UserAccount {
            user,
            profile,
            profile_picture_url,
        })
    }

    pub async fn update(&self, user_id: i32, dto: UpdateUserDto) -> Result<User, AppError> {
        let params = UpdateUserParams::from_dto(dto)?;

        UserRepository::new(self.db)
            .update(user_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    pub async fn get_profile(&self, user_id: i32) -> Result<UserProfileDto, AppError> {
        let profile = UserProfileRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let url = self.picture_url(&profile);
        Ok(profile.into_dto(url))
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        dto: UpdateProfileDto,
    ) -> Result<UserProfileDto, AppError> {
        let params = UpdateProfileParams::from_dto(dto, Utc::now().date_naive())?;

        let profile = UserProfileRepository::new(self.db)
            .update(user_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let url = self.picture_url(&profile);
        Ok(profile.into_dto(url))
    }

    /// Deactivates the caller's own account and signs it out everywhere.
    pub async fn deactivate_self(&self, user: &User) -> Result<(), AppError> {
        UserRepository::new(self.db)
            .set_active(user.id, false)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

        RefreshTokenRepository::new(self.db)
            .delete_all_for_user(user.id)
            .await?;

        tracing::info!("User {} deactivated their account", user.id);

        Ok(())
    }

    fn picture_url(&self, profile: &UserProfile) -> Option<String> {
        profile.profile_picture_path.as_deref().map(|path| {
            self.storage
                .public_url(bucket_for(EntityType::User, FileCategory::Profile), path)
        })
    }
}
