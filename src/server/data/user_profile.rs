use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::user::{UpdateProfileParams, UserProfile};

pub struct UserProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserProfileRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<UserProfile>, DbErr> {
        Ok(self
            .find_entity(user_id)
            .await?
            .map(UserProfile::from_entity))
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(Some(UserProfile))` - Updated profile
    /// - `Ok(None)` - User has no profile row
    pub async fn update(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<Option<UserProfile>, DbErr> {
        let Some(entity) = self.find_entity(user_id).await? else {
            return Ok(None);
        };

        let mut active: entity::user_profile::ActiveModel = entity.into();
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(date_of_birth) = params.date_of_birth {
            active.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(street) = params.street {
            active.street = ActiveValue::Set(Some(street));
        }
        if let Some(city) = params.city {
            active.city = ActiveValue::Set(Some(city));
        }
        if let Some(state) = params.state {
            active.state = ActiveValue::Set(Some(state));
        }
        if let Some(zip_code) = params.zip_code {
            active.zip_code = ActiveValue::Set(Some(zip_code));
        }
        if let Some(country) = params.country {
            active.country = ActiveValue::Set(Some(country));
        }
        if let Some(name) = params.emergency_contact_name {
            active.emergency_contact_name = ActiveValue::Set(Some(name));
        }
        if let Some(phone) = params.emergency_contact_phone {
            active.emergency_contact_phone = ActiveValue::Set(Some(phone));
        }
        if let Some(flag) = params.email_notifications {
            active.email_notifications = ActiveValue::Set(flag);
        }
        if let Some(flag) = params.sms_notifications {
            active.sms_notifications = ActiveValue::Set(flag);
        }
        if let Some(flag) = params.push_notifications {
            active.push_notifications = ActiveValue::Set(flag);
        }
        if let Some(language) = params.preferred_language {
            active.preferred_language = ActiveValue::Set(language);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(UserProfile::from_entity(active.update(self.db).await?)))
    }

    /// Records the storage path of the current profile picture.
    pub async fn set_picture_path(&self, user_id: i32, path: Option<String>) -> Result<(), DbErr> {
        if let Some(entity) = self.find_entity(user_id).await? {
            let mut active: entity::user_profile::ActiveModel = entity.into();
            active.profile_picture_path = ActiveValue::Set(path);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(self.db).await?;
        }

        Ok(())
    }

    async fn find_entity(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user_profile::Model>, DbErr> {
        entity::prelude::UserProfile::find()
            .filter(entity::user_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }
}
