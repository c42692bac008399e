//! Storage of issued refresh token ids.
//!
//! Only the token id (`jti`) is stored. A refresh token is honoured while its id is
//! present and unexpired; rotation deletes the id so each token works once.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct RefreshTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RefreshTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores the id of a newly issued refresh token.
    pub async fn create(
        &self,
        user_id: i32,
        jti: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::refresh_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            jti: ActiveValue::Set(jti),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Deletes an unexpired token id belonging to the user.
    ///
    /// The single conditional delete makes rotation race-free: of two concurrent
    /// refreshes with the same token only one sees a deleted row.
    ///
    /// # Returns
    /// - `Ok(true)` - The id was valid and is now consumed
    /// - `Ok(false)` - Unknown, expired, already used, or owned by another user
    pub async fn consume(&self, user_id: i32, jti: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(entity::refresh_token::Column::Jti.eq(jti))
            .filter(entity::refresh_token::Column::UserId.eq(user_id))
            .filter(entity::refresh_token::Column::ExpiresAt.gt(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deletes a token id, used on logout.
    pub async fn delete(&self, jti: &str) -> Result<(), DbErr> {
        entity::prelude::RefreshToken::delete_many()
            .filter(entity::refresh_token::Column::Jti.eq(jti))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Revokes every refresh token of a user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of revoked tokens
    pub async fn delete_all_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(entity::refresh_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Removes expired token ids of a user; done whenever a new one is stored.
    pub async fn delete_expired_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(entity::refresh_token::Column::UserId.eq(user_id))
            .filter(entity::refresh_token::Column::ExpiresAt.lte(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
