//! Saved address repository.
//!
//! Every write that can move the default flag runs in a transaction so that a user with
//! addresses always has exactly one default: clearing the old default and setting the
//! new one commit together.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::server::model::address::{Address, CreateAddressParams, UpdateAddressParams};

pub struct AddressRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AddressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's addresses, default first, then newest.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<Address>, DbErr> {
        entity::prelude::Address::find()
            .filter(entity::address::Column::UserId.eq(user_id))
            .order_by_desc(entity::address::Column::IsDefault)
            .order_by_desc(entity::address::Column::CreatedAt)
            .order_by_desc(entity::address::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Address::from_entity)
            .collect()
    }

    /// Finds an address only if it belongs to the user.
    pub async fn find_for_user(&self, id: i32, user_id: i32) -> Result<Option<Address>, DbErr> {
        find_entity(self.db, id, user_id)
            .await?
            .map(Address::from_entity)
            .transpose()
    }

    /// Creates an address.
    ///
    /// The first address of a user always becomes the default; otherwise the address
    /// becomes default only when requested, clearing the previous default.
    pub async fn create(&self, params: CreateAddressParams) -> Result<Address, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::Address::find()
            .filter(entity::address::Column::UserId.eq(params.user_id))
            .count(&txn)
            .await?;
        let is_default = params.is_default || existing == 0;

        if is_default {
            clear_default(&txn, params.user_id, None).await?;
        }

        let now = Utc::now();
        let entity = entity::address::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            label: ActiveValue::Set(params.label.as_str().to_string()),
            custom_label: ActiveValue::Set(params.custom_label),
            street: ActiveValue::Set(params.street),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            zip_code: ActiveValue::Set(params.zip_code),
            country: ActiveValue::Set(params.country),
            latitude: ActiveValue::Set(params.latitude),
            longitude: ActiveValue::Set(params.longitude),
            instructions: ActiveValue::Set(params.instructions),
            is_default: ActiveValue::Set(is_default),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Address::from_entity(entity)
    }

    /// Applies a partial update; `make_default` moves the default flag to this address.
    ///
    /// # Returns
    /// - `Ok(Some(Address))` - Updated address
    /// - `Ok(None)` - No such address for this user
    pub async fn update(
        &self,
        id: i32,
        user_id: i32,
        params: UpdateAddressParams,
    ) -> Result<Option<Address>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(entity) = find_entity(&txn, id, user_id).await? else {
            return Ok(None);
        };

        if params.make_default && !entity.is_default {
            clear_default(&txn, user_id, Some(id)).await?;
        }

        let mut active: entity::address::ActiveModel = entity.into();
        if let Some(label) = params.label {
            active.label = ActiveValue::Set(label.as_str().to_string());
        }
        if let Some(custom_label) = params.custom_label {
            active.custom_label = ActiveValue::Set(Some(custom_label));
        }
        if let Some(street) = params.street {
            active.street = ActiveValue::Set(street);
        }
        if let Some(city) = params.city {
            active.city = ActiveValue::Set(city);
        }
        if let Some(state) = params.state {
            active.state = ActiveValue::Set(state);
        }
        if let Some(zip_code) = params.zip_code {
            active.zip_code = ActiveValue::Set(zip_code);
        }
        if let Some(country) = params.country {
            active.country = ActiveValue::Set(country);
        }
        if let (Some(latitude), Some(longitude)) = (params.latitude, params.longitude) {
            active.latitude = ActiveValue::Set(Some(latitude));
            active.longitude = ActiveValue::Set(Some(longitude));
        }
        if let Some(instructions) = params.instructions {
            active.instructions = ActiveValue::Set(Some(instructions));
        }
        if params.make_default {
            active.is_default = ActiveValue::Set(true);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(Address::from_entity(updated)?))
    }

    /// Makes the address the user's default.
    pub async fn set_default(&self, id: i32, user_id: i32) -> Result<Option<Address>, DbErr> {
        self.update(
            id,
            user_id,
            UpdateAddressParams {
                make_default: true,
                ..Default::default()
            },
        )
        .await
    }

    /// Deletes an address, promoting the newest remaining one if it was the default.
    ///
    /// # Returns
    /// - `Ok(true)` - Address deleted
    /// - `Ok(false)` - No such address for this user
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let Some(entity) = find_entity(&txn, id, user_id).await? else {
            return Ok(false);
        };
        let was_default = entity.is_default;

        entity.delete(&txn).await?;

        if was_default {
            let successor = entity::prelude::Address::find()
                .filter(entity::address::Column::UserId.eq(user_id))
                .order_by_desc(entity::address::Column::CreatedAt)
                .order_by_desc(entity::address::Column::Id)
                .one(&txn)
                .await?;

            if let Some(successor) = successor {
                let mut active: entity::address::ActiveModel = successor.into();
                active.is_default = ActiveValue::Set(true);
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;

        Ok(true)
    }
}

async fn find_entity<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    user_id: i32,
) -> Result<Option<entity::address::Model>, DbErr> {
    entity::prelude::Address::find_by_id(id)
        .filter(entity::address::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Clears the default flag on the user's addresses, except `keep`.
async fn clear_default<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    keep: Option<i32>,
) -> Result<(), DbErr> {
    let mut query = entity::prelude::Address::update_many()
        .col_expr(entity::address::Column::IsDefault, Expr::value(false))
        .filter(entity::address::Column::UserId.eq(user_id))
        .filter(entity::address::Column::IsDefault.eq(true));

    if let Some(keep) = keep {
        query = query.filter(entity::address::Column::Id.ne(keep));
    }

    query.exec(conn).await?;

    Ok(())
}
