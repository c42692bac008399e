//! Pet factory for creating test pet entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test pets with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let cat = PetFactory::new(&db, owner.id).species("cat").build().await?;
/// ```
pub struct PetFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    species: String,
    breed: Option<String>,
    is_active: bool,
}

impl<'a> PetFactory<'a> {
    /// Creates a new PetFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Pet {id}"`
    /// - species: `"dog"`
    /// - breed: `Some("Mixed")`
    /// - is_active: `true`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `owner_id` - Id of the owning user
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Pet {}", id),
            species: "dog".to_string(),
            breed: Some("Mixed".to_string()),
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the pet entity into the database.
    pub async fn build(self) -> Result<entity::pet::Model, DbErr> {
        let now = Utc::now();
        entity::pet::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            species: ActiveValue::Set(self.species),
            breed: ActiveValue::Set(self.breed),
            gender: ActiveValue::Set("unknown".to_string()),
            date_of_birth: ActiveValue::Set(None),
            weight_kg: ActiveValue::Set(None),
            color: ActiveValue::Set(None),
            microchip_id: ActiveValue::Set(None),
            special_needs: ActiveValue::Set(None),
            medical_history: ActiveValue::Set(serde_json::json!([])),
            vaccinations: ActiveValue::Set(serde_json::json!([])),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active dog for the given owner.
pub async fn create_pet(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::pet::Model, DbErr> {
    PetFactory::new(db, owner_id).build().await
}
