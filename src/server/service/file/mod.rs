//! File attachments for pets, businesses, users and services.
//!
//! Files are kept in object storage only; the database stores nothing about them except
//! the current user profile picture path. A file is addressed by its entity, category and
//! generated file name, see [`path`] for the layout.

pub mod constraint;
pub mod path;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::file::{EntityType, FileCategory},
    server::{
        data::{
            business::BusinessRepository, offering::OfferingRepository, pet::PetRepository,
            user::UserRepository, user_profile::UserProfileRepository,
        },
        error::{file::FileError, AppError},
        model::{
            file::{CategoryFiles, EntityImages, FileTarget, StoredFile, UploadedFile},
            user::User,
        },
        service::storage::{ObjectStorage, StoredObject},
    },
};

use self::constraint::{
    bucket_for, categories_for, constraint_for, extensions_for, gallery_category, is_private,
    is_single_slot, normalize_content_type, primary_category, validate_upload,
};

/// Signed URL lifetime used unless configured otherwise.
pub const DEFAULT_SIGNED_URL_TTL: u64 = 3600;

pub struct FileService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn ObjectStorage,
    signed_url_ttl: u64,
}

impl<'a> FileService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn ObjectStorage) -> Self {
        Self {
            db,
            storage,
            signed_url_ttl: DEFAULT_SIGNED_URL_TTL,
        }
    }

    /// Sets how long signed document URLs stay valid, in seconds.
    pub fn with_signed_url_ttl(mut self, seconds: u64) -> Self {
        self.signed_url_ttl = seconds;
        self
    }

    /// Finds the owner of an entity files are attached to.
    ///
    /// A service is owned by the owner of its business.
    ///
    /// # Returns
    /// - `Ok(FileTarget)` - Entity exists and is active
    /// - `Err(AppError::NotFound)` - Entity missing or deleted
    pub async fn resolve_target(
        &self,
        entity_type: EntityType,
        entity_id: i32,
    ) -> Result<FileTarget, AppError> {
        let owner_id = match entity_type {
            EntityType::Pet => PetRepository::new(self.db)
                .find_active_by_id(entity_id)
                .await?
                .map(|pet| pet.owner_id),
            EntityType::Business => BusinessRepository::new(self.db)
                .find_active_by_id(entity_id)
                .await?
                .map(|business| business.owner_id),
            EntityType::User => UserRepository::new(self.db)
                .find_by_id(entity_id)
                .await?
                .map(|user| user.id),
            EntityType::Service => {
                match OfferingRepository::new(self.db)
                    .find_active_by_id(entity_id)
                    .await?
                {
                    Some(offering) => {
                        BusinessRepository::new(self.db)
                            .find_owner_id(offering.business_id)
                            .await?
                    }
                    None => None,
                }
            }
        };

        let owner_id = owner_id
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", entity_type, entity_id)))?;

        Ok(FileTarget {
            entity_type,
            entity_id,
            owner_id,
        })
    }

    /// Validates and stores uploaded files.
    ///
    /// Every file is validated before any is stored. Uploading to a single-slot category
    /// (`profile`, `logo`) removes the files it replaces, and a user profile upload becomes
    /// the profile picture.
    ///
    /// # Access Control
    /// - Owner of the entity or admin
    ///
    /// # Returns
    /// - `Ok(Vec<StoredFile>)` - Stored files in upload order
    /// - `Err(AppError::NotFound)` - Entity missing or deleted
    /// - `Err(AppError::Forbidden)` - Caller does not own the entity
    /// - `Err(AppError::FileErr)` - A file was rejected
    /// - `Err(AppError::StorageErr)` - Storage request failed
    pub async fn upload(
        &self,
        user: &User,
        entity_type: EntityType,
        entity_id: i32,
        category: FileCategory,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<StoredFile>, AppError> {
        let target = self.resolve_target(entity_type, entity_id).await?;
        if !user.owns_or_admin(target.owner_id) {
            return Err(AppError::Forbidden(format!(
                "You may not upload files to {} {}",
                entity_type, entity_id
            )));
        }

        let files: Vec<UploadedFile> = files
            .into_iter()
            .map(|mut file| {
                file.content_type = normalize_content_type(&file.content_type);
                file
            })
            .collect();
        validate_upload(entity_type, category, &files)?;

        let bucket = bucket_for(entity_type, category);
        let folder = path::folder(&target, category);

        let replaced = if is_single_slot(category) {
            self.storage
                .list(bucket, &folder)
                .await?
                .into_iter()
                .map(|object| path::object_path(&folder, &object.name))
                .collect()
        } else {
            Vec::new()
        };

        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            let extension = extensions_for(&file.content_type)
                .first()
                .copied()
                .unwrap_or("bin");
            let file_name = path::generate_file_name(extension, Utc::now());
            let object_path = path::object_path(&folder, &file_name);
            let size = file.bytes.len() as u64;

            self.storage
                .upload(bucket, &object_path, file.bytes, &file.content_type)
                .await?;

            stored.push(StoredFile {
                url: self.url_for(bucket, &object_path, category).await?,
                file_name,
                category,
                bucket: bucket.to_string(),
                path: object_path,
                size: Some(size),
                content_type: Some(file.content_type),
            });
        }

        if !replaced.is_empty() {
            if let Err(e) = self.storage.remove(bucket, &replaced).await {
                tracing::warn!("Failed to remove replaced files in {}: {}", folder, e);
            }
        }

        if entity_type == EntityType::User && category == FileCategory::Profile {
            if let Some(file) = stored.first() {
                UserProfileRepository::new(self.db)
                    .set_picture_path(target.entity_id, Some(file.path.clone()))
                    .await?;
            }
        }

        tracing::info!(
            "User {} uploaded {} file(s) to {}",
            user.id,
            stored.len(),
            folder
        );

        Ok(stored)
    }

    /// Lists an entity's files grouped by category, newest first.
    ///
    /// # Access Control
    /// - Any authenticated user sees image categories
    /// - Only the owner or an admin sees documents
    pub async fn list(
        &self,
        user: &User,
        entity_type: EntityType,
        entity_id: i32,
    ) -> Result<Vec<CategoryFiles>, AppError> {
        let target = self.resolve_target(entity_type, entity_id).await?;
        let can_see_private = user.owns_or_admin(target.owner_id);

        let mut groups = Vec::new();
        for category in categories_for(entity_type) {
            if is_private(category) && !can_see_private {
                continue;
            }

            let bucket = bucket_for(entity_type, category);
            let folder = path::folder(&target, category);

            let mut files = Vec::new();
            for object in self.storage.list(bucket, &folder).await? {
                files.push(self.stored_file(bucket, &folder, category, object).await?);
            }

            groups.push(CategoryFiles { category, files });
        }

        Ok(groups)
    }

    /// Deletes one file.
    ///
    /// Deleting the current user profile picture clears it from the profile.
    ///
    /// # Access Control
    /// - Owner of the entity or admin
    ///
    /// # Returns
    /// - `Ok(())` - File removed
    /// - `Err(AppError::NotFound)` - Entity or file missing
    /// - `Err(AppError::Forbidden)` - Caller does not own the entity
    pub async fn delete(
        &self,
        user: &User,
        entity_type: EntityType,
        entity_id: i32,
        category: FileCategory,
        file_name: &str,
    ) -> Result<(), AppError> {
        check_reference(entity_type, category, file_name)?;

        let target = self.resolve_target(entity_type, entity_id).await?;
        if !user.owns_or_admin(target.owner_id) {
            return Err(AppError::Forbidden(format!(
                "You may not delete files of {} {}",
                entity_type, entity_id
            )));
        }

        let bucket = bucket_for(entity_type, category);
        let object_path = self.find_object(&target, category, file_name).await?;

        self.storage
            .remove(bucket, std::slice::from_ref(&object_path))
            .await?;

        if entity_type == EntityType::User && category == FileCategory::Profile {
            let profiles = UserProfileRepository::new(self.db);
            let current = profiles
                .find_by_user_id(target.entity_id)
                .await?
                .and_then(|profile| profile.profile_picture_path);
            if current.as_deref() == Some(object_path.as_str()) {
                profiles.set_picture_path(target.entity_id, None).await?;
            }
        }

        tracing::info!("User {} deleted file {}", user.id, object_path);

        Ok(())
    }

    /// Gets a URL for one file: signed for documents, public otherwise.
    ///
    /// # Access Control
    /// - Documents: owner of the entity or admin
    /// - Images: any authenticated user
    ///
    /// # Returns
    /// - `Ok((url, Some(ttl)))` - Signed URL and its lifetime in seconds
    /// - `Ok((url, None))` - Public URL
    pub async fn file_url(
        &self,
        user: &User,
        entity_type: EntityType,
        entity_id: i32,
        category: FileCategory,
        file_name: &str,
    ) -> Result<(String, Option<u64>), AppError> {
        check_reference(entity_type, category, file_name)?;

        let target = self.resolve_target(entity_type, entity_id).await?;
        if is_private(category) && !user.owns_or_admin(target.owner_id) {
            return Err(AppError::Forbidden(
                "Only the owner may access documents".to_string(),
            ));
        }

        let bucket = bucket_for(entity_type, category);
        let object_path = self.find_object(&target, category, file_name).await?;
        let url = self.url_for(bucket, &object_path, category).await?;

        let expires_in = is_private(category).then_some(self.signed_url_ttl);

        Ok((url, expires_in))
    }

    /// Collects the primary and gallery image URLs of an entity.
    ///
    /// Storage failures are logged and yield no images, so entity reads keep working
    /// while storage is unavailable.
    pub async fn entity_images(&self, target: &FileTarget) -> EntityImages {
        match self.try_entity_images(target).await {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!(
                    "Failed to load images for {} {}: {}",
                    target.entity_type,
                    target.entity_id,
                    e
                );
                EntityImages::default()
            }
        }
    }

    /// Public URL of a stored user profile picture path.
    pub fn profile_picture_url(&self, path: &str) -> String {
        self.storage.public_url(
            bucket_for(EntityType::User, FileCategory::Profile),
            path,
        )
    }

    async fn try_entity_images(&self, target: &FileTarget) -> Result<EntityImages, AppError> {
        let mut images = EntityImages::default();

        if let Some(category) = primary_category(target.entity_type) {
            images.primary = self.image_urls(target, category).await?.into_iter().next();
        }
        if let Some(category) = gallery_category(target.entity_type) {
            images.gallery = self.image_urls(target, category).await?;
        }

        Ok(images)
    }

    async fn image_urls(
        &self,
        target: &FileTarget,
        category: FileCategory,
    ) -> Result<Vec<String>, AppError> {
        let bucket = bucket_for(target.entity_type, category);
        let folder = path::folder(target, category);

        Ok(self
            .storage
            .list(bucket, &folder)
            .await?
            .into_iter()
            .map(|object| {
                self.storage
                    .public_url(bucket, &path::object_path(&folder, &object.name))
            })
            .collect())
    }

    async fn find_object(
        &self,
        target: &FileTarget,
        category: FileCategory,
        file_name: &str,
    ) -> Result<String, AppError> {
        let bucket = bucket_for(target.entity_type, category);
        let folder = path::folder(target, category);

        let exists = self
            .storage
            .list(bucket, &folder)
            .await?
            .iter()
            .any(|object| object.name == file_name);

        if !exists {
            return Err(AppError::NotFound(format!("File '{}' not found", file_name)));
        }

        Ok(path::object_path(&folder, file_name))
    }

    async fn stored_file(
        &self,
        bucket: &str,
        folder: &str,
        category: FileCategory,
        object: StoredObject,
    ) -> Result<StoredFile, AppError> {
        let object_path = path::object_path(folder, &object.name);

        Ok(StoredFile {
            url: self.url_for(bucket, &object_path, category).await?,
            file_name: object.name,
            category,
            bucket: bucket.to_string(),
            path: object_path,
            size: object.size,
            content_type: object.content_type,
        })
    }

    async fn url_for(
        &self,
        bucket: &str,
        object_path: &str,
        category: FileCategory,
    ) -> Result<String, AppError> {
        if is_private(category) {
            Ok(self
                .storage
                .signed_url(bucket, object_path, self.signed_url_ttl)
                .await?)
        } else {
            Ok(self.storage.public_url(bucket, object_path))
        }
    }
}

/// Rejects categories the entity type does not accept and unsafe file names.
fn check_reference(
    entity_type: EntityType,
    category: FileCategory,
    file_name: &str,
) -> Result<(), FileError> {
    if constraint_for(entity_type, category).is_none() {
        return Err(FileError::UnsupportedCategory {
            entity_type,
            category,
        });
    }

    path::validate_file_name(file_name)
}
