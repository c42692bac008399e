use std::cmp::Ordering;

use sea_orm::DatabaseConnection;

use crate::{
    model::{
        business::{BusinessDto, CreateBusinessDto, UpdateBusinessDto},
        file::EntityType,
    },
    server::{
        data::{business::BusinessRepository, offering::OfferingRepository},
        error::AppError,
        model::{
            business::{
                Business, BusinessFilter, BusinessMatch, CreateBusinessParams, GeoRadius,
                UpdateBusinessParams,
            },
            file::FileTarget,
            offering::Offering,
            user::User,
        },
        service::{file::FileService, storage::ObjectStorage},
        util::pagination::{Page, PageRequest},
    },
};

const EARTH_RADIUS_KM: f64 = 6371.0;

pub struct BusinessService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn ObjectStorage,
}

impl<'a> BusinessService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn ObjectStorage) -> Self {
        Self { db, storage }
    }

    /// Creates an unverified business owned by the caller.
    pub async fn create(
        &self,
        caller: &User,
        dto: CreateBusinessDto,
    ) -> Result<Business, AppError> {
        let params = CreateBusinessParams::from_dto(caller.id, dto)?;
        let business = BusinessRepository::new(self.db).create(params).await?;

        tracing::info!("User {} created business {}", caller.id, business.id);

        Ok(business)
    }

    /// Public listing of active businesses.
    ///
    /// With a radius filter, only businesses with a location inside the radius are kept and
    /// results are ordered nearest first; otherwise newest first.
    pub async fn search(
        &self,
        filter: BusinessFilter,
        page: PageRequest,
    ) -> Result<Page<BusinessMatch>, AppError> {
        let businesses = BusinessRepository::new(self.db)
            .find_all_active(filter.verified)
            .await?;

        let mut matches: Vec<BusinessMatch> = businesses
            .into_iter()
            .filter(|b| matches_filter(b, &filter))
            .filter_map(|business| match filter.near {
                Some(near) => {
                    let distance = distance_from(&business, &near)?;
                    (distance <= near.radius_km).then_some(BusinessMatch {
                        business,
                        distance_km: Some(distance),
                    })
                }
                None => Some(BusinessMatch {
                    business,
                    distance_km: None,
                }),
            })
            .collect();

        if filter.near.is_some() {
            matches.sort_by(|a, b| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
            });
        }

        Ok(Page::from_vec(matches, page))
    }

    /// The caller's active businesses.
    pub async fn get_mine(
        &self,
        caller: &User,
        page: PageRequest,
    ) -> Result<Page<Business>, AppError> {
        let (businesses, total) = BusinessRepository::new(self.db)
            .get_by_owner_paginated(caller.id, page)
            .await?;

        Ok(Page::new(businesses, total, page))
    }

    /// Gets an active business with its logo and gallery URLs.
    pub async fn get(&self, id: i32) -> Result<BusinessDto, AppError> {
        let business = self.find_active(id).await?;

        let images = FileService::new(self.db, self.storage)
            .entity_images(&FileTarget {
                entity_type: EntityType::Business,
                entity_id: business.id,
                owner_id: business.owner_id,
            })
            .await;

        Ok(business.into_dto(images, None))
    }

    /// Applies a partial update.
    ///
    /// # Access Control
    /// - Owner of the business or admin; only admins may change `is_verified`
    pub async fn update(
        &self,
        caller: &User,
        id: i32,
        dto: UpdateBusinessDto,
    ) -> Result<Business, AppError> {
        self.find_owned(caller, id).await?;

        if dto.is_verified.is_some() && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins may change verification".to_string(),
            ));
        }

        let params = UpdateBusinessParams::from_dto(dto)?;

        BusinessRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| business_not_found(id))
    }

    pub async fn delete(&self, caller: &User, id: i32) -> Result<(), AppError> {
        self.find_owned(caller, id).await?;

        if !BusinessRepository::new(self.db).deactivate(id).await? {
            return Err(business_not_found(id));
        }

        tracing::info!("User {} deleted business {}", caller.id, id);

        Ok(())
    }

    /// Active services of an active business.
    pub async fn get_services(&self, id: i32) -> Result<Vec<Offering>, AppError> {
        self.find_active(id).await?;

        Ok(OfferingRepository::new(self.db)
            .find_active_by_business(id)
            .await?)
    }

    async fn find_active(&self, id: i32) -> Result<Business, AppError> {
        BusinessRepository::new(self.db)
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| business_not_found(id))
    }

    /// Loads an active business the caller owns, or any for admins.
    async fn find_owned(&self, caller: &User, id: i32) -> Result<Business, AppError> {
        let business = self.find_active(id).await?;

        if !caller.owns_or_admin(business.owner_id) {
            return Err(AppError::Forbidden(
                "You may only manage your own businesses".to_string(),
            ));
        }

        Ok(business)
    }
}

fn business_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Business {} not found", id))
}

fn matches_filter(business: &Business, filter: &BusinessFilter) -> bool {
    let city_ok = filter
        .city
        .as_deref()
        .is_none_or(|city| business.address.city.eq_ignore_ascii_case(city.trim()));
    let category_ok = filter
        .category
        .is_none_or(|category| business.categories.contains(&category));
    let search_ok = filter.search.as_deref().is_none_or(|search| {
        business
            .name
            .to_lowercase()
            .contains(&search.trim().to_lowercase())
    });

    city_ok && category_ok && search_ok
}

fn distance_from(business: &Business, near: &GeoRadius) -> Option<f64> {
    let (latitude, longitude) = business.latitude.zip(business.longitude)?;
    Some(haversine_km(near.latitude, near.longitude, latitude, longitude))
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` just above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}
