use crate::{
    model::pet::{Gender, MedicalRecordDto, Species, VaccinationDto},
    server::{
        data::pet::PetRepository,
        model::pet::{CreatePetParams, PetFilter, UpdatePetParams},
        util::pagination::PageRequest,
    },
};
use chrono::NaiveDate;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod deactivate;
mod get_paginated;
mod health_records;

fn create_params(owner_id: i32) -> CreatePetParams {
    CreatePetParams {
        owner_id,
        name: "Biscuit".to_string(),
        species: Species::Dog,
        breed: Some("Beagle".to_string()),
        gender: Gender::Male,
        date_of_birth: NaiveDate::from_ymd_opt(2021, 3, 14),
        weight_kg: Some(11.2),
        color: None,
        microchip_id: None,
        special_needs: None,
        medical_history: Vec::new(),
        vaccinations: Vec::new(),
    }
}
