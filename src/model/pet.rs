use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Hamster,
    Fish,
    Reptile,
    Other,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Bird => "bird",
            Self::Rabbit => "rabbit",
            Self::Hamster => "hamster",
            Self::Fish => "fish",
            Self::Reptile => "reptile",
            Self::Other => "other",
        }
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            "bird" => Ok(Self::Bird),
            "rabbit" => Ok(Self::Rabbit),
            "hamster" => Ok(Self::Hamster),
            "fish" => Ok(Self::Fish),
            "reptile" => Ok(Self::Reptile),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown species '{}'", other)),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VaccinationDto {
    pub name: String,
    pub administered_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
    pub veterinarian: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MedicalRecordDto {
    pub condition: String,
    pub diagnosed_on: Option<NaiveDate>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub special_needs: Option<String>,
    pub medical_history: Vec<MedicalRecordDto>,
    pub vaccinations: Vec<VaccinationDto>,
    pub is_active: bool,
    /// Profile image URL; only resolved on single-pet reads.
    pub profile_image_url: Option<String>,
    /// Additional image URLs; only resolved on single-pet reads.
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePetDto {
    /// Owner of the pet; honoured only for admins.
    pub owner_id: Option<i32>,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub special_needs: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<MedicalRecordDto>,
    #[serde(default)]
    pub vaccinations: Vec<VaccinationDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePetDto {
    pub name: Option<String>,
    pub species: Option<Species>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub special_needs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedPetsDto {
    pub items: Vec<PetDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
