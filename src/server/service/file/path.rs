//! Object path layout.
//!
//! Objects are stored at `{owner_id}/{entity_type}/{entity_id}/{category}/{file_name}`
//! where `file_name` is `{unix_millis}-{random8}.{ext}`. The millisecond prefix makes
//! a descending name sort list the newest files first.

use chrono::{DateTime, Utc};

use crate::{
    model::file::FileCategory,
    server::{
        error::file::FileError, model::file::FileTarget, util::random::generate_random_code,
    },
};

const RANDOM_SUFFIX_LENGTH: usize = 8;

/// Folder holding every file of one category of an entity.
pub fn folder(target: &FileTarget, category: FileCategory) -> String {
    format!(
        "{}/{}/{}/{}",
        target.owner_id,
        target.entity_type.as_str(),
        target.entity_id,
        category.as_str()
    )
}

pub fn object_path(folder: &str, file_name: &str) -> String {
    format!("{}/{}", folder, file_name)
}

/// Generates a stored file name; client-supplied names are never used.
pub fn generate_file_name(extension: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}-{}.{}",
        now.timestamp_millis(),
        generate_random_code(RANDOM_SUFFIX_LENGTH),
        extension
    )
}

/// Rejects file names that could escape their folder.
pub fn validate_file_name(file_name: &str) -> Result<(), FileError> {
    let valid = !file_name.is_empty()
        && !file_name.starts_with('.')
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(FileError::InvalidFileName(file_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::EntityType;
    use chrono::TimeZone;

    #[test]
    fn lays_out_path_by_owner_and_entity() {
        let target = FileTarget {
            entity_type: EntityType::Pet,
            entity_id: 9,
            owner_id: 4,
        };

        assert_eq!(folder(&target, FileCategory::Profile), "4/pet/9/profile");
        assert_eq!(
            object_path("4/pet/9/profile", "1-abc.png"),
            "4/pet/9/profile/1-abc.png"
        );
    }

    #[test]
    fn generates_time_prefixed_name() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let name = generate_file_name("png", now);

        assert!(name.starts_with("1700000000123-"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "1700000000123-".len() + 8 + ".png".len());
    }

    #[test]
    fn rejects_traversal_names() {
        assert!(validate_file_name("1700000000123-abcdefgh.png").is_ok());
        assert!(validate_file_name("../secret.pdf").is_err());
        assert!(validate_file_name("a/b.png").is_err());
        assert!(validate_file_name(".hidden").is_err());
        assert!(validate_file_name("").is_err());
    }
}
