use crate::server::error::validation::{FieldError, ValidationError};

/// Collects field errors while checking a payload.
///
/// ```rust,ignore
/// let mut v = Validator::new();
/// v.check(!name.trim().is_empty(), "name", "Name is required");
/// v.finish()?;
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
        self
    }

    pub fn required(&mut self, value: &str, field: &str) -> &mut Self {
        self.check(
            !value.trim().is_empty(),
            field,
            &format!("{} is required", field),
        )
    }

    /// Like `required`, but only when the value is present.
    pub fn not_blank(&mut self, value: Option<&str>, field: &str) -> &mut Self {
        match value {
            Some(v) => self.required(v, field),
            None => self,
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Loose structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Accepts `HH:MM` in 24-hour time.
pub fn is_valid_time_of_day(value: &str) -> bool {
    chrono::NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

pub fn is_valid_latitude(value: f64) -> bool {
    (-90.0..=90.0).contains(&value)
}

pub fn is_valid_longitude(value: f64) -> bool {
    (-180.0..=180.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("owner@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("owner.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("owner@localhost"));
        assert!(!is_valid_email("owner@@example.com"));
        assert!(!is_valid_email("own er@example.com"));
    }

    #[test]
    fn validates_time_of_day() {
        assert!(is_valid_time_of_day("09:30"));
        assert!(!is_valid_time_of_day("25:00"));
        assert!(!is_valid_time_of_day("9am"));
    }

    #[test]
    fn collects_every_failing_field() {
        let mut v = Validator::new();
        v.required("", "name").check(false, "price", "Price must be positive");

        let err = v.finish().unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].field, "name");
        assert_eq!(err.errors[1].field, "price");
    }
}
