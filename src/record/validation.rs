//! Payload validation at the chain boundary.
//!
//! The chain trusts its input; callers turn loosely-typed drafts into
//! [`Payload`] values here before appending.

use super::{Payload, Quality, Stage};
use crate::error::ValidationError;
use crate::types::SubjectId;
use serde::{Deserialize, Serialize};

const MIN_LOCATION_CHARS: usize = 3;
const MIN_OPERATOR_CHARS: usize = 2;

/// Untyped event fields as collected from a form, a generator or a file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayloadDraft {
    pub subject_id: String,
    pub stage: String,
    pub location: String,
    pub operator: String,
    pub details: String,
    pub quality: String,
    pub batch_size: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub is_automated: bool,
}

/// Validate a draft and build a typed payload.
pub fn validate_payload(draft: &PayloadDraft) -> Result<Payload, ValidationError> {
    let subject_raw = required("subjectId", &draft.subject_id)?;
    let subject_id = SubjectId::parse(subject_raw)
        .ok_or_else(|| ValidationError::InvalidSubjectId(subject_raw.to_string()))?;

    let stage_raw = required("stage", &draft.stage)?;
    let stage = stage_raw
        .parse::<Stage>()
        .ok()
        .filter(|stage| *stage != Stage::System)
        .ok_or_else(|| ValidationError::InvalidStage(stage_raw.to_string()))?;

    let quality_raw = required("quality", &draft.quality)?;
    let quality = quality_raw
        .parse::<Quality>()
        .ok()
        .filter(|quality| *quality != Quality::System)
        .ok_or_else(|| ValidationError::InvalidQuality(quality_raw.to_string()))?;

    let location = required("location", &draft.location)?;
    if location.chars().count() < MIN_LOCATION_CHARS {
        return Err(ValidationError::TooShort {
            field: "location",
            min: MIN_LOCATION_CHARS,
        });
    }

    let operator = required("operator", &draft.operator)?;
    if operator.chars().count() < MIN_OPERATOR_CHARS {
        return Err(ValidationError::TooShort {
            field: "operator",
            min: MIN_OPERATOR_CHARS,
        });
    }

    let batch_size = optional_measurement("batchSize", &draft.batch_size, is_batch_size)?;
    let temperature = optional_measurement("temperature", &draft.temperature, is_temperature)?;
    let humidity = optional_measurement("humidity", &draft.humidity, is_humidity)?;

    Ok(Payload {
        subject_id,
        stage,
        location: location.to_string(),
        operator: operator.to_string(),
        details: draft.details.trim().to_string(),
        quality,
        batch_size,
        temperature,
        humidity,
        is_automated: draft.is_automated,
    })
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

fn optional_measurement(
    field: &'static str,
    value: &Option<String>,
    check: fn(&str) -> bool,
) -> Result<Option<String>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if check(v) => Ok(Some(v.to_string())),
        Some(v) => Err(ValidationError::InvalidMeasurement {
            field,
            value: v.to_string(),
        }),
    }
}

/// Split a leading decimal number (`12` or `12.5`) from its unit suffix.
fn split_number(value: &str) -> Option<&str> {
    let int_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    if int_end == 0 {
        return None;
    }
    let rest = &value[int_end..];
    match rest.strip_prefix('.') {
        Some(fraction) => {
            let frac_end = fraction
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(fraction.len());
            if frac_end == 0 {
                None
            } else {
                Some(&fraction[frac_end..])
            }
        }
        None => Some(rest),
    }
}

/// `120 kg`, `80.5kg`, `90 กก.`
fn is_batch_size(value: &str) -> bool {
    split_number(value)
        .map(|unit| {
            let unit = unit.trim_start().to_lowercase();
            unit == "kg" || unit == "กก" || unit == "กก."
        })
        .unwrap_or(false)
}

/// `25°C`, `25C`, `24.5°c`
fn is_temperature(value: &str) -> bool {
    split_number(value)
        .map(|unit| {
            let unit = unit.to_lowercase();
            unit == "°c" || unit == "c"
        })
        .unwrap_or(false)
}

/// `55%`, `60.5 %`
fn is_humidity(value: &str) -> bool {
    split_number(value)
        .map(|unit| unit.trim_start() == "%")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PayloadDraft {
        PayloadDraft {
            subject_id: "CR001".to_string(),
            stage: "farm".to_string(),
            location: "Doi Chang, Chiang Rai".to_string(),
            operator: "Somchai Jaidee".to_string(),
            details: "  Arabica Catuai  ".to_string(),
            quality: "Premium".to_string(),
            batch_size: Some("120 kg".to_string()),
            temperature: Some("24°C".to_string()),
            humidity: Some("55%".to_string()),
            is_automated: false,
        }
    }

    #[test]
    fn test_valid_draft_builds_payload() {
        let payload = validate_payload(&draft()).unwrap();
        assert_eq!(payload.subject_id.as_str(), "CR001");
        assert_eq!(payload.stage, Stage::Farm);
        assert_eq!(payload.quality, Quality::Premium);
        assert_eq!(payload.details, "Arabica Catuai");
        assert_eq!(payload.batch_size.as_deref(), Some("120 kg"));
    }

    #[test]
    fn test_missing_required_fields() {
        let mut d = draft();
        d.location = "   ".to_string();
        assert_eq!(
            validate_payload(&d).unwrap_err(),
            ValidationError::MissingField("location")
        );

        let mut d = draft();
        d.quality = String::new();
        assert_eq!(
            validate_payload(&d).unwrap_err(),
            ValidationError::MissingField("quality")
        );
    }

    #[test]
    fn test_reserved_sentinels_rejected() {
        let mut d = draft();
        d.subject_id = "GENESIS".to_string();
        assert!(matches!(
            validate_payload(&d),
            Err(ValidationError::InvalidSubjectId(_))
        ));

        let mut d = draft();
        d.stage = "system".to_string();
        assert!(matches!(validate_payload(&d), Err(ValidationError::InvalidStage(_))));

        let mut d = draft();
        d.quality = "system".to_string();
        assert!(matches!(
            validate_payload(&d),
            Err(ValidationError::InvalidQuality(_))
        ));
    }

    #[test]
    fn test_minimum_lengths() {
        let mut d = draft();
        d.location = "Ab".to_string();
        assert_eq!(
            validate_payload(&d).unwrap_err(),
            ValidationError::TooShort {
                field: "location",
                min: 3
            }
        );

        let mut d = draft();
        d.operator = "A".to_string();
        assert!(matches!(
            validate_payload(&d),
            Err(ValidationError::TooShort { field: "operator", .. })
        ));
    }

    #[test]
    fn test_measurement_formats() {
        assert!(is_batch_size("120 kg"));
        assert!(is_batch_size("80.5KG"));
        assert!(is_batch_size("90 กก."));
        assert!(!is_batch_size("kg"));
        assert!(!is_batch_size("12. kg"));
        assert!(!is_batch_size("120 lb"));

        assert!(is_temperature("25°C"));
        assert!(is_temperature("24.5c"));
        assert!(!is_temperature("25 °C"));
        assert!(!is_temperature("25F"));

        assert!(is_humidity("55%"));
        assert!(is_humidity("60.5 %"));
        assert!(!is_humidity("55"));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut d = draft();
        d.temperature = Some("  ".to_string());
        d.humidity = None;
        let payload = validate_payload(&d).unwrap();
        assert!(payload.temperature.is_none());
        assert!(payload.humidity.is_none());
    }

    #[test]
    fn test_bad_measurement_rejected() {
        let mut d = draft();
        d.batch_size = Some("lots".to_string());
        assert_eq!(
            validate_payload(&d).unwrap_err(),
            ValidationError::InvalidMeasurement {
                field: "batchSize",
                value: "lots".to_string()
            }
        );
    }
}
