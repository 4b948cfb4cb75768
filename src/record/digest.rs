//! Digest computation for records
//!
//! A 32-bit rolling hash (`acc * 31 + unit`) over a string rendering of the
//! record fields. It is deterministic but not collision resistant; the output
//! is rendered as zero-padded lowercase hex.

use super::Payload;
use crate::types::Digest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Upper bound on fit-seeking iterations per record.
pub const MAX_SEAL_ATTEMPTS: u32 = 1000;

/// Widest zero prefix the fit-seeking loop will look for.
pub const MAX_TARGET_WIDTH: usize = 2;

/// Compute the digest of a record from its fields.
pub fn fingerprint(
    sequence_index: u64,
    created_at: &DateTime<Utc>,
    payload: &Payload,
    previous_digest: &Digest,
    nonce: u64,
) -> Digest {
    let material = format!(
        "{}{}{}{}{}",
        sequence_index,
        created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        canonical_payload(payload),
        previous_digest,
        nonce
    );
    Digest::new(render(rolling_hash(&material)))
}

/// Fold the UTF-16 code units of `input` into a wrapping `i32` accumulator.
pub fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Absolute value as hex, padded to 8 characters.
///
/// Widened before `abs` so `i32::MIN` renders as `80000000`.
fn render(hash: i32) -> String {
    format!("{:08x}", i64::from(hash).abs())
}

/// Key-sorted JSON rendering of the payload; every field takes part.
fn canonical_payload(payload: &Payload) -> Value {
    json!({
        "subjectId": payload.subject_id.as_str(),
        "stage": payload.stage.as_str(),
        "location": payload.location,
        "operator": payload.operator,
        "details": payload.details,
        "quality": payload.quality.as_str(),
        "batchSize": payload.batch_size,
        "temperature": payload.temperature,
        "humidity": payload.humidity,
        "isAutomated": payload.is_automated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Quality, Stage};
    use crate::types::SubjectId;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn payload() -> Payload {
        Payload {
            subject_id: SubjectId::new("CR002"),
            stage: Stage::Harvest,
            location: "Mae Sai, Chiang Rai".to_string(),
            operator: "Malee Suksai".to_string(),
            details: "Hand picked".to_string(),
            quality: Quality::GradeA,
            batch_size: Some("90 kg".to_string()),
            temperature: None,
            humidity: None,
            is_automated: false,
        }
    }

    fn time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_rolling_hash_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_rolling_hash_uses_utf16_units() {
        // U+1F331 is a surrogate pair: 0xD83C 0xDF31
        let expected = 0xD83C_i32.wrapping_mul(31).wrapping_add(0xDF31);
        assert_eq!(rolling_hash("\u{1F331}"), expected);
    }

    #[test]
    fn test_render_pads_and_handles_min() {
        assert_eq!(render(255), "000000ff");
        assert_eq!(render(-255), "000000ff");
        assert_eq!(render(i32::MIN), "80000000");
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let prev = Digest::new("00c0ffee");
        let a = fingerprint(4, &time(), &payload(), &prev, 7);
        let b = fingerprint(4, &time(), &payload(), &prev, 7);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 8);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_fingerprint_sensitive_to_each_field() {
        let prev = Digest::new("00c0ffee");
        let base = fingerprint(4, &time(), &payload(), &prev, 7);

        assert_ne!(base, fingerprint(5, &time(), &payload(), &prev, 7));
        assert_ne!(
            base,
            fingerprint(4, &(time() + chrono::Duration::seconds(1)), &payload(), &prev, 7)
        );
        assert_ne!(base, fingerprint(4, &time(), &payload(), &Digest::new("00c0fff0"), 7));
        assert_ne!(base, fingerprint(4, &time(), &payload(), &prev, 8));

        let mut changed = payload();
        changed.humidity = Some("60%".to_string());
        assert_ne!(base, fingerprint(4, &time(), &changed, &prev, 7));

        let mut changed = payload();
        changed.is_automated = true;
        assert_ne!(base, fingerprint(4, &time(), &changed, &prev, 7));
    }

    proptest! {
        #[test]
        fn prop_fingerprint_is_pure(index in 0u64..10_000, nonce in 0u64..10_000, details in ".{0,40}") {
            let mut p = payload();
            p.details = details;
            let prev = Digest::new("0");
            let first = fingerprint(index, &time(), &p, &prev, nonce);
            let second = fingerprint(index, &time(), &p, &prev, nonce);
            prop_assert_eq!(first.clone(), second);
            prop_assert!(first.as_str().len() == 8);
        }
    }
}
