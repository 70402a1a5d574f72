//! Tamper-evident exam records.
//!
//! A finished exam is serialized canonically (sorted JSON keys), hashed
//! with SHA-256, and the digest-carrying record is base64-encoded into a
//! single opaque blob the student downloads and sends on. Anyone holding
//! the blob can run the protocol in reverse: decode, strip the digest
//! field, re-canonicalize, re-hash, compare. The digest is a
//! self-consistency checksum, not a signature — there is no secret key, so
//! it detects post-hoc tampering, not forgery.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::grading::GradingRecord;

/// JSON field carrying the content digest inside a sealed record.
pub const DIGEST_FIELD: &str = "integrity_sha256";

/// Errors from sealing or verifying an exam record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record blob is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("record blob is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("record blob does not contain a JSON object")]
    NotAnObject,

    #[error("record blob carries no integrity digest")]
    MissingDigest,
}

/// Everything a finished exam reports, minus the digest.
///
/// Built once at finalization and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Student name as entered.
    pub student: String,
    /// The seed the exam was personalized with.
    pub seed: u32,
    /// Count of correct answers.
    pub score: u32,
    /// Questions the exam presented.
    pub questions_presented: u32,
    /// Answered questions whose reference answer was defined.
    pub questions_gradable: u32,
    /// When the exam finished.
    pub completed_at: DateTime<Utc>,
    /// Identifier of the session that produced this record.
    pub session_id: Uuid,
    /// Per-question grading detail.
    pub answers: Vec<GradingRecord>,
}

/// A sealed record: the transport blob plus the digest it carries.
#[derive(Debug, Clone)]
pub struct SealedRecord {
    /// Base64 text blob suitable for a small download.
    pub blob: String,
    /// Hex SHA-256 digest over the canonical record.
    pub digest: String,
}

/// Serialize to canonical JSON: compact, keys sorted at every level.
///
/// serde_json's default `Map` keeps keys in sorted order, so routing
/// through `Value` gives a byte-stable form for logically equal records.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, RecordError> {
    Ok(serde_json::to_value(value)?.to_string())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

impl ExamRecord {
    /// Hex SHA-256 digest over this record's canonical JSON.
    pub fn digest(&self) -> Result<String, RecordError> {
        Ok(sha256_hex(canonical_json(self)?.as_bytes()))
    }

    /// Attach the digest and encode the augmented record as a base64 blob.
    pub fn seal(&self) -> Result<SealedRecord, RecordError> {
        let digest = self.digest()?;
        let mut value = serde_json::to_value(self)?;
        let Value::Object(fields) = &mut value else {
            return Err(RecordError::NotAnObject);
        };
        fields.insert(DIGEST_FIELD.to_string(), Value::String(digest.clone()));
        let blob = BASE64.encode(value.to_string());
        Ok(SealedRecord { blob, digest })
    }

    /// Download filename: sanitized student name (spaces become
    /// underscores, nothing else changes) plus the seed.
    pub fn filename(&self) -> String {
        format!("grade_{}_{}.dat", self.student.replace(' ', "_"), self.seed)
    }
}

/// Result of running the verification protocol over a blob.
#[derive(Debug, Clone)]
pub struct Verification {
    /// The decoded record.
    pub record: ExamRecord,
    /// Digest stored inside the blob.
    pub stored_digest: String,
    /// Digest recomputed over the decoded record.
    pub computed_digest: String,
}

impl Verification {
    /// Whether the stored and recomputed digests agree.
    pub fn is_intact(&self) -> bool {
        self.stored_digest == self.computed_digest
    }
}

/// Decode a sealed blob and recompute its digest.
///
/// This is the protocol a grader runs on a received `.dat` file: base64
/// decode, parse, remove the digest field, re-canonicalize, re-hash.
pub fn verify_blob(blob: &str) -> Result<Verification, RecordError> {
    let decoded = String::from_utf8(BASE64.decode(blob.trim())?)?;
    let mut value: Value = serde_json::from_str(&decoded)?;
    let Value::Object(fields) = &mut value else {
        return Err(RecordError::NotAnObject);
    };
    let stored_digest = match fields.remove(DIGEST_FIELD) {
        Some(Value::String(digest)) => digest,
        _ => return Err(RecordError::MissingDigest),
    };
    let computed_digest = sha256_hex(value.to_string().as_bytes());
    let record: ExamRecord = serde_json::from_value(value)?;
    Ok(Verification {
        record,
        stored_digest,
        computed_digest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ExamRecord {
        ExamRecord {
            student: "Jane Mary Doe".into(),
            seed: 20,
            score: 1,
            questions_presented: 10,
            questions_gradable: 2,
            completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            session_id: Uuid::nil(),
            answers: vec![
                GradingRecord {
                    question: "An object is dropped from 20 m. Find its fall time in s.".into(),
                    submitted: "2.03".into(),
                    expected: Some(2.02),
                    correct: true,
                },
                GradingRecord {
                    question: "An object is dropped from 20 m. Find its final speed in m/s.".into(),
                    submitted: "12".into(),
                    expected: Some(19.8),
                    correct: false,
                },
            ],
        }
    }

    #[test]
    fn seal_verify_round_trip() {
        let record = sample_record();
        let sealed = record.seal().unwrap();

        let verification = verify_blob(&sealed.blob).unwrap();
        assert!(verification.is_intact());
        assert_eq!(verification.stored_digest, sealed.digest);
        assert_eq!(verification.record.student, "Jane Mary Doe");
        assert_eq!(verification.record.score, 1);
        assert_eq!(verification.record.answers.len(), 2);
        assert_eq!(verification.record.answers[0].expected, Some(2.02));
    }

    #[test]
    fn tampering_is_detected() {
        let sealed = sample_record().seal().unwrap();
        let decoded = String::from_utf8(BASE64.decode(&sealed.blob).unwrap()).unwrap();

        let tampered = decoded.replace("\"score\":1", "\"score\":10");
        assert_ne!(decoded, tampered, "tampering should change the payload");

        let verification = verify_blob(&BASE64.encode(tampered)).unwrap();
        assert!(!verification.is_intact());
        assert_eq!(verification.record.score, 10);
    }

    #[test]
    fn digest_differs_when_any_field_differs() {
        let record = sample_record();
        let mut renamed = record.clone();
        renamed.student.push('!');
        let mut rescored = record.clone();
        rescored.score += 1;

        assert_ne!(record.digest().unwrap(), renamed.digest().unwrap());
        assert_ne!(record.digest().unwrap(), rescored.digest().unwrap());
    }

    #[test]
    fn canonical_json_is_stable_and_sorted() {
        let record = sample_record();
        assert_eq!(
            canonical_json(&record).unwrap(),
            canonical_json(&record.clone()).unwrap()
        );

        let json = canonical_json(&record).unwrap();
        let answers_at = json.find("\"answers\"").unwrap();
        let completed_at = json.find("\"completed_at\"").unwrap();
        let student_at = json.find("\"student\"").unwrap();
        assert!(answers_at < completed_at);
        assert!(completed_at < student_at);
    }

    #[test]
    fn blob_without_digest_is_rejected() {
        let record = sample_record();
        let blob = BASE64.encode(canonical_json(&record).unwrap());
        assert!(matches!(
            verify_blob(&blob),
            Err(RecordError::MissingDigest)
        ));
    }

    #[test]
    fn malformed_blobs_are_rejected() {
        assert!(matches!(
            verify_blob("not base64!!!"),
            Err(RecordError::Decode(_))
        ));
        assert!(matches!(
            verify_blob(&BASE64.encode("not json")),
            Err(RecordError::Json(_))
        ));
        assert!(matches!(
            verify_blob(&BASE64.encode("[1, 2, 3]")),
            Err(RecordError::NotAnObject)
        ));
    }

    #[test]
    fn filename_replaces_spaces_with_underscores() {
        let record = sample_record();
        assert_eq!(record.filename(), "grade_Jane_Mary_Doe_20.dat");

        let mut single = record;
        single.student = "Ana".into();
        single.seed = 7;
        assert_eq!(single.filename(), "grade_Ana_7.dat");
    }
}
