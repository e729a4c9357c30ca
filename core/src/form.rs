//! Adapter from loosely-typed form values to create-request payloads.
//!
//! # Design
//! The create forms collect a flat record of scalar fields, but a caller may
//! also hand over a fully-formed nested `Pet` or `Tag` (for example when
//! re-submitting a fetched entity). Resolution is explicit and ordered
//! instead of the duck-typed property probing this replaces:
//!
//! - Tag: `pet_tag` wins, then `tag`, then the flat `tag_*` fields.
//! - Pet: a nested `pet` is used verbatim, else one is synthesized from the
//!   flat `pet_*` fields plus the resolved Tag.
//!
//! No validation happens here; required-field checks belong to the form UI.
//! Posting dates are canonicalized to a UTC timestamp; sighting dates pass
//! through unconverted. The asymmetry is deliberate and must not be unified
//! without the service owner's say-so.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::types::{Pet, PostingRequest, SightingRequest, Tag};

/// Everything the create forms collect, typed. Absent text fields are empty
/// strings, absent ids are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub date: String,
    pub location: String,
    pub in_custody: bool,

    /// A fully-formed pet, taking precedence over all flat pet fields.
    pub pet: Option<Pet>,
    /// Highest-precedence tag source.
    pub pet_tag: Option<Tag>,
    /// Second tag source, consulted when `pet_tag` is absent.
    pub tag: Option<Tag>,

    pub pet_id: Option<i64>,
    pub pet_name: String,
    pub pet_picture_id: Option<i64>,
    pub pet_color: String,
    pub pet_marks: String,
    pub pet_type: String,
    pub pet_type_id: Option<i64>,
    pub pet_breeds: Vec<String>,

    pub tag_id: Option<i64>,
    pub tag_shape: String,
    pub tag_color: String,
    pub tag_text: String,
}

impl FormValues {
    /// First match wins: explicit pet tag, explicit tag, flat fields.
    fn resolve_tag(&self) -> Tag {
        if let Some(tag) = &self.pet_tag {
            return tag.clone();
        }
        if let Some(tag) = &self.tag {
            return tag.clone();
        }
        Tag {
            id: self.tag_id,
            shape: self.tag_shape.clone(),
            color: self.tag_color.clone(),
            text: self.tag_text.clone(),
        }
    }

    /// A nested pet is used verbatim; otherwise one is synthesized from the
    /// flat fields, always carrying exactly one Tag record.
    fn resolve_pet(&self) -> Pet {
        if let Some(pet) = &self.pet {
            return pet.clone();
        }
        Pet {
            id: self.pet_id,
            picture_id: self.pet_picture_id,
            name: self.pet_name.clone(),
            color: self.pet_color.clone(),
            marks: self.pet_marks.clone(),
            type_name: self.pet_type.clone(),
            type_id: self.pet_type_id,
            breeds: self.pet_breeds.clone(),
            tag: self.resolve_tag(),
        }
    }
}

/// Build a posting creation payload. The date is canonicalized.
pub fn posting_request(values: &FormValues) -> PostingRequest {
    PostingRequest {
        date: to_canonical_timestamp(&values.date),
        location: values.location.clone(),
        pet: values.resolve_pet(),
    }
}

/// Build a sighting creation payload. The date passes through unconverted.
pub fn sighting_request(values: &FormValues) -> SightingRequest {
    SightingRequest {
        date: values.date.clone(),
        location: values.location.clone(),
        in_custody: values.in_custody,
        pet: values.resolve_pet(),
    }
}

/// Normalize a raw date input to `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Empty input maps to an empty string, never an error. Accepted inputs are
/// RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (the HTML datetime-local shape, read as
/// UTC) and a bare `YYYY-MM-DD` (midnight UTC). Anything else passes through
/// verbatim rather than failing the submission.
pub fn to_canonical_timestamp(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_timestamp(raw) {
        Some(instant) => instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        None => raw.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;
    Some(Utc.from_utc_datetime(&naive))
}
