//! Wire DTOs for the lost-pets service.
//!
//! # Design
//! These types mirror the reference API's JSON schema but are defined
//! independently; integration tests against the mock server catch drift.
//! The server omits empty fields, so everything optional-ish carries
//! `#[serde(default)]` and deserializes cleanly from sparse payloads.

use serde::{Deserialize, Serialize};

/// Physical identification attached to a pet (collar tag etc.).
///
/// A pet always carries exactly one Tag record; when the source had none the
/// form adapter fabricates a default one with empty fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub shape: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub text: String,
}

/// A pet as transferred over the wire, embedded in postings and sightings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub picture_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub marks: String,
    /// Species display name ("dog", "cat", ...).
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub type_id: Option<i64>,
    /// Flat breed display names, no uniqueness guarantee.
    #[serde(default)]
    pub breeds: Vec<String>,
    #[serde(default)]
    pub tag: Tag,
}

/// A species entry from the pet-types endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetType {
    pub id: i64,
    pub name: String,
}

/// A report that a pet was lost at some location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Posting {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    pub pet: Pet,
}

/// A report that a pet was seen, possibly taken into custody.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub in_custody: bool,
    pub pet: Pet,
}

/// Payload for creating a posting. Produced by the form adapter, never
/// constructed from raw form fields directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostingRequest {
    pub date: String,
    pub location: String,
    pub pet: Pet,
}

/// Payload for creating a sighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SightingRequest {
    pub date: String,
    pub location: String,
    pub in_custody: bool,
    pub pet: Pet,
}

// Response envelopes. List and single-item responses wrap their payload in a
// named field; pet-types is a bare array and has no envelope.

#[derive(Debug, Deserialize)]
pub(crate) struct PostingsEnvelope {
    #[serde(default)]
    pub postings: Vec<Posting>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostingEnvelope {
    pub posting: Posting,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SightingsEnvelope {
    #[serde(default)]
    pub sightings: Vec<Sighting>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SightingEnvelope {
    pub sighting: Sighting,
}
