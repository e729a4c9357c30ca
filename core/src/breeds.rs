//! Breed lookup clients and the breed-list flattening adapter.
//!
//! The two third-party breed APIs return structurally different payloads; the
//! forms consume one flat list of display names from either. The cat API
//! returns a sequence of records, the dog API a map from primary breed to a
//! possibly empty list of sub-breed qualifiers. `serde_json` is built with
//! `preserve_order`, so the dog map iterates in payload declaration order —
//! the output order is part of this adapter's contract.

use serde::Deserialize;
use serde_json::Value;

use crate::client::{check_status, decode};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// One record from the cat API; every field but the name is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatBreed {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct DogBreedsEnvelope {
    #[serde(default)]
    message: serde_json::Map<String, Value>,
}

/// Client for the cat breed API.
#[derive(Debug, Clone)]
pub struct CatBreedClient {
    base_url: String,
}

impl CatBreedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_breeds(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/v1/breeds", self.base_url))
    }

    pub fn parse_breeds(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        check_status(&response, 200)?;
        let records: Vec<CatBreed> = decode(&response)?;
        Ok(cat_breed_names(&records))
    }
}

/// Client for the dog breed API.
#[derive(Debug, Clone)]
pub struct DogBreedClient {
    base_url: String,
}

impl DogBreedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_breeds(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/breeds/list/all", self.base_url))
    }

    pub fn parse_breeds(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        check_status(&response, 200)?;
        let envelope: DogBreedsEnvelope = decode(&response)?;
        Ok(flatten_dog_breeds(&envelope.message))
    }
}

/// Ordered projection of each record's name.
pub fn cat_breed_names(records: &[CatBreed]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

/// Flatten the dog API's primary-to-qualifiers map into display names.
///
/// A primary with qualifiers contributes `"<qualifier> <primary>"` per
/// qualifier, in qualifier order; a primary without any is emitted alone.
/// Malformed entries degrade rather than erroring: a non-array qualifier
/// value counts as empty, a non-string qualifier contributes an empty prefix.
pub fn flatten_dog_breeds(message: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut breeds = Vec::new();
    for (primary, qualifiers) in message {
        match qualifiers.as_array() {
            Some(qualifiers) if !qualifiers.is_empty() => {
                for qualifier in qualifiers {
                    breeds.push(format!("{} {primary}", qualifier.as_str().unwrap_or_default()));
                }
            }
            _ => breeds.push(primary.clone()),
        }
    }
    breeds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn cat_breeds_project_names_in_order() {
        let client = CatBreedClient::new("https://cat.example/");
        assert_eq!(client.build_breeds().path, "https://cat.example/v1/breeds");

        let body = r#"[{"name":"Abyssinian","origin":"Egypt"},{"name":"Aegean"}]"#;
        let names = client.parse_breeds(ok(body)).unwrap();
        assert_eq!(names, vec!["Abyssinian", "Aegean"]);
    }

    #[test]
    fn dog_breeds_flatten_with_qualifier_prefix() {
        let client = DogBreedClient::new("https://dog.example");
        assert_eq!(
            client.build_breeds().path,
            "https://dog.example/api/breeds/list/all"
        );

        let body = r#"{"message":{"buhund":["norwegian"],"bulldog":["boston","english","french"],"basenji":[]}}"#;
        let names = client.parse_breeds(ok(body)).unwrap();
        assert_eq!(
            names,
            vec![
                "norwegian buhund",
                "boston bulldog",
                "english bulldog",
                "french bulldog",
                "basenji"
            ]
        );
    }

    #[test]
    fn flattened_length_is_sum_of_max_one_or_qualifier_count() {
        let envelope: serde_json::Value = serde_json::from_str(
            r#"{"akita":[],"hound":["afghan","basset","blood"],"husky":["siberian"]}"#,
        )
        .unwrap();
        let message = envelope.as_object().unwrap();
        let names = flatten_dog_breeds(message);
        // max(1,0) + max(1,3) + max(1,1)
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "akita");
        assert_eq!(names[3], "blood hound");
    }

    #[test]
    fn malformed_qualifier_value_counts_as_empty() {
        let envelope: serde_json::Value =
            serde_json::from_str(r#"{"akita":"oops","hound":[42]}"#).unwrap();
        let names = flatten_dog_breeds(envelope.as_object().unwrap());
        assert_eq!(names, vec!["akita", " hound"]);
    }

    #[test]
    fn empty_message_flattens_to_empty_list() {
        let names = flatten_dog_breeds(&serde_json::Map::new());
        assert!(names.is_empty());
    }
}
