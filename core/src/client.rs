//! Stateless request builders and response parsers for the lost-pets API.
//!
//! # Design
//! Each client holds only a `base_url` and carries no mutable state between
//! calls. Every operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip, keeping the clients
//! deterministic and free of I/O dependencies.
//!
//! List and single-item responses arrive wrapped in envelopes
//! (`{"postings": [...]}`, `{"posting": {...}}`); the parse methods unwrap
//! them so callers only ever see the entities. Create endpoints answer with a
//! bare status (the reference server sends 201 with no body), so their parse
//! methods return `()` on any 2xx.

use crate::error::ApiError;
use crate::http::{multipart_file_body, HttpRequest, HttpResponse, MULTIPART_BOUNDARY};
use crate::types::{
    PetType, Posting, PostingEnvelope, PostingRequest, PostingsEnvelope, Sighting,
    SightingEnvelope, SightingRequest, SightingsEnvelope,
};

/// Client for the postings section of the lost-pets API.
#[derive(Debug, Clone)]
pub struct PostingsClient {
    base_url: String,
}

impl PostingsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/postings", self.base_url))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Posting>, ApiError> {
        check_status(&response, 200)?;
        let envelope: PostingsEnvelope = decode(&response)?;
        Ok(envelope.postings)
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        HttpRequest::get(format!("{}/postings/{id}", self.base_url))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Posting, ApiError> {
        check_status(&response, 200)?;
        let envelope: PostingEnvelope = decode(&response)?;
        Ok(envelope.posting)
    }

    /// Token-gated private view, addressed by an opaque shared token rather
    /// than a numeric id.
    pub fn build_get_private(&self, token: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/postings/private/{token}", self.base_url))
    }

    pub fn parse_get_private(&self, response: HttpResponse) -> Result<Posting, ApiError> {
        self.parse_get(response)
    }

    /// Sightings the server considers candidate matches for this posting.
    pub fn build_matches(&self, token: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/postings/private/{token}/matches", self.base_url))
    }

    pub fn parse_matches(&self, response: HttpResponse) -> Result<Vec<Sighting>, ApiError> {
        check_status(&response, 200)?;
        let envelope: SightingsEnvelope = decode(&response)?;
        Ok(envelope.sightings)
    }

    pub fn build_create(&self, request: &PostingRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_vec(request).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::post_json(
            format!("{}/postings", self.base_url),
            body,
        ))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

/// Client for the sightings section of the lost-pets API. Mirrors
/// `PostingsClient`; matches for a sighting are postings.
#[derive(Debug, Clone)]
pub struct SightingsClient {
    base_url: String,
}

impl SightingsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/sightings", self.base_url))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Sighting>, ApiError> {
        check_status(&response, 200)?;
        let envelope: SightingsEnvelope = decode(&response)?;
        Ok(envelope.sightings)
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        HttpRequest::get(format!("{}/sightings/{id}", self.base_url))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Sighting, ApiError> {
        check_status(&response, 200)?;
        let envelope: SightingEnvelope = decode(&response)?;
        Ok(envelope.sighting)
    }

    pub fn build_get_private(&self, token: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/sightings/private/{token}", self.base_url))
    }

    pub fn parse_get_private(&self, response: HttpResponse) -> Result<Sighting, ApiError> {
        self.parse_get(response)
    }

    pub fn build_matches(&self, token: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/sightings/private/{token}/matches",
            self.base_url
        ))
    }

    pub fn parse_matches(&self, response: HttpResponse) -> Result<Vec<Posting>, ApiError> {
        check_status(&response, 200)?;
        let envelope: PostingsEnvelope = decode(&response)?;
        Ok(envelope.postings)
    }

    pub fn build_create(&self, request: &SightingRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_vec(request).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::post_json(
            format!("{}/sightings", self.base_url),
            body,
        ))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

/// Client for the cross-cutting parts of the lost-pets API: species lookup
/// and pet pictures.
#[derive(Debug, Clone)]
pub struct GeneralClient {
    base_url: String,
}

impl GeneralClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_pet_types(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/pet-types", self.base_url))
    }

    pub fn parse_pet_types(&self, response: HttpResponse) -> Result<Vec<PetType>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn build_upload_picture(&self, file_name: &str, content: &[u8]) -> HttpRequest {
        HttpRequest {
            method: crate::http::HttpMethod::Post,
            path: format!("{}/pet-pictures", self.base_url),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )],
            body: Some(multipart_file_body(file_name, content)),
        }
    }

    pub fn parse_upload_picture(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    pub fn build_download_picture(&self, id: i64) -> HttpRequest {
        HttpRequest::get(format!("{}/pet-pictures/{id}", self.base_url))
    }

    pub fn parse_download_picture(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(&response, 200)?;
        Ok(response.body)
    }
}

/// Map non-expected status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body_text(),
    })
}

/// Accept any 2xx. Create endpoints report outcome through the status alone.
pub(crate) fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body_text(),
    })
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    response: &HttpResponse,
) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::types::Pet;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn postings() -> PostingsClient {
        PostingsClient::new("http://localhost:8080")
    }

    fn sightings() -> SightingsClient {
        SightingsClient::new("http://localhost:8080")
    }

    #[test]
    fn build_list_postings_produces_correct_request() {
        let req = postings().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/postings");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PostingsClient::new("http://localhost:8080/");
        assert_eq!(client.build_list().path, "http://localhost:8080/postings");
    }

    #[test]
    fn parse_list_postings_unwraps_envelope() {
        let body = r#"{"postings":[{"id":1,"date":"d","location":"Park","pet":{"name":"Rex"}}]}"#;
        let result = postings().parse_list(ok(body)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].pet.name, "Rex");
    }

    #[test]
    fn parse_get_posting_unwraps_envelope() {
        let body = r#"{"posting":{"id":4,"location":"Pier","pet":{"name":"Mia"}}}"#;
        let posting = postings().parse_get(ok(body)).unwrap();
        assert_eq!(posting.id, 4);
        assert_eq!(posting.location, "Pier");
    }

    #[test]
    fn parse_get_posting_not_found() {
        let resp = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: Vec::new(),
        };
        let err = postings().parse_get(resp).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn private_posting_path_uses_token() {
        let req = postings().build_get_private("abc-123");
        assert_eq!(req.path, "http://localhost:8080/postings/private/abc-123");
    }

    #[test]
    fn posting_matches_parse_as_sightings() {
        let req = postings().build_matches("abc-123");
        assert_eq!(
            req.path,
            "http://localhost:8080/postings/private/abc-123/matches"
        );
        let body = r#"{"sightings":[{"id":9,"inCustody":true,"pet":{"name":"Mia"}}]}"#;
        let matches = postings().parse_matches(ok(body)).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].in_custody);
    }

    #[test]
    fn sighting_matches_parse_as_postings() {
        let body = r#"{"postings":[{"id":2,"pet":{"name":"Rex"}}]}"#;
        let matches = sightings().parse_matches(ok(body)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pet.name, "Rex");
    }

    #[test]
    fn build_create_posting_serializes_body() {
        let request = PostingRequest {
            date: "2024-01-05T00:00:00.000Z".to_string(),
            location: "Park".to_string(),
            pet: Pet {
                name: "Rex".to_string(),
                ..Pet::default()
            },
        };
        let req = postings().build_create(&request).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/postings");
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["location"], "Park");
        assert_eq!(body["pet"]["name"], "Rex");
    }

    #[test]
    fn parse_create_accepts_201_without_body() {
        let resp = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(postings().parse_create(resp).is_ok());
    }

    #[test]
    fn parse_create_rejects_server_error() {
        let resp = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: b"boom".to_vec(),
        };
        let err = sightings().parse_create(resp).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_list_bad_json_is_deserialization_error() {
        let err = postings().parse_list(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn pet_types_parse_bare_array() {
        let client = GeneralClient::new("http://localhost:8080");
        let req = client.build_pet_types();
        assert_eq!(req.path, "http://localhost:8080/pet-types");
        let types = client
            .parse_pet_types(ok(r#"[{"id":1,"name":"dog"},{"id":2,"name":"cat"}]"#))
            .unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[1].name, "cat");
    }

    #[test]
    fn upload_picture_is_multipart() {
        let client = GeneralClient::new("http://localhost:8080");
        let req = client.build_upload_picture("rex.jpg", b"bytes");
        assert_eq!(req.path, "http://localhost:8080/pet-pictures");
        let content_type = &req.headers[0].1;
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn download_picture_returns_raw_bytes() {
        let client = GeneralClient::new("http://localhost:8080");
        let req = client.build_download_picture(5);
        assert_eq!(req.path, "http://localhost:8080/pet-pictures/5");
        let resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: vec![0xff, 0xd8, 0xff],
        };
        assert_eq!(client.parse_download_picture(resp).unwrap(), vec![0xff, 0xd8, 0xff]);
    }
}
