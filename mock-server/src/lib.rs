//! In-memory stand-in for the lost-pets API and the two breed APIs.
//!
//! Serves the same envelopes and status codes as the reference server:
//! list/detail responses wrap their payload in a named field, creates answer
//! 201 with no body (the private-token link travels in the Location header),
//! unknown ids and tokens answer 404. Matching is naive — reports match when
//! their pets share a species name — because real matching is server business
//! logic that is out of scope here; only the shapes matter to the clients.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pet {
    pub id: Option<i64>,
    pub picture_id: Option<i64>,
    pub name: String,
    pub color: String,
    pub marks: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub type_id: Option<i64>,
    pub breeds: Vec<String>,
    pub tag: Tag,
}

#[derive(Clone, Debug, Serialize)]
pub struct Posting {
    pub id: i64,
    pub date: String,
    pub location: String,
    pub pet: Pet,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub id: i64,
    pub date: String,
    pub location: String,
    pub in_custody: bool,
    pub pet: Pet,
}

#[derive(Debug, Deserialize)]
pub struct CreatePosting {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    pub pet: Pet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSighting {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub in_custody: bool,
    pub pet: Pet,
}

#[derive(Clone, Debug, Serialize)]
pub struct PetType {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
struct PostingsEnvelope {
    postings: Vec<Posting>,
}

#[derive(Serialize)]
struct PostingEnvelope {
    posting: Posting,
}

#[derive(Serialize)]
struct SightingsEnvelope {
    sightings: Vec<Sighting>,
}

#[derive(Serialize)]
struct SightingEnvelope {
    sighting: Sighting,
}

/// All mutable state behind one lock; contention is irrelevant in a mock.
#[derive(Default)]
pub struct Store {
    next_posting_id: i64,
    next_sighting_id: i64,
    next_picture_id: i64,
    postings: HashMap<i64, (String, Posting)>,
    sightings: HashMap<i64, (String, Sighting)>,
    pictures: HashMap<i64, Vec<u8>>,
}

pub type Db = Arc<RwLock<Store>>;

/// The lost-pets API.
pub fn app() -> Router {
    app_with_state(Db::default())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/postings", get(list_postings).post(create_posting))
        .route("/postings/{id}", get(get_posting))
        .route("/postings/private/{guid}", get(get_posting_private))
        .route("/postings/private/{guid}/matches", get(posting_matches))
        .route("/sightings", get(list_sightings).post(create_sighting))
        .route("/sightings/{id}", get(get_sighting))
        .route("/sightings/private/{guid}", get(get_sighting_private))
        .route("/sightings/private/{guid}/matches", get(sighting_matches))
        .route("/pet-types", get(pet_types))
        .route("/pet-pictures", axum::routing::post(upload_picture))
        .route("/pet-pictures/{id}", get(download_picture))
        .with_state(db)
}

/// The two third-party breed APIs, with fixed fixture data. Key insertion is
/// alphabetical so the dog payload's declaration order is stable however the
/// underlying JSON map is built.
pub fn breeds_app() -> Router {
    Router::new()
        .route("/v1/breeds", get(cat_breeds))
        .route("/api/breeds/list/all", get(dog_breeds))
}

/// Everything on one port; the clients take separate base URLs that may all
/// point here.
pub fn combined_app() -> Router {
    app().merge(breeds_app())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, combined_app()).await
}

async fn list_postings(State(db): State<Db>) -> Json<PostingsEnvelope> {
    let store = db.read().await;
    let mut postings: Vec<Posting> = store.postings.values().map(|(_, p)| p.clone()).collect();
    postings.sort_by_key(|p| p.id);
    Json(PostingsEnvelope { postings })
}

async fn create_posting(
    State(db): State<Db>,
    Json(input): Json<CreatePosting>,
) -> impl IntoResponse {
    let mut store = db.write().await;
    store.next_posting_id += 1;
    let id = store.next_posting_id;
    let guid = Uuid::new_v4().to_string();
    let posting = Posting {
        id,
        date: input.date,
        location: input.location,
        pet: input.pet,
    };
    store.postings.insert(id, (guid.clone(), posting));
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/postings/private/{guid}"))],
    )
}

async fn get_posting(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<PostingEnvelope>, StatusCode> {
    let store = db.read().await;
    store
        .postings
        .get(&id)
        .map(|(_, posting)| Json(PostingEnvelope { posting: posting.clone() }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_posting_private(
    State(db): State<Db>,
    Path(guid): Path<String>,
) -> Result<Json<PostingEnvelope>, StatusCode> {
    let store = db.read().await;
    store
        .postings
        .values()
        .find(|(g, _)| *g == guid)
        .map(|(_, posting)| Json(PostingEnvelope { posting: posting.clone() }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn posting_matches(
    State(db): State<Db>,
    Path(guid): Path<String>,
) -> Result<Json<SightingsEnvelope>, StatusCode> {
    let store = db.read().await;
    let (_, posting) = store
        .postings
        .values()
        .find(|(g, _)| *g == guid)
        .ok_or(StatusCode::NOT_FOUND)?;
    let mut sightings: Vec<Sighting> = store
        .sightings
        .values()
        .filter(|(_, s)| !s.pet.type_name.is_empty() && s.pet.type_name == posting.pet.type_name)
        .map(|(_, s)| s.clone())
        .collect();
    sightings.sort_by_key(|s| s.id);
    Ok(Json(SightingsEnvelope { sightings }))
}

async fn list_sightings(State(db): State<Db>) -> Json<SightingsEnvelope> {
    let store = db.read().await;
    let mut sightings: Vec<Sighting> = store.sightings.values().map(|(_, s)| s.clone()).collect();
    sightings.sort_by_key(|s| s.id);
    Json(SightingsEnvelope { sightings })
}

async fn create_sighting(
    State(db): State<Db>,
    Json(input): Json<CreateSighting>,
) -> impl IntoResponse {
    let mut store = db.write().await;
    store.next_sighting_id += 1;
    let id = store.next_sighting_id;
    let guid = Uuid::new_v4().to_string();
    let sighting = Sighting {
        id,
        date: input.date,
        location: input.location,
        in_custody: input.in_custody,
        pet: input.pet,
    };
    store.sightings.insert(id, (guid.clone(), sighting));
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/sightings/private/{guid}"))],
    )
}

async fn get_sighting(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<SightingEnvelope>, StatusCode> {
    let store = db.read().await;
    store
        .sightings
        .get(&id)
        .map(|(_, sighting)| Json(SightingEnvelope { sighting: sighting.clone() }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_sighting_private(
    State(db): State<Db>,
    Path(guid): Path<String>,
) -> Result<Json<SightingEnvelope>, StatusCode> {
    let store = db.read().await;
    store
        .sightings
        .values()
        .find(|(g, _)| *g == guid)
        .map(|(_, sighting)| Json(SightingEnvelope { sighting: sighting.clone() }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn sighting_matches(
    State(db): State<Db>,
    Path(guid): Path<String>,
) -> Result<Json<PostingsEnvelope>, StatusCode> {
    let store = db.read().await;
    let (_, sighting) = store
        .sightings
        .values()
        .find(|(g, _)| *g == guid)
        .ok_or(StatusCode::NOT_FOUND)?;
    let mut postings: Vec<Posting> = store
        .postings
        .values()
        .filter(|(_, p)| !p.pet.type_name.is_empty() && p.pet.type_name == sighting.pet.type_name)
        .map(|(_, p)| p.clone())
        .collect();
    postings.sort_by_key(|p| p.id);
    Ok(Json(PostingsEnvelope { postings }))
}

async fn pet_types() -> Json<Vec<PetType>> {
    Json(vec![
        PetType { id: 1, name: "dog".to_string() },
        PetType { id: 2, name: "cat".to_string() },
        PetType { id: 3, name: "bird".to_string() },
    ])
}

async fn upload_picture(
    State(db): State<Db>,
    mut multipart: Multipart,
) -> Result<StatusCode, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("file") {
            let content = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            let mut store = db.write().await;
            store.next_picture_id += 1;
            let id = store.next_picture_id;
            store.pictures.insert(id, content.to_vec());
            return Ok(StatusCode::CREATED);
        }
    }
    Err(StatusCode::BAD_REQUEST)
}

async fn download_picture(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let store = db.read().await;
    store
        .pictures
        .get(&id)
        .cloned()
        .map(|content| {
            (
                [(header::CONTENT_TYPE, "application/octet-stream")],
                content,
            )
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn cat_breeds() -> Json<serde_json::Value> {
    Json(serde_json::json!([
        { "name": "Abyssinian", "origin": "Egypt" },
        { "name": "Aegean", "origin": "Greece" },
        { "name": "Bengal", "origin": "United States" }
    ]))
}

async fn dog_breeds() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": {
            "basenji": [],
            "buhund": ["norwegian"],
            "bulldog": ["boston", "english", "french"]
        },
        "status": "success"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_deserializes_from_sparse_payload() {
        let pet: Pet = serde_json::from_str(r#"{"name":"Rex"}"#).unwrap();
        assert_eq!(pet.name, "Rex");
        assert!(pet.breeds.is_empty());
    }

    #[test]
    fn posting_serializes_with_envelope_field_names() {
        let envelope = PostingEnvelope {
            posting: Posting {
                id: 1,
                date: "2024-01-05".to_string(),
                location: "Park".to_string(),
                pet: Pet {
                    picture_id: Some(4),
                    type_name: "dog".to_string(),
                    ..Pet::default()
                },
            },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["posting"]["pet"]["pictureId"], 4);
        assert_eq!(json["posting"]["pet"]["type"], "dog");
    }

    #[test]
    fn sighting_uses_in_custody_wire_name() {
        let input: CreateSighting =
            serde_json::from_str(r#"{"location":"Pier","inCustody":true,"pet":{"name":"Mia"}}"#)
                .unwrap();
        assert!(input.in_custody);
        assert!(input.date.is_empty());
    }

    #[test]
    fn create_posting_requires_a_pet() {
        let result: Result<CreatePosting, _> =
            serde_json::from_str(r#"{"date":"2024-01-05","location":"Park"}"#);
        assert!(result.is_err());
    }
}
