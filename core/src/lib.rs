//! Deterministic client core for the lost-pets reporting service.
//!
//! # Overview
//! Users submit postings (a lost pet) and sightings (a found/seen pet),
//! browse grids of each, open detail pages, and receive transient alerts.
//! This crate is the whole of that front-end's logic, minus the I/O: it
//! builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host — the `lostpets`
//! CLI or a test harness — executes the actual round-trips and drives the
//! banner clock.
//!
//! # Design
//! - Transport clients are stateless; each operation is a `build_*`/`parse_*`
//!   pair and the parse step unwraps the server's response envelope.
//! - Adapters are pure: breed payload flattening and form-to-request
//!   conversion never perform I/O or validation.
//! - View state machines own the loading flags and publish outcome alerts on
//!   the shared bus; the single banner subscribes and handles auto-dismiss
//!   against a caller-supplied clock.

pub mod alert;
pub mod breeds;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod routes;
pub mod types;
pub mod views;

pub use alert::{Alert, AlertBanner, AlertBus, AlertKind};
pub use breeds::{CatBreedClient, DogBreedClient};
pub use client::{GeneralClient, PostingsClient, SightingsClient};
pub use error::ApiError;
pub use form::{posting_request, sighting_request, FormValues};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use routes::Route;
pub use types::{Pet, PetType, Posting, PostingRequest, Sighting, SightingRequest, Tag};
pub use views::{DetailView, FormView, GridView, ReportKind};
