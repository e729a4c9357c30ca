//! View state machines behind the grids, detail pages and create forms.
//!
//! Each view owns a loading flag that is set when its fetch is issued and
//! cleared on both the success and the failure path of that same fetch, so
//! the UI can never stay stuck in a loading state for a completed request.
//! Failures surface as danger alerts on the shared bus; a failed list fetch
//! instead degrades silently to an empty grid so the grid always renders.

use std::fmt::Display;

use crate::alert::{Alert, AlertBus};
use crate::form::FormValues;
use crate::types::PetType;

/// How long outcome alerts stay up, in milliseconds.
const ALERT_DURATION_MS: u64 = 2000;

/// State behind a list/grid page.
#[derive(Debug)]
pub struct GridView<T> {
    loading: bool,
    items: Vec<T>,
}

impl<T> GridView<T> {
    /// A fresh grid is loading until its first fetch completes.
    pub fn new() -> Self {
        Self {
            loading: true,
            items: Vec::new(),
        }
    }

    /// Complete the fetch. A failure renders as an empty grid, not an error.
    pub fn finish<E>(&mut self, result: Result<Vec<T>, E>) {
        self.loading = false;
        self.items = result.unwrap_or_default();
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for GridView<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// State behind a detail page (by id or by private token).
#[derive(Debug)]
pub struct DetailView<T> {
    loading: bool,
    item: Option<T>,
}

impl<T> DetailView<T> {
    pub fn new() -> Self {
        Self {
            loading: true,
            item: None,
        }
    }

    /// Complete the fetch; a failure notifies the banner and leaves the item
    /// unset. Any displayable error will do: the clients' `ApiError` or the
    /// host's transport error.
    pub fn finish<E: Display>(&mut self, result: Result<T, E>, bus: &AlertBus) {
        self.loading = false;
        match result {
            Ok(item) => self.item = Some(item),
            Err(err) => bus.publish(Alert::danger(
                format!("Failed to load: {err}"),
                ALERT_DURATION_MS,
            )),
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }
}

impl<T> Default for DetailView<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Which report a create form produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Posting,
    Sighting,
}

impl ReportKind {
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Posting => "Posting",
            ReportKind::Sighting => "Sighting",
        }
    }
}

/// State behind a create form: the collected values, the submit flag, and
/// the species/breed picker data.
#[derive(Debug)]
pub struct FormView {
    kind: ReportKind,
    pub values: FormValues,
    submitting: bool,
    dog_type_id: Option<i64>,
    cat_type_id: Option<i64>,
    dog_breeds: Vec<String>,
    cat_breeds: Vec<String>,
}

impl FormView {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            values: FormValues::default(),
            submitting: false,
            dog_type_id: None,
            cat_type_id: None,
            dog_breeds: Vec::new(),
            cat_breeds: Vec::new(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Record the fetched species list, remembering which ids are the dog
    /// and cat entries so the breed picker can switch lists.
    pub fn set_pet_types(&mut self, types: &[PetType]) {
        for pet_type in types {
            if pet_type.name == "dog" {
                self.dog_type_id = Some(pet_type.id);
            } else if pet_type.name == "cat" {
                self.cat_type_id = Some(pet_type.id);
            }
        }
    }

    pub fn set_breed_lists(&mut self, dog: Vec<String>, cat: Vec<String>) {
        self.dog_breeds = dog;
        self.cat_breeds = cat;
    }

    /// Choosing a species clears any previously selected breeds.
    pub fn select_pet_type(&mut self, pet_type: &PetType) {
        self.values.pet_type_id = Some(pet_type.id);
        self.values.pet_type = pet_type.name.clone();
        self.values.pet_breeds.clear();
    }

    /// Breed options for the currently selected species: the dog list for
    /// the dog type, the cat list otherwise.
    pub fn breed_options(&self) -> &[String] {
        if self.values.pet_type_id.is_some() && self.values.pet_type_id == self.dog_type_id {
            &self.dog_breeds
        } else {
            &self.cat_breeds
        }
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Complete the submission: success resets the form and announces it,
    /// failure keeps the values so the user can retry.
    pub fn finish_submit<E: Display>(&mut self, result: Result<(), E>, bus: &AlertBus) {
        self.submitting = false;
        match result {
            Ok(()) => {
                bus.publish(Alert::success(
                    format!("new {} added", self.kind.label()),
                    ALERT_DURATION_MS,
                ));
                self.values = FormValues::default();
            }
            Err(err) => bus.publish(Alert::danger(
                format!("Failed to create {}: {err}", self.kind.label()),
                ALERT_DURATION_MS,
            )),
        }
    }
}
