//! Text rendering for grids, detail pages and the alert banner.

use std::time::{SystemTime, UNIX_EPOCH};

use lostpets_core::{AlertBanner, AlertKind, Pet, PetType, Posting, Sighting};

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn kind_label(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Info => "info",
        AlertKind::Warning => "warning",
        AlertKind::Success => "success",
        AlertKind::Danger => "danger",
    }
}

/// Drive the banner with the wall clock and print whatever it shows. The
/// banner goes to stderr so it never mixes with machine-readable output.
pub fn show_banner(banner: &mut AlertBanner) {
    banner.poll(now_ms());
    if banner.visible() {
        if let Some(alert) = banner.current() {
            eprintln!("[{}] {}", kind_label(alert.kind), alert.message);
        }
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn breeds_cell(pet: &Pet) -> String {
    if pet.breeds.is_empty() {
        "-".to_string()
    } else {
        pet.breeds.join(", ")
    }
}

pub fn print_postings(postings: &[Posting]) {
    println!(
        "{:<6} {:<26} {:<20} {:<12} {:<8} BREEDS",
        "ID", "DATE", "LOCATION", "PET", "TYPE"
    );
    for posting in postings {
        println!(
            "{:<6} {:<26} {:<20} {:<12} {:<8} {}",
            posting.id,
            posting.date,
            posting.location,
            posting.pet.name,
            posting.pet.type_name,
            breeds_cell(&posting.pet),
        );
    }
    println!("({} postings)", postings.len());
}

pub fn print_sightings(sightings: &[Sighting]) {
    println!(
        "{:<6} {:<26} {:<20} {:<12} {:<8} {:<8} BREEDS",
        "ID", "DATE", "LOCATION", "PET", "TYPE", "CUSTODY"
    );
    for sighting in sightings {
        println!(
            "{:<6} {:<26} {:<20} {:<12} {:<8} {:<8} {}",
            sighting.id,
            sighting.date,
            sighting.location,
            sighting.pet.name,
            sighting.pet.type_name,
            if sighting.in_custody { "yes" } else { "no" },
            breeds_cell(&sighting.pet),
        );
    }
    println!("({} sightings)", sightings.len());
}

fn print_pet(pet: &Pet) {
    println!("  pet:      {} ({})", pet.name, pet.type_name);
    if !pet.color.is_empty() {
        println!("  color:    {}", pet.color);
    }
    if !pet.marks.is_empty() {
        println!("  marks:    {}", pet.marks);
    }
    if !pet.breeds.is_empty() {
        println!("  breeds:   {}", pet.breeds.join(", "));
    }
    if let Some(picture_id) = pet.picture_id {
        println!("  picture:  {picture_id}");
    }
    let tag = &pet.tag;
    if !tag.shape.is_empty() || !tag.color.is_empty() || !tag.text.is_empty() {
        println!("  tag:      {} {} {}", tag.shape, tag.color, tag.text);
    }
}

pub fn print_posting(posting: &Posting) {
    println!("posting {}", posting.id);
    println!("  date:     {}", posting.date);
    println!("  location: {}", posting.location);
    print_pet(&posting.pet);
}

pub fn print_sighting(sighting: &Sighting) {
    println!("sighting {}", sighting.id);
    println!("  date:     {}", sighting.date);
    println!("  location: {}", sighting.location);
    println!(
        "  custody:  {}",
        if sighting.in_custody { "yes" } else { "no" }
    );
    print_pet(&sighting.pet);
}

pub fn print_pet_types(types: &[PetType]) {
    for pet_type in types {
        println!("{:<4} {}", pet_type.id, pet_type.name);
    }
}

pub fn print_breeds(breeds: &[String]) {
    for breed in breeds {
        println!("{breed}");
    }
}
