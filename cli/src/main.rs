//! `lostpets` — command-line front-end for the lost-pets reporting service.
//!
//! Thin host around `lostpets_core`: every command builds a request with a
//! core client, executes it over ureq, hands the response back to the core
//! for parsing, and renders the resulting view state. Outcome notifications
//! flow through the core's alert bus to a banner printed on stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lostpets_core::{
    posting_request, sighting_request, AlertBanner, AlertBus, CatBreedClient, DogBreedClient,
    DetailView, FormValues, FormView, GeneralClient, GridView, PostingsClient, ReportKind, Route,
    SightingsClient,
};

mod http;
mod render;

#[derive(Parser, Debug)]
#[command(name = "lostpets", version, about = "Lost pets reporting front-end")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "LOSTPETS_API",
        default_value = "http://localhost:8080",
        help = "Lost-pets API base URL"
    )]
    api: String,
    #[arg(
        long,
        global = true,
        env = "LOSTPETS_CAT_API",
        default_value = "https://api.thecatapi.com",
        help = "Cat breed API base URL"
    )]
    cat_api: String,
    #[arg(
        long,
        global = true,
        env = "LOSTPETS_DOG_API",
        default_value = "https://dog.ceo",
        help = "Dog breed API base URL"
    )]
    dog_api: String,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lost-pet reports
    Postings {
        #[command(subcommand)]
        command: PostingCommands,
    },
    /// Found/seen-pet reports
    Sightings {
        #[command(subcommand)]
        command: SightingCommands,
    },
    /// List the known species
    PetTypes,
    /// List breed display names for a species
    Breeds {
        #[arg(value_enum)]
        species: Species,
    },
    /// Pet picture upload/download
    Picture {
        #[command(subcommand)]
        command: PictureCommands,
    },
    /// Open an application route, e.g. /postings/3 or /sightings/private/<token>
    Open {
        path: String,
    },
}

#[derive(Subcommand, Debug)]
enum PostingCommands {
    List,
    Show { id: i64 },
    Private { token: String },
    Matches { token: String },
    Create(CreateArgs),
}

#[derive(Subcommand, Debug)]
enum SightingCommands {
    List,
    Show { id: i64 },
    Private { token: String },
    Matches { token: String },
    Create(SightingCreateArgs),
}

#[derive(Subcommand, Debug)]
enum PictureCommands {
    Upload { file: PathBuf },
    Download { id: i64, out: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Species {
    Dog,
    Cat,
}

/// The flat form fields shared by both create forms.
#[derive(Args, Debug, Clone)]
struct CreateArgs {
    #[arg(long, default_value = "", help = "Report date (YYYY-MM-DD or RFC 3339)")]
    date: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    pet_name: String,
    #[arg(long, default_value = "")]
    pet_color: String,
    #[arg(long, default_value = "")]
    pet_marks: String,
    #[arg(long, default_value = "")]
    pet_type: String,
    #[arg(long)]
    pet_type_id: Option<i64>,
    #[arg(long)]
    pet_picture_id: Option<i64>,
    #[arg(long = "breed", help = "Breed display name, repeatable")]
    breeds: Vec<String>,
    #[arg(long, default_value = "")]
    tag_shape: String,
    #[arg(long, default_value = "")]
    tag_color: String,
    #[arg(long, default_value = "")]
    tag_text: String,
}

#[derive(Args, Debug, Clone)]
struct SightingCreateArgs {
    #[command(flatten)]
    form: CreateArgs,
    #[arg(long, help = "The pet is in the reporter's custody")]
    in_custody: bool,
}

impl CreateArgs {
    fn into_form_values(self, in_custody: bool) -> FormValues {
        FormValues {
            date: self.date,
            location: self.location,
            in_custody,
            pet_name: self.pet_name,
            pet_color: self.pet_color,
            pet_marks: self.pet_marks,
            pet_type: self.pet_type,
            pet_type_id: self.pet_type_id,
            pet_picture_id: self.pet_picture_id,
            pet_breeds: self.breeds,
            tag_shape: self.tag_shape,
            tag_color: self.tag_color,
            tag_text: self.tag_text,
            ..FormValues::default()
        }
    }
}

struct App {
    api: String,
    cat_api: String,
    dog_api: String,
    json: bool,
    bus: AlertBus,
    banner: AlertBanner,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let bus = AlertBus::new();
    let banner = AlertBanner::new(&bus);
    let mut app = App {
        api: cli.api,
        cat_api: cli.cat_api,
        dog_api: cli.dog_api,
        json: cli.json,
        bus,
        banner,
    };

    match cli.command {
        Commands::Postings { command } => match command {
            PostingCommands::List => app.postings_grid(),
            PostingCommands::Show { id } => app.posting_detail(id),
            PostingCommands::Private { token } => app.posting_private(&token),
            PostingCommands::Matches { token } => app.posting_matches(&token),
            PostingCommands::Create(args) => app.posting_create(args.into_form_values(false)),
        },
        Commands::Sightings { command } => match command {
            SightingCommands::List => app.sightings_grid(),
            SightingCommands::Show { id } => app.sighting_detail(id),
            SightingCommands::Private { token } => app.sighting_private(&token),
            SightingCommands::Matches { token } => app.sighting_matches(&token),
            SightingCommands::Create(args) => {
                let in_custody = args.in_custody;
                app.sighting_create(args.form.into_form_values(in_custody))
            }
        },
        Commands::PetTypes => app.pet_types(),
        Commands::Breeds { species } => app.breeds(species),
        Commands::Picture { command } => match command {
            PictureCommands::Upload { file } => app.picture_upload(&file),
            PictureCommands::Download { id, out } => app.picture_download(id, &out),
        },
        Commands::Open { path } => app.open(&path),
    }
}

impl App {
    fn postings_grid(&mut self) -> Result<()> {
        let client = PostingsClient::new(&self.api);
        let mut grid = GridView::new();
        let result = http::execute(client.build_list())
            .and_then(|resp| client.parse_list(resp).map_err(Into::into));
        grid.finish(result);
        if self.json {
            render::print_json(grid.items())
        } else {
            render::print_postings(grid.items());
            Ok(())
        }
    }

    fn posting_detail(&mut self, id: i64) -> Result<()> {
        let client = PostingsClient::new(&self.api);
        let result = http::execute(client.build_get(id))
            .and_then(|resp| client.parse_get(resp).map_err(Into::into));
        self.show_detail(result)
    }

    fn posting_private(&mut self, token: &str) -> Result<()> {
        let client = PostingsClient::new(&self.api);
        let result = http::execute(client.build_get_private(token))
            .and_then(|resp| client.parse_get_private(resp).map_err(Into::into));
        self.show_detail(result)
    }

    fn posting_matches(&mut self, token: &str) -> Result<()> {
        let client = PostingsClient::new(&self.api);
        let mut grid = GridView::new();
        let result = http::execute(client.build_matches(token))
            .and_then(|resp| client.parse_matches(resp).map_err(Into::into));
        grid.finish(result);
        if self.json {
            render::print_json(grid.items())
        } else {
            render::print_sightings(grid.items());
            Ok(())
        }
    }

    fn posting_create(&mut self, values: FormValues) -> Result<()> {
        let client = PostingsClient::new(&self.api);
        let mut form = FormView::new(ReportKind::Posting);
        form.values = values;
        form.begin_submit();
        let request = posting_request(&form.values);
        let result = client
            .build_create(&request)
            .map_err(anyhow::Error::from)
            .and_then(http::execute)
            .and_then(|resp| client.parse_create(resp).map_err(Into::into));
        form.finish_submit(result, &self.bus);
        render::show_banner(&mut self.banner);
        Ok(())
    }

    fn sightings_grid(&mut self) -> Result<()> {
        let client = SightingsClient::new(&self.api);
        let mut grid = GridView::new();
        let result = http::execute(client.build_list())
            .and_then(|resp| client.parse_list(resp).map_err(Into::into));
        grid.finish(result);
        if self.json {
            render::print_json(grid.items())
        } else {
            render::print_sightings(grid.items());
            Ok(())
        }
    }

    fn sighting_detail(&mut self, id: i64) -> Result<()> {
        let client = SightingsClient::new(&self.api);
        let result = http::execute(client.build_get(id))
            .and_then(|resp| client.parse_get(resp).map_err(Into::into));
        self.show_sighting_detail(result)
    }

    fn sighting_private(&mut self, token: &str) -> Result<()> {
        let client = SightingsClient::new(&self.api);
        let result = http::execute(client.build_get_private(token))
            .and_then(|resp| client.parse_get_private(resp).map_err(Into::into));
        self.show_sighting_detail(result)
    }

    fn sighting_matches(&mut self, token: &str) -> Result<()> {
        let client = SightingsClient::new(&self.api);
        let mut grid = GridView::new();
        let result = http::execute(client.build_matches(token))
            .and_then(|resp| client.parse_matches(resp).map_err(Into::into));
        grid.finish(result);
        if self.json {
            render::print_json(grid.items())
        } else {
            render::print_postings(grid.items());
            Ok(())
        }
    }

    fn sighting_create(&mut self, values: FormValues) -> Result<()> {
        let client = SightingsClient::new(&self.api);
        let mut form = FormView::new(ReportKind::Sighting);
        form.values = values;
        form.begin_submit();
        let request = sighting_request(&form.values);
        let result = client
            .build_create(&request)
            .map_err(anyhow::Error::from)
            .and_then(http::execute)
            .and_then(|resp| client.parse_create(resp).map_err(Into::into));
        form.finish_submit(result, &self.bus);
        render::show_banner(&mut self.banner);
        Ok(())
    }

    fn pet_types(&mut self) -> Result<()> {
        let client = GeneralClient::new(&self.api);
        let types = http::execute(client.build_pet_types())
            .and_then(|resp| client.parse_pet_types(resp).map_err(Into::into))?;
        if self.json {
            render::print_json(&types)
        } else {
            render::print_pet_types(&types);
            Ok(())
        }
    }

    fn breeds(&mut self, species: Species) -> Result<()> {
        let breeds = match species {
            Species::Cat => {
                let client = CatBreedClient::new(&self.cat_api);
                http::execute(client.build_breeds())
                    .and_then(|resp| client.parse_breeds(resp).map_err(Into::into))?
            }
            Species::Dog => {
                let client = DogBreedClient::new(&self.dog_api);
                http::execute(client.build_breeds())
                    .and_then(|resp| client.parse_breeds(resp).map_err(Into::into))?
            }
        };
        if self.json {
            render::print_json(&breeds)
        } else {
            render::print_breeds(&breeds);
            Ok(())
        }
    }

    fn picture_upload(&mut self, file: &PathBuf) -> Result<()> {
        let content = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("picture")
            .to_string();
        let client = GeneralClient::new(&self.api);
        http::execute(client.build_upload_picture(&file_name, &content))
            .and_then(|resp| client.parse_upload_picture(resp).map_err(Into::into))?;
        println!("uploaded {file_name}");
        Ok(())
    }

    fn picture_download(&mut self, id: i64, out: &PathBuf) -> Result<()> {
        let client = GeneralClient::new(&self.api);
        let content = http::execute(client.build_download_picture(id))
            .and_then(|resp| client.parse_download_picture(resp).map_err(Into::into))?;
        fs::write(out, &content).with_context(|| format!("writing {}", out.display()))?;
        println!("downloaded picture {id} ({} bytes)", content.len());
        Ok(())
    }

    /// Dispatch a client-side route the way the browser app would.
    fn open(&mut self, path: &str) -> Result<()> {
        let Some(route) = Route::parse(path) else {
            bail!("unknown route: {path}");
        };
        match route {
            Route::Home => {
                println!("routes: /postings /postings/create /postings/<id> /postings/private/<token>");
                println!("        /sightings /sightings/create /sightings/<id> /sightings/private/<token>");
                Ok(())
            }
            Route::PostingsGrid => self.postings_grid(),
            Route::PostingDetail(id) => self.posting_detail(id),
            Route::PostingPrivate(token) => self.posting_private(&token),
            Route::PostingCreate => {
                println!("use `lostpets postings create --help` for the create form");
                Ok(())
            }
            Route::SightingsGrid => self.sightings_grid(),
            Route::SightingDetail(id) => self.sighting_detail(id),
            Route::SightingPrivate(token) => self.sighting_private(&token),
            Route::SightingCreate => {
                println!("use `lostpets sightings create --help` for the create form");
                Ok(())
            }
        }
    }

    fn show_detail(&mut self, result: Result<lostpets_core::Posting>) -> Result<()> {
        let mut view = DetailView::new();
        view.finish(result, &self.bus);
        if let Some(posting) = view.item() {
            if self.json {
                render::print_json(posting)?;
            } else {
                render::print_posting(posting);
            }
        }
        render::show_banner(&mut self.banner);
        Ok(())
    }

    fn show_sighting_detail(&mut self, result: Result<lostpets_core::Sighting>) -> Result<()> {
        let mut view = DetailView::new();
        view.finish(result, &self.bus);
        if let Some(sighting) = view.item() {
            if self.json {
                render::print_json(sighting)?;
            } else {
                render::print_sighting(sighting);
            }
        }
        render::show_banner(&mut self.banner);
        Ok(())
    }
}
