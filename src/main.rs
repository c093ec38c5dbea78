//! moviedex - command line front-end
//!
//! Needs `MOVIEDEX_API_KEY` for every command that talks to the API.

use clap::{Parser, Subcommand};
use moviedex::config::{default_cache_dir, default_data_dir, DEFAULT_REGION};
use moviedex::{
    refresh_coming_soon, refresh_popular, ApiConfig, Category, FavoritesStore, ImageCache,
    ListStore, MovieApi, TitleDetail, TitleList,
};
use serde::Serialize;
use std::path::PathBuf;

/// Movie and actor metadata with a local poster cache and favorites
#[derive(Parser, Debug)]
#[command(name = "moviedex")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the favorites and title-list database
    #[arg(long, env = "MOVIEDEX_DATA_DIR", default_value_os_t = default_data_dir())]
    data_dir: PathBuf,

    /// Directory for cached poster images
    #[arg(long, env = "MOVIEDEX_CACHE_DIR", default_value_os_t = default_cache_dir())]
    cache_dir: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search titles and people
    Search { query: String },
    /// Most popular movies for a region (falls back to the stored list)
    Popular {
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
    },
    /// Upcoming releases (falls back to the stored list)
    ComingSoon,
    /// Detail records for several titles at once
    Meta {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Detail record for one title
    Overview { id: String },
    /// Top-billed cast ids for a title
    Cast { id: String },
    /// All credits for an actor
    Filmography { id: String },
    /// Download (or reuse) a poster and print its local path
    Poster { url: String, id: String },
    /// Manage favorite actors and movies
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Delete every stored list and favorite
    Reset,
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
    /// Add or remove an id
    Toggle { category: Category, id: String },
    /// Check whether an id is a favorite
    Check { category: Category, id: String },
    /// List favorites in a category
    List { category: Category },
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=moviedex=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{} ({:?})", e, e.kind());
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn api() -> moviedex::Result<MovieApi> {
    Ok(MovieApi::new(ApiConfig::from_env()?))
}

async fn run(args: Args) -> moviedex::Result<()> {
    let json = args.json;

    match args.command {
        Command::Search { query } => {
            let hits = api()?.search(&query).await?;
            if json {
                return print_json(&hits);
            }
            for hit in hits {
                let year = hit.year.map(|y| y.to_string()).unwrap_or_default();
                println!("{}\t{}\t{}\t{}", hit.id, hit.title, hit.title_type, year);
            }
        }
        Command::Popular { region } => {
            let store = ListStore::open_in(&args.data_dir)?;
            let list = refresh_popular(&api()?, &store, &region).await?;
            print_list(&list, json)?;
        }
        Command::ComingSoon => {
            let store = ListStore::open_in(&args.data_dir)?;
            let list = refresh_coming_soon(&api()?, &store).await?;
            print_list(&list, json)?;
        }
        Command::Meta { ids } => {
            let details = api()?.title_meta_data(&ids).await?;
            if json {
                return print_json(&details);
            }
            for detail in &details {
                print_detail(detail);
            }
        }
        Command::Overview { id } => {
            let detail = api()?.title_overview(&id).await?;
            if json {
                return print_json(&detail);
            }
            print_detail(&detail);
        }
        Command::Cast { id } => {
            let cast = api()?.top_cast(&id).await?;
            if json {
                return print_json(&cast);
            }
            for actor_id in cast {
                println!("{}", actor_id);
            }
        }
        Command::Filmography { id } => {
            let films = api()?.actor_filmography(&id).await?;
            if json {
                return print_json(&films);
            }
            println!("{} ({}) - {}", films.actor.name, films.actor.id, films.film_count_label());
            for entry in &films.entries {
                let year = entry.year.map(|y| y.to_string()).unwrap_or_default();
                println!(
                    "  {}\t{}\t{}\t{}",
                    year,
                    entry.category,
                    entry.title,
                    entry.characters.join(" / ")
                );
            }
        }
        Command::Poster { url, id } => {
            let cache = ImageCache::new(&args.cache_dir);
            let path = cache.get_or_fetch(&api()?, &url, &id).await?;
            println!("{}", path.display());
        }
        Command::Favorite { action } => {
            let store = ListStore::open_in(&args.data_dir)?;
            let favorites = FavoritesStore::new(&store);
            match action {
                FavoriteAction::Toggle { category, id } => {
                    let now = favorites.toggle(&id, category)?;
                    println!("{}", if now { "added" } else { "removed" });
                }
                FavoriteAction::Check { category, id } => {
                    println!("{}", favorites.is_favorite(&id, category)?);
                }
                FavoriteAction::List { category } => {
                    let ids = favorites.list(category)?;
                    if json {
                        return print_json(&ids);
                    }
                    for id in ids {
                        println!("{}", id);
                    }
                }
            }
        }
        Command::Reset => {
            ListStore::open_in(&args.data_dir)?.clear()?;
            println!("cleared");
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> moviedex::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list(list: &TitleList, json: bool) -> moviedex::Result<()> {
    if let Some(cause) = list.refresh_error() {
        if cause.is_rate_limited() {
            eprintln!("(showing stored list, API rate limit reached)");
        } else {
            eprintln!("(showing stored list, refresh failed: {} [{:?}])", cause, cause.kind());
        }
    }
    if json {
        return print_json(&list.ids);
    }
    for id in &list.ids {
        println!("{}", id);
    }
    Ok(())
}

fn print_detail(detail: &TitleDetail) {
    println!(
        "{}\t{} ({})\t{}\t{}\t{} ({} votes)",
        detail.id(),
        detail.title(),
        detail.release_year(),
        detail.runtime_label(),
        detail.genre_line(),
        detail.rating_label(),
        detail.rating_count_label()
    );
}
