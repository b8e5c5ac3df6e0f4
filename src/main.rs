//! `spiewnik` command line: print, transpose and search songbook files.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::*;
use spiewnik::{
    filter_songs, load_library, load_song, render_song, slugify_title, to_json, to_song_source,
    to_text, ChordLayout, Config, RenderOptions, SongQuery, Transposition, ViewMode,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spiewnik")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a song sheet
    Show {
        /// Song file
        file: PathBuf,

        /// Transpose by this many semitones (-12..=12)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        transpose: i32,

        /// lyrics, both or chords
        #[arg(short, long)]
        mode: Option<ViewMode>,

        /// above or inline
        #[arg(short, long)]
        layout: Option<ChordLayout>,

        /// Print only this section (1-based)
        #[arg(short, long)]
        section: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[arg(long)]
        no_color: bool,
    },

    /// Write a song file with its chords transposed
    Transpose {
        file: PathBuf,

        #[arg(short, long, allow_hyphen_values = true)]
        transpose: i32,
    },

    /// List songs in a directory
    List {
        dir: PathBuf,

        /// Title prefix
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long, default_value_t = 200)]
        take: usize,
    },

    /// Print the id derived from a title
    Slug { title: String },
}

/// `SPIEWNIK_LOG` > `RUST_LOG` > `warn`
fn init_logging() {
    let filter = std::env::var("SPIEWNIK_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn clamp_steps(steps: i32) -> i32 {
    let clamped = Transposition::new(steps).steps();
    if clamped != steps {
        tracing::warn!(requested = steps, used = clamped, "transposition out of range");
    }
    clamped
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            file,
            transpose,
            mode,
            layout,
            section,
            json,
            no_color,
        } => {
            let config = Config::load().context("Failed to load config")?;
            let song = load_song(&file)?;

            let section = match section {
                Some(0) => bail!("Sections are numbered from 1"),
                Some(n) if n > song.sections.len() => bail!(
                    "'{}' has {} section(s), not {}",
                    song.title,
                    song.sections.len(),
                    n
                ),
                Some(n) => Some(n - 1),
                None => None,
            };

            let options = RenderOptions {
                steps: clamp_steps(transpose),
                mode: mode.unwrap_or(config.mode),
                layout: layout.unwrap_or(config.layout),
                section,
            };
            let rendered = render_song(&song, &options);

            if json {
                println!("{}", to_json(&rendered)?);
            } else {
                print!("{}", to_text(&rendered, config.color && !no_color));
            }
        }
        Commands::Transpose { file, transpose } => {
            let song = load_song(&file)?;
            if !song.detects_chords() {
                eprintln!("{} '{}' has no chords to transpose", "!".yellow(), song.title);
            }
            print!("{}", to_song_source(&song, clamp_steps(transpose))?);
        }
        Commands::List {
            dir,
            query,
            category,
            take,
        } => {
            let songs = load_library(&dir)?;
            let query = SongQuery {
                text: query,
                category,
                take,
            };
            let found = filter_songs(&songs, &query);

            for song in &found {
                let categories = if song.categories.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", song.categories.join(", "))
                };
                println!("{}  {}{}", song.id.cyan(), song.title, categories.dimmed());
            }
            eprintln!("{} {} of {} song(s)", "✓".green(), found.len(), songs.len());
        }
        Commands::Slug { title } => {
            let slug = slugify_title(&title);
            if slug.is_empty() {
                bail!("No id can be derived from '{}'", title);
            }
            println!("{}", slug);
        }
    }

    Ok(())
}
