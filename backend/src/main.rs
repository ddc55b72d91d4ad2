//! Tunestats CLI - Export Spotify playlist audio features as CSV
//!
//! # Main Commands
//!
//! ```bash
//! tunestats export <link> --token <token>    # Fetch a playlist and write <name>.csv
//! tunestats serve                            # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! tunestats resolve <link>                   # Print the playlist id of a link
//! tunestats reference features.csv           # Inspect a reference table
//! tunestats render playlist.json             # Export from a saved API response
//! ```
//!
//! `SPOTIFY_ACCESS_TOKEN`, `TUNESTATS_FEATURES` and `TUNESTATS_API_BASE` may be
//! set in the environment or a `.env` file.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tunestats::{
    load_reference_file, load_reference_or_empty, write_export, BackendError, BackendResult,
    Destination, SpotifyClient, SPOTIFY_API_BASE,
};
use tunestats::server::{start_server, AppState, ServerOptions};
use tunestats_core::{
    build_export, export_playlist, parse_playlist_id, Playlist, PlaylistExport, RowStyle,
    FEATURE_COLUMNS,
};
use tunestats_core::models::{ARTIST_NAME, TRACK_ID, TRACK_NAME};

#[derive(Parser)]
#[command(name = "tunestats")]
#[command(about = "Export Spotify playlist audio features as CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a playlist and export its audio features
    Export {
        /// Spotify playlist link (https://open.spotify.com/playlist/...)
        link: String,

        /// Spotify Web API access token
        #[arg(short, long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
        token: String,

        /// Reference table of audio features
        #[arg(short, long, env = "TUNESTATS_FEATURES")]
        features: Option<PathBuf>,

        /// Output file or directory (default: ./<playlist name>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Use plain comma-separated rows with quoting
        #[arg(long)]
        normalized: bool,

        /// Web API base URL
        #[arg(long, env = "TUNESTATS_API_BASE", default_value = SPOTIFY_API_BASE)]
        api_base: String,
    },

    /// Print the playlist id of a link
    Resolve {
        link: String,
    },

    /// Load a reference table and show what it contains
    Reference {
        /// Reference CSV file
        input: PathBuf,
    },

    /// Export from a saved playlist API response (no network)
    Render {
        /// JSON body of GET /v1/playlists/{id}
        input: PathBuf,

        /// Reference table of audio features
        #[arg(short, long, env = "TUNESTATS_FEATURES")]
        features: Option<PathBuf>,

        /// Output file or directory (default: ./<playlist name>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Use plain comma-separated rows with quoting
        #[arg(long)]
        normalized: bool,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Reference table of audio features
        #[arg(short, long, env = "TUNESTATS_FEATURES")]
        features: Option<PathBuf>,

        /// Built frontend to serve (e.g. frontend/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Web API base URL
        #[arg(long, env = "TUNESTATS_API_BASE", default_value = SPOTIFY_API_BASE)]
        api_base: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Export {
            link,
            token,
            features,
            output,
            stdout,
            normalized,
            api_base,
        } => cmd_export(
            &link,
            &token,
            features.as_deref(),
            Destination::from_args(output, stdout),
            row_style(normalized),
            &api_base,
        )
        .await
        .map_err(Into::into),

        Commands::Resolve { link } => cmd_resolve(&link).map_err(Into::into),

        Commands::Reference { input } => cmd_reference(&input).map_err(Into::into),

        Commands::Render {
            input,
            features,
            output,
            stdout,
            normalized,
        } => cmd_render(
            &input,
            features.as_deref(),
            Destination::from_args(output, stdout),
            row_style(normalized),
        )
        .map_err(Into::into),

        Commands::Serve {
            port,
            features,
            static_dir,
            api_base,
        } => cmd_serve(port, features, static_dir, &api_base).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn row_style(normalized: bool) -> RowStyle {
    if normalized {
        RowStyle::Normalized
    } else {
        RowStyle::Legacy
    }
}

async fn cmd_export(
    link: &str,
    token: &str,
    features: Option<&Path>,
    destination: Destination,
    style: RowStyle,
    api_base: &str,
) -> BackendResult<()> {
    let table = load_reference_or_empty(features);
    eprintln!("📚 Reference table: {} rows", table.len());

    let client = SpotifyClient::with_api_base(api_base);
    let export = export_playlist(&client, &table, link, token, style).await?;

    finish(&export, &destination)
}

fn cmd_resolve(link: &str) -> BackendResult<()> {
    let id = parse_playlist_id(link).ok_or_else(|| BackendError::InvalidLink(link.to_string()))?;
    println!("{}", id);
    Ok(())
}

fn cmd_reference(input: &Path) -> BackendResult<()> {
    eprintln!("📄 Loading reference table: {}", input.display());

    let table = load_reference_file(input)?;
    eprintln!("   Columns: {}", table.headers().join(", "));
    eprintln!("✅ Loaded {} rows", table.len());

    let expected = [TRACK_ID, TRACK_NAME, ARTIST_NAME]
        .into_iter()
        .chain(FEATURE_COLUMNS);
    let missing: Vec<&str> = expected
        .filter(|col| !table.headers().iter().any(|h| h == col))
        .collect();
    if !missing.is_empty() {
        eprintln!("⚠️  Missing columns: {}", missing.join(", "));
    }

    let incomplete = table
        .iter()
        .filter(|r| r.len() < table.headers().len())
        .count();
    if incomplete > 0 {
        eprintln!("⚠️  {} rows have fewer fields than the header", incomplete);
    }

    Ok(())
}

fn cmd_render(
    input: &Path,
    features: Option<&Path>,
    destination: Destination,
    style: RowStyle,
) -> BackendResult<()> {
    eprintln!("📄 Rendering: {}", input.display());

    let playlist = Playlist::from_json(&fs::read_to_string(input)?)?;
    let table = load_reference_or_empty(features);
    eprintln!("📚 Reference table: {} rows", table.len());

    let playlist_id = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("playlist");
    let export = build_export(playlist_id, &playlist, &table, style)?;

    finish(&export, &destination)
}

/// Print the match summary and write the document.
fn finish(export: &PlaylistExport, destination: &Destination) -> BackendResult<()> {
    let report = &export.report;
    eprintln!("🎵 Playlist: {}", export.playlist_name);
    eprintln!(
        "   Matched {} of {} tracks ({:.0}%)",
        report.matched,
        report.total,
        report.match_rate() * 100.0
    );
    for name in report.unmatched.iter().take(5) {
        eprintln!("   - no features: {}", name);
    }
    if report.unmatched.len() > 5 {
        eprintln!("   ... +{} more", report.unmatched.len() - 5);
    }

    if let Some(path) = write_export(export, destination)? {
        eprintln!("💾 Output written to: {}", path.display());
    }

    Ok(())
}

async fn cmd_serve(
    port: u16,
    features: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    api_base: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_reference_or_empty(features.as_deref());
    let state = AppState::new(table, SpotifyClient::with_api_base(api_base));

    let options = ServerOptions {
        port,
        static_dir,
        features,
    };

    start_server(options, state).await?;
    Ok(())
}
