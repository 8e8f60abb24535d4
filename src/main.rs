mod export;
mod fetcher;
mod info;
mod merge;
mod transcript;
mod vtt;

use clap::{Parser, Subcommand};

const DEFAULT_SUB_LANG: &str = "en";

#[derive(Parser)]
#[command(name = "ytglance", about = "Fetch YouTube video info and clean auto-caption transcripts")]
struct Cli {
    /// debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show video metadata and its deduplicated transcript
    Info {
        /// YouTube URL or video ID
        url: String,
        /// Caption language code (e.g. en, it, ar)
        #[arg(long, default_value = DEFAULT_SUB_LANG)]
        lang: String,
    },

    /// Print the deduplicated transcript only
    Transcript {
        /// YouTube URL or video ID
        url: String,
        /// Caption language code (e.g. en, it, ar)
        #[arg(long, default_value = DEFAULT_SUB_LANG)]
        lang: String,
    },

    /// Clean a local caption file
    Clean {
        /// Path to a .vtt file
        file: String,
    },

    /// Export the deduplicated transcript as table + CSV
    Export {
        /// YouTube URL or video ID
        url: String,
        /// Caption language code (e.g. en, it, ar)
        #[arg(long, default_value = DEFAULT_SUB_LANG)]
        lang: String,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match cli.command {
        Command::Info { url, lang } => {
            eprintln!("[1/2] fetching video info...");
            let video = match fetcher::fetch_video_info(&url) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("error: {e}");
                    return;
                }
            };

            eprintln!("[2/2] fetching captions...");
            let transcript = fetch_transcript(&url, &lang);

            println!("Title: {}", video.title);
            println!("Channel: {}", video.uploader.as_deref().unwrap_or("unknown"));
            println!("Duration: {}", format_duration_field(video.duration));
            println!("Published: {}", format_date_field(video.upload_date.as_deref()));
            println!();
            println!("Transcript:");
            println!("{}", transcript.as_deref().unwrap_or("Transcript not available"));
        }

        Command::Transcript { url, lang } => match fetch_transcript(&url, &lang) {
            Some(text) => println!("{text}"),
            None => println!("transcript not available"),
        },

        Command::Clean { file } => match std::fs::read_to_string(&file) {
            Ok(markup) => match transcript::clean(&markup) {
                Some(text) => println!("{text}"),
                None => println!("transcript not available"),
            },
            Err(e) => eprintln!("error: {file}: {e}"),
        },

        Command::Export { url, lang, output } => {
            let video_id = match fetcher::extract_video_id(&url) {
                Ok(id) => id,
                Err(e) => {
                    eprintln!("error: {e}");
                    return;
                }
            };

            let segments = match fetcher::fetch_caption_markup(&url, &lang) {
                Ok(Some(markup)) => transcript::collapse(vtt::parse(&markup)),
                Ok(None) => Vec::new(),
                Err(e) => {
                    eprintln!("error: {e}");
                    return;
                }
            };

            if segments.is_empty() {
                println!("transcript not available");
                return;
            }

            println!("{}", export::format_table(&video_id, &segments));
            println!("{} segment(s)", segments.len());

            if let Some(path) = output {
                match export::write_csv(&path, &segments) {
                    Ok(()) => println!("written to {path}"),
                    Err(e) => eprintln!("csv error: {e}"),
                }
            }
        }
    }
}

/// Fetch and clean captions. Retrieval failures degrade to "no transcript"
/// instead of aborting the surrounding command.
fn fetch_transcript(url: &str, lang: &str) -> Option<String> {
    match fetcher::fetch_caption_markup(url, lang) {
        Ok(Some(markup)) => transcript::clean(&markup),
        Ok(None) => None,
        Err(e) => {
            log::warn!("caption fetch failed: {e}");
            None
        }
    }
}

fn format_duration_field(duration: Option<f64>) -> String {
    match duration {
        Some(secs) => info::format_duration(secs as u64),
        None => "unknown".to_string(),
    }
}

fn format_date_field(date: Option<&str>) -> String {
    match date {
        Some(d) => info::format_upload_date(d),
        None => "unknown".to_string(),
    }
}
