//! Event image upload client

mod constants;
mod delete;
mod logger;
mod upload;

use clap::{Parser, Subcommand};
use constants::{DEFAULT_SERVER_URL, TOKEN_ENV};
use std::path::PathBuf;
use upload::ImageUploader;

#[derive(Parser)]
#[command(name = "client")]
#[command(about = "Event image upload client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more images
    Upload {
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        server: String,
        /// Admin bearer token
        #[arg(short, long, env = TOKEN_ENV)]
        token: Option<String>,
        /// Print the upload results as JSON instead of one line per file
        #[arg(long)]
        json: bool,
    },
    /// Delete an uploaded image by its URL
    Delete {
        /// Image URL returned by an upload, e.g. /uploads/events/<name>.png
        image_url: String,
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        server: String,
        /// Admin bearer token
        #[arg(short, long, env = TOKEN_ENV)]
        token: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            server,
            token,
            json,
        } => {
            let uploader = ImageUploader::new(server, token);
            let results = uploader.upload(&files)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                upload::print_results(&files, &results);
            }

            let failed = results.iter().filter(|r| !r.success).count();
            if failed > 0 {
                anyhow::bail!("{} of {} uploads failed", failed, results.len());
            }
        }
        Commands::Delete {
            image_url,
            server,
            token,
        } => {
            if delete::delete_image(&server, token.as_deref(), &image_url)? {
                println!("Deleted {}", image_url);
            } else {
                anyhow::bail!("Image not found: {}", image_url);
            }
        }
    }

    Ok(())
}
