use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use clap::{Arg, ArgMatches, Command};
use image_storage::config::{MAX_FILE_SIZE_ENV, UPLOAD_PATH_ENV};
use image_storage::UploadConfig;

/// Environment variable holding the HS256 secret for admin tokens
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Image upload service settings
    pub upload: UploadConfig,
    /// Secret for admin bearer tokens; None disables the admin guard
    pub jwt_secret: Option<String>,
}

impl ServerConfig {
    /// Load configuration.
    /// Priority: command-line args > environment variables > defaults
    pub fn load() -> Result<Self, std::io::Error> {
        Self::from_matches(&Self::command().get_matches())
    }

    pub fn command() -> Command {
        Command::new("server")
            .about("Event image upload server")
            .arg(
                Arg::new("upload-path")
                    .long("upload-path")
                    .value_name("DIR")
                    .help("Root directory for uploaded images (default: uploads, or UPLOAD_PATH env var)"),
            )
            .arg(
                Arg::new("max-file-size")
                    .long("max-file-size")
                    .value_name("BYTES")
                    .help("Maximum image size in bytes (default: 5242880, or MAX_FILE_SIZE_BYTES env var)"),
            )
            .arg(
                Arg::new("jwt-secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("HS256 secret for admin tokens (can also use JWT_SECRET env var)"),
            )
            .arg(
                Arg::new("port")
                    .long("port")
                    .value_name("PORT")
                    .help("Server port (default: 8080, or SERVER_PORT env var)"),
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("HOST")
                    .help("Server host (default: 0.0.0.0, or SERVER_HOST env var)"),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self, std::io::Error> {
        let arg = |name: &str, env: &str| {
            matches
                .get_one::<String>(name)
                .cloned()
                .or_else(|| std::env::var(env).ok())
                .filter(|v| !v.trim().is_empty())
        };

        let max_file_size = arg("max-file-size", MAX_FILE_SIZE_ENV);
        if let Some(value) = &max_file_size {
            value.trim().parse::<u64>().map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid maximum file size: {}", value),
                )
            })?;
        }
        let upload = UploadConfig::from_values(
            max_file_size.as_deref(),
            arg("upload-path", UPLOAD_PATH_ENV).as_deref(),
        );

        let host = arg("host", "SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port_str = arg("port", "SERVER_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_str.trim().parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid port number: {}", port_str),
            )
        })?;

        Ok(ServerConfig {
            host,
            port,
            upload,
            jwt_secret: arg("jwt-secret", JWT_SECRET_ENV),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
