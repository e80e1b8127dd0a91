use crate::config::env::{self, EnvKey};

pub const DEFAULT_MAX_POSTER_SIZE: usize = 1_048_576;
pub const DEFAULT_MAX_REQUEST_BODY: usize = 8 * 1024 * 1024;
pub const DEFAULT_POSTER_EXTENSIONS: &[&str] = &[".jpg", ".png"];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub max_request_body: usize,
    pub poster: PosterPolicy,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        let extensions = env::split_list(&env::get_or(
            EnvKey::AllowedPosterExtensions,
            &DEFAULT_POSTER_EXTENSIONS.join(","),
        ));

        Ok(Self {
            server_host: env::get_or(EnvKey::ServerHost, "0.0.0.0"),
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            db_max_connections: env::get_parsed(EnvKey::DbMaxConnections, 20),
            max_request_body: env::get_parsed(EnvKey::MaxRequestBody, DEFAULT_MAX_REQUEST_BODY),
            poster: PosterPolicy::new(extensions, env::get_parsed(EnvKey::MaxPosterSize, DEFAULT_MAX_POSTER_SIZE)),
        })
    }

    /// Configuration backed by the in-memory store, used by tests and local runs.
    pub fn in_memory() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            database_url: "memory://".to_string(),
            db_max_connections: 1,
            max_request_body: DEFAULT_MAX_REQUEST_BODY,
            poster: PosterPolicy::default(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }
}

/// Rules a poster upload has to satisfy.
#[derive(Clone, Debug)]
pub struct PosterPolicy {
    /// Lower-case extensions including the leading dot, e.g. `.jpg`.
    pub allowed_extensions: Vec<String>,
    pub max_size: usize,
}

impl PosterPolicy {
    pub fn new<I, S>(extensions: I, max_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = extensions
            .into_iter()
            .map(|e| {
                let e = e.as_ref().trim().to_lowercase();
                if e.starts_with('.') { e } else { format!(".{e}") }
            })
            .collect();

        Self {
            allowed_extensions,
            max_size,
        }
    }
}

impl Default for PosterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POSTER_EXTENSIONS.iter().copied(), DEFAULT_MAX_POSTER_SIZE)
    }
}
