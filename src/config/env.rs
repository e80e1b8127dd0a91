use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerHost,
    ServerPort,
    DatabaseUrl,
    DbMaxConnections,
    MaxPosterSize,
    AllowedPosterExtensions,
    MaxRequestBody,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerHost => "APP_HOST",
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::DbMaxConnections => "DB_MAX_CONNECTIONS",
            EnvKey::MaxPosterSize => "MAX_POSTER_SIZE",
            EnvKey::AllowedPosterExtensions => "ALLOWED_POSTER_EXTENSIONS",
            EnvKey::MaxRequestBody => "MAX_REQUEST_BODY",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Splits a comma separated value, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_skips_blanks() {
        assert_eq!(split_list(".jpg, .png,,"), vec![".jpg", ".png"]);
        assert!(split_list("  ").is_empty());
    }
}
