use axum::extract::Multipart;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::model::{Movie, MovieDetails};
use crate::common::error::{AppError, Result};
use crate::common::upload::{read_file_field, UploadedFile};

// --- REQUEST DTOs ---

/// Movie fields bound from a multipart form. Absent scalars keep their defaults.
#[derive(Debug, Default, Validate)]
pub struct MovieForm {
    #[validate(length(max = 250, message = "Title must be at most 250 characters"))]
    pub title: String,
    pub year: i32,
    pub rate: f64,
    #[validate(length(max = 2500, message = "Store line must be at most 2500 characters"))]
    pub store_line: String,
    pub genre_id: i32,
    pub poster: Option<UploadedFile>,
}

impl MovieForm {
    /// Field names are matched case-insensitively; unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = MovieForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_ascii_lowercase();

            match name.as_str() {
                "poster" => {
                    let file = read_file_field(field).await?;
                    // A file input left empty is sent as a nameless, empty part.
                    if !file.file_name.is_empty() || !file.is_empty() {
                        form.poster = Some(file);
                    }
                }
                "title" => form.title = field.text().await?,
                "storeline" => form.store_line = field.text().await?,
                "year" => form.year = parse_scalar("year", &field.text().await?)?,
                "rate" => form.rate = parse_scalar("rate", &field.text().await?)?,
                "genreid" => form.genre_id = parse_scalar("genreId", &field.text().await?)?,
                other => debug!("Ignoring unknown form field {:?}", other),
            }
        }

        Ok(form)
    }
}

fn parse_scalar<T: FromStr + Default>(name: &str, raw: &str) -> Result<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse::<T>()
        .map_err(|_| AppError::invalid(format!("Invalid value for {name}: {raw:?}")))
}

/// Multipart body of movie create/update, for the OpenAPI document only.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(unused)]
pub struct MovieUploadForm {
    title: String,
    year: i32,
    rate: f64,
    store_line: String,
    genre_id: i32,
    /// `.jpg` or `.png`, at most 1 MiB. Optional on update.
    #[schema(value_type = String, format = Binary)]
    poster: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GenreFilter {
    pub genre_id: i32,
}

// --- RESPONSE DTOs ---

#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub store_line: String,
    pub genre_id: i32,
    /// Base64 encoded image bytes.
    #[schema(format = Byte)]
    pub poster: Option<String>,
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            rate: m.rate,
            store_line: m.store_line,
            genre_id: m.genre_id,
            poster: m.poster.map(|p| STANDARD.encode(p)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailsDto {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub store_line: String,
    pub genre_id: i32,
    pub genre_name: String,
    /// Base64 encoded image bytes.
    #[schema(format = Byte)]
    pub poster: Option<String>,
}

impl From<MovieDetails> for MovieDetailsDto {
    fn from(m: MovieDetails) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            rate: m.rate,
            store_line: m.store_line,
            genre_id: m.genre_id,
            genre_name: m.genre_name,
            poster: m.poster.map(|p| STANDARD.encode(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_scalars_fall_back_to_defaults() {
        assert_eq!(parse_scalar::<i32>("year", "").unwrap(), 0);
        assert_eq!(parse_scalar::<f64>("rate", "  ").unwrap(), 0.0);
        assert_eq!(parse_scalar::<i32>("year", " 2020 ").unwrap(), 2020);
    }

    #[test]
    fn malformed_scalar_is_invalid_input() {
        let err = parse_scalar::<i32>("year", "twenty").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("year")));
    }

    #[test]
    fn poster_is_base64_encoded() {
        let movie = Movie {
            id: 1,
            title: "X".into(),
            year: 2020,
            rate: 8.5,
            store_line: String::new(),
            genre_id: 1,
            poster: Some(vec![1, 2, 3]),
        };
        assert_eq!(MovieResponse::from(movie).poster.as_deref(), Some("AQID"));
    }

    #[test]
    fn overlong_title_fails_validation() {
        let form = MovieForm {
            title: "t".repeat(251),
            ..MovieForm::default()
        };
        assert!(form.validate().is_err());
    }
}
