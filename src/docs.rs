use utoipa::OpenApi;
use crate::modules::genre::dto::{CreateGenreDto, GenreResponse};
use crate::modules::movie::dto::{MovieDetailsDto, MovieResponse, MovieUploadForm};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        description = "Movie catalog with genres and poster uploads"
    ),
    paths(
        crate::modules::genre::handler::list_genres,
        crate::modules::genre::handler::create_genre,
        crate::modules::genre::handler::update_genre,
        crate::modules::genre::handler::delete_genre,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::list_movies_by_genre,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
        crate::modules::movie::handler::get_movie_poster,
    ),
    components(
        schemas(
            CreateGenreDto, GenreResponse,
            MovieUploadForm, MovieResponse, MovieDetailsDto,
        )
    ),
    tags(
        (name = "Genres", description = "Genre catalog"),
        (name = "Movies", description = "Movies and their posters")
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

// The scheme is advertised for clients; no route checks it.
use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/genres",
            "/api/genres/{id}",
            "/api/movies",
            "/api/movies/{id}",
            "/api/movies/GetByGenreId",
            "/api/movies/{id}/poster",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
