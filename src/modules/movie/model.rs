use sqlx::FromRow;

#[derive(Debug, FromRow, Clone, PartialEq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub store_line: String,
    pub genre_id: i32,
    pub poster: Option<Vec<u8>>,
}

/// Insert payload, the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub store_line: String,
    pub genre_id: i32,
    pub poster: Vec<u8>,
}

// Movie joined with its genre; `genre_name` is empty for a dangling reference.
#[derive(Debug, FromRow, Clone, PartialEq)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub store_line: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub poster: Option<Vec<u8>>,
}
