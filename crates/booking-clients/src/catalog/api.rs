use std::collections::HashMap;

use booking_models::Movie;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;

pub(crate) const SERVICE: &str = "catalog";

#[derive(Debug, Deserialize)]
struct MovieListResponse {
    movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
struct RatingUpdate {
    rating: f32,
}

/// Fetch one movie by id. `Ok(None)` when the catalog has no such movie.
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    id: &str,
) -> Result<Option<Movie>, ClientError> {
    let url = format!("{}/movies/{}", base_url.trim_end_matches('/'), id);
    debug!("catalog: fetching movie {}", id);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let movie: Movie = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(Some(movie))
        }
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_server_error() => Err(ClientError::unavailable(
            SERVICE,
            format!("status {}", status),
        )),
        status => {
            let detail = response.text().await.unwrap_or_default();
            Err(ClientError::protocol(SERVICE, status.as_u16(), detail))
        }
    }
}

/// Fetch the full catalog, keyed by movie id.
pub async fn list_movies(
    client: &Client,
    base_url: &str,
) -> Result<HashMap<String, Movie>, ClientError> {
    let url = format!("{}/movies", base_url.trim_end_matches('/'));
    debug!("catalog: fetching full movie list");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let list: MovieListResponse = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(list
                .movies
                .into_iter()
                .map(|movie| (movie.id.clone(), movie))
                .collect())
        }
        status if status.is_server_error() => Err(ClientError::unavailable(
            SERVICE,
            format!("status {}", status),
        )),
        status => {
            let detail = response.text().await.unwrap_or_default();
            Err(ClientError::protocol(SERVICE, status.as_u16(), detail))
        }
    }
}

/// Set a movie's rating. `Ok(None)` when the movie does not exist.
pub async fn update_rating(
    client: &Client,
    base_url: &str,
    id: &str,
    rating: f32,
) -> Result<Option<Movie>, ClientError> {
    let url = format!("{}/movies/{}/rating", base_url.trim_end_matches('/'), id);
    debug!("catalog: setting rating of {} to {}", id, rating);

    let response = client
        .put(&url)
        .json(&RatingUpdate { rating })
        .send()
        .await
        .map_err(|e| ClientError::unavailable(SERVICE, e))?;

    match response.status() {
        StatusCode::OK => {
            let movie: Movie = response
                .json()
                .await
                .map_err(|e| ClientError::unavailable(SERVICE, e))?;
            Ok(Some(movie))
        }
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_server_error() => Err(ClientError::unavailable(
            SERVICE,
            format!("status {}", status),
        )),
        status => {
            let detail = response.text().await.unwrap_or_default();
            Err(ClientError::protocol(SERVICE, status.as_u16(), detail))
        }
    }
}
