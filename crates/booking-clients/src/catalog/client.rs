use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use booking_models::Movie;
use reqwest::Client;

use crate::catalog::api;
use crate::error::ClientError;
use crate::http::build_http_client;
use crate::traits::CatalogApi;

/// HTTP caller for the movie catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn get_movie(&self, id: &str) -> Result<Option<Movie>, ClientError> {
        api::get_movie(&self.client, &self.base_url, id).await
    }

    async fn list_movies(&self) -> Result<HashMap<String, Movie>, ClientError> {
        api::list_movies(&self.client, &self.base_url).await
    }

    async fn update_rating(&self, id: &str, rating: f32) -> Result<Option<Movie>, ClientError> {
        api::update_rating(&self.client, &self.base_url, id, rating).await
    }
}
