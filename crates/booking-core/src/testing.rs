// In-memory client doubles for engine and orchestrator tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use booking_clients::{CalendarApi, CatalogApi, ClientError};
use booking_models::{Movie, ShowtimeSlot};

pub(crate) fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        director: "Director".to_string(),
        rating: 5.0,
    }
}

pub(crate) fn slot(date: &str, movies: &[&str]) -> ShowtimeSlot {
    ShowtimeSlot {
        date: date.to_string(),
        movies: movies.iter().map(|m| m.to_string()).collect(),
    }
}

pub(crate) struct FakeCalendar {
    slots: HashMap<String, ShowtimeSlot>,
}

impl FakeCalendar {
    pub(crate) fn new(slots: Vec<ShowtimeSlot>) -> Self {
        Self {
            slots: slots.into_iter().map(|s| (s.date.clone(), s)).collect(),
        }
    }
}

#[async_trait]
impl CalendarApi for FakeCalendar {
    async fn get_slot(&self, date: &str) -> Result<Option<ShowtimeSlot>, ClientError> {
        Ok(self.slots.get(date).cloned())
    }

    async fn list_slots(&self) -> Result<Vec<ShowtimeSlot>, ClientError> {
        Ok(self.slots.values().cloned().collect())
    }
}

pub(crate) struct FakeCatalog {
    movies: Mutex<HashMap<String, Movie>>,
}

impl FakeCatalog {
    pub(crate) fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: Mutex::new(movies.into_iter().map(|m| (m.id.clone(), m)).collect()),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn get_movie(&self, id: &str) -> Result<Option<Movie>, ClientError> {
        Ok(self.movies.lock().unwrap().get(id).cloned())
    }

    async fn list_movies(&self) -> Result<HashMap<String, Movie>, ClientError> {
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn update_rating(&self, id: &str, rating: f32) -> Result<Option<Movie>, ClientError> {
        let mut movies = self.movies.lock().unwrap();
        Ok(movies.get_mut(id).map(|movie| {
            movie.rating = rating;
            movie.clone()
        }))
    }
}

/// Calendar double for outage scenarios: every call fails as unavailable.
pub(crate) struct DownCalendar;

#[async_trait]
impl CalendarApi for DownCalendar {
    async fn get_slot(&self, _date: &str) -> Result<Option<ShowtimeSlot>, ClientError> {
        Err(ClientError::unavailable("calendar", "connection refused"))
    }

    async fn list_slots(&self) -> Result<Vec<ShowtimeSlot>, ClientError> {
        Err(ClientError::unavailable("calendar", "connection refused"))
    }
}

/// Catalog double for outage scenarios: every call fails as unavailable.
pub(crate) struct DownCatalog;

#[async_trait]
impl CatalogApi for DownCatalog {
    async fn get_movie(&self, _id: &str) -> Result<Option<Movie>, ClientError> {
        Err(ClientError::unavailable("catalog", "connection refused"))
    }

    async fn list_movies(&self) -> Result<HashMap<String, Movie>, ClientError> {
        Err(ClientError::unavailable("catalog", "connection refused"))
    }

    async fn update_rating(&self, _id: &str, _rating: f32) -> Result<Option<Movie>, ClientError> {
        Err(ClientError::unavailable("catalog", "connection refused"))
    }
}
