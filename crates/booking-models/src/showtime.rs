use serde::{Deserialize, Serialize};

/// Authoritative external record of which movies are scheduled on a given
/// date. Read-only for this core: the calendar service owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowtimeSlot {
    pub date: String, // YYYYMMDD
    pub movies: Vec<String>,
}

impl ShowtimeSlot {
    pub fn has_movie(&self, movie_id: &str) -> bool {
        self.movies.iter().any(|id| id == movie_id)
    }
}
