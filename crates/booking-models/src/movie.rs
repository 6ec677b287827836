use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub director: String,
    pub rating: f32,
}

/// A movie reference inside an enriched booking view.
///
/// Decided once during the enrichment pass: either the catalog resolved the
/// id to full metadata, or the id is kept as a stub so the booking entry is
/// never silently dropped. Serialized untagged, so a resolved reference is
/// the full movie object and a stub is `{"id": "..."}` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MovieRef {
    Resolved(Movie),
    Stub { id: String },
}

impl MovieRef {
    pub fn id(&self) -> &str {
        match self {
            MovieRef::Resolved(movie) => &movie.id,
            MovieRef::Stub { id } => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, MovieRef::Resolved(_))
    }
}
