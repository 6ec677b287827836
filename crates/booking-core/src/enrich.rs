use std::collections::HashMap;

use booking_models::{DateEntry, EnrichedDateEntry, Movie, MovieRef};
use tracing::debug;

/// Reconcile raw booking records with a catalog snapshot.
///
/// Every movie id found in the snapshot is replaced by its full metadata;
/// every id the snapshot cannot resolve is kept as a stub, so a deleted or
/// unknown movie never silently vanishes from a user's booking history.
/// Read-only: inputs are borrowed and left untouched, order is preserved.
pub fn enrich_bookings(
    raw: &[DateEntry],
    catalog: &HashMap<String, Movie>,
) -> Vec<EnrichedDateEntry> {
    let enriched: Vec<EnrichedDateEntry> = raw
        .iter()
        .map(|entry| EnrichedDateEntry {
            date: entry.date.clone(),
            movies: entry
                .movies
                .iter()
                .map(|id| match catalog.get(id) {
                    Some(movie) => MovieRef::Resolved(movie.clone()),
                    None => MovieRef::Stub { id: id.clone() },
                })
                .collect(),
        })
        .collect();

    let stubs: usize = enriched
        .iter()
        .flat_map(|entry| &entry.movies)
        .filter(|movie| !movie.is_resolved())
        .count();
    if stubs > 0 {
        debug!("enrich: {} movie id(s) missing from catalog snapshot", stubs);
    }

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            director: "Director".to_string(),
            rating: 7.0,
        }
    }

    fn catalog_of(movies: &[Movie]) -> HashMap<String, Movie> {
        movies
            .iter()
            .map(|m| (m.id.clone(), m.clone()))
            .collect()
    }

    #[test]
    fn test_resolves_known_ids_and_stubs_unknown() {
        let raw = vec![DateEntry {
            date: "20240101".to_string(),
            movies: vec!["m1".to_string(), "m9".to_string()],
        }];
        let catalog = catalog_of(&[movie("m1", "X")]);

        let enriched = enrich_bookings(&raw, &catalog);

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].date, "20240101");
        assert_eq!(enriched[0].movies.len(), 2);
        assert_eq!(enriched[0].movies[0], MovieRef::Resolved(movie("m1", "X")));
        assert_eq!(
            enriched[0].movies[1],
            MovieRef::Stub {
                id: "m9".to_string()
            }
        );
    }

    #[test]
    fn test_empty_raw_yields_empty_result() {
        let catalog = catalog_of(&[movie("m1", "X")]);
        assert!(enrich_bookings(&[], &catalog).is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_all_stubs() {
        let raw = vec![DateEntry {
            date: "20240101".to_string(),
            movies: vec!["m1".to_string(), "m2".to_string()],
        }];

        let enriched = enrich_bookings(&raw, &HashMap::new());

        assert!(enriched[0].movies.iter().all(|m| !m.is_resolved()));
        assert_eq!(enriched[0].movies.len(), 2);
    }

    #[test]
    fn test_no_drops_no_duplicates_for_any_catalog() {
        let raw = vec![
            DateEntry {
                date: "20240101".to_string(),
                movies: vec!["m1".to_string(), "m2".to_string(), "m3".to_string()],
            },
            DateEntry {
                date: "20240202".to_string(),
                movies: vec!["m2".to_string()],
            },
        ];
        let catalog = catalog_of(&[movie("m2", "Y")]);

        let enriched = enrich_bookings(&raw, &catalog);

        assert_eq!(enriched.len(), raw.len());
        for (input, output) in raw.iter().zip(&enriched) {
            assert_eq!(input.movies.len(), output.movies.len());
            let ids: Vec<&str> = output.movies.iter().map(|m| m.id()).collect();
            let expected: Vec<&str> = input.movies.iter().map(String::as_str).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_inputs_left_untouched() {
        let raw = vec![DateEntry {
            date: "20240101".to_string(),
            movies: vec!["m1".to_string()],
        }];
        let raw_before = raw.clone();
        let catalog = catalog_of(&[movie("m1", "X")]);
        let catalog_before = catalog.clone();

        let _ = enrich_bookings(&raw, &catalog);

        assert_eq!(raw, raw_before);
        assert_eq!(catalog, catalog_before);
    }

    #[test]
    fn test_order_within_a_date_is_preserved() {
        let raw = vec![DateEntry {
            date: "20240101".to_string(),
            movies: vec!["m3".to_string(), "m1".to_string(), "m2".to_string()],
        }];
        let catalog = catalog_of(&[movie("m1", "A"), movie("m2", "B"), movie("m3", "C")]);

        let enriched = enrich_bookings(&raw, &catalog);

        let ids: Vec<&str> = enriched[0].movies.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["m3", "m1", "m2"]);
    }
}
