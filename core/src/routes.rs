//! The client-addressable route table.
//!
//! Two parallel resource sections with identical shapes: grid, create form,
//! detail by numeric id, and a token-gated private detail view for
//! out-of-band sharing.

/// A parsed application route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    PostingsGrid,
    PostingCreate,
    PostingDetail(i64),
    PostingPrivate(String),
    SightingsGrid,
    SightingCreate,
    SightingDetail(i64),
    SightingPrivate(String),
}

impl Route {
    /// Parse a path like `/postings/private/abc-123`. Returns `None` for
    /// anything outside the route table.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["postings"] => Some(Route::PostingsGrid),
            ["postings", "create"] => Some(Route::PostingCreate),
            ["postings", "private", token] => Some(Route::PostingPrivate(token.to_string())),
            ["postings", id] => id.parse().ok().map(Route::PostingDetail),
            ["sightings"] => Some(Route::SightingsGrid),
            ["sightings", "create"] => Some(Route::SightingCreate),
            ["sightings", "private", token] => Some(Route::SightingPrivate(token.to_string())),
            ["sightings", id] => id.parse().ok().map(Route::SightingDetail),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::PostingsGrid => "/postings".to_string(),
            Route::PostingCreate => "/postings/create".to_string(),
            Route::PostingDetail(id) => format!("/postings/{id}"),
            Route::PostingPrivate(token) => format!("/postings/private/{token}"),
            Route::SightingsGrid => "/sightings".to_string(),
            Route::SightingCreate => "/sightings/create".to_string(),
            Route::SightingDetail(id) => format!("/sightings/{id}"),
            Route::SightingPrivate(token) => format!("/sightings/private/{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_whole_table() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/postings"), Some(Route::PostingsGrid));
        assert_eq!(Route::parse("/postings/create"), Some(Route::PostingCreate));
        assert_eq!(Route::parse("/postings/41"), Some(Route::PostingDetail(41)));
        assert_eq!(
            Route::parse("/postings/private/abc-123"),
            Some(Route::PostingPrivate("abc-123".to_string()))
        );
        assert_eq!(Route::parse("/sightings"), Some(Route::SightingsGrid));
        assert_eq!(Route::parse("sightings/create"), Some(Route::SightingCreate));
        assert_eq!(Route::parse("/sightings/7/"), Some(Route::SightingDetail(7)));
        assert_eq!(
            Route::parse("/sightings/private/tok"),
            Some(Route::SightingPrivate("tok".to_string()))
        );
    }

    #[test]
    fn create_is_not_mistaken_for_an_id() {
        // "create" must be matched before the id arm; a non-numeric id is
        // not a detail route.
        assert_eq!(Route::parse("/postings/create"), Some(Route::PostingCreate));
        assert_eq!(Route::parse("/postings/rex"), None);
    }

    #[test]
    fn unknown_paths_are_rejected() {
        assert_eq!(Route::parse("/pets"), None);
        assert_eq!(Route::parse("/postings/1/extra"), None);
        assert_eq!(Route::parse("/postings/private"), None);
    }

    #[test]
    fn path_round_trips() {
        for route in [
            Route::Home,
            Route::PostingsGrid,
            Route::PostingCreate,
            Route::PostingDetail(3),
            Route::PostingPrivate("tok".to_string()),
            Route::SightingsGrid,
            Route::SightingCreate,
            Route::SightingDetail(9),
            Route::SightingPrivate("tok".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }
}
