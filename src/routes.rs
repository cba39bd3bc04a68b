//! Navigable routes.
//!
//! The front end owns navigation; this module only gives it structured
//! values for the four views and a parse/format pair that round-trips the
//! application's paths. Unknown paths parse to `None` — deciding what a 404
//! looks like is the caller's business.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::model::PropertyId;

// Reserved characters in a query component, plus space and percent itself.
const QUERY_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` — the browse + filter view.
    Browse,
    /// `/property/:id` — detail view for one listing.
    PropertyDetail(PropertyId),
    /// `/favorites` — the saved-listings view.
    Favorites,
    /// `/search?q=...` — search results for a free-text query.
    Search(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Browse => "/".to_string(),
            Route::PropertyDetail(id) => format!("/property/{}", id),
            Route::Favorites => "/favorites".to_string(),
            Route::Search(query) => {
                format!("/search?q={}", utf8_percent_encode(query, QUERY_ENCODE))
            }
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/" => return Some(Route::Browse),
            "/favorites" => return Some(Route::Favorites),
            _ => {}
        }
        if let Some(id) = path.strip_prefix("/property/") {
            return id.parse().ok().map(Route::PropertyDetail);
        }
        if let Some(rest) = path.strip_prefix("/search") {
            let query = rest.strip_prefix("?q=").unwrap_or("");
            let query = percent_decode_str(query).decode_utf8_lossy().into_owned();
            return Some(Route::Search(query));
        }
        None
    }
}
