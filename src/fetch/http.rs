//! HTTP movie backend plumbing.
//!
//! The plugin cannot block on network I/O, so HTTP fetches go through Zellij's
//! `web_request` host call. This module holds the pure halves of that round
//! trip: building the request URL, tagging the request with its token through
//! the context map, and decoding the `WebRequestResult` that comes back.

use crate::domain::{FetchError, Movie};
use crate::fetch::request::{FetchRequest, RequestToken};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Context key carrying the request token.
pub const TOKEN_CONTEXT_KEY: &str = "marquee_token";

/// Context key carrying the search term, logged when the response arrives.
pub const TERM_CONTEXT_KEY: &str = "marquee_term";

/// Accepted response bodies: a bare array or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoviesBody {
    List(Vec<Movie>),
    Wrapped { movies: Vec<Movie> },
}

/// Builds the request URL for a search.
///
/// The term is always sent, even when empty, as the `search` query parameter.
///
/// ```
/// use marquee::fetch::http::build_url;
///
/// assert_eq!(
///     build_url("https://api.example/movies", "star wars"),
///     "https://api.example/movies?search=star%20wars"
/// );
/// assert_eq!(
///     build_url("https://api.example/movies?limit=50", ""),
///     "https://api.example/movies?limit=50&search="
/// );
/// ```
#[must_use]
pub fn build_url(endpoint: &str, search_term: &str) -> String {
    let endpoint = endpoint.trim();
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{separator}search={}",
        urlencoding::encode(search_term)
    )
}

/// Builds the context map attached to a `web_request` call.
#[must_use]
pub fn request_context(request: &FetchRequest) -> BTreeMap<String, String> {
    let mut context = BTreeMap::new();
    context.insert(TOKEN_CONTEXT_KEY.to_string(), request.token.to_string());
    context.insert(TERM_CONTEXT_KEY.to_string(), request.search_term.clone());
    context
}

/// Recovers the token from a `WebRequestResult` context map.
///
/// Returns `None` for responses to requests Marquee did not issue.
#[must_use]
pub fn token_from_context(context: &BTreeMap<String, String>) -> Option<RequestToken> {
    context.get(TOKEN_CONTEXT_KEY)?.parse().ok()
}

/// Decodes a `WebRequestResult` into a movie list.
///
/// # Errors
///
/// - [`FetchError::Status`] when the status is outside `200..=299`
/// - [`FetchError::Decode`] when the body is not a movie list
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<Movie>, FetchError> {
    if !(200..=299).contains(&status) {
        return Err(FetchError::Status(status));
    }

    match serde_json::from_slice::<MoviesBody>(body) {
        Ok(MoviesBody::List(movies) | MoviesBody::Wrapped { movies }) => Ok(movies),
        Err(e) => Err(FetchError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_token() {
        let request = FetchRequest {
            token: RequestToken::new(7),
            search_term: "dune".to_string(),
        };
        let context = request_context(&request);

        assert_eq!(token_from_context(&context), Some(RequestToken::new(7)));
        assert_eq!(context.get(TERM_CONTEXT_KEY).map(String::as_str), Some("dune"));
    }

    #[test]
    fn foreign_context_has_no_token() {
        assert_eq!(token_from_context(&BTreeMap::new()), None);
    }

    #[test]
    fn decodes_bare_array_in_order() {
        let body = br#"[
            {"id":"1","title":"Inception","year":"2010"},
            {"id":"2","title":"Arrival","year":"2016"}
        ]"#;

        let movies = decode_response(200, body).unwrap();

        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn decodes_wrapped_list() {
        let body = br#"{"movies":[{"id":"9","title":"Heat","year":"1995"}]}"#;
        assert_eq!(decode_response(200, body).unwrap().len(), 1);
    }

    #[test]
    fn decodes_embedded_reviews_and_ratings() {
        let body = br#"[{
            "id": "1", "title": "Inception", "year": "2010",
            "reviews": [{"id": "r1", "movieId": "1", "username": "ana", "comment": "Layered.", "timestamp": 0}],
            "ratings": [{"movieId": "1", "score": 4}]
        }]"#;

        let movies = decode_response(200, body).unwrap();

        assert_eq!(movies[0].reviews[0].username, "ana");
        assert_eq!(movies[0].rating_summary().map(|s| s.count), Some(1));
    }

    #[test]
    fn empty_array_is_a_success() {
        assert_eq!(decode_response(200, b"[]").unwrap(), Vec::<Movie>::new());
    }

    #[test]
    fn non_success_status_fails_before_decoding() {
        assert_eq!(decode_response(502, b"[]"), Err(FetchError::Status(502)));
    }

    #[test]
    fn garbage_body_fails_to_decode() {
        assert!(matches!(
            decode_response(200, b"<html>oops</html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn url_encodes_reserved_characters() {
        assert_eq!(
            build_url("http://localhost:8080/movies", "a&b"),
            "http://localhost:8080/movies?search=a%26b"
        );
    }
}
