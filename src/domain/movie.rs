//! Movie domain model.
//!
//! A [`Movie`] is a single catalog entry as delivered by the fetch service. It
//! is immutable once fetched: the controller stores owned copies and never
//! edits them in place.

use crate::domain::review::{Rating, RatingSummary, Review};
use serde::{Deserialize, Serialize};

/// A movie in the catalog.
///
/// The wire form uses camelCase keys (`posterUrl`), matching what catalog
/// backends emit. `year` is kept as a string because backends deliver values
/// such as `"2010"` or `"2010–2012"` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Unique identifier assigned by the backend.
    pub id: String,
    pub title: String,
    pub year: String,
    /// Poster image URL. Shown as text in the details overlay.
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ratings: Vec<Rating>,
}

impl Movie {
    /// Creates a movie with only the identifying fields set.
    ///
    /// Remaining fields start empty. Mostly useful for building fixtures.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster_url: String::new(),
            plot: String::new(),
            director: String::new(),
            actors: Vec::new(),
            genre: Vec::new(),
            reviews: Vec::new(),
            ratings: Vec::new(),
        }
    }

    /// Returns the `"Title (Year)"` label used on cards and the overlay header.
    ///
    /// The year is omitted when the backend did not provide one.
    #[must_use]
    pub fn label(&self) -> String {
        if self.year.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.year)
        }
    }

    /// Joins the genre labels with `", "`.
    #[must_use]
    pub fn genre_line(&self) -> String {
        self.genre.join(", ")
    }

    /// Joins the actor names with `", "`.
    #[must_use]
    pub fn cast_line(&self) -> String {
        self.actors.join(", ")
    }

    /// Averages the valid ratings that belong to this movie.
    ///
    /// A rating with an empty `movie_id` is taken to belong to the movie it
    /// is attached to.
    #[must_use]
    pub fn rating_summary(&self) -> Option<RatingSummary> {
        RatingSummary::from_ratings(
            self.ratings
                .iter()
                .filter(|rating| rating.movie_id.is_empty() || rating.movie_id == self.id),
        )
    }

    /// Returns up to `limit` reviews, newest first.
    ///
    /// Reviews with equal timestamps keep their wire order.
    #[must_use]
    pub fn latest_reviews(&self, limit: usize) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self.reviews.iter().collect();
        reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        reviews.truncate(limit);
        reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_form() {
        let json = r#"{
            "id": "1",
            "title": "Inception",
            "year": "2010",
            "posterUrl": "https://img.example/inception.jpg",
            "plot": "A thief who steals corporate secrets...",
            "director": "Christopher Nolan",
            "actors": ["Leonardo DiCaprio", "Elliot Page"],
            "genre": ["Action", "Sci-Fi"]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.poster_url, "https://img.example/inception.jpg");
        assert_eq!(movie.actors.len(), 2);
        assert_eq!(movie.genre_line(), "Action, Sci-Fi");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let movie: Movie =
            serde_json::from_str(r#"{"id":"2","title":"Arrival","year":"2016"}"#).unwrap();

        assert!(movie.plot.is_empty());
        assert!(movie.actors.is_empty());
        assert_eq!(movie, Movie::new("2", "Arrival", "2016"));
    }

    #[test]
    fn reviews_and_ratings_ride_along_in_the_payload() {
        let json = r#"{
            "id": "1",
            "title": "Inception",
            "year": "2010",
            "reviews": [
                {"id": "a", "movieId": "1", "username": "old", "comment": "ok", "timestamp": 1000},
                {"id": "b", "movieId": "1", "username": "new", "comment": "wow", "timestamp": 3000},
                {"id": "c", "movieId": "1", "username": "mid", "comment": "fine", "timestamp": 2000}
            ],
            "ratings": [
                {"movieId": "1", "score": 5},
                {"movieId": "1", "score": 3},
                {"movieId": "2", "score": 1},
                {"score": 7}
            ]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = movie
            .latest_reviews(2)
            .iter()
            .map(|r| r.username.as_str())
            .collect();
        assert_eq!(names, ["new", "mid"]);

        let summary = movie.rating_summary().unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.average - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn movie_without_ratings_has_no_summary() {
        let movie = Movie::new("1", "Inception", "2010");
        assert!(movie.rating_summary().is_none());
        assert!(movie.latest_reviews(3).is_empty());

        let json = serde_json::to_string(&movie).unwrap();
        assert!(!json.contains("reviews"));
    }

    #[test]
    fn label_omits_blank_year() {
        assert_eq!(Movie::new("1", "Inception", "2010").label(), "Inception (2010)");
        assert_eq!(Movie::new("1", "Untitled", " ").label(), "Untitled");
    }
}
