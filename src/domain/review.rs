//! Audience reviews and ratings attached to a movie.
//!
//! Both arrive embedded in the movie payload. Marquee only displays them.

use serde::{Deserialize, Serialize};

/// Lowest and highest score a rating may carry.
pub const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A written review of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub movie_id: String,
    pub username: String,
    #[serde(default)]
    pub comment: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl Review {
    /// Formats the review date as `YYYY-MM-DD` (UTC).
    ///
    /// Returns `None` for timestamps chrono cannot represent.
    #[must_use]
    pub fn date(&self) -> Option<String> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|date| date.format("%Y-%m-%d").to_string())
    }
}

/// A single star rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default)]
    pub movie_id: String,
    pub score: u8,
}

impl Rating {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        SCORE_RANGE.contains(&self.score)
    }
}

/// Average of the valid ratings for one movie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f32,
    pub count: usize,
}

impl RatingSummary {
    /// Summarizes the valid scores in `ratings`.
    ///
    /// Returns `None` when no rating counts.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee::domain::{Rating, RatingSummary};
    ///
    /// let ratings = [
    ///     Rating { movie_id: "1".into(), score: 4 },
    ///     Rating { movie_id: "1".into(), score: 5 },
    ///     Rating { movie_id: "1".into(), score: 9 },
    /// ];
    /// let summary = RatingSummary::from_ratings(ratings.iter()).unwrap();
    /// assert_eq!(summary.count, 2);
    /// assert!((summary.average - 4.5).abs() < f32::EPSILON);
    /// ```
    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Option<Self> {
        let (total, count) = ratings
            .into_iter()
            .filter(|rating| rating.is_valid())
            .fold((0u32, 0usize), |(total, count), rating| {
                (total + u32::from(rating.score), count + 1)
            });

        if count == 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let average = total as f32 / count as f32;
        Some(Self { average, count })
    }

    /// Renders the summary as `"4.3 / 5 (3 ratings)"`.
    #[must_use]
    pub fn label(&self) -> String {
        let noun = if self.count == 1 { "rating" } else { "ratings" };
        format!("{:.1} / {} ({} {noun})", self.average, SCORE_RANGE.end(), self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(score: u8) -> Rating {
        Rating {
            movie_id: "1".to_string(),
            score,
        }
    }

    #[test]
    fn deserializes_wire_form() {
        let review: Review = serde_json::from_str(
            r#"{"id":"r1","movieId":"1","username":"ana","comment":"Loved it","timestamp":1700000000000}"#,
        )
        .unwrap();

        assert_eq!(review.movie_id, "1");
        assert_eq!(review.date().as_deref(), Some("2023-11-14"));
    }

    #[test]
    fn out_of_range_scores_are_ignored() {
        assert!(!rating(0).is_valid());
        assert!(!rating(6).is_valid());
        assert!(RatingSummary::from_ratings([rating(0), rating(6)].iter()).is_none());
    }

    #[test]
    fn summary_label_rounds_to_one_decimal() {
        let ratings = [rating(4), rating(4), rating(5)];
        let summary = RatingSummary::from_ratings(ratings.iter()).unwrap();
        assert_eq!(summary.label(), "4.3 / 5 (3 ratings)");

        let single = RatingSummary::from_ratings([rating(2)].iter()).unwrap();
        assert_eq!(single.label(), "2.0 / 5 (1 rating)");
    }
}
