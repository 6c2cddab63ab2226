//! Catalog search matching.
//!
//! A query is split on whitespace into lowercase tokens. A movie matches when
//! every token either fuzzy-matches the title or appears verbatim in the
//! director, an actor name or a genre label. Matching never reorders: the
//! result keeps catalog order.

use crate::domain::Movie;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A parsed search term ready for matching.
pub struct CatalogQuery {
    tokens: Vec<String>,
    matcher: SkimMatcherV2,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(search_term: &str) -> Self {
        Self {
            tokens: search_term
                .split_whitespace()
                .map(str::to_lowercase)
                .collect(),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Whether the query has no tokens and so matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn matches(&self, movie: &Movie) -> bool {
        if self.tokens.is_empty() {
            return true;
        }

        let title = movie.title.to_lowercase();
        let director = movie.director.to_lowercase();

        self.tokens.iter().all(|token| {
            self.matcher.fuzzy_match(&title, token).is_some()
                || director.contains(token.as_str())
                || contains_token(&movie.actors, token)
                || contains_token(&movie.genre, token)
        })
    }

    /// Returns clones of the matching movies in their original order.
    #[must_use]
    pub fn filter(&self, movies: &[Movie]) -> Vec<Movie> {
        movies.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}

fn contains_token(values: &[String], token: &str) -> bool {
    values.iter().any(|v| v.to_lowercase().contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Movie> {
        let mut inception = Movie::new("1", "Inception", "2010");
        inception.director = "Christopher Nolan".to_string();
        inception.actors = vec!["Leonardo DiCaprio".to_string()];
        inception.genre = vec!["Sci-Fi".to_string()];

        let mut arrival = Movie::new("2", "Arrival", "2016");
        arrival.director = "Denis Villeneuve".to_string();
        arrival.genre = vec!["Drama".to_string(), "Sci-Fi".to_string()];

        let mut heat = Movie::new("3", "Heat", "1995");
        heat.director = "Michael Mann".to_string();
        heat.actors = vec!["Al Pacino".to_string(), "Robert De Niro".to_string()];

        vec![inception, arrival, heat]
    }

    fn ids(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn empty_term_keeps_everything_in_order() {
        let query = CatalogQuery::new("   ");
        assert!(query.is_empty());
        assert_eq!(ids(&query.filter(&catalog())), ["1", "2", "3"]);
    }

    #[test]
    fn title_matches_fuzzily() {
        assert_eq!(ids(&CatalogQuery::new("incptn").filter(&catalog())), ["1"]);
    }

    #[test]
    fn genre_match_preserves_catalog_order() {
        assert_eq!(ids(&CatalogQuery::new("sci-fi").filter(&catalog())), ["1", "2"]);
    }

    #[test]
    fn every_token_must_match_some_field() {
        assert_eq!(ids(&CatalogQuery::new("heat pacino").filter(&catalog())), ["3"]);
        assert!(CatalogQuery::new("heat villeneuve").filter(&catalog()).is_empty());
    }

    #[test]
    fn unmatched_term_yields_empty_list() {
        assert!(CatalogQuery::new("zzz-no-match").filter(&catalog()).is_empty());
    }
}
