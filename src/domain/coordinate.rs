use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::digits::fold_full_width;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,，\s]+").expect("separator pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("expected 2 numbers, found {tokens}")]
    TokenCount { tokens: usize },
    #[error("`{token}` is not a number")]
    InvalidNumber { token: String },
    #[error("({latitude}, {longitude}) is not a valid latitude/longitude pair")]
    OutOfRange { latitude: f64, longitude: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Parses `"lat,lng"`, `"lat，lng"` or `"lat lng"` with any amount of
    /// surrounding whitespace. Full-width digits are accepted.
    pub fn parse(text: &str) -> Result<Self, CoordinateError> {
        let tokens: Vec<&str> = SEPARATOR
            .split(text)
            .filter(|token| !token.is_empty())
            .collect();

        let [latitude, longitude] = tokens[..] else {
            return Err(CoordinateError::TokenCount {
                tokens: tokens.len(),
            });
        };

        let coordinate = Coordinate {
            latitude: parse_degrees(latitude)?,
            longitude: parse_degrees(longitude)?,
        };

        if !coordinate.is_valid() {
            return Err(CoordinateError::OutOfRange {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }

        Ok(coordinate)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

fn parse_degrees(token: &str) -> Result<f64, CoordinateError> {
    fold_full_width(token)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoordinateError::InvalidNumber {
            token: token.to_string(),
        })
}
