use serde_json::Value;

use super::sanitize;
use crate::api::{CreateBookmarkRequest, UpdateBookmarkRequest};
use crate::error::ValidationError;
use crate::model::{Bookmark, BookmarkPatch};

const MIN_RATING: i64 = 0;
const MAX_RATING: i64 = 5;

// Integers beyond this lose precision as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Checks a create payload and returns the bookmark to persist, text fields escaped.
///
/// Order is fixed: presence of `id`, `title`, `url`, `rating` (blank text counts
/// as absent), then numeric `id` and `rating`, then the rating range.
pub fn validate_create(payload: &CreateBookmarkRequest) -> Result<Bookmark, ValidationError> {
    let id = required(&payload.id, "id")?;
    let title = required_text(&payload.title, "title")?;
    let url = required_text(&payload.url, "url")?;
    let rating = required(&payload.rating, "rating")?;

    let id = as_integer(id).ok_or(ValidationError::NotANumber("id"))?;
    let rating = check_rating(rating)?;

    let description = payload.description.as_ref().map(as_text).unwrap_or_default();

    Ok(Bookmark {
        id,
        title: sanitize(&as_text(title)),
        url: sanitize(&as_text(url)),
        rating,
        description: sanitize(&description),
    })
}

/// Checks a partial update and returns only the supplied fields, text escaped.
///
/// A supplied `title` or `url` must not be blank, and a supplied `rating` goes
/// through the same numeric and range checks as on create.
pub fn validate_update(payload: &UpdateBookmarkRequest) -> Result<BookmarkPatch, ValidationError> {
    let has_content = [&payload.title, &payload.url, &payload.rating]
        .into_iter()
        .any(|v| v.as_ref().is_some_and(is_truthy));
    if !has_content {
        return Err(ValidationError::EmptyUpdate);
    }

    let title = payload.title.as_ref().map(|v| non_blank(v, "title")).transpose()?;
    let url = payload.url.as_ref().map(|v| non_blank(v, "url")).transpose()?;
    let rating = payload.rating.as_ref().map(check_rating).transpose()?;

    Ok(BookmarkPatch {
        title: title.map(|v| sanitize(&as_text(v))),
        url: url.map(|v| sanitize(&as_text(v))),
        rating,
        description: payload.description.as_ref().map(|v| sanitize(&as_text(v))),
    })
}

fn required<'a>(value: &'a Option<Value>, field: &'static str) -> Result<&'a Value, ValidationError> {
    value.as_ref().ok_or(ValidationError::MissingField(field))
}

fn required_text<'a>(value: &'a Option<Value>, field: &'static str) -> Result<&'a Value, ValidationError> {
    non_blank(required(value, field)?, field)
}

/// A blank string counts as a missing field.
fn non_blank<'a>(value: &'a Value, field: &'static str) -> Result<&'a Value, ValidationError> {
    match value {
        Value::String(s) if s.trim().is_empty() => Err(ValidationError::MissingField(field)),
        v => Ok(v),
    }
}

fn check_rating(value: &Value) -> Result<i64, ValidationError> {
    let rating = as_integer(value).ok_or(ValidationError::NotANumber("rating"))?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(rating)
}

/// Loose numeric coercion: numbers as-is, trimmed strings parsed (empty is 0),
/// booleans as 1/0. Arrays and objects are never numbers.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { Some(0.0) } else { s.parse::<f64>().ok() }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    };
    n.filter(|n| n.is_finite())
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    as_number(value)
        .filter(|n| n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER)
        .map(|n| n as i64)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
