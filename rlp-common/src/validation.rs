//! Input validation and coercion
//!
//! Turns untyped input (JSON bodies, query strings) into typed records.
//! Each field is checked in order: presence, type coercion, then range or
//! pattern. Cross-field checks run last and only when both sides passed
//! their own checks. Every failing field is reported; a typed value is
//! returned only when there are no failures at all.
//!
//! Coercion rules:
//! - numbers may arrive as JSON numbers or as numeric strings
//! - `null`, empty and blank strings count as "absent", never as zero
//! - integral floats (`50.0`) are accepted for integer fields

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::models::{Job, NewRecipe, RecipePatch, RecipeStats, SearchCriteria, TrainingData};
use crate::pagination::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Maximum recipe name length in characters
pub const MAX_NAME_LEN: usize = 100;

static PATCH_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("patch version pattern is valid"));

/// Category of a single field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Required field absent (or null / blank)
    Missing,
    /// Value could not be coerced to the field's type
    Type,
    /// Value outside the allowed numeric or length range
    Range,
    /// Value does not match the required pattern
    Pattern,
    /// Value is not one of the enumerated codes
    Enum,
    /// Two fields are inconsistent with each other
    CrossField,
    /// Request body or path segment could not be parsed at all
    Parse,
}

/// One field-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, "field required", FieldErrorKind::Missing)
    }
}

/// Ordered list of field failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for a single failure
    pub fn single(field: impl Into<String>, message: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self(vec![FieldError::new(field, message, kind)])
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First failure reported for `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Numeric constraint applied after coercion
#[derive(Debug, Clone, Copy)]
enum Bound {
    /// Strictly greater than zero
    Positive,
    AtLeast(i64),
    Between(i64, i64),
}

impl Bound {
    fn check(self, field: &str, value: i64) -> Result<i64, FieldError> {
        let ok = match self {
            Bound::Positive => value > 0,
            Bound::AtLeast(min) => value >= min,
            Bound::Between(min, max) => (min..=max).contains(&value),
        };
        if ok {
            Ok(value)
        } else {
            Err(FieldError::new(field, self.describe(), FieldErrorKind::Range))
        }
    }

    fn describe(self) -> String {
        match self {
            Bound::Positive => "must be greater than 0".to_string(),
            Bound::AtLeast(min) => format!("must be greater than or equal to {}", min),
            Bound::Between(min, max) => format!("must be between {} and {}", min, max),
        }
    }
}

fn coerce_int(field: &str, value: &Value) -> Result<i64, FieldError> {
    let type_error = || FieldError::new(field, "must be an integer", FieldErrorKind::Type);

    let float_to_int = |f: f64| {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    };

    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(float_to_int))
            .ok_or_else(type_error),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
                .ok_or_else(type_error)
        }
        _ => Err(type_error()),
    }
}

fn coerce_float(field: &str, value: &Value) -> Result<f64, FieldError> {
    let type_error = || FieldError::new(field, "must be a number", FieldErrorKind::Type);

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(type_error()),
    }
}

fn coerce_str<'v>(field: &str, value: &'v Value) -> Result<&'v str, FieldError> {
    value
        .as_str()
        .ok_or_else(|| FieldError::new(field, "must be a string", FieldErrorKind::Type))
}

fn check_name(field: &str, value: &Value) -> Result<String, FieldError> {
    let name = coerce_str(field, value)?;
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(FieldError::new(
            field,
            format!("must be between 1 and {} characters", MAX_NAME_LEN),
            FieldErrorKind::Range,
        ));
    }
    Ok(name.to_string())
}

fn check_job(field: &str, value: &Value) -> Result<Job, FieldError> {
    let code = coerce_str(field, value)?;
    Job::from_code(code).ok_or_else(|| {
        let codes: Vec<&str> = Job::ALL.iter().map(Job::as_str).collect();
        FieldError::new(
            field,
            format!("must be one of {}", codes.join(", ")),
            FieldErrorKind::Enum,
        )
    })
}

fn check_patch_version(field: &str, value: &Value) -> Result<String, FieldError> {
    let version = coerce_str(field, value)?;
    if PATCH_VERSION.is_match(version) {
        Ok(version.to_string())
    } else {
        Err(FieldError::new(
            field,
            "must match MAJOR.MINOR (e.g. 6.4)",
            FieldErrorKind::Pattern,
        ))
    }
}

/// Walks an input map field by field, collecting failures
struct FieldChecker<'a> {
    input: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldChecker<'a> {
    fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            errors: ValidationErrors::new(),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.input.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }

    fn take<T>(
        &mut self,
        field: &str,
        required: bool,
        check: impl FnOnce(&str, &Value) -> Result<T, FieldError>,
    ) -> Option<T> {
        match self.present(field) {
            None => {
                if required {
                    self.errors.push(FieldError::missing(field));
                }
                None
            }
            Some(value) => match check(field, value) {
                Ok(v) => Some(v),
                Err(e) => {
                    self.errors.push(e);
                    None
                }
            },
        }
    }

    fn int(&mut self, field: &str, required: bool, bound: Bound) -> Option<i64> {
        self.take(field, required, |f, v| {
            coerce_int(f, v).and_then(|n| bound.check(f, n))
        })
    }

    fn positive_float(&mut self, field: &str, required: bool) -> Option<f64> {
        self.take(field, required, |f, v| {
            let x = coerce_float(f, v)?;
            if x > 0.0 {
                Ok(x)
            } else {
                Err(FieldError::new(f, Bound::Positive.describe(), FieldErrorKind::Range))
            }
        })
    }

    /// `max_field >= min_field`, checked only when both parsed
    fn ordered(&mut self, min_field: &str, min: Option<i64>, max_field: &str, max: Option<i64>) {
        if let (Some(lo), Some(hi)) = (min, max) {
            if hi < lo {
                self.errors.push(FieldError::new(
                    max_field,
                    format!("{} must be greater than or equal to {}", max_field, min_field),
                    FieldErrorKind::CrossField,
                ));
            }
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validate a create-recipe body
pub fn validate_new_recipe(input: &Map<String, Value>) -> Result<NewRecipe, ValidationErrors> {
    let mut c = FieldChecker::new(input);

    let name = c.take("name", true, check_name);
    let job = c.take("job", true, check_job);
    let recipe_level = c.int("recipe_level", true, Bound::AtLeast(1));
    let master_book_level = c.int("master_book_level", false, Bound::AtLeast(0));
    let stars = c.int("stars", false, Bound::Between(0, 5));
    let patch_version = c.take("patch_version", true, check_patch_version);
    let max_durability = c.int("max_durability", true, Bound::Positive);
    let max_quality = c.int("max_quality", true, Bound::Positive);
    let required_durability = c.int("required_durability", true, Bound::Positive);
    let required_craftsmanship = c.int("required_craftsmanship", true, Bound::Positive);
    let required_control = c.int("required_control", true, Bound::Positive);
    let progress_per_100 = c.positive_float("progress_per_100", true);
    let quality_per_100 = c.positive_float("quality_per_100", true);

    c.finish()?;

    match (
        name,
        job,
        recipe_level,
        patch_version,
        max_durability,
        max_quality,
        required_durability,
        required_craftsmanship,
        required_control,
        progress_per_100,
        quality_per_100,
    ) {
        (
            Some(name),
            Some(job),
            Some(recipe_level),
            Some(patch_version),
            Some(max_durability),
            Some(max_quality),
            Some(required_durability),
            Some(required_craftsmanship),
            Some(required_control),
            Some(progress_per_100),
            Some(quality_per_100),
        ) => Ok(NewRecipe {
            name,
            job,
            recipe_level,
            master_book_level: master_book_level.unwrap_or(0),
            stars: stars.unwrap_or(0),
            patch_version,
            stats: RecipeStats {
                max_durability,
                max_quality,
                required_durability,
            },
            training: TrainingData {
                required_craftsmanship,
                required_control,
                progress_per_100,
                quality_per_100,
            },
        }),
        // Every required field pushes an error when absent, so finish() has
        // already returned in this case.
        _ => Err(ValidationErrors::single(
            "body",
            "incomplete recipe",
            FieldErrorKind::Missing,
        )),
    }
}

/// Validate a partial-update body; absent fields stay `None`
pub fn validate_recipe_patch(input: &Map<String, Value>) -> Result<RecipePatch, ValidationErrors> {
    let mut c = FieldChecker::new(input);

    let patch = RecipePatch {
        name: c.take("name", false, check_name),
        job: c.take("job", false, check_job),
        recipe_level: c.int("recipe_level", false, Bound::AtLeast(1)),
        master_book_level: c.int("master_book_level", false, Bound::AtLeast(0)),
        stars: c.int("stars", false, Bound::Between(0, 5)),
        patch_version: c.take("patch_version", false, check_patch_version),
        max_durability: c.int("max_durability", false, Bound::Positive),
        max_quality: c.int("max_quality", false, Bound::Positive),
        required_durability: c.int("required_durability", false, Bound::Positive),
        required_craftsmanship: c.int("required_craftsmanship", false, Bound::Positive),
        required_control: c.int("required_control", false, Bound::Positive),
        progress_per_100: c.positive_float("progress_per_100", false),
        quality_per_100: c.positive_float("quality_per_100", false),
    };

    c.finish()?;
    Ok(patch)
}

/// Convert query-string pairs into the map shape the checkers expect
pub fn query_to_map(params: &HashMap<String, String>) -> Map<String, Value> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

/// Validate search/list query parameters
///
/// Supplying `page` or `per_page` selects page mode; otherwise `skip`/`limit`
/// is used.
pub fn validate_search_criteria(
    params: &HashMap<String, String>,
) -> Result<SearchCriteria, ValidationErrors> {
    let input = query_to_map(params);
    let mut c = FieldChecker::new(&input);

    let name = c.take("name", false, |f, v| coerce_str(f, v).map(str::to_string));
    let job = c.take("job", false, check_job);
    let min_level = c.int("min_level", false, Bound::AtLeast(1));
    let max_level = c.int("max_level", false, Bound::AtLeast(1));
    let master_book_level = c.int("master_book_level", false, Bound::AtLeast(0));
    let stars = c.int("stars", false, Bound::Between(0, 5));
    let patch_version = c.take("patch_version", false, check_patch_version);
    let min_craftsmanship = c.int("min_craftsmanship", false, Bound::AtLeast(1));
    let max_craftsmanship = c.int("max_craftsmanship", false, Bound::AtLeast(1));
    let min_control = c.int("min_control", false, Bound::AtLeast(1));
    let max_control = c.int("max_control", false, Bound::AtLeast(1));

    let page_mode = c.present("page").is_some() || c.present("per_page").is_some();
    let page = if page_mode {
        let page = c.int("page", false, Bound::AtLeast(1)).unwrap_or(1);
        let per_page = c
            .int("per_page", false, Bound::Between(1, MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        PageRequest::checked_from_page(page, per_page).unwrap_or_else(|| {
            c.errors.push(FieldError::new(
                "page",
                "is too large for the requested page size",
                FieldErrorKind::Range,
            ));
            PageRequest::default()
        })
    } else {
        let skip = c.int("skip", false, Bound::AtLeast(0)).unwrap_or(0);
        let limit = c
            .int("limit", false, Bound::Between(1, MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        PageRequest::from_skip_limit(skip, limit)
    };

    c.ordered("min_level", min_level, "max_level", max_level);
    c.ordered(
        "min_craftsmanship",
        min_craftsmanship,
        "max_craftsmanship",
        max_craftsmanship,
    );
    c.ordered("min_control", min_control, "max_control", max_control);

    c.finish()?;

    Ok(SearchCriteria {
        name,
        job,
        min_level,
        max_level,
        master_book_level,
        stars,
        patch_version,
        min_craftsmanship,
        max_craftsmanship,
        min_control,
        max_control,
        page,
    })
}

/// Parse a recipe id path segment (positive integer)
pub fn parse_recipe_id(raw: &str) -> Result<i64, ValidationErrors> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(ValidationErrors::single(
            "id",
            Bound::Positive.describe(),
            FieldErrorKind::Range,
        )),
        Err(_) => Err(ValidationErrors::single(
            "id",
            "must be an integer",
            FieldErrorKind::Type,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    fn iron_ingot() -> Map<String, Value> {
        as_map(json!({
            "name": "Iron Ingot",
            "job": "BSM",
            "recipe_level": 50,
            "patch_version": "6.4",
            "max_durability": 70,
            "max_quality": 100,
            "required_durability": 40,
            "required_craftsmanship": 1000,
            "required_control": 900,
            "progress_per_100": 150.0,
            "quality_per_100": 120.0
        }))
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_recipe_with_defaults() {
        let recipe = validate_new_recipe(&iron_ingot()).unwrap();
        assert_eq!(recipe.name, "Iron Ingot");
        assert_eq!(recipe.job, Job::BSM);
        assert_eq!(recipe.recipe_level, 50);
        assert_eq!(recipe.master_book_level, 0);
        assert_eq!(recipe.stars, 0);
        assert_eq!(recipe.stats.max_durability, 70);
        assert_eq!(recipe.training.progress_per_100, 150.0);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut input = iron_ingot();
        input.insert("recipe_level".into(), json!(" 50 "));
        input.insert("stars".into(), json!("3"));
        input.insert("quality_per_100".into(), json!("120.5"));
        input.insert("max_quality".into(), json!(100.0));

        let recipe = validate_new_recipe(&input).unwrap();
        assert_eq!(recipe.recipe_level, 50);
        assert_eq!(recipe.stars, 3);
        assert_eq!(recipe.training.quality_per_100, 120.5);
        assert_eq!(recipe.stats.max_quality, 100);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let mut input = iron_ingot();
        input.remove("name");
        input.insert("job".into(), Value::Null);
        input.insert("max_quality".into(), json!("  "));

        let errors = validate_new_recipe(&input).unwrap_err();
        assert_eq!(errors.len(), 3);
        for field in ["name", "job", "max_quality"] {
            assert_eq!(errors.for_field(field).unwrap().kind, FieldErrorKind::Missing);
        }
    }

    #[test]
    fn test_type_error_precedes_range() {
        let mut input = iron_ingot();
        input.insert("recipe_level".into(), json!("fifty"));
        input.insert("max_durability".into(), json!(12.5));
        input.insert("required_control".into(), json!(true));
        input.insert("progress_per_100".into(), json!("NaN"));

        let errors = validate_new_recipe(&input).unwrap_err();
        for field in ["recipe_level", "max_durability", "required_control", "progress_per_100"] {
            assert_eq!(errors.for_field(field).unwrap().kind, FieldErrorKind::Type, "{}", field);
        }
    }

    #[test]
    fn test_range_violations() {
        let mut input = iron_ingot();
        input.insert("recipe_level".into(), json!(0));
        input.insert("stars".into(), json!(6));
        input.insert("master_book_level".into(), json!(-1));
        input.insert("quality_per_100".into(), json!(0.0));
        input.insert("name".into(), json!("x".repeat(101)));

        let errors = validate_new_recipe(&input).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.errors().iter().all(|e| e.kind == FieldErrorKind::Range));
        assert_eq!(
            errors.for_field("stars").unwrap().message,
            "must be between 0 and 5"
        );
    }

    #[test]
    fn test_job_must_be_known_code() {
        let mut input = iron_ingot();
        input.insert("job".into(), json!("MIN"));
        let errors = validate_new_recipe(&input).unwrap_err();
        let err = errors.for_field("job").unwrap();
        assert_eq!(err.kind, FieldErrorKind::Enum);
        assert!(err.message.contains("CUL"));

        input.insert("job".into(), json!(3));
        let errors = validate_new_recipe(&input).unwrap_err();
        assert_eq!(errors.for_field("job").unwrap().kind, FieldErrorKind::Type);
    }

    #[test]
    fn test_patch_version_pattern() {
        for bad in ["6", "6.4.1", "v6.4", " 6.4", "6.", ".4", "6,4"] {
            let mut input = iron_ingot();
            input.insert("patch_version".into(), json!(bad));
            let errors = validate_new_recipe(&input).unwrap_err();
            assert_eq!(
                errors.for_field("patch_version").unwrap().kind,
                FieldErrorKind::Pattern,
                "{:?}",
                bad
            );
        }

        let mut input = iron_ingot();
        input.insert("patch_version".into(), json!("10.05"));
        assert!(validate_new_recipe(&input).is_ok());
    }

    #[test]
    fn test_patch_leaves_absent_fields_none() {
        let input = as_map(json!({"max_quality": "200", "stars": null, "id": 99}));
        let patch = validate_recipe_patch(&input).unwrap();
        assert_eq!(patch.max_quality, Some(200));
        assert_eq!(patch.stars, None);
        assert_eq!(patch.name, None);
        assert!(patch.touches_stats());
        assert!(!patch.touches_recipe());
    }

    #[test]
    fn test_patch_rejects_invalid_values() {
        let input = as_map(json!({"job": "XYZ", "recipe_level": -2}));
        let errors = validate_recipe_patch(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_search_empty_strings_are_absent() {
        let criteria = validate_search_criteria(&params(&[
            ("name", ""),
            ("job", ""),
            ("min_level", ""),
            ("stars", " "),
            ("patch_version", ""),
        ]))
        .unwrap();
        assert!(!criteria.has_filters());
        assert_eq!(criteria.page, PageRequest::default());
    }

    #[test]
    fn test_search_coerces_filters() {
        let criteria = validate_search_criteria(&params(&[
            ("name", "Ingot"),
            ("job", "BSM"),
            ("min_level", "10"),
            ("max_level", "90"),
            ("min_craftsmanship", "500"),
            ("skip", "20"),
            ("limit", "5"),
        ]))
        .unwrap();
        assert_eq!(criteria.name.as_deref(), Some("Ingot"));
        assert_eq!(criteria.job, Some(Job::BSM));
        assert_eq!(criteria.min_level, Some(10));
        assert_eq!(criteria.max_level, Some(90));
        assert_eq!(criteria.min_craftsmanship, Some(500));
        assert_eq!(criteria.page, PageRequest::from_skip_limit(20, 5));
    }

    #[test]
    fn test_search_rejects_inverted_ranges() {
        for (min, max) in [
            ("min_level", "max_level"),
            ("min_craftsmanship", "max_craftsmanship"),
            ("min_control", "max_control"),
        ] {
            let errors = validate_search_criteria(&params(&[(min, "50"), (max, "10")])).unwrap_err();
            let err = errors.for_field(max).unwrap();
            assert_eq!(err.kind, FieldErrorKind::CrossField);
        }
    }

    #[test]
    fn test_cross_field_skipped_when_side_invalid() {
        let errors =
            validate_search_criteria(&params(&[("min_level", "abc"), ("max_level", "10")])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field("min_level").unwrap().kind, FieldErrorKind::Type);
    }

    #[test]
    fn test_search_page_mode() {
        let criteria =
            validate_search_criteria(&params(&[("page", "3"), ("per_page", "20"), ("skip", "999")]))
                .unwrap();
        assert_eq!(criteria.page, PageRequest::from_page(3, 20));

        let criteria = validate_search_criteria(&params(&[("page", "2")])).unwrap();
        assert_eq!(criteria.page, PageRequest::from_page(2, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_search_pagination_bounds() {
        let errors = validate_search_criteria(&params(&[("limit", "101"), ("skip", "-1")])).unwrap_err();
        assert_eq!(errors.len(), 2);

        let errors = validate_search_criteria(&params(&[("page", "0"), ("per_page", "0")])).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_search_page_offset_overflow() {
        let errors = validate_search_criteria(&params(&[
            ("page", "9223372036854775807"),
            ("per_page", "100"),
        ]))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = errors.for_field("page").unwrap();
        assert_eq!(error.kind, FieldErrorKind::Range);

        // Largest page whose offset still fits is accepted
        let last = (i64::MAX / 100 + 1).to_string();
        let criteria = validate_search_criteria(&params(&[("page", last.as_str()), ("per_page", "100")])).unwrap();
        assert_eq!(criteria.page.limit, 100);
    }

    #[test]
    fn test_parse_recipe_id() {
        assert_eq!(parse_recipe_id("42").unwrap(), 42);
        assert_eq!(
            parse_recipe_id("0").unwrap_err().errors()[0].kind,
            FieldErrorKind::Range
        );
        assert_eq!(
            parse_recipe_id("abc").unwrap_err().errors()[0].kind,
            FieldErrorKind::Type
        );
    }

    #[test]
    fn test_errors_serialize_as_list() {
        let errors = ValidationErrors::single("job", "bad", FieldErrorKind::Enum);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, json!([{"field": "job", "message": "bad", "kind": "enum"}]));
        assert_eq!(errors.to_string(), "job: bad");
    }
}
