//! Request extractors that reject through the error envelope
//!
//! axum's stock extractors answer malformed input with plain-text bodies;
//! these wrappers turn the same failures into validation errors.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use rlp_common::validation::parse_recipe_id;
use rlp_common::{FieldErrorKind, ValidationErrors};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ApiError;

/// JSON request body that must be an object
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ValidationErrors::single("body", rejection.body_text(), FieldErrorKind::Parse)
            })?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(ValidationErrors::single(
                "body",
                "must be a JSON object",
                FieldErrorKind::Type,
            )
            .into()),
        }
    }
}

/// `:id` path segment parsed as a positive recipe id
#[derive(Debug, Clone, Copy)]
pub struct RecipeId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecipeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ValidationErrors::single("id", rejection.body_text(), FieldErrorKind::Parse)
            })?;

        Ok(RecipeId(parse_recipe_id(&raw)?))
    }
}

/// Raw query-string parameters, validated later by the handler
#[derive(Debug, Default)]
pub struct QueryParams(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ValidationErrors::single("query", rejection.body_text(), FieldErrorKind::Parse)
            })?;

        Ok(QueryParams(params))
    }
}
