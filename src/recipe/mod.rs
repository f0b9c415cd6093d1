pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

use repo_types::ResourceKind;

/// An owner-scoped resource type served under its own path.
pub trait Resource: Send + Sync + 'static {
    const KIND: ResourceKind;
    const PATH: &'static str;
    /// Used in logs.
    const LABEL: &'static str;
}

pub enum Tag {}

impl Resource for Tag {
    const KIND: ResourceKind = ResourceKind::Tag;
    const PATH: &'static str = "/recipe/tags";
    const LABEL: &'static str = "tag";
}

pub enum Ingredient {}

impl Resource for Ingredient {
    const KIND: ResourceKind = ResourceKind::Ingredient;
    const PATH: &'static str = "/recipe/ingredients";
    const LABEL: &'static str = "ingredient";
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::resource_routes::<Tag>())
        .merge(handlers::resource_routes::<Ingredient>())
}
