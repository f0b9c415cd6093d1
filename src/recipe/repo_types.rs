use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Which owner-scoped table a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Tag,
    Ingredient,
}

impl ResourceKind {
    pub fn table(self) -> &'static str {
        match self {
            ResourceKind::Tag => "tags",
            ResourceKind::Ingredient => "ingredients",
        }
    }
}

/// A named record owned by exactly one user. Tags and ingredients share this shape.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OwnedRecord {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub created_at: OffsetDateTime,
}
