//! Content-addressed icon storage.
//!
//! Icons are keyed by the SHA-256 of their payload, so flows carrying the same
//! image share a single row.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sea_orm::entity::prelude::*;
use sha2::{Digest, Sha256};

/// Id of the reserved icon used when a flow has none of its own.
pub const DEFAULT_ICON_ID: &str = "00000000-0000-0000-0000-000000000000";

const DEFAULT_ICON_SVG: &[u8] = include_bytes!("../assets/default_icon.svg");

/// The reserved icon seeded when the engine is built. It is never released.
///
/// The id is always [`DEFAULT_ICON_ID`], the default of the `flows.icon_id`
/// column; only the payload can be replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultIcon {
    pub(crate) id: String,
    pub(crate) data: String,
}

impl DefaultIcon {
    pub(crate) fn with_data(data: impl Into<String>) -> Self {
        Self {
            id: DEFAULT_ICON_ID.to_string(),
            data: data.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

impl Default for DefaultIcon {
    fn default() -> Self {
        Self::with_data(format!(
            "data:image/svg+xml;base64,{}",
            STANDARD.encode(DEFAULT_ICON_SVG)
        ))
    }
}

/// Lowercase hex SHA-256 of an icon payload.
pub fn content_hash(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "icons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    #[sea_orm(unique)]
    pub hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flows::Entity")]
    Flows,
}

impl Related<super::flows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(content_hash("data:abc"), content_hash("data:abc"));
        assert_ne!(content_hash("data:abc"), content_hash("data:abd"));
    }

    #[test]
    fn hash_of_empty_payload() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn default_icon_is_an_svg_data_uri() {
        let icon = DefaultIcon::default();
        assert_eq!(icon.id, DEFAULT_ICON_ID);
        assert!(icon.data.starts_with("data:image/svg+xml;base64,PD94bWwg"));
    }

    #[test]
    fn custom_payload_keeps_reserved_id() {
        let icon = DefaultIcon::with_data("data:custom");
        assert_eq!(icon.id(), DEFAULT_ICON_ID);
        assert_eq!(icon.data(), "data:custom");
    }
}
