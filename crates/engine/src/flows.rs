//! The module contains the representation of a flow.
use sea_orm::entity::{ActiveValue, prelude::*};

use super::{ResultEngine, error::EngineError};

/// A flow: a named budget entry.
///
/// `icon` is the icon payload resolved from the content store, never the icon
/// id. `tags` holds the tag texts sorted ascending.
#[derive(Clone, Debug, PartialEq)]
pub struct Flow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub icon: String,
    pub tags: Vec<String>,
}

/// Data supplied to create or replace a flow.
///
/// An empty `icon` keeps the current icon (or the default one on create).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowDraft {
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub icon: String,
    pub tags: Vec<String>,
}

impl FlowDraft {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// A flow needs a non-empty name and a non-zero amount.
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if self.amount == 0.0 {
            return Err(EngineError::InvalidFlow(
                "flow amount must not be zero".to_string(),
            ));
        }
        if self.name.is_empty() {
            return Err(EngineError::InvalidFlow(
                "flow name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn has_icon(&self) -> bool {
        !self.icon.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: f64,
    pub icon_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::icons::Entity",
        from = "Column::IconId",
        to = "super::icons::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Icons,
    #[sea_orm(has_many = "super::flows_tags::Entity")]
    FlowsTags,
}

impl Related<super::icons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Icons.def()
    }
}

impl Related<super::flows_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlowsTags.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::flows_tags::Relation::Tags.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::flows_tags::Relation::Flows.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Row for `draft`. `icon_id` stays unset when `None` so the column
    /// default applies on insert and the stored value is kept on update.
    pub(crate) fn from_draft(id: &str, draft: &FlowDraft, icon_id: Option<String>) -> Self {
        Self {
            id: ActiveValue::Set(id.to_string()),
            name: ActiveValue::Set(draft.name.clone()),
            description: ActiveValue::Set(draft.description.clone()),
            amount: ActiveValue::Set(draft.amount),
            icon_id: match icon_id {
                Some(icon_id) => ActiveValue::Set(icon_id),
                None => ActiveValue::NotSet,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_draft() {
        assert!(FlowDraft::new("Rent", 1200.0).validate().is_ok());
        assert!(FlowDraft::new("Refund", -15.5).validate().is_ok());
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = FlowDraft::new("Rent", 0.0).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidFlow(_)));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(FlowDraft::new("", 10.0).validate().is_err());
        assert!(FlowDraft::new("   ", 10.0).validate().is_ok());
    }

    #[test]
    fn empty_icon_means_no_icon() {
        assert!(!FlowDraft::new("Rent", 1.0).has_icon());
        assert!(FlowDraft::new("Rent", 1.0).icon("data:x").has_icon());
    }

    #[test]
    fn active_model_leaves_icon_unset_without_override() {
        let draft = FlowDraft::new("  Rent ", 1200.0).description("monthly");
        let model = ActiveModel::from_draft("id-1", &draft, None);
        assert_eq!(model.name, ActiveValue::Set("  Rent ".to_string()));
        assert_eq!(model.icon_id, ActiveValue::NotSet);
    }
}
