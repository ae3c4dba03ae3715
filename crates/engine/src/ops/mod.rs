use sea_orm::DatabaseConnection;

use crate::{DefaultIcon, ResultEngine};

mod flows;
mod icons;
mod query;
mod tags;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every flow, icon and tag operation.
///
/// Each public operation runs in its own database transaction, so icon
/// reference counts are read and acted upon atomically.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    default_icon: DefaultIcon,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The reserved icon assigned to flows without one.
    pub fn default_icon(&self) -> &DefaultIcon {
        &self.default_icon
    }

    fn is_default_icon(&self, icon_id: &str) -> bool {
        icon_id == self.default_icon.id
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    default_icon: DefaultIcon,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Replace the payload of the reserved icon. Its id stays
    /// [`DEFAULT_ICON_ID`](crate::DEFAULT_ICON_ID).
    pub fn default_icon_data(mut self, data: impl Into<String>) -> EngineBuilder {
        self.default_icon = DefaultIcon::with_data(data);
        self
    }

    /// Construct `Engine`, seeding the default icon if it is missing.
    pub async fn build(self) -> ResultEngine<Engine> {
        let engine = Engine {
            database: self.database,
            default_icon: self.default_icon,
        };
        engine.seed_default_icon().await?;
        Ok(engine)
    }
}
