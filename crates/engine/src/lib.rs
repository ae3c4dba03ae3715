pub use error::EngineError;
pub use flows::{Flow, FlowDraft};
pub use icons::{DEFAULT_ICON_ID, DefaultIcon, content_hash};
pub use ops::{Engine, EngineBuilder};

mod error;
mod flows;
mod flows_tags;
mod icons;
mod ops;
mod tags;

type ResultEngine<T> = Result<T, EngineError>;
