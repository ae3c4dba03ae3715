use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::response::ErrorBody;
pub use server::{ServerState, app, run_with_listener};

mod flows;
mod server;

pub mod types {
    pub mod flow {
        pub use api_types::flow::{Flow, FlowInput};
        pub use engine::FlowDraft;
    }

    pub mod response {
        pub use api_types::response::{Ack, ErrorBody};
    }
}

pub(crate) const MSG_INVALID_FLOW: &str = "Please provide name and amount";
pub(crate) const MSG_WRONG_FORMAT: &str = "Wrong data format";
pub(crate) const MSG_NOT_FOUND: &str = "Flow with given ID does not exist";
pub(crate) const MSG_DATABASE: &str = "Database error";

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

// Clients of the original API expect every failure as a 500 with an
// `{"error": ...}` body.
fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidFlow(_)
        | EngineError::KeyNotFound(_)
        | EngineError::EmptyTag
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::InvalidFlow(_) => MSG_INVALID_FLOW.to_string(),
        EngineError::KeyNotFound(_) => MSG_NOT_FOUND.to_string(),
        EngineError::EmptyTag => err.to_string(),
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            MSG_DATABASE.to_string()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {value}");
        Self::Generic(MSG_WRONG_FORMAT.to_string())
    }
}
