use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod flow {
    use super::*;

    /// A flow as returned by the API.
    ///
    /// `icon` carries the raw icon payload (usually a `data:` URI), not the
    /// icon id. `tags` is always present, possibly empty.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Flow {
        pub id: String,
        pub name: String,
        pub description: String,
        pub amount: f64,
        pub icon: String,
        pub tags: Vec<String>,
    }

    /// Request body for `POST /flows` and `PATCH /flows/{id}`.
    ///
    /// Every field may be omitted or `null`. An `id` sent by the client is
    /// accepted and ignored: the server assigns ids on create and takes them
    /// from the path on update.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FlowInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<String>,
        #[serde(deserialize_with = "null_as_default")]
        pub name: String,
        #[serde(deserialize_with = "null_as_default")]
        pub description: String,
        #[serde(deserialize_with = "null_as_default")]
        pub amount: f64,
        #[serde(deserialize_with = "null_as_default")]
        pub icon: String,
        #[serde(deserialize_with = "null_as_default")]
        pub tags: Vec<String>,
    }
}

pub mod response {
    use super::*;

    /// Acknowledgment body, e.g. `{"ok": "Flow deleted"}`.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Ack {
        pub ok: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
    }
}
