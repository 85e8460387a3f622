pub mod list_controller;
pub mod system_controller;
pub mod task_controller;

use serde::de::DeserializeOwned;

/// Decodes a JSON request body regardless of the declared content type.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(body)
}
