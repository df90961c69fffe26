use courier_core::error::CourierError;
use serde::{de, Deserialize};

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
    pub parameters: Option<ResponseParameters>,
}

/// Extra hints attached to a failed request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseParameters {
    /// The group moved to a supergroup with this id.
    pub migrate_to_chat_id: Option<i64>,
    /// Flood control: seconds to wait before repeating the request.
    pub retry_after: Option<u64>,
}

impl<T> ApiResponse<T> {
    /// Split the envelope into the result or a server-reported error.
    pub fn into_result(self) -> Result<T, CourierError> {
        if !self.ok {
            return Err(CourierError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
                retry_after: self.parameters.and_then(|p| p.retry_after),
            });
        }
        self.result
            .ok_or_else(|| CourierError::Decode(de::Error::missing_field("result")))
    }
}
