//! Polling parameters and the `getUpdates` request body.

use courier_core::config::PollingConfig;
use courier_core::error::CourierError;
use serde::Serialize;
use tracing::warn;

use crate::types::UpdateType;

/// Highest `limit` the Bot API accepts.
pub const MAX_LIMIT: u8 = 100;

/// Validated settings for every `getUpdates` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingParams {
    limit: u8,
    timeout_secs: u32,
    allowed_updates: Option<Vec<UpdateType>>,
}

impl Default for PollingParams {
    fn default() -> Self {
        Self {
            limit: MAX_LIMIT,
            timeout_secs: 30,
            allowed_updates: None,
        }
    }
}

impl PollingParams {
    /// Build parameters, rejecting a `limit` outside 1-100.
    pub fn new(
        limit: u8,
        timeout_secs: u32,
        allowed_updates: Option<Vec<UpdateType>>,
    ) -> Result<Self, CourierError> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(CourierError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }
        if timeout_secs == 0 {
            warn!("polling timeout is 0: short polling is meant for testing only");
        }
        Ok(Self {
            limit,
            timeout_secs,
            allowed_updates,
        })
    }

    /// Build parameters from config, parsing update-type names.
    pub fn from_config(config: &PollingConfig) -> Result<Self, CourierError> {
        let allowed_updates = config
            .allowed_updates
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| name.parse::<UpdateType>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Self::new(config.limit, config.timeout_secs, allowed_updates)
    }

    pub fn limit(&self) -> u8 {
        self.limit
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    pub fn allowed_updates(&self) -> Option<&[UpdateType]> {
        self.allowed_updates.as_deref()
    }

    /// The request for the next batch starting at `offset`.
    pub fn request(&self, offset: Option<i64>) -> GetUpdates {
        GetUpdates {
            offset,
            limit: Some(self.limit),
            timeout: Some(self.timeout_secs),
            allowed_updates: self.allowed_updates.clone(),
        }
    }
}

/// `getUpdates` body. Unset fields are left out so server-side defaults hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<UpdateType>>,
}
