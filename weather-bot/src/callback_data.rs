//! Callback tokens carried by inline buttons: `weather:<id>`, `delete:<id>`,
//! `confirm_delete:<id>` and `cancel_delete`.

use std::fmt;
use weather_core::HandlerError;

const WEATHER: &str = "weather:";
const DELETE: &str = "delete:";
const CONFIRM_DELETE: &str = "confirm_delete:";
const CANCEL_DELETE: &str = "cancel_delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Weather(i64),
    Delete(i64),
    ConfirmDelete(i64),
    CancelDelete,
}

impl CallbackAction {
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decodes a token; unknown prefixes and non-integer ids are [`HandlerError::InvalidCallback`].
    pub fn parse(data: &str) -> Result<Self, HandlerError> {
        let action = if data == CANCEL_DELETE {
            Some(Self::CancelDelete)
        } else if let Some(id) = data.strip_prefix(CONFIRM_DELETE) {
            id.parse().ok().map(Self::ConfirmDelete)
        } else if let Some(id) = data.strip_prefix(DELETE) {
            id.parse().ok().map(Self::Delete)
        } else if let Some(id) = data.strip_prefix(WEATHER) {
            id.parse().ok().map(Self::Weather)
        } else {
            None
        };
        action.ok_or_else(|| HandlerError::InvalidCallback(data.to_string()))
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weather(id) => write!(f, "{}{}", WEATHER, id),
            Self::Delete(id) => write!(f, "{}{}", DELETE, id),
            Self::ConfirmDelete(id) => write!(f, "{}{}", CONFIRM_DELETE, id),
            Self::CancelDelete => f.write_str(CANCEL_DELETE),
        }
    }
}
