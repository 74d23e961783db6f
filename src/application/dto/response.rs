use crate::application::error::SerializedError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSuccessResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiSuccessResponse<T> {
    pub fn new(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<SerializedError>,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>, errors: Vec<SerializedError>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
        }
    }
}
