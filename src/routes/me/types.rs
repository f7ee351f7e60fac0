use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// JSON payload returned by `/me`. `message` is only present on errors.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
        }
    }
}

/// Where the candidate email was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailSource {
    Query,
    Body,
}

impl std::fmt::Display for EmailSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailSource::Query => f.write_str("query"),
            EmailSource::Body => f.write_str("body"),
        }
    }
}
