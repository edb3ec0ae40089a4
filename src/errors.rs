use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("no bearer token available for upstream call")]
    MissingToken,
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },
    #[error("Rootly API error: {status} - {status_text}")]
    Upstream { status: u16, status_text: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn upstream(status: u16, status_text: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            status_text: status_text.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
