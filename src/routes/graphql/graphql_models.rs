use serde::Serialize;

// Body for requests rejected before they reach the executor, shaped like a
// GraphQL response so clients can read it the same way.
#[derive(Serialize)]
pub struct RejectedRequestResponse {
    pub data: Option<()>,
    pub errors: Vec<ErrorMessage>,
}

#[derive(Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl RejectedRequestResponse {
    pub fn new(message: String) -> Self {
        RejectedRequestResponse {
            data: None,
            errors: vec![ErrorMessage { message }],
        }
    }
}
