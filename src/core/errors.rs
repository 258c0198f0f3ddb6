use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardioError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Step {index} is out of range (0..{count})")]
    StepOutOfRange { index: usize, count: usize },

    #[error("Submission is only available from the final step")]
    NotAtFinalStep,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("No submission is pending")]
    NoPendingSubmission,

    #[error("CardioError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for CardioError {
    fn from(error: std::io::Error) -> Self {
        CardioError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for CardioError {
    fn from(error: reqwest::Error) -> Self {
        CardioError::Reqwest(Box::new(error))
    }
}
