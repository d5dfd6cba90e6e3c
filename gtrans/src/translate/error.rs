#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request api failed: {status}, message: {message}")]
    RequestAPIFailed { status: String, message: String },
    #[error("invalid language '{0}'")]
    InvalidLanguage(String),
    #[error("error: {0}")]
    Common(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<gtrans_common::Error> for Error {
    fn from(e: gtrans_common::Error) -> Self {
        match e {
            gtrans_common::Error::Common(msg) => Error::Common(msg),
            gtrans_common::Error::RequestAPIFailed { status, message } => {
                Error::RequestAPIFailed { status, message }
            }
            gtrans_common::Error::Reqwest(e) => Error::Reqwest(e),
        }
    }
}
