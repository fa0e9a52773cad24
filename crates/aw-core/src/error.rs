use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum WatchReason {
    #[error("listing decode error")]
    ListingDecode,
    #[error("event sink error")]
    EventSink,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for WatchReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::ListingDecode => 1001,
            Self::EventSink => 1002,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type WatchError = StructError<WatchReason>;
pub type WatchResult<T> = Result<T, WatchError>;
