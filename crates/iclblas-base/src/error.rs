use thiserror::Error;

/// Failures reported by a compute engine.
///
/// The dispatcher never inspects these, it only carries them back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("kernel `{kernel}` not found in module `{module}`")]
    KernelNotFound { kernel: String, module: String },
    #[error("failed to allocate {bytes} bytes of device memory")]
    AllocationFailed { bytes: usize },
    #[error("kernel `{kernel}` rejected argument {index}")]
    InvalidArgument { kernel: String, index: u32 },
    #[error("failed to submit kernel `{kernel}`: {reason}")]
    SubmissionFailed { kernel: String, reason: String },
    #[error("failed waiting for event {event}: {reason}")]
    WaitFailed { event: u64, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("no implementation registered for routine `{routine}`")]
    Unimplemented { routine: &'static str },
    #[error("no registered implementation of `{routine}` accepts the given parameters")]
    NoApplicableImplementation { routine: &'static str },
    #[error("invalid value for `{0}`")]
    InvalidValue(&'static str),
    #[error("unsupported value for `{0}`")]
    NotSupported(&'static str),
    #[error("binding {needed} elements exceeds the host region of {len} elements")]
    BufferTooSmall { needed: usize, len: usize },
    #[error("temporary buffer of zero elements requested")]
    ZeroSizedBuffer,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Status codes of the C interface.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success = 0,
    NotInitialized = 1,
    AllocFailed = 3,
    InvalidValue = 7,
    ArchMismatch = 8,
    MappingError = 11,
    ExecutionFailed = 13,
    InternalError = 14,
    NotSupported = 15,
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Error::Unimplemented { .. } => Status::InternalError,
            Error::NoApplicableImplementation { .. } => Status::NotSupported,
            Error::InvalidValue(_) => Status::InvalidValue,
            Error::NotSupported(_) => Status::NotSupported,
            Error::BufferTooSmall { .. } => Status::MappingError,
            Error::ZeroSizedBuffer => Status::AllocFailed,
            Error::Engine(e) => match e {
                EngineError::KernelNotFound { .. } => Status::ArchMismatch,
                EngineError::AllocationFailed { .. } => Status::AllocFailed,
                EngineError::InvalidArgument { .. } => Status::InternalError,
                EngineError::SubmissionFailed { .. } | EngineError::WaitFailed { .. } => Status::ExecutionFailed,
            },
        }
    }
}

impl<T> From<&Result<T>> for Status {
    fn from(r: &Result<T>) -> Self {
        match r {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }
}
