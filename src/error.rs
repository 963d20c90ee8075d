/// The Kind of Error reported by this library.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An Error that does not fall into any other category.
    Other,
    /// The requested operation is not provided.
    ///
    /// Returned unconditionally by non-zero byte generation, and by the system
    /// random source on targets that lack one.
    Unsupported,
    Interrupted,
    PermissionDenied,
    InvalidInput,
    OutOfMemory,
    /// Opening the random number generation algorithm under a provider failed.
    /// The native status code is available via [`Error::raw_os_error`].
    ProviderOpenFailed,
    /// The native random source reported a failure while filling a buffer.
    /// The buffer contents are unspecified after this error.
    GenerationFailed,
    /// The generator's algorithm handle was released; no further generation is
    /// possible on this instance.
    ResourceReleased,

    #[doc(hidden)]
    __Uncategorized,
}

mod sys;

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::Other => f.write_str("Other Error"),
            ErrorKind::Unsupported => f.write_str("Unsupported Operation"),
            ErrorKind::Interrupted => f.write_str("Interrupted"),
            ErrorKind::PermissionDenied => f.write_str("Permission Denied"),
            ErrorKind::InvalidInput => f.write_str("Invalid Input"),
            ErrorKind::OutOfMemory => f.write_str("Out of Memory"),
            ErrorKind::ProviderOpenFailed => f.write_str("Provider Open Failed"),
            ErrorKind::GenerationFailed => f.write_str("Random Generation Failed"),
            ErrorKind::ResourceReleased => f.write_str("Generator Released"),
            ErrorKind::__Uncategorized => f.write_str("(uncategorized error)"),
        }
    }
}

#[derive(Debug)]
enum ErrorInner {
    None,
    #[cfg(feature = "alloc")]
    Custom(alloc::boxed::Box<dyn core::error::Error + Send + Sync + 'static>),
    Message(&'static str),
    OsError(i32),
}

/// The type of errors returned from this library.
///
/// Errors carry an [`ErrorKind`] and, where one exists, the native status code of the
/// failed provider call, available verbatim via [`Error::raw_os_error`].
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: ErrorInner,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.kind.fmt(f)?;

        match &self.inner {
            ErrorInner::None => Ok(()),
            #[cfg(feature = "alloc")]
            ErrorInner::Custom(inner) => {
                f.write_str(": ")?;
                inner.fmt(f)
            }
            ErrorInner::Message(msg) => {
                f.write_str(": ")?;
                f.write_str(msg)
            }
            ErrorInner::OsError(i) => f.write_fmt(format_args!(" (os error {i})")),
        }
    }
}

impl core::error::Error for Error {}

impl Error {
    /// Constructs a new error with the specified `kind` and the specified `payload`.
    ///
    /// Note that this function allocates (even if the payload is a string).
    /// If you do not need a payload, convert from [`ErrorKind`] instead.
    /// If your payload is a string literal, use [`Error::new_with_message`] instead.
    #[cfg(feature = "alloc")]
    pub fn new<E: Into<alloc::boxed::Box<dyn core::error::Error + Send + Sync + 'static>>>(
        kind: ErrorKind,
        payload: E,
    ) -> Self {
        Self {
            kind,
            inner: ErrorInner::Custom(payload.into()),
        }
    }

    /// Constructs a new error with the specified `kind` and the specified `msg`.
    pub fn new_with_message(kind: ErrorKind, msg: &'static str) -> Self {
        Self {
            kind,
            inner: ErrorInner::Message(msg),
        }
    }

    /// Constructs a new error from a status code reported by the native random
    /// source, classifying the code into an [`ErrorKind`].
    ///
    /// Codes with no specific classification report [`ErrorKind::GenerationFailed`].
    /// The code itself is preserved and returned by [`Error::raw_os_error`].
    pub fn from_raw_os_error(errno: i32) -> Self {
        let kind = sys::kind_from_raw_os_error(errno);

        Self {
            kind,
            inner: ErrorInner::OsError(errno),
        }
    }

    /// Constructs a new error with the specified `kind` carrying a native status
    /// code verbatim.
    pub fn with_raw_os_error(kind: ErrorKind, errno: i32) -> Self {
        Self {
            kind,
            inner: ErrorInner::OsError(errno),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the raw native status code, if the error was constructed from one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self.inner {
            ErrorInner::OsError(o) => Some(o),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(value: ErrorKind) -> Self {
        Self {
            kind: value,
            inner: ErrorInner::None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
impl From<ErrorKind> for std::io::ErrorKind {
    fn from(value: ErrorKind) -> Self {
        match value {
            ErrorKind::Unsupported => Self::Unsupported,
            ErrorKind::Interrupted => Self::Interrupted,
            ErrorKind::PermissionDenied => Self::PermissionDenied,
            ErrorKind::InvalidInput => Self::InvalidInput,
            ErrorKind::OutOfMemory => Self::OutOfMemory,
            ErrorKind::ProviderOpenFailed => Self::NotFound,
            ErrorKind::GenerationFailed
            | ErrorKind::ResourceReleased
            | ErrorKind::Other
            | ErrorKind::__Uncategorized => Self::Other,
        }
    }
}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        let kind: std::io::ErrorKind = value.kind.into();

        match value.inner {
            ErrorInner::OsError(errno) => Self::from_raw_os_error(errno),
            #[cfg(feature = "alloc")]
            ErrorInner::Custom(inner) => Self::new(kind, inner),
            ErrorInner::Message(msg) => Self::new(kind, msg),
            ErrorInner::None => Self::from(kind),
        }
    }
}
