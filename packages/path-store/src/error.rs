//! Error types for store operations.
//!
//! Every operation returns a tagged result. There is no transient failure
//! category: outcomes depend only on the current contents of the store.

/// POSIX errno values a protocol layer hands back (negated) to the kernel.
pub mod errno {
    pub const ENOENT: i32 = 2;
    pub const ENOMEM: i32 = 12;
    pub const EBUSY: i32 = 16;
    pub const EEXIST: i32 = 17;
    pub const ENOTDIR: i32 = 20;
    pub const EISDIR: i32 = 21;
    pub const EFBIG: i32 = 27;
}

/// Fieldless discriminant of [`Error`], for matching at the protocol boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    IsADirectory,
    AlreadyExists,
    ResourceExhausted,
    RootBusy,
}

/// Why content growth failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exhaustion {
    /// The allocator refused to reserve the bytes.
    Allocation,
    /// The growth would exceed the configured `max_file_size`.
    SizeLimit,
    /// `offset + len` does not fit in the address space.
    Overflow,
}

impl std::fmt::Display for Exhaustion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exhaustion::Allocation => write!(f, "allocation failed"),
            Exhaustion::SizeLimit => write!(f, "size limit"),
            Exhaustion::Overflow => write!(f, "offset overflow"),
        }
    }
}

/// Errors produced by the path store and entry operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no such entry: {path}")]
    NotFound { path: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("is a directory: {path}")]
    IsADirectory { path: String },

    #[error("already exists: {path}")]
    AlreadyExists { path: String },

    /// Content growth could not be satisfied.
    ///
    /// `length` and content are left untouched when this is returned.
    #[error("resource exhausted growing {path} to {requested} bytes ({cause})")]
    ResourceExhausted {
        path: String,
        requested: u64,
        cause: Exhaustion,
    },

    /// The root directory cannot be removed.
    #[error("entry is busy: {path}")]
    RootBusy { path: String },
}

impl Error {
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound { path: path.into() }
    }

    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Error::NotADirectory { path: path.into() }
    }

    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Error::IsADirectory { path: path.into() }
    }

    pub fn already_exists(path: impl Into<String>) -> Self {
        Error::AlreadyExists { path: path.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::NotADirectory { .. } => ErrorKind::NotADirectory,
            Error::IsADirectory { .. } => ErrorKind::IsADirectory,
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::ResourceExhausted { .. } => ErrorKind::ResourceExhausted,
            Error::RootBusy { .. } => ErrorKind::RootBusy,
        }
    }

    /// The path the failing operation was applied to.
    pub fn path(&self) -> &str {
        match self {
            Error::NotFound { path }
            | Error::NotADirectory { path }
            | Error::IsADirectory { path }
            | Error::AlreadyExists { path }
            | Error::ResourceExhausted { path, .. }
            | Error::RootBusy { path } => path,
        }
    }

    /// Positive errno for this error.
    pub fn errno(&self) -> i32 {
        match self {
            Error::NotFound { .. } => errno::ENOENT,
            Error::NotADirectory { .. } => errno::ENOTDIR,
            Error::IsADirectory { .. } => errno::EISDIR,
            Error::AlreadyExists { .. } => errno::EEXIST,
            Error::ResourceExhausted { cause, .. } => match cause {
                Exhaustion::Allocation => errno::ENOMEM,
                Exhaustion::SizeLimit | Exhaustion::Overflow => errno::EFBIG,
            },
            Error::RootBusy { .. } => errno::EBUSY,
        }
    }

    /// Short signal text for the error kind, without the path.
    pub fn signal(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "no such entry",
            ErrorKind::NotADirectory => "not a directory",
            ErrorKind::IsADirectory => "is a directory",
            ErrorKind::AlreadyExists => "already exists",
            ErrorKind::ResourceExhausted => "resource exhausted",
            ErrorKind::RootBusy => "entry is busy",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
