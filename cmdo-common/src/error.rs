//! Shared error model for cross-crate APIs.

use thiserror::Error;

/// Unified result type used by all public interfaces in `commando-rs`.
pub type CmdoResult<T> = Result<T, CmdoError>;

/// Configuration and capability failures.
///
/// Every variant except [`CmdoError::Completion`] and [`CmdoError::InvalidDuration`] is raised
/// while commands are being registered. Request-time problems (missing permission, bad argument
/// values) are reported as dispatch outcomes instead of errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CmdoError {
    /// A builder option was set a second time.
    #[error("`{0}` has already been set")]
    AlreadySet(&'static str),

    /// Argument options contradict each other or the argument type.
    #[error("invalid argument configuration: {0}")]
    InvalidArgument(String),

    /// Argument pattern failed to compile.
    #[error("invalid argument pattern: {0}")]
    InvalidPattern(String),

    /// A command already declares an argument with this name.
    #[error("command already contains an argument named `{0}`")]
    DuplicateArgument(String),

    /// An argument was appended after a catch-remaining argument.
    #[error("argument `{0}` cannot follow a catch-remaining argument")]
    CatchRemainingNotLast(String),

    /// A required argument was appended after an optional one.
    #[error("required argument `{0}` cannot follow an optional argument")]
    RequiredAfterOptional(String),

    /// An argument depends on an argument that is not declared before it in the same command.
    #[error("argument `{argument}` depends on `{dependency}` which is not part of the command")]
    UnknownDependency {
        /// Dependent argument.
        argument: String,
        /// Missing dependency name.
        dependency: String,
    },

    /// A command is already registered at this path.
    #[error("a command is already registered at `{0}`")]
    DuplicateCommand(String),

    /// Command paths need at least one segment.
    #[error("command path must contain at least one segment")]
    EmptyPath,

    /// A sender kind was declared twice.
    #[error("sender kind `{0}` is already declared")]
    SenderKindDeclared(&'static str),

    /// A dispatch callback was registered twice.
    #[error("callback `{0}` has already been registered")]
    CallbackAlreadySet(&'static str),

    /// Completion capability for an enumerable type could not be created.
    #[error("completion capability for type `{0}` is unavailable")]
    CompleterUnavailable(&'static str),

    /// A completion capability failed while enumerating items.
    #[error("completion failed: {0}")]
    Completion(String),

    /// Duration text could not be parsed.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}
