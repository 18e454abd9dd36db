use thiserror::Error;

/// Everything that can abort an invocation. There is no recovery path
/// anywhere in this tool: `main` renders the message once, on the
/// controlling terminal, and exits nonzero.
#[derive(Debug, Error)]
pub enum Fatal {
    /// Wrong argument count or content. Shares its message with
    /// `Untrusted` so a probing caller cannot tell which check rejected
    /// the invocation.
    #[error("can only be used by git")]
    Usage,

    /// The process ancestry never reached a git process.
    #[error("can only be used by git")]
    Untrusted,

    /// The environment could not answer a question the security checks
    /// depend on: process table unreadable, git unlaunchable, no terminal.
    #[error("{0:#}")]
    Environment(#[from] anyhow::Error),

    /// The secret store reported anything other than "not found". The
    /// message is the store's own error text.
    #[error("{0}")]
    Store(String),
}

pub type Result<T, E = Fatal> = std::result::Result<T, E>;
