use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The replay header could not be read or referenced data that does not
    /// exist. Always fatal: a session is never constructed over a log whose
    /// header is broken.
    #[error("malformed replay header: {0}")]
    HeaderFormat(String),

    /// A read on the log stream failed for a reason other than reaching the
    /// end of the file. Not retried; a local log that faults mid-read is
    /// unrecoverable without the original recording.
    #[error("replay io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config io error: {0}")]
    ConfigIo(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The session builder was finalized without a required collaborator.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}
