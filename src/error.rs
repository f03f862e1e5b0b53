#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown tag kind `{0}`")]
    UnknownTagKind(String),
    #[error("no tag kind given")]
    MissingTagKind,
    #[error("invalid attribute `{0}`, expected name=value")]
    InvalidAttribute(String),
    #[error(transparent)]
    Args(#[from] pico_args::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
