use derive_more::{Display, Error, IsVariant};

/// An error returned when a string isn't a valid [`HostPort`](super::HostPort).
#[derive(Debug, Display, Error, Clone, PartialEq, Eq, IsVariant)]
pub enum HostPortError {
    #[display("host is empty")]
    Empty,
    #[display("IPv6 host is missing its closing bracket")]
    UnclosedBracket,
    #[display("unexpected {_0:?} after bracketed host")]
    UnexpectedTrailer(#[error(not(source))] String),
    #[display("invalid port {_0:?}")]
    InvalidPort(#[error(not(source))] String),
}
