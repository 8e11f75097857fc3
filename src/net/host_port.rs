use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::HostPortError;

/// A host name or address with an optional port, as written in configuration files and on command
/// lines.
///
/// The accepted forms are:
/// - `host` and `host:port`, for names and IPv4 addresses.
/// - `[v6]` and `[v6]:port`, for bracketed IPv6 addresses.
/// - A bare IPv6 address without a port. Any string with more than one colon is read this way,
///   since the port can't be told apart from the last group of the address.
///
/// The host isn't validated beyond being non-empty, it is kept exactly as written (without
/// brackets). Displaying a HostPort puts the brackets back around any host containing a colon.
///
/// # Examples
/// ```
/// # use seqkit::net::HostPort;
/// let parsed: HostPort = "[::1]:8080".parse().unwrap();
/// assert_eq!(parsed.host(), "::1");
/// assert_eq!(parsed.port(), Some(8080));
/// assert_eq!(parsed.to_string(), "[::1]:8080");
///
/// let bare: HostPort = "fe80::2".parse().unwrap();
/// assert_eq!(bare.with_default_port(443).to_string(), "[fe80::2]:443");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPort {
    host: String,
    port: Option<u16>,
}

impl HostPort {
    /// Creates a new HostPort from its parts, failing only if `host` is empty.
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Result<HostPort, HostPortError> {
        let host = host.into();
        if host.is_empty() {
            return Err(HostPortError::Empty);
        }
        Ok(HostPort {
            host,
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the port, or `default` if none was given.
    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }

    /// Sets the port to `port` unless one was already given.
    pub fn with_default_port(self, port: u16) -> HostPort {
        HostPort {
            port: self.port.or(Some(port)),
            ..self
        }
    }

    /// Returns true if the host contains a colon, which means it has to be bracketed when a port
    /// follows it.
    pub fn is_ipv6(&self) -> bool {
        self.host.contains(':')
    }

    /// Splits the HostPort into its host and port.
    pub fn into_parts(self) -> (String, Option<u16>) {
        (self.host, self.port)
    }
}

fn parse_port(port: &str) -> Result<u16, HostPortError> {
    // u16::from_str also accepts a leading '+'.
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HostPortError::InvalidPort(port.to_string()));
    }
    port.parse().map_err(|_| HostPortError::InvalidPort(port.to_string()))
}

impl FromStr for HostPort {
    type Err = HostPortError;

    fn from_str(s: &str) -> Result<HostPort, HostPortError> {
        if let Some(bracketed) = s.strip_prefix('[') {
            let (host, trailer) = bracketed.split_once(']').ok_or(HostPortError::UnclosedBracket)?;
            let port = match trailer {
                "" => None,
                _ => match trailer.strip_prefix(':') {
                    Some(port) => Some(parse_port(port)?),
                    None => return Err(HostPortError::UnexpectedTrailer(trailer.to_string())),
                },
            };
            return HostPort::new(host, port);
        }

        match s.split_once(':') {
            Some((host, port)) if !port.contains(':') => HostPort::new(host, Some(parse_port(port)?)),
            _ => HostPort::new(s, None),
        }
    }
}

impl TryFrom<&str> for HostPort {
    type Error = HostPortError;

    fn try_from(value: &str) -> Result<HostPort, HostPortError> {
        value.parse()
    }
}

impl Display for HostPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_ipv6() {
            write!(f, "[{}]", self.host)?;
        } else {
            write!(f, "{}", self.host)?;
        }
        match self.port {
            Some(port) => write!(f, ":{}", port),
            None => Ok(()),
        }
    }
}
