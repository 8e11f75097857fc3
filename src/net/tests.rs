#![cfg(test)]

use super::*;

fn parse(s: &str) -> Result<HostPort, HostPortError> {
    s.parse()
}

#[test]
fn test_host_only() {
    let parsed = parse("example.com").expect("a bare host should parse");
    assert_eq!(parsed.host(), "example.com");
    assert_eq!(parsed.port(), None);
    assert_eq!(parsed.port_or(80), 80);
    assert!(!parsed.is_ipv6());
}

#[test]
fn test_host_and_port() {
    let parsed = parse("10.0.0.1:5432").expect("host:port should parse");
    assert_eq!(parsed.host(), "10.0.0.1");
    assert_eq!(parsed.port(), Some(5432));
    assert_eq!(parsed.port_or(80), 5432);
    assert_eq!(parsed.to_string(), "10.0.0.1:5432");
}

#[test]
fn test_ipv6() {
    let bracketed = parse("[2001:db8::1]:443").expect("bracketed IPv6 with a port should parse");
    assert_eq!(bracketed.host(), "2001:db8::1");
    assert_eq!(bracketed.port(), Some(443));
    assert!(bracketed.is_ipv6());

    let no_port = parse("[::1]").expect("bracketed IPv6 should parse");
    assert_eq!(no_port.host(), "::1");
    assert_eq!(no_port.port(), None);
    assert_eq!(no_port.to_string(), "[::1]");

    let bare = parse("fe80::1:2").expect("bare IPv6 should parse");
    assert_eq!(bare.host(), "fe80::1:2");
    assert_eq!(bare.port(), None, "The last group of a bare address isn't a port.");
    assert_eq!(bare.to_string(), "[fe80::1:2]");
}

#[test]
fn test_with_default_port() {
    let given = parse("db:1234").expect("host:port should parse").with_default_port(5432);
    assert_eq!(given.port(), Some(1234), "A given port should be kept.");

    let defaulted = parse("db").expect("a bare host should parse").with_default_port(5432);
    assert_eq!(defaulted.port(), Some(5432));
    assert_eq!(defaulted.into_parts(), ("db".to_string(), Some(5432)));
}

#[test]
fn test_display_round_trip() {
    for text in ["localhost", "localhost:8080", "[::1]", "[::1]:9000", "127.0.0.1:0"] {
        let parsed = parse(text).expect("valid host:port strings should parse");
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parse(&parsed.to_string()), Ok(parsed));
    }
}

#[test]
fn test_errors() {
    assert_eq!(parse(""), Err(HostPortError::Empty));
    assert_eq!(parse("[]"), Err(HostPortError::Empty));
    assert_eq!(parse(":80"), Err(HostPortError::Empty));
    assert_eq!(parse("[::1"), Err(HostPortError::UnclosedBracket));
    assert_eq!(parse("[::1]80"), Err(HostPortError::UnexpectedTrailer("80".to_string())));
    assert_eq!(parse("host:"), Err(HostPortError::InvalidPort(String::new())));
    assert_eq!(parse("[::1]:"), Err(HostPortError::InvalidPort(String::new())));
    assert_eq!(parse("host:http"), Err(HostPortError::InvalidPort("http".to_string())));
    assert_eq!(parse("host:+80"), Err(HostPortError::InvalidPort("+80".to_string())));
    assert_eq!(parse("host:65536"), Err(HostPortError::InvalidPort("65536".to_string())));

    assert_eq!(HostPort::new("", Some(1)), Err(HostPortError::Empty));
    assert_eq!(
        HostPortError::InvalidPort("x".to_string()).to_string(),
        "invalid port \"x\""
    );
}

#[test]
fn test_try_from() {
    let parsed = HostPort::try_from("cache:6379").expect("host:port should parse");
    assert_eq!(parsed, HostPort::new("cache", Some(6379)).expect("the host isn't empty"));
}
