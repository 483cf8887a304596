#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedListenAddress {
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
}

pub(crate) fn is_wildcard_host(host: &str) -> bool {
    matches!(host.trim(), "0.0.0.0" | "::")
}

pub(crate) fn format_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Parse `HOST`, which may be `host`, `host:port`, `[ipv6]` or `[ipv6]:port`.
/// An explicit port here wins over `PORT`.
pub(crate) fn parse_listen_address(input: &str) -> Result<ParsedListenAddress, String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Ok(ParsedListenAddress {
            host: "0.0.0.0".to_string(),
            port: None,
        });
    }
    if raw.contains("://") || raw.contains('/') {
        return Err("listen address must be host or host:port".to_string());
    }

    if let Some(rest) = raw.strip_prefix('[') {
        let idx = rest
            .find(']')
            .ok_or_else(|| "invalid IPv6 address: missing closing ']'".to_string())?;
        let host = rest[..idx].trim();
        if host.is_empty() {
            return Err("listen address missing host".to_string());
        }
        let tail = rest[idx + 1..].trim();
        if tail.is_empty() {
            return Ok(ParsedListenAddress {
                host: host.to_string(),
                port: None,
            });
        }
        let port_raw = tail
            .strip_prefix(':')
            .ok_or_else(|| "listen address must be [ipv6]:port".to_string())?
            .trim();
        return Ok(ParsedListenAddress {
            host: host.to_string(),
            port: Some(parse_port(port_raw)?),
        });
    }

    let parts: Vec<&str> = raw.split(':').collect();
    match parts.as_slice() {
        [host] => Ok(ParsedListenAddress {
            host: host.to_string(),
            port: None,
        }),
        [host, port_raw] => {
            let host = host.trim();
            if host.is_empty() {
                return Err("listen address missing host".to_string());
            }
            Ok(ParsedListenAddress {
                host: host.to_string(),
                port: Some(parse_port(port_raw.trim())?),
            })
        }
        _ if raw.parse::<std::net::Ipv6Addr>().is_ok() => Ok(ParsedListenAddress {
            host: raw.to_string(),
            port: None,
        }),
        _ => Err("IPv6 with a port must use [addr]:port".to_string()),
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    raw.parse()
        .map_err(|_| format!("invalid listen port: {raw}"))
}
