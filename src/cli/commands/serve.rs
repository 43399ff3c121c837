//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, settings.port)?,
        None => (settings.host.clone(), settings.port),
    };

    match &settings.linker_endpoint {
        Some(endpoint) => println!("  Entity linking via {}", style(endpoint).dim()),
        None => println!("  Entity linking {}", style("disabled").yellow()),
    }
    println!(
        "{} Starting mmif-nlp server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "5000" -> 127.0.0.1:5000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:<default port>
/// - Host and port: "0.0.0.0:5000" -> 0.0.0.0:5000
fn parse_bind_address(bind: &str, default_port: u16) -> anyhow::Result<(String, u16)> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
        // "::1" and friends have colons but no port
        if !host.contains(':') {
            anyhow::bail!("Invalid port in bind address: {}", bind);
        }
    }

    Ok((bind.to_string(), default_port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("8080", 5000).unwrap(),
            ("127.0.0.1".to_string(), 8080)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0", 5000).unwrap(),
            ("0.0.0.0".to_string(), 5000)
        );
        assert_eq!(
            parse_bind_address("localhost:9000", 5000).unwrap(),
            ("localhost".to_string(), 9000)
        );
        assert!(parse_bind_address("localhost:http", 5000).is_err());
    }
}
