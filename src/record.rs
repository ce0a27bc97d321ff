use crate::types::{DiagnosticEntry, HostRecord, Severity, DEFAULT_PORT};

const KEY_BLOCK_BEGIN: &str = "-----BEGIN RSA PUBLIC KEY-----";
const KEY_BLOCK_END: &str = "-----END RSA PUBLIC KEY-----";

/// Parse one peer record into a `HostRecord`. Never fails: malformed lines
/// become diagnostics and the rest of the record still parses.
///
/// `port =` lines update the record's default port, which is back-filled
/// into address entries that carried no explicit port only after the whole
/// record has been read (a later `port =` still wins for earlier entries).
/// Explicit ports are never overwritten.
pub fn parse_record(community: &str, input: &str) -> HostRecord {
    let mut default_port = DEFAULT_PORT;
    let mut addresses: Vec<(String, Option<u16>)> = Vec::new();
    let mut diagnostics: Vec<DiagnosticEntry> = Vec::new();
    let mut in_key_block = false;

    let mut diag = |severity: Severity, message: String| {
        diagnostics.push(DiagnosticEntry { severity, message });
    };

    for line in input.lines() {
        let line = line.trim();

        // The key block interior is opaque, even where it looks like config.
        if in_key_block {
            if line == KEY_BLOCK_END {
                in_key_block = false;
            }
            continue;
        }
        if line == KEY_BLOCK_BEGIN {
            in_key_block = true;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        // Anything that does not split into exactly key = value is ignored.
        let Some((key, val)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let val = val.trim();

        match key.as_str() {
            "port" => match val.parse::<u16>() {
                Ok(p) => default_port = p,
                Err(_) => diag(Severity::Error, "non-integer default port given".to_string()),
            },
            "address" => {
                if val.contains(' ') {
                    let tokens: Vec<&str> = val.split(' ').collect();
                    if tokens.len() != 2 {
                        diag(Severity::Error, "unknown address format".to_string());
                        continue;
                    }
                    match tokens[1].parse::<u16>() {
                        Ok(p) => addresses.push((tokens[0].to_string(), Some(p))),
                        Err(_) => diag(Severity::Error, "non-integer port given".to_string()),
                    }
                } else {
                    addresses.push((val.to_string(), None));
                }
            }
            "ecdsapublickey" | "ed25519publickey" => {}
            _ => diag(
                Severity::Error,
                format!("unknown key {} with value {}", key, val),
            ),
        }
    }

    // Finalization pass: only now is the default-port history complete.
    let addresses = addresses
        .into_iter()
        .map(|(host, port)| (host, port.unwrap_or(default_port)))
        .collect();

    HostRecord {
        community: community.to_string(),
        addresses,
        default_port,
        diagnostics,
    }
}
