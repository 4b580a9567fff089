//! PEM key material helpers.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::error::{Error, Result};

static ARMOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("-*(BEGIN|END) [A-Z ]*PRIVATE KEY-*").expect("armor pattern is valid")
});

/// Decodes a PEM document into its binary (DER) form.
///
/// Encrypted PEM (with `Proc-Type` headers) is rejected.
pub fn decode_pem(pem: &str) -> Result<Vec<u8>> {
    let mut lines = pem.lines().map(str::trim).skip_while(|l| l.is_empty());

    let header = lines.next().unwrap_or_default();
    let Some(label) = header
        .strip_prefix("-----BEGIN ")
        .and_then(|rest| rest.strip_suffix("-----"))
    else {
        return Err(Error::key_material().with_message("missing PEM header"));
    };
    let footer = format!("-----END {label}-----");

    let mut body = String::new();
    let mut terminated = false;
    for line in lines {
        if line == footer {
            terminated = true;
            break;
        }
        if line.contains(':') {
            return Err(Error::key_material().with_message("encrypted PEM is not supported"));
        }
        body.push_str(line);
    }

    if !terminated {
        return Err(Error::key_material().with_message(format!("missing PEM footer for {label}")));
    }

    STANDARD.decode(body).map_err(|e| {
        Error::key_material()
            .with_message("PEM body is not valid base64")
            .with_source(e)
    })
}

/// Removes the PEM header, footer and all line breaks, leaving the base64 body
/// on a single line.
pub fn strip_pem_armor(pem: &str) -> String {
    ARMOR
        .replace_all(pem, "")
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .collect()
}
