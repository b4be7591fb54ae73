use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read a calculator input piped on stdin.
/// Returns None when stdin is a TTY or the pipe carried nothing.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// Piped input is always JSON; whitespace-only input counts as absent.
pub(crate) fn parse_piped<T: DeserializeOwned>(
    buffer: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: T = serde_json::from_str(trimmed)?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincalc_core::sip::SipInput;

    #[test]
    fn blank_pipe_is_absent() {
        let parsed: Option<SipInput> = parse_piped("  \n\t").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn piped_json_is_typed() {
        let body = r#"{"monthly_investment":"5000","annual_return_pct":"10","years":3}"#;
        let parsed: Option<SipInput> = parse_piped(body).unwrap();
        assert_eq!(parsed.unwrap().years, 3);
    }

    #[test]
    fn malformed_pipe_is_an_error() {
        assert!(parse_piped::<SipInput>("{not json").is_err());
    }
}
