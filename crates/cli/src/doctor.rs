//! `geovet doctor` — print classifier configuration and credential
//! status. Diagnostics only: never makes a network call.

use std::fmt;

use crate::classify::client::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::classify::API_KEY_ENV;
use crate::CliError;

pub fn cmd_doctor() -> Result<(), CliError> {
    print!("{}", Diagnostics::gather(API_KEY_ENV));
    Ok(())
}

/// Where the credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    Environment,
    None,
}

impl KeySource {
    fn as_str(&self) -> &'static str {
        match self {
            KeySource::Environment => "environment",
            KeySource::None => "none",
        }
    }
}

#[derive(Debug)]
struct Diagnostics {
    endpoint: &'static str,
    model: &'static str,
    env_var: &'static str,
    key_present: bool,
    key_source: KeySource,
}

impl Diagnostics {
    fn gather(env_var: &'static str) -> Self {
        let key_present = std::env::var(env_var)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);

        Self {
            endpoint: DEFAULT_API_BASE,
            model: DEFAULT_MODEL,
            env_var,
            key_present,
            key_source: if key_present {
                KeySource::Environment
            } else {
                KeySource::None
            },
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classifier Configuration")?;
        writeln!(f, "──────────────────────────────")?;
        writeln!(f, "Endpoint:     {}", self.endpoint)?;
        writeln!(f, "Model:        {}", self.model)?;
        writeln!(f, "Key env var:  {}", self.env_var)?;
        writeln!(
            f,
            "Key present:  {}",
            if self.key_present { "yes" } else { "no" },
        )?;
        writeln!(f, "Key source:   {}", self.key_source.as_str())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_key_present() {
        std::env::set_var("__GEOVET_DOCTOR_SET", "sk-something");
        let d = Diagnostics::gather("__GEOVET_DOCTOR_SET");
        assert!(d.key_present);
        assert_eq!(d.key_source, KeySource::Environment);
        std::env::remove_var("__GEOVET_DOCTOR_SET");
    }

    #[test]
    fn test_diagnostics_key_missing() {
        std::env::remove_var("__GEOVET_DOCTOR_MISSING");
        let d = Diagnostics::gather("__GEOVET_DOCTOR_MISSING");
        assert!(!d.key_present);
        assert_eq!(d.key_source, KeySource::None);
        let rendered = d.to_string();
        assert!(rendered.contains("Key present:  no"));
    }
}
