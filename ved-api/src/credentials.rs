//! Credential handling for the two token-gated upstream feeds.
//!
//! A missing, empty or placeholder credential selects simulated mode for
//! that feed. This is the designed default so the toolkit works without
//! secrets; it is never treated as an error.

use std::env;

/// Environment variable holding the aqicn.org (WAQI) token.
pub const AQICN_TOKEN_VAR: &str = "AQICN_TOKEN";

/// Environment variable holding the OpenWeatherMap API key.
pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Placeholder sentinels; a credential equal to its sentinel counts as unset.
pub const AQICN_TOKEN_PLACEHOLDER: &str = "YOUR_AQICN_TOKEN";
pub const OPENWEATHER_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHER_KEY";

/// API credentials for the live air quality and weather feeds.
///
/// `None` in either field gates that feed to simulated mode.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub aqicn_token: Option<String>,
    pub open_weather_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the environment.
    pub fn from_env() -> Self {
        Credentials {
            aqicn_token: sanitize(env::var(AQICN_TOKEN_VAR).ok(), AQICN_TOKEN_PLACEHOLDER),
            open_weather_key: sanitize(
                env::var(OPENWEATHER_KEY_VAR).ok(),
                OPENWEATHER_KEY_PLACEHOLDER,
            ),
        }
    }

    /// Credentials that gate every feed to simulated mode.
    pub fn simulated() -> Self {
        Credentials::default()
    }
}

fn sanitize(raw: Option<String>, placeholder: &str) -> Option<String> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_placeholder_and_empty() {
        assert_eq!(sanitize(None, AQICN_TOKEN_PLACEHOLDER), None);
        assert_eq!(sanitize(Some(String::new()), AQICN_TOKEN_PLACEHOLDER), None);
        assert_eq!(sanitize(Some("  ".into()), AQICN_TOKEN_PLACEHOLDER), None);
        assert_eq!(
            sanitize(Some(AQICN_TOKEN_PLACEHOLDER.into()), AQICN_TOKEN_PLACEHOLDER),
            None
        );
        assert_eq!(
            sanitize(Some("abc123".into()), AQICN_TOKEN_PLACEHOLDER),
            Some("abc123".into())
        );
    }

    #[test]
    fn test_simulated_has_no_tokens() {
        let credentials = Credentials::simulated();
        assert!(credentials.aqicn_token.is_none());
        assert!(credentials.open_weather_key.is_none());
    }
}
