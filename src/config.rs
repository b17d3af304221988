// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Plugin configuration.
//!
//! The host hands the plugin a JSON object such as:
//!
//! ```json
//! {
//!   "sourceCookieName": "flowise_token",
//!   "targetCookieName": "simple_token",
//!   "useDynamicDomain": true,
//!   "secure": true,
//!   "sameSite": "Strict",
//!   "path": "/app"
//! }
//! ```
//!
//! Any field may be omitted and falls back to its default. An empty
//! configuration buffer yields the defaults outright.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;

/// Value of the `SameSite` attribute appended to rewritten `Set-Cookie` lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum SameSite {
    #[serde(alias = "strict")]
    Strict,
    #[default]
    #[serde(alias = "lax")]
    Lax,
    #[serde(alias = "none")]
    None,
    /// Configured as `""`: leave the attribute out.
    #[serde(rename = "")]
    Unset,
}

impl SameSite {
    /// Attribute value, or `None` when nothing should be emitted.
    pub fn as_attribute(&self) -> Option<&'static str> {
        match self {
            SameSite::Strict => Some("Strict"),
            SameSite::Lax => Some("Lax"),
            SameSite::None => Some("None"),
            SameSite::Unset => None,
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_attribute().unwrap_or(""))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CookieModifierConfig {
    pub source_cookie_name: String,
    pub target_cookie_name: String,
    pub use_dynamic_domain: bool,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub debug: bool,
}

impl Default for CookieModifierConfig {
    fn default() -> Self {
        Self {
            source_cookie_name: "flowise_token".to_string(),
            target_cookie_name: "simple_token".to_string(),
            use_dynamic_domain: true,
            secure: false,
            http_only: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            debug: false,
        }
    }
}

impl CookieModifierConfig {
    /// Decodes the raw plugin configuration buffer.
    ///
    /// Only decoding happens here; see [`CookieModifierConfig::validate`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let text = String::from_utf8(bytes.to_vec())?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_cookie_name.is_empty() {
            return Err(ConfigError::EmptySourceCookieName);
        }
        if self.target_cookie_name.is_empty() {
            return Err(ConfigError::EmptyTargetCookieName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CookieModifierConfig::default();
        assert_eq!(config.source_cookie_name, "flowise_token");
        assert_eq!(config.target_cookie_name, "simple_token");
        assert!(config.use_dynamic_domain);
        assert!(!config.secure);
        assert!(!config.http_only);
        assert_eq!(config.same_site, SameSite::Lax);
        assert_eq!(config.path, "/");
        assert!(!config.debug);
    }

    #[test]
    fn test_empty_buffer_yields_defaults() {
        assert_eq!(
            CookieModifierConfig::from_bytes(b"").unwrap(),
            CookieModifierConfig::default()
        );
        assert_eq!(
            CookieModifierConfig::from_bytes(b"  \n").unwrap(),
            CookieModifierConfig::default()
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CookieModifierConfig::from_bytes(
            br#"{"targetCookieName": "session", "secure": true, "sameSite": "Strict"}"#,
        )
        .unwrap();

        assert_eq!(config.source_cookie_name, "flowise_token");
        assert_eq!(config.target_cookie_name, "session");
        assert!(config.secure);
        assert!(config.use_dynamic_domain);
        assert_eq!(config.same_site, SameSite::Strict);
        assert_eq!(config.path, "/");
    }

    #[test]
    fn test_same_site_spellings() {
        let parse = |raw: &str| {
            CookieModifierConfig::from_bytes(format!(r#"{{"sameSite": "{}"}}"#, raw).as_bytes())
                .map(|c| c.same_site)
        };

        assert_eq!(parse("None").unwrap(), SameSite::None);
        assert_eq!(parse("lax").unwrap(), SameSite::Lax);
        assert_eq!(parse("").unwrap(), SameSite::Unset);
        assert!(matches!(parse("Loose"), Err(ConfigError::Parse(_))));

        assert_eq!(SameSite::Unset.as_attribute(), None);
        assert_eq!(SameSite::Strict.to_string(), "Strict");
    }

    #[test]
    fn test_malformed_buffers() {
        assert!(matches!(
            CookieModifierConfig::from_bytes(&[0xff, 0xfe]),
            Err(ConfigError::InvalidUtf8(_))
        ));
        assert!(matches!(
            CookieModifierConfig::from_bytes(b"{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let mut config = CookieModifierConfig::from_bytes(br#"{"sourceCookieName": ""}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySourceCookieName)
        ));

        config.source_cookie_name = "a".to_string();
        config.target_cookie_name.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyTargetCookieName)
        ));
    }
}
