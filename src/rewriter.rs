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
//! # Cookie Rewriter
//!
//! Renames one cookie on its way through the proxy:
//!
//! - On the request side the source cookie is pulled out of the `Cookie`
//!   header and re-appended under the target name.
//! - On the response side every `Set-Cookie` line mentioning `source=` is
//!   renamed and topped up with the configured attributes.
//!
//! The rewriter never talks to the host. It takes header values in and hands
//! replacement values back, which keeps it usable from any proxy glue and
//! testable without a Wasm runtime.

use crate::config::{CookieModifierConfig, SameSite};
use crate::cookie::{parse_cookie_header, serialize_cookie_header, CookieEntry};
use crate::error::ConfigError;
use log::{debug, warn};

#[derive(Debug)]
pub struct CookieRewriter {
    config: CookieModifierConfig,
    source_pattern: String,
    target_pattern: String,
}

impl CookieRewriter {
    /// Validates the configuration and builds the rewriter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when either cookie name is empty.
    pub fn new(config: CookieModifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        if config.same_site == SameSite::None && !config.secure {
            warn!(
                "sameSite=None without secure: browsers will reject the rewritten {} cookie",
                config.target_cookie_name
            );
        }

        Ok(CookieRewriter {
            source_pattern: format!("{}=", config.source_cookie_name),
            target_pattern: format!("{}=", config.target_cookie_name),
            config,
        })
    }

    pub fn config(&self) -> &CookieModifierConfig {
        &self.config
    }

    /// Rewrites the request `Cookie` header.
    ///
    /// Returns the replacement header value, or `None` when no source cookie
    /// is present and the header must be left exactly as it was.
    pub fn transform_request_cookies(&self, cookie_header: &str, host: &str) -> Option<String> {
        let cookies = parse_cookie_header(cookie_header);
        if self.config.debug {
            debug!("Found {} cookies in request", cookies.len());
        }

        let mut kept = Vec::with_capacity(cookies.len() + 1);
        let mut source = None;
        for cookie in cookies {
            if cookie.name == self.config.source_cookie_name {
                if self.config.debug {
                    debug!("Found source cookie: {}={}", cookie.name, cookie.value);
                }
                // Last occurrence wins.
                source = Some(cookie);
            } else {
                kept.push(cookie);
            }
        }

        let source = source?;
        let mut renamed = CookieEntry::new(self.config.target_cookie_name.as_str(), source.value);
        renamed.path = Some(self.config.path.clone());
        if self.config.use_dynamic_domain && !host.is_empty() {
            renamed.domain = Some(host.to_string());
            if self.config.debug {
                debug!("Set dynamic domain to: {}", host);
            }
        }
        kept.push(renamed);

        if self.config.debug {
            debug!(
                "Transformed cookie: {} -> {}",
                self.config.source_cookie_name, self.config.target_cookie_name
            );
        }
        Some(serialize_cookie_header(&kept))
    }

    /// Rewrites the full list of `Set-Cookie` lines of a response.
    ///
    /// Returns the new list in the original order, or `None` when no line
    /// matched and the headers can stay as they are.
    pub fn transform_response_cookies(&self, set_cookies: &[String], host: &str) -> Option<Vec<String>> {
        if set_cookies.is_empty() {
            return None;
        }
        if self.config.debug {
            debug!("Processing {} Set-Cookie headers", set_cookies.len());
        }

        let mut changed = false;
        let rewritten = set_cookies
            .iter()
            .map(|line| match self.rewrite_set_cookie(line, host) {
                Some(new_line) => {
                    changed = true;
                    new_line
                }
                None => line.clone(),
            })
            .collect();

        changed.then_some(rewritten)
    }

    // Matching is plain substring containment of `source=`, so a value that
    // embeds that text is rewritten too.
    fn rewrite_set_cookie(&self, line: &str, host: &str) -> Option<String> {
        if !line.contains(&self.source_pattern) {
            return None;
        }

        let mut out = line.replacen(&self.source_pattern, &self.target_pattern, 1);

        if self.config.use_dynamic_domain && !out.contains("Domain=") {
            out.push_str("; Domain=");
            out.push_str(host);
        }
        if self.config.path != "/" && !out.contains("Path=") {
            out.push_str("; Path=");
            out.push_str(&self.config.path);
        }
        if self.config.secure && !out.contains("Secure") {
            out.push_str("; Secure");
        }
        if self.config.http_only && !out.contains("HttpOnly") {
            out.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.config.same_site.as_attribute() {
            if !out.contains("SameSite=") {
                out.push_str("; SameSite=");
                out.push_str(same_site);
            }
        }

        if self.config.debug {
            debug!("Transformed Set-Cookie: {}", out);
        }
        Some(out)
    }
}
