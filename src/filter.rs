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

use crate::config::CookieModifierConfig;
use crate::error::ConfigError;
use crate::rewriter::CookieRewriter;
use log::{debug, error, info};
use proxy_wasm::traits::*;
use proxy_wasm::types::*;
use std::rc::Rc;

#[derive(Default)]
pub struct CookieModifierRoot {
    rewriter: Option<Rc<CookieRewriter>>,
}

impl Context for CookieModifierRoot {}

impl RootContext for CookieModifierRoot {
    fn on_configure(&mut self, _: usize) -> bool {
        let config_bytes = self.get_plugin_configuration().unwrap_or_default();
        match build_rewriter(&config_bytes) {
            Ok(rewriter) => {
                if rewriter.config().debug {
                    let name = self
                        .get_property(vec!["plugin_name"])
                        .and_then(|bytes| String::from_utf8(bytes).ok())
                        .unwrap_or_default();
                    debug!(
                        "Plugin {} initialized with config: {:?}",
                        name,
                        rewriter.config()
                    );
                }
                info!(
                    "Renaming cookie {} -> {}",
                    rewriter.config().source_cookie_name,
                    rewriter.config().target_cookie_name
                );
                self.rewriter = Some(Rc::new(rewriter));
                true
            }
            Err(e) => {
                error!("Invalid cookie modifier configuration: {}", e);
                false
            }
        }
    }

    fn create_http_context(&self, _: u32) -> Option<Box<dyn HttpContext>> {
        // Shallow copy, the configuration is shared by every stream.
        let rewriter = self.rewriter.clone()?;
        Some(Box::new(CookieModifierHttp {
            rewriter,
            host: String::new(),
        }))
    }

    fn get_type(&self) -> Option<ContextType> {
        Some(ContextType::HttpContext)
    }
}

fn build_rewriter(config_bytes: &[u8]) -> Result<CookieRewriter, ConfigError> {
    let config = CookieModifierConfig::from_bytes(config_bytes)?;
    CookieRewriter::new(config)
}

pub struct CookieModifierHttp {
    rewriter: Rc<CookieRewriter>,
    // Request host, kept for the response phase.
    host: String,
}

impl Context for CookieModifierHttp {}

impl HttpContext for CookieModifierHttp {
    fn on_http_request_headers(&mut self, _: usize, _: bool) -> Action {
        self.host = self
            .get_http_request_header(":authority")
            .or_else(|| self.get_http_request_header("host"))
            .unwrap_or_default();

        if self.rewriter.config().debug {
            debug!(
                "Processing request to: {}{}",
                self.host,
                self.get_http_request_header(":path").unwrap_or_default()
            );
        }

        let cookie_header = header_values(self.get_http_request_headers(), "cookie").join("; ");
        if cookie_header.is_empty() {
            return Action::Continue;
        }

        if let Some(rewritten) = self
            .rewriter
            .transform_request_cookies(&cookie_header, &self.host)
        {
            self.set_http_request_header("Cookie", Some(&rewritten));
        }
        Action::Continue
    }

    fn on_http_response_headers(&mut self, _: usize, _: bool) -> Action {
        let set_cookies = header_values(self.get_http_response_headers(), "set-cookie");

        if let Some(rewritten) = self
            .rewriter
            .transform_response_cookies(&set_cookies, &self.host)
        {
            self.set_http_response_header("Set-Cookie", None);
            for line in &rewritten {
                self.add_http_response_header("Set-Cookie", line);
            }
        }
        Action::Continue
    }
}

// Values of every header named `name`, in arrival order.
fn header_values(headers: Vec<(String, String)>, name: &str) -> Vec<String> {
    headers
        .into_iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values_is_case_insensitive_and_ordered() {
        let headers = vec![
            ("set-cookie".to_string(), "a=1".to_string()),
            (":status".to_string(), "200".to_string()),
            ("Set-Cookie".to_string(), "b=2".to_string()),
        ];
        assert_eq!(header_values(headers, "set-cookie"), vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_build_rewriter() {
        let rewriter = build_rewriter(b"").unwrap();
        assert_eq!(rewriter.config(), &CookieModifierConfig::default());

        assert!(matches!(
            build_rewriter(br#"{"targetCookieName": ""}"#),
            Err(ConfigError::EmptyTargetCookieName)
        ));
        assert!(matches!(
            build_rewriter(br#"{"sameSite": "sometimes"}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
