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

// [START serviceextensions_plugin_cookie_modifier]
pub mod config;
pub mod cookie;
pub mod error;
pub mod filter;
pub mod rewriter;

pub use config::{CookieModifierConfig, SameSite};
pub use error::ConfigError;
pub use rewriter::CookieRewriter;

#[cfg(not(test))]
use proxy_wasm::traits::*;
#[cfg(not(test))]
use proxy_wasm::types::*;

#[cfg(not(test))]
proxy_wasm::main! {{
    proxy_wasm::set_log_level(LogLevel::Trace);
    proxy_wasm::set_root_context(|_| -> Box<dyn RootContext> {
        Box::new(filter::CookieModifierRoot::default())
    });
}}
// [END serviceextensions_plugin_cookie_modifier]
