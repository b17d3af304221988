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

use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors raised while building the plugin from its configuration.
///
/// Every variant aborts plugin setup; nothing here is raised per request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sourceCookieName cannot be empty")]
    EmptySourceCookieName,

    #[error("targetCookieName cannot be empty")]
    EmptyTargetCookieName,

    #[error("configuration is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
