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

//! Parsing and serialization of the `Cookie` request header.

/// A single cookie as seen on the request side.
///
/// `path` and `domain` never reach the wire in a `Cookie` header; they only
/// describe where a renamed cookie is meant to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieEntry {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl CookieEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        CookieEntry {
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
        }
    }
}

/// Splits a `Cookie` header into entries, in header order.
///
/// Parts with an invalid name or value are dropped.
pub fn parse_cookie_header(header: &str) -> Vec<CookieEntry> {
    header
        .split(';')
        .map(trim_ascii_space)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (name, raw_value) = part.split_once('=').unwrap_or((part, ""));
            let name = trim_ascii_space(name);
            if !is_token(name) {
                return None;
            }
            let value = parse_cookie_value(raw_value)?;
            Some(CookieEntry::new(name, value))
        })
        .collect()
}

/// Joins entries back into `name=value` pairs separated by `"; "`.
pub fn serialize_cookie_header(cookies: &[CookieEntry]) -> String {
    cookies
        .iter()
        .map(|cookie| format!("{}={}", cookie.name, cookie.value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn trim_ascii_space(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

// Strips one pair of surrounding double quotes.
fn parse_cookie_value(raw: &str) -> Option<&str> {
    let value = if raw.len() > 1 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };
    value
        .bytes()
        .all(is_cookie_value_byte)
        .then_some(value)
}

fn is_cookie_value_byte(b: u8) -> bool {
    (0x20..0x7f).contains(&b) && b != b'"' && b != b';' && b != b'\\'
}

fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_values(cookies: &[CookieEntry]) -> Vec<(&str, &str)> {
        cookies
            .iter()
            .map(|c| (c.name.as_str(), c.value.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_preserves_order() {
        let cookies = parse_cookie_header("flowise_token=abc123; other=x;third=3");
        assert_eq!(
            names_and_values(&cookies),
            vec![("flowise_token", "abc123"), ("other", "x"), ("third", "3")]
        );
    }

    #[test]
    fn test_parse_edge_cases() {
        let cookies = parse_cookie_header(" ; flag; quoted=\"q v\"; eq=a=b;  ");
        assert_eq!(
            names_and_values(&cookies),
            vec![("flag", ""), ("quoted", "q v"), ("eq", "a=b")]
        );
    }

    #[test]
    fn test_parse_drops_invalid_parts() {
        let cookies = parse_cookie_header("bad name=1; =2; ok=3; slash=a\\b; ctl=\u{7f}");
        assert_eq!(names_and_values(&cookies), vec![("ok", "3")]);
    }

    #[test]
    fn test_serialize_ignores_attributes() {
        let mut renamed = CookieEntry::new("simple_token", "abc123");
        renamed.path = Some("/".to_string());
        renamed.domain = Some("example.com".to_string());

        let header = serialize_cookie_header(&[CookieEntry::new("other", "x"), renamed]);
        assert_eq!(header, "other=x; simple_token=abc123");
        assert_eq!(serialize_cookie_header(&[]), "");
    }
}
