// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use crate::render::Format;
use serde::{de, Deserialize, Deserializer};

/// Query options shared by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatQuery {
    /// Pretty-print the response body.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub pretty: bool,
}

impl FormatQuery {
    pub fn format(&self) -> Format {
        Format::from(self.pretty)
    }
}

/// Parse a boolean-like flag such as `true`, `0`, `yes` or `off`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| de::Error::custom(format!("invalid boolean flag: {raw}")))
}
