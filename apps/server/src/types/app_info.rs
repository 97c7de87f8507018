// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application metadata as returned by the upstream source.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Application identifier from the upstream metadata source.
pub type AppId = i64;

/// Product info record for one lookup.
///
/// Both maps are keyed by the decimal identifier. Entry contents are opaque
/// and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Application entries, empty when the id is unknown upstream.
    #[serde(default)]
    pub apps: BTreeMap<String, Value>,
    /// Package entries.
    #[serde(default)]
    pub packages: BTreeMap<String, Value>,
}

impl AppInfo {
    /// Cache key for an application id.
    pub fn cache_key(id: AppId) -> String {
        id.to_string()
    }
}
