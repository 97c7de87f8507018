// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use super::{AppId, AppInfo};
use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome reported inside the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Uniform response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub data: Value,
    pub status: Status,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            data,
            status: Status::Success,
        }
    }

    /// In-band error: still served with HTTP 200.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: Value::String(message.into()),
            status: Status::Error,
        }
    }

    /// Shape a lookup result.
    ///
    /// An unknown id yields `{"<id>": {}}` rather than an empty map; clients
    /// depend on this shape.
    pub fn from_app_info(id: AppId, info: AppInfo) -> Self {
        let data = if info.apps.is_empty() {
            let mut empty = Map::new();
            empty.insert(AppInfo::cache_key(id), Value::Object(Map::new()));
            empty
        } else {
            info.apps.into_iter().collect()
        };

        Self::success(Value::Object(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_app_shape() {
        let envelope = Envelope::from_app_info(12345, AppInfo::default());
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.data, json!({"12345": {}}));
    }

    #[test]
    fn test_known_app_passes_entries_through() {
        let mut info = AppInfo::default();
        info.apps
            .insert("730".into(), json!({"common": {"name": "Counter-Strike 2"}}));
        info.packages.insert("7".into(), json!({"billingtype": 10}));

        let envelope = Envelope::from_app_info(730, info);
        assert_eq!(
            envelope.data,
            json!({"730": {"common": {"name": "Counter-Strike 2"}}})
        );
    }

    #[test]
    fn test_error_envelope() {
        let envelope = Envelope::error("boom");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"data": "boom", "status": "error"})
        );
    }
}
