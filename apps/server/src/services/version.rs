// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reporting of the configured API version.

use crate::types::Envelope;
use semver::Version;
use serde::Serialize;

const VERSION_ERROR: &str = "Something went wrong while retrieving and parsing the current API version. Please try again later";

/// Components of a parsed semantic version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl From<&Version> for VersionInfo {
    fn from(version: &Version) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease: (!version.pre.is_empty()).then(|| version.pre.to_string()),
            build: (!version.build.is_empty()).then(|| version.build.to_string()),
        }
    }
}

/// Build the version envelope. Failures are reported in-band.
pub fn report(raw: Option<&str>) -> Envelope {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        tracing::warn!("No API version configured");
        return Envelope::error(VERSION_ERROR);
    };

    let parsed = match Version::parse(raw) {
        Ok(version) => VersionInfo::from(&version),
        Err(e) => {
            tracing::warn!(version = %raw, error = %e, "Invalid API version");
            return Envelope::error(VERSION_ERROR);
        }
    };

    match serde_json::to_value(parsed) {
        Ok(data) => Envelope::success(data),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode API version");
            Envelope::error(VERSION_ERROR)
        }
    }
}
