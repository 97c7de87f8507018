// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for metadata lookup and caching.

pub mod cache;
pub mod gate;
pub mod resolver;
pub mod version;

#[cfg(test)]
pub mod testing;

pub use cache::{CacheStore, DiskCache};
pub use gate::CacheGate;
pub use resolver::{HttpResolver, MetadataResolver};
