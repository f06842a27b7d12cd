// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Thicket crates.
//!
//! Enabled via feature flags so the core stays usable with any hierarchy.

#[cfg(feature = "scene_adapter")]
pub mod scene;
