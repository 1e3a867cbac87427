// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Canopy crates.
//!
//! Enabled via feature flags to keep the core independent of any particular tree.

#[cfg(feature = "scene_adapter")]
pub mod scene;
