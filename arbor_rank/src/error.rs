// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the rank tree, the percentile container and the octree.

/// Failures surfaced by keyed tree operations.
///
/// None of these are retried internally. A failing operation leaves the
/// structure exactly as it was before the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The key (or point) is already stored.
    #[error("key is already present")]
    DuplicateKey,
    /// The key (or point) is not stored.
    #[error("key not found")]
    KeyNotFound,
    /// A percentage was NaN or outside `0..=100`.
    #[error("percentage must lie within 0..=100")]
    InvalidPercent,
}
