// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain model of media library items that are scored for deletion.

// Importing all enum variants into a narrow, local scope is acceptable.
#![allow(clippy::enum_glob_use)]

pub mod media;
pub mod rating;
pub mod record;
pub mod score;
pub mod util;

pub use self::{
    media::{MediaInfo, Resolution, VideoCodec},
    rating::{RatingScale, RatingSource, RatingValue, Ratings},
    record::{ItemKind, MetadataRecord, ScoredRecord, WatchStats},
    score::{Score, ScoreValue},
};

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IntoValidated as _, IsValid, Validate as _, ValidatedFrom as _};

    pub(crate) use semval::prelude::*;

    pub(crate) use crate::util::clock::*;
}
