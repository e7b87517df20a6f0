//! Classification layer - maps numeric scores into qualitative risk bands.

use thiserror::Error;

use crate::types::FindingKind;

/// A qualitative risk band: display label plus finding polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub label: &'static str,
    pub kind: FindingKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandError {
    #[error("band input {0} is outside 0..=100")]
    OutOfRange(u16),
}

/// Maps a 0..=100 score (100 = best) into a band.
///
/// Out-of-range input is a caller error, never silently clamped.
pub fn score_band(score: u16) -> Result<Band, BandError> {
    let band = match score {
        85..=100 => Band { label: "Strong", kind: FindingKind::Good },
        70..=84 => Band { label: "Good", kind: FindingKind::Good },
        40..=69 => Band { label: "Fair", kind: FindingKind::Warn },
        0..=39 => Band { label: "Weak", kind: FindingKind::Bad },
        other => return Err(BandError::OutOfRange(other)),
    };
    Ok(band)
}

/// Maps a 0..=100 similarity (100 = worst: matches a known common
/// password) into a band. Polarity is inverted relative to [`score_band`].
pub fn similarity_band(similarity: u16) -> Result<Band, BandError> {
    let band = match similarity {
        85..=100 => Band { label: "High", kind: FindingKind::Bad },
        50..=84 => Band { label: "Medium", kind: FindingKind::Warn },
        0..=49 => Band { label: "Low", kind: FindingKind::Good },
        other => return Err(BandError::OutOfRange(other)),
    };
    Ok(band)
}
