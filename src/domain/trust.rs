//! Composite trust scoring for a single listing.
//!
//! The score is additive out of 100 with four independently capped
//! subscores, then banded into a letter grade. A community-flag override
//! is evaluated last and takes absolute precedence. The function is pure:
//! identical inputs always yield identical output, and nothing here is
//! cached or persisted.

use serde::Serialize;

use super::listing::{Listing, LocationAccuracy, OwnerProfile, VerificationTier};

/// Letter grade bands for the summed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Subscore breakdown. Caps: agent trust 40, location fidelity 25,
/// social proof 20, visual proof 15.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrustBreakdown {
    pub agent_trust: u8,
    pub location_fidelity: u8,
    pub social_proof: u8,
    pub visual_proof: u8,
}

/// The result of scoring one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustScoreResult {
    pub score: u8,
    pub grade: Grade,
    pub label: &'static str,
    pub breakdown: TrustBreakdown,
}

/// Cover image references shorter than this are treated as absent.
const MIN_COVER_URL_LEN: usize = 11;

/// Negative votes beyond this, when they also outnumber good votes,
/// trigger the community-flag override.
const FLAG_THRESHOLD: u32 = 5;

/// Score a listing against its (optional) owner profile.
#[must_use]
pub fn score(listing: &Listing, owner: Option<&OwnerProfile>) -> TrustScoreResult {
    let mut breakdown = TrustBreakdown::default();

    // Agent credibility, max 40.
    breakdown.agent_trust = match owner.map(|o| o.verification_tier) {
        Some(VerificationTier::ProAgent) => 40,
        Some(VerificationTier::VerifiedScout) => 30,
        Some(VerificationTier::Basic) => 10,
        None => 0,
    };

    // Location fidelity, max 25. High means pinned on site.
    breakdown.location_fidelity = match listing.accuracy() {
        LocationAccuracy::High => 25,
        LocationAccuracy::Low => 5,
    };

    // Social proof, max 20, from net community votes.
    let votes = listing.votes();
    breakdown.social_proof = match votes.net() {
        n if n >= 10 => 20,
        n if n >= 1 => 10,
        _ => 0,
    };

    // Visual proof, max 15: a non-trivial cover image reference.
    breakdown.visual_proof = match listing.cover_image_url() {
        Some(url) if url.len() >= MIN_COVER_URL_LEN => 15,
        _ => 0,
    };

    let score = breakdown.agent_trust
        + breakdown.location_fidelity
        + breakdown.social_proof
        + breakdown.visual_proof;
    let score = score.min(100);

    let (grade, label) = if score >= 90 {
        (Grade::A, "Verified Asset")
    } else if score >= 75 {
        (Grade::B, "High Trust")
    } else if score >= 50 {
        (Grade::C, "Standard")
    } else {
        (Grade::D, "Unverified")
    };

    // Community-flag override: evaluated last, absolute precedence.
    if votes.negative() > FLAG_THRESHOLD && votes.negative() > votes.good {
        return TrustScoreResult {
            score: 0,
            grade: Grade::F,
            label: "Community Flagged",
            breakdown,
        };
    }

    TrustScoreResult {
        score,
        grade,
        label,
        breakdown,
    }
}
