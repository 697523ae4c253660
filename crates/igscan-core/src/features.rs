//! Feature derivation from a [`RawProfile`].
//!
//! The output schema is fixed: field order here is the key order of the
//! serialized JSON object, and flag fields are `0`/`1` integers rather than
//! booleans so the record can be fed straight into a numeric feature vector.

use serde::{Deserialize, Serialize};

use crate::profile::RawProfile;

/// Fixed-schema numeric description of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub username: String,
    pub profile_pic: u8,
    pub nums_length_username: f64,
    pub fullname_words: usize,
    pub nums_length_fullname: f64,
    pub name_equals_username: u8,
    pub description_length: usize,
    pub external_url: u8,
    pub private: u8,
    pub posts: u64,
    pub followers: u64,
    pub following: u64,
}

/// Derive the [`FeatureRecord`] for `profile`.
///
/// Pure and total: the same profile always yields the same record.
#[must_use]
pub fn extract(profile: &RawProfile) -> FeatureRecord {
    let full_name = profile.full_name.as_str();

    FeatureRecord {
        username: profile.username.clone(),
        profile_pic: flag(profile.has_profile_pic),
        nums_length_username: numeric_ratio(&profile.username),
        fullname_words: full_name.split_whitespace().count(),
        nums_length_fullname: numeric_ratio(full_name),
        name_equals_username: flag(
            full_name.trim().to_lowercase() == profile.username.to_lowercase(),
        ),
        description_length: profile.biography.chars().count(),
        external_url: flag(!profile.external_url.trim().is_empty()),
        private: flag(profile.is_private),
        posts: profile.media_count,
        followers: profile.follower_count,
        following: profile.followee_count,
    }
}

/// Share of characters in `s` that are decimal digits, or `0.0` for an empty string.
#[allow(clippy::cast_precision_loss)]
fn numeric_ratio(s: &str) -> f64 {
    let (digits, total) = s.chars().fold((0usize, 0usize), |(digits, total), c| {
        (digits + usize::from(c.is_ascii_digit()), total + 1)
    });
    if total == 0 {
        return 0.0;
    }
    digits as f64 / total as f64
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

#[cfg(test)]
#[path = "features_test.rs"]
mod tests;
