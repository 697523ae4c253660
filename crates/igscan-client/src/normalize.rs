use igscan_core::RawProfile;

use crate::types::WebUser;

/// Convert an upstream [`WebUser`] into a [`RawProfile`].
///
/// Null strings become empty strings; `has_profile_pic` is true when a
/// non-blank picture URL is present.
#[must_use]
pub fn normalize_profile(user: WebUser) -> RawProfile {
    RawProfile {
        username: user.username,
        full_name: user.full_name.unwrap_or_default(),
        biography: user.biography.unwrap_or_default(),
        external_url: user.external_url.unwrap_or_default(),
        is_private: user.is_private,
        has_profile_pic: user
            .profile_pic_url
            .is_some_and(|url| !url.trim().is_empty()),
        media_count: user.edge_owner_to_timeline_media.count,
        follower_count: user.edge_followed_by.count,
        followee_count: user.edge_follow.count,
    }
}
