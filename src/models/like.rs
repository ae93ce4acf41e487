use serde::{Deserialize, Serialize};

/// Like count for a review and whether the asking user is one of the likers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeStatus {
    pub count: u32,
    pub liked: bool,
}
