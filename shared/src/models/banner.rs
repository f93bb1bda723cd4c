//! Banner / popup configuration payloads
//!
//! Stored as singleton documents keyed by fixed names; these are the
//! admin PUT payloads and public GET responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Home-page banner carousel images
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BannerSet {
    #[validate(length(min = 1))]
    pub images: Vec<String>,
}

/// Login popup image (empty string when unset)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginPopup {
    #[serde(default)]
    pub image: String,
}
