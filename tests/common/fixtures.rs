//! Article and banner fixtures

use realnews::newsroom::PostForm;
use realnews::types::{Banner, BannerConfig};

/// A complete article form in `category`
pub fn post_form(english_title: &str, category: &str) -> PostForm {
    PostForm {
        title: format!("{} (தமிழ்)", english_title),
        english_title: english_title.to_string(),
        content: "இன்றைய முக்கிய செய்தி".to_string(),
        english_content: format!("Full story: {}", english_title),
        category: category.to_string(),
        video_link: None,
    }
}

/// An enabled banner running for `expiry_days`
pub fn banner(expiry_days: u32) -> BannerConfig {
    BannerConfig {
        enabled: true,
        active_ad: Banner {
            image_url: "https://cdn.example.com/festival.jpg".to_string(),
            text: "Festival sale".to_string(),
            link: "https://shop.example.com/festival".to_string(),
            expiry_days,
        },
        updated_at: None,
    }
}
