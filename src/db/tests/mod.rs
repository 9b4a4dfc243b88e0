mod accounts;
mod ads;
mod store;

use crate::types::{Actor, Category, NewPost};

fn editor() -> Actor {
    Actor {
        email: "editor@example.com".to_string(),
        can_publish: true,
    }
}

fn viewer() -> Actor {
    Actor {
        email: "viewer@example.com".to_string(),
        can_publish: false,
    }
}

fn new_post(title: &str, category: Category) -> NewPost {
    NewPost {
        title: title.to_string(),
        english_title: Some(format!("{} (en)", title)),
        content: format!("{} உள்ளடக்கம்", title),
        english_content: None,
        category,
        image_url: None,
        video_link: None,
    }
}
