//! Localized interface labels
//!
//! Every label is a variant of [`Label`] and every language provides every
//! label through an exhaustive `match`, so a missing translation fails the
//! build instead of leaking the key to readers.

use std::collections::BTreeMap;

use crate::locale::Language;
use crate::types::Category;

/// Interface label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    NavHome,
    NavSport,
    NavTechnology,
    NavPolitical,
    NavCinema,
    NavSearch,
    NavAdmin,
    NavLogout,
    NavLogin,
    AdminTitle,
    AdminUploadNews,
    AdminTitlePlaceholder,
    AdminEnglishTitlePlaceholder,
    AdminContentPlaceholder,
    AdminContentEnglishPlaceholder,
    AdminImage,
    AdminCategory,
    AdminVideo,
    AdminSubmit,
    AdminSubmitting,
    AdminCancel,
    AdminPostHistory,
    AdminActions,
    AdminDelete,
    AdminConfirmDelete,
    NewsPosted,
    NewsReadMore,
    NewsShare,
    NewsRelated,
    NewsNoNews,
    NewsLoadMore,
    NewsSponsored,
    NewsRecently,
    NewsUnknownDate,
    NewsJustNow,
    AdsManagement,
    AdsEnable,
    AdsDisable,
    AdsCreate,
    AdsImageUrl,
    AdsText,
    AdsLink,
    AdsExpiry,
    AdsActive,
    AdsExpired,
    AdsSave,
    CommonError,
    CommonSuccess,
}

impl Label {
    /// Every label, in table order
    pub const ALL: [Label; 48] = [
        Label::NavHome,
        Label::NavSport,
        Label::NavTechnology,
        Label::NavPolitical,
        Label::NavCinema,
        Label::NavSearch,
        Label::NavAdmin,
        Label::NavLogout,
        Label::NavLogin,
        Label::AdminTitle,
        Label::AdminUploadNews,
        Label::AdminTitlePlaceholder,
        Label::AdminEnglishTitlePlaceholder,
        Label::AdminContentPlaceholder,
        Label::AdminContentEnglishPlaceholder,
        Label::AdminImage,
        Label::AdminCategory,
        Label::AdminVideo,
        Label::AdminSubmit,
        Label::AdminSubmitting,
        Label::AdminCancel,
        Label::AdminPostHistory,
        Label::AdminActions,
        Label::AdminDelete,
        Label::AdminConfirmDelete,
        Label::NewsPosted,
        Label::NewsReadMore,
        Label::NewsShare,
        Label::NewsRelated,
        Label::NewsNoNews,
        Label::NewsLoadMore,
        Label::NewsSponsored,
        Label::NewsRecently,
        Label::NewsUnknownDate,
        Label::NewsJustNow,
        Label::AdsManagement,
        Label::AdsEnable,
        Label::AdsDisable,
        Label::AdsCreate,
        Label::AdsImageUrl,
        Label::AdsText,
        Label::AdsLink,
        Label::AdsExpiry,
        Label::AdsActive,
        Label::AdsExpired,
        Label::AdsSave,
        Label::CommonError,
        Label::CommonSuccess,
    ];

    /// Dotted key clients use to look labels up (e.g. `nav.home`)
    pub fn key(self) -> &'static str {
        match self {
            Label::NavHome => "nav.home",
            Label::NavSport => "nav.sport",
            Label::NavTechnology => "nav.technology",
            Label::NavPolitical => "nav.political",
            Label::NavCinema => "nav.cinema",
            Label::NavSearch => "nav.search",
            Label::NavAdmin => "nav.admin",
            Label::NavLogout => "nav.logout",
            Label::NavLogin => "nav.login",
            Label::AdminTitle => "admin.title",
            Label::AdminUploadNews => "admin.upload_news",
            Label::AdminTitlePlaceholder => "admin.title_placeholder",
            Label::AdminEnglishTitlePlaceholder => "admin.english_title_placeholder",
            Label::AdminContentPlaceholder => "admin.content_placeholder",
            Label::AdminContentEnglishPlaceholder => "admin.content_english_placeholder",
            Label::AdminImage => "admin.image",
            Label::AdminCategory => "admin.category",
            Label::AdminVideo => "admin.video",
            Label::AdminSubmit => "admin.submit",
            Label::AdminSubmitting => "admin.submitting",
            Label::AdminCancel => "admin.cancel",
            Label::AdminPostHistory => "admin.post_history",
            Label::AdminActions => "admin.actions",
            Label::AdminDelete => "admin.delete",
            Label::AdminConfirmDelete => "admin.confirm_delete",
            Label::NewsPosted => "news.posted",
            Label::NewsReadMore => "news.read_more",
            Label::NewsShare => "news.share",
            Label::NewsRelated => "news.related",
            Label::NewsNoNews => "news.no_news",
            Label::NewsLoadMore => "news.load_more",
            Label::NewsSponsored => "news.sponsored",
            Label::NewsRecently => "news.recently",
            Label::NewsUnknownDate => "news.unknown_date",
            Label::NewsJustNow => "news.just_now",
            Label::AdsManagement => "ads.management",
            Label::AdsEnable => "ads.enable",
            Label::AdsDisable => "ads.disable",
            Label::AdsCreate => "ads.create",
            Label::AdsImageUrl => "ads.image_url",
            Label::AdsText => "ads.text",
            Label::AdsLink => "ads.link",
            Label::AdsExpiry => "ads.expiry",
            Label::AdsActive => "ads.active",
            Label::AdsExpired => "ads.expired",
            Label::AdsSave => "ads.save",
            Label::CommonError => "common.error",
            Label::CommonSuccess => "common.success",
        }
    }

    /// Text of this label in `lang`
    pub fn text(self, lang: Language) -> &'static str {
        match lang {
            Language::English => english(self),
            Language::Tamil => tamil(self),
        }
    }
}

fn english(label: Label) -> &'static str {
    match label {
        Label::NavHome => "Home",
        Label::NavSport => "Sport",
        Label::NavTechnology => "Technology",
        Label::NavPolitical => "Political",
        Label::NavCinema => "Cinema",
        Label::NavSearch => "Search news...",
        Label::NavAdmin => "Admin",
        Label::NavLogout => "Log Out",
        Label::NavLogin => "Log In",
        Label::AdminTitle => "Admin Dashboard",
        Label::AdminUploadNews => "Upload News",
        Label::AdminTitlePlaceholder => "Enter Default Title (Phonetic -> Tamil)",
        Label::AdminEnglishTitlePlaceholder => "Enter English Title",
        Label::AdminContentPlaceholder => "Enter Content (Tamil)",
        Label::AdminContentEnglishPlaceholder => "Enter English Content",
        Label::AdminImage => "Upload Image",
        Label::AdminCategory => "Select Category",
        Label::AdminVideo => "Video Link (YouTube/Vimeo)",
        Label::AdminSubmit => "Upload Post",
        Label::AdminSubmitting => "Uploading...",
        Label::AdminCancel => "Cancel",
        Label::AdminPostHistory => "Post History",
        Label::AdminActions => "Actions",
        Label::AdminDelete => "Delete",
        Label::AdminConfirmDelete => "Are you sure you want to delete this post?",
        Label::NewsPosted => "Posted",
        Label::NewsReadMore => "Read More",
        Label::NewsShare => "Share",
        Label::NewsRelated => "Related News",
        Label::NewsNoNews => "No news found.",
        Label::NewsLoadMore => "Load More",
        Label::NewsSponsored => "Sponsored",
        Label::NewsRecently => "Recently",
        Label::NewsUnknownDate => "Unknown date",
        Label::NewsJustNow => "Just now",
        Label::AdsManagement => "Ad Management",
        Label::AdsEnable => "Global Ads Enabled",
        Label::AdsDisable => "Global Ads Disabled",
        Label::AdsCreate => "New Advertisement",
        Label::AdsImageUrl => "Banner Image URL",
        Label::AdsText => "Custom Text",
        Label::AdsLink => "Target URL",
        Label::AdsExpiry => "Duration (Days)",
        Label::AdsActive => "Active",
        Label::AdsExpired => "Expired",
        Label::AdsSave => "Save Ad",
        Label::CommonError => "Something went wrong",
        Label::CommonSuccess => "Operation successful",
    }
}

fn tamil(label: Label) -> &'static str {
    match label {
        Label::NavHome => "முகப்பு",
        Label::NavSport => "விளையாட்டு",
        Label::NavTechnology => "தொழில்நுட்பம்",
        Label::NavPolitical => "அரசியல்",
        Label::NavCinema => "சினிமா",
        Label::NavSearch => "செய்திகளைத் தேடுங்கள்...",
        Label::NavAdmin => "நிர்வாகம்",
        Label::NavLogout => "வெளியேறு",
        Label::NavLogin => "உள்நுழை",
        Label::AdminTitle => "நிர்வாகக் கட்டுப்பாட்டகம்",
        Label::AdminUploadNews => "செய்தி பதிவேற்று",
        Label::AdminTitlePlaceholder => "தலைப்பை உள்ளிடவும் (ஒலிப்பு -> தமிழ்)",
        Label::AdminEnglishTitlePlaceholder => "ஆங்கிலத் தலைப்பை உள்ளிடவும்",
        Label::AdminContentPlaceholder => "உள்ளடக்கத்தை உள்ளிடவும் (தமிழ்)",
        Label::AdminContentEnglishPlaceholder => "ஆங்கில உள்ளடக்கத்தை உள்ளிடவும்",
        Label::AdminImage => "படத்தைப் பதிவேற்று",
        Label::AdminCategory => "வகையைத் தேர்ந்தெடுக்கவும்",
        Label::AdminVideo => "வீடியோ இணைப்பு (YouTube/Vimeo)",
        Label::AdminSubmit => "பதிவை வெளியிடு",
        Label::AdminSubmitting => "பதிவேற்றப்படுகிறது...",
        Label::AdminCancel => "ரத்து செய்",
        Label::AdminPostHistory => "பதிவு வரலாறு",
        Label::AdminActions => "செயல்கள்",
        Label::AdminDelete => "நீக்கு",
        Label::AdminConfirmDelete => "இந்தப் பதிவை நிச்சயமாக நீக்க விரும்புகிறீர்களா?",
        Label::NewsPosted => "வெளியிடப்பட்டது",
        Label::NewsReadMore => "மேலும் படிக்க",
        Label::NewsShare => "பகிர்",
        Label::NewsRelated => "தொடர்புடைய செய்திகள்",
        Label::NewsNoNews => "செய்திகள் எதுவும் இல்லை.",
        Label::NewsLoadMore => "மேலும் காட்டு",
        Label::NewsSponsored => "விளம்பரம்",
        Label::NewsRecently => "சமீபத்தில்",
        Label::NewsUnknownDate => "தேதி தெரியவில்லை",
        Label::NewsJustNow => "இப்போது",
        Label::AdsManagement => "விளம்பர மேலாண்மை",
        Label::AdsEnable => "விளம்பரங்கள் இயக்கத்தில்",
        Label::AdsDisable => "விளம்பரங்கள் முடக்கத்தில்",
        Label::AdsCreate => "புதிய விளம்பரம்",
        Label::AdsImageUrl => "பேனர் பட இணைப்பு",
        Label::AdsText => "விளம்பர உரை",
        Label::AdsLink => "இலக்கு இணைப்பு",
        Label::AdsExpiry => "காலம் (நாட்கள்)",
        Label::AdsActive => "செயலில்",
        Label::AdsExpired => "காலாவதியானது",
        Label::AdsSave => "விளம்பரத்தைச் சேமி",
        Label::CommonError => "ஏதோ தவறு நடந்துவிட்டது",
        Label::CommonSuccess => "செயல் வெற்றிகரமாக முடிந்தது",
    }
}

/// Full label table for `lang`, keyed by dotted key
pub fn labels(lang: Language) -> BTreeMap<&'static str, &'static str> {
    Label::ALL
        .into_iter()
        .map(|label| (label.key(), label.text(lang)))
        .collect()
}

impl Category {
    /// Navigation label for this category
    pub fn label(&self) -> Label {
        match self {
            Category::Sport => Label::NavSport,
            Category::Technology => Label::NavTechnology,
            Category::Political => Label::NavPolitical,
            Category::Cinema => Label::NavCinema,
        }
    }
}

/// Category page heading and sub-heading
pub fn category_heading(category: Category, lang: Language) -> (String, String) {
    let name = category.label().text(lang);
    match lang {
        Language::English => (
            format!("{} News", name),
            format!("Latest updates from the {} world.", name),
        ),
        Language::Tamil => (
            format!("{} செய்திகள்", name),
            format!("{} உலகின் சமீபத்திய தகவல்கள்.", name),
        ),
    }
}

/// Coarse distance between two instants, rounded the way news sites show it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Distance {
    LessThanMinute,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Months(i64),
    Years(i64),
}

fn rounded_div(value: i64, divisor: i64) -> i64 {
    value.saturating_add(divisor / 2) / divisor
}

fn distance(elapsed_secs: i64) -> Distance {
    let secs = elapsed_secs.max(0);
    let minutes = rounded_div(secs, 60);

    if minutes < 1 {
        Distance::LessThanMinute
    } else if minutes < 45 {
        Distance::Minutes(minutes)
    } else if minutes < 90 {
        Distance::Hours(1)
    } else if minutes < 1_440 {
        Distance::Hours(rounded_div(minutes, 60))
    } else if minutes < 2_520 {
        Distance::Days(1)
    } else if minutes < 43_200 {
        Distance::Days(rounded_div(minutes, 1_440))
    } else if minutes < 525_600 {
        Distance::Months(rounded_div(minutes, 43_200).max(1))
    } else {
        Distance::Years(minutes / 525_600)
    }
}

/// Relative "posted" label for an article created at `created_at`.
///
/// An absent timestamp renders `undated` in `lang`.
pub fn posted_ago(created_at: Option<i64>, now: i64, lang: Language, undated: Label) -> String {
    let Some(created_at) = created_at else {
        return undated.text(lang).to_string();
    };

    match (lang, distance(now.saturating_sub(created_at))) {
        (Language::English, Distance::LessThanMinute) => "less than a minute ago".to_string(),
        (Language::English, Distance::Minutes(1)) => "1 minute ago".to_string(),
        (Language::English, Distance::Minutes(n)) => format!("{} minutes ago", n),
        (Language::English, Distance::Hours(1)) => "about 1 hour ago".to_string(),
        (Language::English, Distance::Hours(n)) => format!("about {} hours ago", n),
        (Language::English, Distance::Days(1)) => "1 day ago".to_string(),
        (Language::English, Distance::Days(n)) => format!("{} days ago", n),
        (Language::English, Distance::Months(1)) => "about 1 month ago".to_string(),
        (Language::English, Distance::Months(n)) => format!("{} months ago", n),
        (Language::English, Distance::Years(1)) => "about 1 year ago".to_string(),
        (Language::English, Distance::Years(n)) => format!("about {} years ago", n),

        (Language::Tamil, Distance::LessThanMinute) => "சற்று முன்பு".to_string(),
        (Language::Tamil, Distance::Minutes(1)) => "1 நிமிடத்திற்கு முன்பு".to_string(),
        (Language::Tamil, Distance::Minutes(n)) => format!("{} நிமிடங்களுக்கு முன்பு", n),
        (Language::Tamil, Distance::Hours(1)) => "சுமார் 1 மணி நேரத்திற்கு முன்பு".to_string(),
        (Language::Tamil, Distance::Hours(n)) => format!("சுமார் {} மணி நேரத்திற்கு முன்பு", n),
        (Language::Tamil, Distance::Days(1)) => "1 நாளுக்கு முன்பு".to_string(),
        (Language::Tamil, Distance::Days(n)) => format!("{} நாட்களுக்கு முன்பு", n),
        (Language::Tamil, Distance::Months(1)) => "சுமார் 1 மாதத்திற்கு முன்பு".to_string(),
        (Language::Tamil, Distance::Months(n)) => format!("{} மாதங்களுக்கு முன்பு", n),
        (Language::Tamil, Distance::Years(1)) => "சுமார் 1 ஆண்டுக்கு முன்பு".to_string(),
        (Language::Tamil, Distance::Years(n)) => format!("சுமார் {} ஆண்டுகளுக்கு முன்பு", n),
    }
}
