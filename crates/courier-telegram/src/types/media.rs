use courier_core::tagged::{self, TaggedUnion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: i64,
    pub height: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: i64,
    pub height: i64,
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

/// Paid media the user has not bought yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaPreview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaPhoto {
    pub photo: Vec<PhotoSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaVideo {
    pub video: Video,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaidMedia {
    Preview(PaidMediaPreview),
    Photo(PaidMediaPhoto),
    Video(PaidMediaVideo),
}

impl TaggedUnion for PaidMedia {
    const NAME: &'static str = "PaidMedia";
    const TAG_FIELD: &'static str = "type";
    const TAGS: &'static [&'static str] = &["preview", "photo", "video"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Preview(_) => "preview",
            Self::Photo(_) => "photo",
            Self::Video(_) => "video",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "preview" => tagged::variant(raw, Self::Preview),
            "photo" => tagged::variant(raw, Self::Photo),
            "video" => tagged::variant(raw, Self::Video),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::Preview(m) => tagged::payload(m),
            Self::Photo(m) => tagged::payload(m),
            Self::Video(m) => tagged::payload(m),
        }
    }
}

courier_core::tagged_serde!(PaidMedia);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaInfo {
    pub star_count: i64,
    pub paid_media: Vec<PaidMedia>,
}
