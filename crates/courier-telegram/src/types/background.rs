use courier_core::tagged::{self, TaggedUnion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFillSolid {
    /// RGB24 color.
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFillGradient {
    pub top_color: u32,
    pub bottom_color: u32,
    /// Clockwise degrees, 0-359.
    pub rotation_angle: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFillFreeformGradient {
    /// Three or four base colors.
    pub colors: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundFill {
    Solid(BackgroundFillSolid),
    Gradient(BackgroundFillGradient),
    FreeformGradient(BackgroundFillFreeformGradient),
}

impl TaggedUnion for BackgroundFill {
    const NAME: &'static str = "BackgroundFill";
    const TAG_FIELD: &'static str = "type";
    const TAGS: &'static [&'static str] = &["solid", "gradient", "freeform_gradient"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Solid(_) => "solid",
            Self::Gradient(_) => "gradient",
            Self::FreeformGradient(_) => "freeform_gradient",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "solid" => tagged::variant(raw, Self::Solid),
            "gradient" => tagged::variant(raw, Self::Gradient),
            "freeform_gradient" => tagged::variant(raw, Self::FreeformGradient),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::Solid(f) => tagged::payload(f),
            Self::Gradient(f) => tagged::payload(f),
            Self::FreeformGradient(f) => tagged::payload(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypeFill {
    pub fill: BackgroundFill,
    /// Dimming in dark themes, percent.
    pub dark_theme_dimming: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypeWallpaper {
    pub document: Document,
    pub dark_theme_dimming: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blurred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moving: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypePattern {
    pub document: Document,
    pub fill: BackgroundFill,
    pub intensity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_inverted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moving: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTypeChatTheme {
    pub theme_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundType {
    Fill(BackgroundTypeFill),
    Wallpaper(BackgroundTypeWallpaper),
    Pattern(BackgroundTypePattern),
    ChatTheme(BackgroundTypeChatTheme),
}

impl TaggedUnion for BackgroundType {
    const NAME: &'static str = "BackgroundType";
    const TAG_FIELD: &'static str = "type";
    const TAGS: &'static [&'static str] = &["fill", "wallpaper", "pattern", "chat_theme"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Fill(_) => "fill",
            Self::Wallpaper(_) => "wallpaper",
            Self::Pattern(_) => "pattern",
            Self::ChatTheme(_) => "chat_theme",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "fill" => tagged::variant(raw, Self::Fill),
            "wallpaper" => tagged::variant(raw, Self::Wallpaper),
            "pattern" => tagged::variant(raw, Self::Pattern),
            "chat_theme" => tagged::variant(raw, Self::ChatTheme),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::Fill(b) => tagged::payload(b),
            Self::Wallpaper(b) => tagged::payload(b),
            Self::Pattern(b) => tagged::payload(b),
            Self::ChatTheme(b) => tagged::payload(b),
        }
    }
}

courier_core::tagged_serde!(BackgroundFill, BackgroundType);

/// Service payload: the chat background was changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBackground {
    #[serde(rename = "type")]
    pub background_type: BackgroundType,
}
