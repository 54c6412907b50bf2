//! Stage descriptors exactly as authored in the catalog file.
//!
//! Every field is optional at this level; `StageKind::from_descriptor` decides what
//! a given stage actually needs. Unknown keys are carried in `extra` so saving an
//! edited catalog never drops content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::number;

/// One slot rectangle (writing stages) or letter slot (alphabet stage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    #[serde(serialize_with = "number::serialize")]
    pub x: f64,
    #[serde(serialize_with = "number::serialize")]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "number::option::serialize")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "number::option::serialize")]
    pub height: Option<f64>,
    #[serde(rename = "char", default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetSpec {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
            letter: None,
            fixed: None,
            extra: Map::new(),
        }
    }
}

/// Sentence around the writing slots: `pre [slots] post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub pre: String,
    #[serde(default)]
    pub post: String,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "number::option::serialize")]
    pub y: Option<f64>,
}

/// A hanja/pinyin pair of a drag-drop sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSpec {
    #[serde(rename = "char")]
    pub hanja: String,
    pub pinyin: String,
    #[serde(default)]
    pub fixed: bool,
}

/// Draggable source item: a bare label (laid out automatically) or a placed letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceItem {
    Label(String),
    Placed {
        #[serde(rename = "char")]
        letter: String,
        #[serde(serialize_with = "number::serialize")]
        x: f64,
        #[serde(serialize_with = "number::serialize")]
        y: f64,
    },
}

impl SourceItem {
    pub fn label(&self) -> &str {
        match self {
            SourceItem::Label(label) => label,
            SourceItem::Placed { letter, .. } => letter,
        }
    }
}

/// Character sprite images shown on correct/wrong answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSprites {
    pub boy: String,
    pub girl: String,
}

/// A stage as authored. Field names follow the catalog file (camelCase).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDescriptor {
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<Sentence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_items: Option<Vec<SourceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_audio_plays: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "number::option::serialize", deserialize_with = "number::lenient")]
    pub bg_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "number::option::serialize", deserialize_with = "number::lenient")]
    pub pad_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackSprites>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_writing_stage() {
        let json = r#"{
            "id": 2, "type": "normal", "inputType": "pad", "title": "Level 2",
            "sentence": { "pre": "나는", "post": "에 갑니다.", "y": 400 },
            "targets": [
                { "x": 440, "y": 340, "width": 140, "height": 121 },
                { "x": 600, "y": 340, "width": 140, "height": 121 }
            ],
            "bgImage": "images/20260105_193944.png",
            "padOpacity": "0.6"
        }"#;
        let stage: StageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(stage.kind, "normal");
        assert_eq!(stage.input_type.as_deref(), Some("pad"));
        assert_eq!(stage.targets.as_ref().unwrap().len(), 2);
        assert_eq!(stage.targets.as_ref().unwrap()[1].height, Some(121.0));
        assert_eq!(stage.pad_opacity, Some(0.6));
        assert_eq!(stage.sentence.unwrap().post, "에 갑니다.");
    }

    #[test]
    fn source_items_accept_both_shapes() {
        let labels: Vec<SourceItem> = serde_json::from_str(r#"["ma", "chī"]"#).unwrap();
        assert_eq!(labels[1], SourceItem::Label("chī".into()));
        let placed: Vec<SourceItem> = serde_json::from_str(r#"[{"char": "b", "x": 640, "y": 750}]"#).unwrap();
        assert_eq!(placed[0].label(), "b");
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let json = r#"{"id": 9, "type": "normal", "title": "t", "notes": {"author": "kim"}}"#;
        let stage: StageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(stage.extra["notes"]["author"], "kim");
        let out = serde_json::to_value(&stage).unwrap();
        assert_eq!(out["notes"]["author"], "kim");
        assert!(out.get("targets").is_none());
    }

    #[test]
    fn target_geometry_stays_integral() {
        let target = TargetSpec::rect(440.0, 340.0, 220.0, 120.0);
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"x":440,"y":340,"width":220,"height":120}"#);
    }
}
