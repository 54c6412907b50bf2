//! Typed stage behavior derived from a `StageDescriptor`.
//!
//! The catalog keeps descriptors as authored; the player only ever works with a
//! `StageKind`, so every stage type is handled exhaustively.

use std::fmt;

use glam::Vec2;

use super::descriptor::{FeedbackSprites, SourceItem, StageDescriptor};
use crate::config;
use crate::core::geometry::Rect;

/// Declared capture mode of a stage (`inputType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Strokes start inside the writing pad.
    Pad,
    /// Strokes start inside the active slot's expanded hit box.
    Direct,
    Drag,
    None,
}

impl InputMode {
    pub fn parse(value: Option<&str>) -> Result<Self, StageError> {
        match value {
            Some("pad") => Ok(InputMode::Pad),
            Some("direct") => Ok(InputMode::Direct),
            Some("drag") => Ok(InputMode::Drag),
            Some("none") | None => Ok(InputMode::None),
            Some(other) => Err(StageError::UnknownInputType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingVariant {
    Plain,
    /// Faint hint glyphs plus an optional speaker button.
    HintAudio,
    /// The active slot's outline blinks.
    BlinkPad,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentenceLayout {
    pub pre: String,
    pub post: String,
    pub y: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioHint {
    pub word: String,
    /// `None` means unlimited.
    pub max_plays: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PadStyle {
    pub color: String,
    pub opacity: f32,
}

impl Default for PadStyle {
    fn default() -> Self {
        Self {
            color: config::colors::PAD.to_string(),
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritingStage {
    pub variant: WritingVariant,
    pub input: InputMode,
    /// Slots in commit order. Empty when the descriptor has none.
    pub targets: Vec<Rect>,
    pub sentence: Option<SentenceLayout>,
    pub hints: Vec<String>,
    pub audio: Option<AudioHint>,
    pub pad: PadStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub hanja: String,
    pub pinyin: String,
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragStage {
    pub tokens: Vec<Token>,
    pub sources: Vec<String>,
    pub sub_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterSlot {
    pub center: Vec2,
    pub letter: String,
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLetter {
    pub letter: String,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlphabetStage {
    pub slots: Vec<LetterSlot>,
    pub sources: Vec<PlacedLetter>,
    pub feedback: Option<FeedbackSprites>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechStage {
    pub text: String,
    pub sub_text: String,
    pub meaning: String,
    pub lang: String,
}

/// Closed set of stage behaviors.
#[derive(Debug, Clone, PartialEq)]
pub enum StageKind {
    Writing(WritingStage),
    PinyinDrag(DragStage),
    AlphabetDrag(AlphabetStage),
    Speech(SpeechStage),
}

impl StageKind {
    pub fn from_descriptor(stage: &StageDescriptor) -> Result<Self, StageError> {
        let input = InputMode::parse(stage.input_type.as_deref())?;
        match stage.kind.as_str() {
            "speech_recognition" => speech(stage).map(StageKind::Speech),
            "alphabet_drag" => alphabet(stage).map(StageKind::AlphabetDrag),
            "drag_drop" => drag(stage).map(StageKind::PinyinDrag),
            _ if input == InputMode::Drag => drag(stage).map(StageKind::PinyinDrag),
            "normal" => writing(stage, WritingVariant::Plain, input).map(StageKind::Writing),
            "hint_audio" => writing(stage, WritingVariant::HintAudio, input).map(StageKind::Writing),
            "blink_pad" => writing(stage, WritingVariant::BlinkPad, input).map(StageKind::Writing),
            other => Err(StageError::UnknownType(other.to_string())),
        }
    }

    /// Capture mode the player routes pointer input by.
    pub fn input(&self) -> InputMode {
        match self {
            StageKind::Writing(w) => w.input,
            StageKind::PinyinDrag(_) | StageKind::AlphabetDrag(_) => InputMode::Drag,
            StageKind::Speech(_) => InputMode::None,
        }
    }

    /// Writing slots, empty for every other kind.
    pub fn slots(&self) -> &[Rect] {
        match self {
            StageKind::Writing(w) => &w.targets,
            _ => &[],
        }
    }
}

fn missing(stage: &StageDescriptor, field: &str) -> StageError {
    StageError::MissingField {
        stage: stage.title.clone(),
        field: field.to_string(),
    }
}

fn writing(stage: &StageDescriptor, variant: WritingVariant, input: InputMode) -> Result<WritingStage, StageError> {
    let mut targets = Vec::new();
    for (i, t) in stage.targets.iter().flatten().enumerate() {
        let width = t.width.ok_or_else(|| missing(stage, &format!("targets[{i}].width")))?;
        let height = t.height.ok_or_else(|| missing(stage, &format!("targets[{i}].height")))?;
        targets.push(Rect::new(t.x as f32, t.y as f32, width as f32, height as f32));
    }
    if targets.is_empty() {
        log::warn!("stage '{}' has no targets; rendering the pad only", stage.title);
    }

    let audio = match variant {
        WritingVariant::HintAudio => stage.audio_word.clone().map(|word| AudioHint {
            word,
            max_plays: stage.max_audio_plays,
        }),
        _ => None,
    };
    let hints = match variant {
        WritingVariant::HintAudio => stage.hint_text.clone().unwrap_or_default(),
        _ => Vec::new(),
    };

    let default_pad = PadStyle::default();
    Ok(WritingStage {
        variant,
        input,
        targets,
        sentence: stage.sentence.as_ref().map(|s| SentenceLayout {
            pre: s.pre.clone(),
            post: s.post.clone(),
            y: s.y.map(|y| y as f32),
        }),
        hints,
        audio,
        pad: PadStyle {
            color: stage.pad_color.clone().unwrap_or(default_pad.color),
            opacity: stage.pad_opacity.map_or(default_pad.opacity, |o| o as f32),
        },
    })
}

fn drag(stage: &StageDescriptor) -> Result<DragStage, StageError> {
    let tokens = stage.tokens.as_ref().ok_or_else(|| missing(stage, "tokens"))?;
    let sources = stage.source_items.as_ref().ok_or_else(|| missing(stage, "sourceItems"))?;
    Ok(DragStage {
        tokens: tokens
            .iter()
            .map(|t| Token {
                hanja: t.hanja.clone(),
                pinyin: t.pinyin.clone(),
                fixed: t.fixed,
            })
            .collect(),
        sources: sources.iter().map(|s| s.label().to_string()).collect(),
        sub_text: stage.sub_text.clone(),
    })
}

fn alphabet(stage: &StageDescriptor) -> Result<AlphabetStage, StageError> {
    let targets = stage.targets.as_ref().ok_or_else(|| missing(stage, "targets"))?;
    let sources = stage.source_items.as_ref().ok_or_else(|| missing(stage, "sourceItems"))?;

    let mut slots = Vec::with_capacity(targets.len());
    for (i, t) in targets.iter().enumerate() {
        let letter = t.letter.clone().ok_or_else(|| missing(stage, &format!("targets[{i}].char")))?;
        slots.push(LetterSlot {
            center: Vec2::new(t.x as f32, t.y as f32),
            letter,
            fixed: t.fixed.unwrap_or(false),
        });
    }

    let placed = sources
        .iter()
        .filter_map(|item| match item {
            SourceItem::Placed { letter, x, y } => Some(PlacedLetter {
                letter: letter.clone(),
                pos: Vec2::new(*x as f32, *y as f32),
            }),
            SourceItem::Label(label) => {
                log::warn!("stage '{}': source item '{label}' has no position, skipped", stage.title);
                None
            }
        })
        .collect();

    Ok(AlphabetStage {
        slots,
        sources: placed,
        feedback: stage.feedback.clone(),
    })
}

fn speech(stage: &StageDescriptor) -> Result<SpeechStage, StageError> {
    let text = stage.text.clone().ok_or_else(|| missing(stage, "text"))?;
    Ok(SpeechStage {
        text,
        sub_text: stage.sub_text.clone().unwrap_or_default(),
        meaning: stage.meaning.clone().unwrap_or_default(),
        lang: stage.lang.clone().unwrap_or_else(|| config::DEFAULT_LANG.to_string()),
    })
}

/// Why a descriptor could not be turned into a playable stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    UnknownType(String),
    UnknownInputType(String),
    MissingField { stage: String, field: String },
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::UnknownType(kind) => write!(f, "unknown stage type '{kind}'"),
            StageError::UnknownInputType(input) => write!(f, "unknown input type '{input}'"),
            StageError::MissingField { stage, field } => {
                write!(f, "stage '{stage}' is missing '{field}'")
            }
        }
    }
}

impl std::error::Error for StageError {}
