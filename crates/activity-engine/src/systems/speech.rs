//! Speech drill evaluation and recognizer failures.

use std::collections::HashSet;
use std::fmt;

/// Characters dropped before comparing a transcript with the target sentence.
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~', '(', ')',
    '？', '?', '！',
];

/// Strip whitespace and punctuation, then lowercase.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Outcome of comparing one transcript with the target sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechVerdict {
    /// Each normalized target character and whether it occurs anywhere in the transcript.
    pub chars: Vec<(char, bool)>,
    /// Normalized strings are identical.
    pub success: bool,
}

impl SpeechVerdict {
    pub fn all_marked_correct(&self) -> bool {
        self.chars.iter().all(|(_, ok)| *ok)
    }
}

/// Per-character coloring uses set membership; success needs exact equality.
/// The two criteria disagree on anagrams and that is kept as is.
pub fn evaluate(recognized: &str, target: &str) -> SpeechVerdict {
    let heard = normalize(recognized);
    let wanted = normalize(target);
    let present: HashSet<char> = heard.chars().collect();
    SpeechVerdict {
        chars: wanted.chars().map(|c| (c, present.contains(&c))).collect(),
        success: heard == wanted,
    }
}

/// Speech recognition failures reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// The browser has no recognizer.
    NotSupported,
    /// Microphone permission denied.
    NotAllowed,
    Network,
    /// Page opened from `file://`.
    InsecureOrigin,
    Other(String),
}

impl RecognitionError {
    /// Map a host error code (`not-allowed`, `network`, ...) to a variant.
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-supported" => RecognitionError::NotSupported,
            "not-allowed" | "service-not-allowed" => RecognitionError::NotAllowed,
            "network" => RecognitionError::Network,
            "insecure-origin" => RecognitionError::InsecureOrigin,
            other => RecognitionError::Other(other.to_string()),
        }
    }

    /// Notice shown to the learner.
    pub fn notice(&self) -> &'static str {
        match self {
            RecognitionError::NotSupported => "이 브라우저는 음성 인식을 지원하지 않습니다.",
            RecognitionError::NotAllowed => {
                "마이크 권한이 거부되었습니다. 브라우저 설정에서 마이크를 허용해 주세요."
            }
            RecognitionError::Network => {
                "네트워크 연결 확인이 필요하거나, 현재 환경에서 음성 인식을 지원하지 않습니다."
            }
            RecognitionError::InsecureOrigin => {
                "로컬 파일(file://) 환경에서는 보안상 음성 인식이 제한될 수 있습니다. 서버 환경에서 실행해 주세요."
            }
            RecognitionError::Other(_) => "음성 인식 중 오류가 발생했습니다.",
        }
    }
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionError::NotSupported => write!(f, "speech recognition not supported"),
            RecognitionError::NotAllowed => write!(f, "microphone permission denied"),
            RecognitionError::Network => write!(f, "recognition network failure"),
            RecognitionError::InsecureOrigin => write!(f, "recognition blocked on insecure origin"),
            RecognitionError::Other(code) => write!(f, "recognition error: {code}"),
        }
    }
}

impl std::error::Error for RecognitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_spaces_and_punctuation() {
        assert_eq!(normalize("Ni hao!"), "nihao");
        assert_eq!(normalize("你好？"), "你好");
        assert_eq!(normalize(" 你 吃 饭 了 吗 ?"), "你吃饭了吗");
    }

    #[test]
    fn exact_match_succeeds() {
        let verdict = evaluate("nihao", "nihao");
        assert!(verdict.success);
        assert!(verdict.all_marked_correct());
    }

    #[test]
    fn anagram_is_colored_correct_but_fails() {
        let verdict = evaluate("nhiao", "nihao");
        assert!(!verdict.success);
        assert!(verdict.all_marked_correct());
        assert_eq!(verdict.chars.len(), 5);
    }

    #[test]
    fn missing_characters_are_marked() {
        let verdict = evaluate("你好", "你好吗");
        assert_eq!(verdict.chars, vec![('你', true), ('好', true), ('吗', false)]);
        assert!(!verdict.success);
    }

    #[test]
    fn punctuation_differences_do_not_matter() {
        assert!(evaluate("你好吗", "你好吗？").success);
    }

    #[test]
    fn error_codes_map_to_variants() {
        assert_eq!(RecognitionError::from_code("not-allowed"), RecognitionError::NotAllowed);
        assert_eq!(RecognitionError::from_code("network"), RecognitionError::Network);
        assert_eq!(RecognitionError::from_code("aborted"), RecognitionError::Other("aborted".into()));
    }
}
