//! Turn structured recognition output into plain text.

use crate::engine::RecognitionResult;
use crate::language::Language;

/// Render one output line per recognized line, then trim the whole text.
///
/// Languages written without spaces keep the engine's own line text; all
/// others get their words rejoined with single spaces.
pub fn assemble(result: &RecognitionResult, language: &Language) -> String {
    let lines: Vec<String> = result
        .lines
        .iter()
        .map(|line| {
            if language.uses_whitespace_joining() {
                line.words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            } else {
                line.text.clone()
            }
        })
        .collect();

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecognizedLine;

    fn result(lines: Vec<RecognizedLine>) -> RecognitionResult {
        RecognitionResult { lines }
    }

    #[test]
    fn test_words_joined_with_single_space() {
        let r = result(vec![
            RecognizedLine::new("Hello,   world", ["Hello,", "world"]),
            RecognizedLine::new("second line", ["second", "line"]),
        ]);
        assert_eq!(assemble(&r, &Language::new("en-US")), "Hello, world\nsecond line");
    }

    #[test]
    fn test_native_line_text_for_chinese() {
        let r = result(vec![RecognizedLine::new("你好世界", ["你好", "世界"])]);
        assert_eq!(assemble(&r, &Language::new("zh-CN")), "你好世界");
    }

    #[test]
    fn test_native_line_text_for_japanese() {
        let r = result(vec![RecognizedLine::new("こんにちは 世界", ["こんにちは", "世界"])]);
        assert_eq!(assemble(&r, &Language::new("ja")), "こんにちは 世界");
    }

    #[test]
    fn test_order_is_preserved() {
        let r = result(vec![
            RecognizedLine::new("c", ["c"]),
            RecognizedLine::new("a", ["a"]),
            RecognizedLine::new("b", ["b"]),
        ]);
        assert_eq!(assemble(&r, &Language::new("en")), "c\na\nb");
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let r = result(vec![
            RecognizedLine::new("", Vec::<String>::new()),
            RecognizedLine::new(" x ", [" x "]),
            RecognizedLine::new("", Vec::<String>::new()),
        ]);
        assert_eq!(assemble(&r, &Language::new("en")), "x");
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(assemble(&RecognitionResult::default(), &Language::new("en")), "");
    }
}
