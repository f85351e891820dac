//! Prompt construction and reply clean-up for example sentence generation.

/// Everything the generator needs to write one example sentence.
#[derive(Debug, Clone)]
pub struct SentencePrompt<'a> {
    pub word: &'a str,
    pub translation: &'a str,
    /// Language code the sentence should be written in, e.g. `en` or `es`.
    pub language: &'a str,
    /// Words the learner already studies; woven in to build context.
    pub known_words: &'a [String],
}

impl SentencePrompt<'_> {
    pub fn render(&self) -> String {
        let mut prompt = format!(
            "Write one short, natural example sentence in the language with code \"{}\" \
             that uses the word \"{}\" (meaning: \"{}\").",
            self.language, self.word, self.translation
        );

        let context: Vec<&str> = self
            .known_words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty() && !w.eq_ignore_ascii_case(self.word))
            .collect();
        if !context.is_empty() {
            prompt.push_str(&format!(
                " Where it sounds natural, also use one or more of these words the learner already knows: {}.",
                context.join(", ")
            ));
        }

        prompt.push_str(
            " Keep it suitable for a student living abroad. \
             Reply with the sentence only, without quotes, translation or explanation.",
        );
        prompt
    }
}

const QUOTES: &[char] = &['"', '\'', '“', '”', '«', '»', '„', '「', '」'];

/// First non-empty line of a model reply with wrapping quotes and a leading
/// `Sentence:` label removed. `None` when nothing usable remains.
pub fn sanitize_reply(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;

    let line = match line.split_once(':') {
        Some((label, rest)) if label.trim().eq_ignore_ascii_case("sentence") => rest.trim(),
        _ => line,
    };

    let cleaned = line.trim_matches(|c: char| QUOTES.contains(&c) || c.is_whitespace());
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_word_translation_and_language() {
        let prompt = SentencePrompt {
            word: "madrugada",
            translation: "early morning",
            language: "es",
            known_words: &[],
        }
        .render();

        assert!(prompt.contains("\"madrugada\""));
        assert!(prompt.contains("early morning"));
        assert!(prompt.contains("\"es\""));
        assert!(!prompt.contains("already knows"));
    }

    #[test]
    fn test_prompt_includes_known_words_except_target() {
        let known = vec![
            "tapas".to_string(),
            "Madrugada".to_string(),
            " ".to_string(),
            "metro".to_string(),
        ];
        let prompt = SentencePrompt {
            word: "madrugada",
            translation: "early morning",
            language: "es",
            known_words: &known,
        }
        .render();

        assert!(prompt.contains("already knows: tapas, metro."));
    }

    #[test]
    fn test_sanitize_reply() {
        assert_eq!(
            sanitize_reply("\n  \"Salimos de fiesta hasta la madrugada.\"  \n"),
            Some("Salimos de fiesta hasta la madrugada.".to_string())
        );
        assert_eq!(
            sanitize_reply("Sentence: «On prend le métro ?»\nTranslation: ..."),
            Some("On prend le métro ?".to_string())
        );
        assert_eq!(
            sanitize_reply("Note: this works"),
            Some("Note: this works".to_string())
        );
        assert_eq!(sanitize_reply("  \n \"\" \n"), None);
        assert_eq!(sanitize_reply(""), None);
    }
}
