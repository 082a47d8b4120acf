// src/language.rs
use whatlang::Lang;

pub trait LanguageDetector: Send + Sync {
    /// Two-letter language code of `text`, `None` when it cannot be decided
    fn detect(&self, text: &str) -> Option<String>;
}

/// Detector backed by `whatlang` trigram models.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        whatlang::detect_lang(text).map(|lang| short_code(lang).to_string())
    }
}

/// ISO 639-1 code where one exists for the common European languages, else whatlang's own code
fn short_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Spa => "es",
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Pol => "pl",
        other => other.code(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_spanish() {
        let text = "Buscamos un desarrollador con experiencia en sistemas distribuidos para \
                    unirse a nuestro equipo. Ofrecemos un salario competitivo y trabajo remoto.";
        assert_eq!(WhatlangDetector.detect(text).as_deref(), Some("es"));
    }

    #[test]
    fn test_detects_english() {
        let text = "We are looking for an experienced software engineer to join our team \
                    and help us build reliable distributed systems for our customers.";
        assert_eq!(WhatlangDetector.detect(text).as_deref(), Some("en"));
    }

    #[test]
    fn test_empty_text_is_undetected() {
        assert_eq!(WhatlangDetector.detect("   "), None);
    }
}
