//! Static selection catalogs: voices, reply locales and sample prompts.
//!
//! These only populate the selection controls; the turn controller never
//! interprets them beyond "is this voice silent".

/// Voice grouping shown in the voice picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceCategory {
    Silent,
    Formal,
    Casual,
    Soft,
    Sassy,
    Animated,
    Cinematic,
    Intelligent,
    Informative,
}

impl VoiceCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Silent => "Silent",
            Self::Formal => "Formal",
            Self::Casual => "Casual",
            Self::Soft => "Soft",
            Self::Sassy => "Sassy",
            Self::Animated => "Animated",
            Self::Cinematic => "Cinematic",
            Self::Intelligent => "Intelligent",
            Self::Informative => "Informative",
        }
    }
}

/// A selectable voice. Silent voices have an empty id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub category: VoiceCategory,
    pub name: &'static str,
    pub id: &'static str,
}

impl Voice {
    pub fn is_silent(&self) -> bool {
        self.category == VoiceCategory::Silent || self.id.is_empty()
    }
}

/// Voice picked when nothing else is selected.
pub const DEFAULT_VOICE: &str = "🍿";

const VOICES: &[Voice] = &[
    Voice { category: VoiceCategory::Silent, name: "🍿", id: "" },
    Voice { category: VoiceCategory::Formal, name: "Adam", id: "pNInz6obpgDQGcFmaJgB" },
    Voice { category: VoiceCategory::Formal, name: "Antoni", id: "ErXwobaYiN019PkySvjV" },
    Voice { category: VoiceCategory::Casual, name: "Josh", id: "TxGEqnHWrfWFTfGW9XjX" },
    Voice { category: VoiceCategory::Soft, name: "Bella", id: "EXAVITQu4vr4xnSDxMaL" },
    Voice { category: VoiceCategory::Soft, name: "Elli", id: "MF3mGyEYCl7XYWbV9V9O" },
    Voice { category: VoiceCategory::Sassy, name: "Domi", id: "AZnzlk1XvdvUeBnXmlld" },
    Voice { category: VoiceCategory::Animated, name: "Sam", id: "yoZ06aMxZJJ28mfd3POQ" },
    Voice { category: VoiceCategory::Cinematic, name: "Arnold", id: "VR6AewLTigWG4xSOukaG" },
    Voice { category: VoiceCategory::Intelligent, name: "Rachel", id: "21m00Tcm4TlvDq8ikWAM" },
    Voice { category: VoiceCategory::Informative, name: "Antoni (narration)", id: "ErXwobaYiN019PkySvjV" },
];

/// Every voice, grouped by category in picker order.
pub fn voices() -> &'static [Voice] {
    VOICES
}

/// Look a voice up by display name (case-insensitive) or by id.
pub fn find_voice(key: &str) -> Option<&'static Voice> {
    VOICES
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(key) || (!v.id.is_empty() && v.id == key))
}

/// Reply locale with its picker flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub code: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
}

/// Locale the assistant replies in natively.
pub const DEFAULT_LOCALE: &str = "en";

const LOCALES: &[Locale] = &[
    Locale { code: "en", flag: "🇺🇸", name: "English" },
    Locale { code: "es", flag: "🇪🇸", name: "Spanish" },
    Locale { code: "fr", flag: "🇫🇷", name: "French" },
    Locale { code: "de", flag: "🇩🇪", name: "German" },
    Locale { code: "it", flag: "🇮🇹", name: "Italian" },
    Locale { code: "pt", flag: "🇵🇹", name: "Portuguese" },
    Locale { code: "nl", flag: "🇳🇱", name: "Dutch" },
    Locale { code: "pl", flag: "🇵🇱", name: "Polish" },
    Locale { code: "ru", flag: "🇷🇺", name: "Russian" },
    Locale { code: "uk", flag: "🇺🇦", name: "Ukrainian" },
    Locale { code: "tr", flag: "🇹🇷", name: "Turkish" },
    Locale { code: "ar", flag: "🇸🇦", name: "Arabic" },
    Locale { code: "hi", flag: "🇮🇳", name: "Hindi" },
    Locale { code: "ja", flag: "🇯🇵", name: "Japanese" },
    Locale { code: "ko", flag: "🇰🇷", name: "Korean" },
    Locale { code: "zh", flag: "🇨🇳", name: "Chinese" },
    Locale { code: "vi", flag: "🇻🇳", name: "Vietnamese" },
    Locale { code: "id", flag: "🇮🇩", name: "Indonesian" },
];

pub fn locales() -> &'static [Locale] {
    LOCALES
}

/// Look a locale up by code (case-insensitive) or flag.
pub fn find_locale(key: &str) -> Option<&'static Locale> {
    LOCALES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(key) || l.flag == key)
}

const SAMPLE_QUERIES: &[&str] = &[
    "Build me a landing page for a coffee shop",
    "Make a bouncing ball animation in HTML",
    "What would a startup on Mars sell first?",
    "Design a pricing table with three tiers",
    "Explain large language models like I'm five",
    "Create a to-do list app in a single HTML file",
    "Write a haiku about structured file types",
    "Render a digital clock with JavaScript",
];

/// Random prompt for the "surprise me" control.
pub fn random_query() -> &'static str {
    use rand::RngExt;
    let mut rng = rand::rng();
    SAMPLE_QUERIES[rng.random_range(0..SAMPLE_QUERIES.len())]
}

/// Random non-silent voice.
pub fn random_voice() -> &'static Voice {
    use rand::RngExt;
    let voiced: Vec<&'static Voice> = VOICES.iter().filter(|v| !v.is_silent()).collect();
    let mut rng = rand::rng();
    voiced[rng.random_range(0..voiced.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_voice_is_silent() {
        let voice = find_voice(DEFAULT_VOICE).unwrap();
        assert!(voice.is_silent());
        assert_eq!(voice.category, VoiceCategory::Silent);
    }

    #[test]
    fn find_voice_by_name_or_id() {
        assert_eq!(find_voice("rachel").unwrap().id, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(find_voice("TxGEqnHWrfWFTfGW9XjX").unwrap().name, "Josh");
        assert!(find_voice("nobody").is_none());
        assert!(find_voice("").is_none());
    }

    #[test]
    fn every_category_has_a_voice() {
        for category in [
            VoiceCategory::Silent,
            VoiceCategory::Formal,
            VoiceCategory::Casual,
            VoiceCategory::Soft,
            VoiceCategory::Sassy,
            VoiceCategory::Animated,
            VoiceCategory::Cinematic,
            VoiceCategory::Intelligent,
            VoiceCategory::Informative,
        ] {
            assert!(
                voices().iter().any(|v| v.category == category),
                "no voice in {}",
                category.label()
            );
        }
    }

    #[test]
    fn find_locale_by_code_or_flag() {
        assert_eq!(find_locale("FR").unwrap().name, "French");
        assert_eq!(find_locale("🇯🇵").unwrap().code, "ja");
        assert_eq!(find_locale(DEFAULT_LOCALE).unwrap().flag, "🇺🇸");
        assert!(find_locale("xx").is_none());
    }

    #[test]
    fn random_picks_come_from_catalogs() {
        for _ in 0..20 {
            assert!(SAMPLE_QUERIES.contains(&random_query()));
            assert!(!random_voice().is_silent());
        }
    }
}
