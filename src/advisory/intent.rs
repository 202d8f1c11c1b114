//! Keyword intent classifier.
//!
//! Intents are tried top to bottom and the first one with a keyword occurring
//! anywhere in the message wins. The table order is the tie-breaker for
//! overlapping vocabulary, so reordering it changes classifications.

use tracing::debug;

/// Topic a farming question is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    CerealCrop,
    Vegetable,
    Irrigation,
    SoilHealth,
    PestControl,
    Weather,
    Market,
    Fallback,
}

impl Intent {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::CerealCrop => "cereal_crop",
            Self::Vegetable => "vegetable",
            Self::Irrigation => "irrigation",
            Self::SoilHealth => "soil_health",
            Self::PestControl => "pest_control",
            Self::Weather => "weather",
            Self::Market => "market",
            Self::Fallback => "fallback",
        }
    }
}

/// One row of the priority table.
#[derive(Debug)]
pub struct IntentRule {
    pub intent: Intent,
    /// Substrings that trigger this intent.
    pub keywords: &'static [&'static str],
}

/// Cereal crops, in the order they are tried when naming the crop.
pub const CEREAL_CROPS: &[&str] = &["wheat", "paddy", "rice", "maize", "corn"];

/// Label used when a cereal message names no known crop.
pub const GENERIC_CEREAL: &str = "cereal";

/// Priority-ordered intent table. `Fallback` is implicit and always last.
pub static INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        keywords: &["hello", "hi", "hey", "good morning", "good afternoon"],
    },
    IntentRule {
        intent: Intent::CerealCrop,
        keywords: CEREAL_CROPS,
    },
    IntentRule {
        intent: Intent::Vegetable,
        keywords: &["tomato", "vegetable", "potato", "onion", "carrot"],
    },
    IntentRule {
        intent: Intent::Irrigation,
        keywords: &["irrigation", "water", "drip", "sprinkler", "watering"],
    },
    IntentRule {
        intent: Intent::SoilHealth,
        keywords: &["soil", "npk", "fertilizer", "ph", "compost", "manure"],
    },
    IntentRule {
        intent: Intent::PestControl,
        keywords: &["pest", "insect", "ipm", "aphid", "borer", "disease", "fungus"],
    },
    IntentRule {
        intent: Intent::Weather,
        keywords: &["weather", "climate", "rain", "drought", "temperature"],
    },
    IntentRule {
        intent: Intent::Market,
        keywords: &["price", "market", "sell", "profit", "cost"],
    },
];

/// Result of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    /// Crop named in a cereal question; `None` for every other intent.
    pub crop: Option<&'static str>,
}

/// Classify a message that is already lower-cased and trimmed.
///
/// Total: anything that matches no rule (including the empty string) is
/// `Intent::Fallback`. Passing text that has not been normalized is a caller
/// bug and trips a debug assertion.
pub fn classify(text: &str) -> Classification {
    debug_assert_eq!(text, text.trim(), "classifier input must be trimmed");
    debug_assert!(
        !text.chars().any(char::is_uppercase),
        "classifier input must be lower-cased"
    );

    let intent = INTENT_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| text.contains(k)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback);

    let crop = match intent {
        Intent::CerealCrop => Some(
            CEREAL_CROPS
                .iter()
                .copied()
                .find(|crop| text.contains(crop))
                .unwrap_or(GENERIC_CEREAL),
        ),
        _ => None,
    };

    debug!(intent = intent.label(), crop = ?crop, "Message classified");
    Classification { intent, crop }
}

/// Lower-case and trim raw user text into classifier input.
pub fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}
