//! Text advisory pipeline.
//!
//! raw message → `intent::normalize` → `intent::classify` → `responses::respond`.
//! Stateless; the tables it reads are `static` data.

pub mod intent;
pub mod responses;

pub use intent::{Classification, Intent, classify, normalize};
pub use responses::respond;

/// Classify a raw chat message and return the advisory reply.
pub fn classify_and_respond(message: &str) -> String {
    let normalized = normalize(message);
    respond(&classify(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MAX_MESSAGE_CHARS;

    #[test]
    fn greeting_takes_priority_over_crop() {
        let reply = classify_and_respond("hello, how do I grow wheat");
        assert!(reply.starts_with("🌾 Hello! Welcome to your AI farming assistant."));
    }

    #[test]
    fn blank_message_gets_default_advice() {
        assert_eq!(classify_and_respond(""), responses::FALLBACK);
        assert_eq!(classify_and_respond("  \n "), responses::FALLBACK);
    }

    #[test]
    fn mixed_case_input_is_normalized() {
        let reply = classify_and_respond("  MAIZE spacing?  ");
        assert!(reply.starts_with("🌾 Maize Cultivation Tips:"));
    }

    #[test]
    fn crop_list_order_picks_the_heading() {
        let reply = classify_and_respond("corn and maize");
        assert!(reply.starts_with("🌾 Maize Cultivation Tips:\n\n"));
        let reply = classify_and_respond("price");
        assert!(reply.starts_with("🌾 Rice Cultivation Tips:\n\n"));
    }

    #[test]
    fn replies_are_deterministic() {
        let a = classify_and_respond("aphids on my beans");
        let b = classify_and_respond("aphids on my beans");
        assert_eq!(a, b);
    }

    #[test]
    fn every_reply_fits_in_a_chat_message() {
        let samples = [
            "hello", "wheat", "tomato", "drip", "npk", "borer", "drought", "market", "tractor",
        ];
        for sample in samples {
            let reply = classify_and_respond(sample);
            assert!(
                reply.chars().count() <= MAX_MESSAGE_CHARS,
                "reply for {sample:?} is {} chars",
                reply.chars().count()
            );
        }
    }
}
