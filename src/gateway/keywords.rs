//! Emergency keyword detection and the scripted safety reply.

/// Lowercase substrings that mark a message as a possible emergency.
pub(super) const EMERGENCY_KW: &[&str] = &[
    "emergency",
    "heart attack",
    "stroke",
    "bleeding",
    "unconscious",
    "severe pain",
    "difficulty breathing",
    "chest pain",
];

/// Fixed reply sent instead of a model completion when an emergency is detected.
pub(super) const EMERGENCY_REPLY: &str = "IMPORTANT: Based on what you've described, you should seek immediate medical attention. \n\
\n\
If this is an emergency:\n\
1. Call emergency services (911 in the US) immediately\n\
2. Do not wait or delay seeking professional medical care\n\
3. If possible, have someone stay with you\n\
\n\
I cannot provide medical advice for emergency situations. Please prioritize your safety and contact medical professionals right away.";

/// Check if the lowercased message contains any emergency keyword.
///
/// Matching is an unanchored substring test: no word boundaries, so a
/// keyword embedded in a longer word still counts.
pub fn is_emergency(msg: &str) -> bool {
    let normalized = msg.to_lowercase();
    EMERGENCY_KW.iter().any(|kw| normalized.contains(kw))
}

pub fn emergency_reply() -> &'static str {
    EMERGENCY_REPLY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_matches_any_casing() {
        for kw in EMERGENCY_KW {
            assert!(is_emergency(kw), "lowercase: {kw}");
            assert!(is_emergency(&kw.to_uppercase()), "uppercase: {kw}");
            assert!(
                is_emergency(&format!("I think I am having {kw} right now")),
                "embedded: {kw}"
            );
        }
    }

    #[test]
    fn test_mixed_case_sentence() {
        assert!(is_emergency("I have Chest Pain"));
        assert!(is_emergency("DIFFICULTY BREATHING since noon"));
    }

    #[test]
    fn test_substring_inside_longer_word() {
        assert!(is_emergency("emergencyroom"));
        assert!(is_emergency("keystrokes are hard to type"));
        assert!(is_emergency("nosebleeding"));
    }

    #[test]
    fn test_benign_messages() {
        assert!(!is_emergency("hello"));
        assert!(!is_emergency("How much water should I drink a day?"));
        assert!(!is_emergency("I have a mild headache"));
        assert!(!is_emergency(""));
    }

    #[test]
    fn test_partial_phrase_does_not_match() {
        assert!(!is_emergency("my heart is fine"));
        assert!(!is_emergency("the pain is not severe"));
    }

    #[test]
    fn test_emergency_reply_text() {
        let reply = emergency_reply();
        assert!(reply.starts_with("IMPORTANT: Based on what you've described"));
        assert!(reply.contains(
            "attention. \n\nIf this is an emergency:\n1. Call emergency services"
        ));
        assert!(reply.ends_with("contact medical professionals right away."));
    }
}
