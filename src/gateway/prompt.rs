//! System prompt assembly: time-of-day greeting, fixed guidelines, and a
//! short summary of the user's recent transcript.

use nursebot_core::transcript::TranscriptEntry;

/// How many recent entries the summary covers.
pub(super) const SUMMARY_WINDOW: usize = 5;

/// Characters of each entry kept in the summary.
const SUMMARY_PREVIEW_CHARS: usize = 50;

pub(super) const NEW_CONVERSATION: &str = "This is a new conversation.";

const GREETING_MORNING: &str =
    "Good morning! I'm here to assist you with any health-related questions.";
const GREETING_AFTERNOON: &str = "Good afternoon! I'm here to help you with your health concerns.";
const GREETING_EVENING: &str =
    "Good evening! I'm here to assist you with any health-related questions.";

/// Greeting for a local wall-clock hour (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => GREETING_MORNING,
        12..=16 => GREETING_AFTERNOON,
        _ => GREETING_EVENING,
    }
}

/// First `max_chars` characters of `s`, on a char boundary.
fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// One line per entry, oldest first. Callers pass the window they want summarized.
pub fn conversation_summary(entries: &[TranscriptEntry]) -> String {
    if entries.is_empty() {
        return NEW_CONVERSATION.to_string();
    }
    let mut summary = String::from("Recent conversation context:\n");
    for entry in entries {
        summary.push_str(&format!(
            "- {}: {}...\n",
            entry.role,
            preview(&entry.content, SUMMARY_PREVIEW_CHARS)
        ));
    }
    summary
}

/// Fill the nurse-assistant template.
pub fn render_system_prompt(greeting: &str, summary: &str) -> String {
    format!(
        "You are an AI nurse assistant. {greeting}\n\
         \n\
         Role and Approach:\n\
         - Speak in a warm, professional, and empathetic tone\n\
         - Use clear, simple language avoiding medical jargon\n\
         - Show genuine concern for the user's well-being\n\
         - Be patient and thorough in your responses\n\
         \n\
         Medical Guidelines:\n\
         - Cannot diagnose conditions or prescribe medications\n\
         - Must recommend professional medical consultation for serious concerns\n\
         - Can provide general health information and wellness advice\n\
         - Should focus on preventive care and healthy lifestyle choices\n\
         \n\
         Conversation History Context:\n\
         {summary}\n\
         \n\
         Important:\n\
         - Always maintain professional boundaries\n\
         - Prioritize patient safety above all\n\
         - Include relevant medical disclaimers\n\
         - Direct to emergency services if situation requires immediate medical attention"
    )
}
