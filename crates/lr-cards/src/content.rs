//! Default reflective content.
//!
//! Card assets carry only a theme, so every card gets the same reflective
//! scaffold with the theme woven into the meaning and the first question.

use crate::card::Reflection;

const FIXED_QUESTIONS: [&str; 2] = [
    "What would change if you embraced this energy more fully?",
    "What small action could honor this guidance today?",
];

const ACTIONS: [&str; 3] = [
    "Take three deep breaths and feel into this message",
    "Journal about how this theme relates to your current situation",
    "Set an intention to embody this energy today",
];

/// Build the default reflection for a theme.
pub fn default_reflection(theme: &str) -> Reflection {
    let mut questions = Vec::with_capacity(1 + FIXED_QUESTIONS.len());
    questions.push(format!("How does {theme} show up in your life right now?"));
    questions.extend(FIXED_QUESTIONS.iter().map(|q| q.to_string()));

    Reflection {
        meaning: format!(
            "Reflect on the energy of {theme}. What does this mean for you in this moment?"
        ),
        questions,
        actions: ACTIONS.iter().map(|a| a.to_string()).collect(),
    }
}
