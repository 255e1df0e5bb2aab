//! Mood catalog
//!
//! The fixed set of moods a user can record. Entries store the mood key and a
//! snapshot of its color; the catalog is only consulted again for display.

use serde::Serialize;

/// One selectable mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodOption {
    pub key: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
    /// Hex color, e.g. `#FCD34D`
    pub color: &'static str,
}

/// All moods, in display order. The first one is the form default.
pub const MOOD_OPTIONS: [MoodOption; 5] = [
    MoodOption {
        key: "happy",
        emoji: "😊",
        label: "Happy",
        color: "#FCD34D",
    },
    MoodOption {
        key: "sad",
        emoji: "😢",
        label: "Sad",
        color: "#93C5FD",
    },
    MoodOption {
        key: "excited",
        emoji: "🤩",
        label: "Excited",
        color: "#FB923C",
    },
    MoodOption {
        key: "calm",
        emoji: "😌",
        label: "Calm",
        color: "#86EFAC",
    },
    MoodOption {
        key: "angry",
        emoji: "😠",
        label: "Angry",
        color: "#FCA5A5",
    },
];

/// The option a fresh draft starts from
pub fn default_option() -> &'static MoodOption {
    &MOOD_OPTIONS[0]
}

/// Look up an option by key
pub fn find(key: &str) -> Option<&'static MoodOption> {
    MOOD_OPTIONS.iter().find(|option| option.key == key)
}
