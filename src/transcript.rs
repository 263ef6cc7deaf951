//! Transcript parsing into speaker-attributed dialogue turns.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

static SPEAKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?i-u:physician|doctor|patient)):\s*(.*)").expect("valid regex"));

/// Normalised speaker token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Physician,
    Doctor,
    Patient,
}

impl Speaker {
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "physician" => Some(Self::Physician),
            "doctor" => Some(Self::Doctor),
            "patient" => Some(Self::Patient),
            _ => None,
        }
    }

    pub fn is_patient(self) -> bool {
        self == Self::Patient
    }

    pub fn is_clinician(self) -> bool {
        matches!(self, Self::Physician | Self::Doctor)
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Physician => "physician",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        };
        f.write_str(name)
    }
}

/// One speaker-attributed line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Parse `<Speaker>: <utterance>` lines; anything else is skipped.
pub fn parse(text: &str) -> Vec<DialogueTurn> {
    let mut dialogue = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let turn = SPEAKER_PATTERN.captures(line).and_then(|caps| {
            let speaker = Speaker::from_token(caps.get(1)?.as_str())?;
            let content = caps.get(2).map_or("", |m| m.as_str());
            Some(DialogueTurn {
                speaker,
                text: content.trim().to_string(),
            })
        });
        match turn {
            Some(turn) => {
                trace!(speaker = %turn.speaker, chars = turn.text.len(), "matched turn");
                dialogue.push(turn);
            }
            None => skipped += 1,
        }
    }

    debug!(turns = dialogue.len(), skipped, "parsed transcript");
    dialogue
}

/// Texts of every turn, in order.
pub fn all_texts(dialogue: &[DialogueTurn]) -> Vec<String> {
    dialogue.iter().map(|d| d.text.clone()).collect()
}

/// Texts of patient turns, in order.
pub fn patient_texts(dialogue: &[DialogueTurn]) -> Vec<String> {
    dialogue
        .iter()
        .filter(|d| d.speaker.is_patient())
        .map(|d| d.text.clone())
        .collect()
}
