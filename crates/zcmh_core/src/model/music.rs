//! Static relaxation-audio catalog.
//!
//! # Invariants
//! - The catalog is defined at build time and never mutated.
//! - Track ids are unique and stable.
//! - Category labels and frequency bands are display-only.

use serde::{Deserialize, Serialize};

/// Track grouping used by the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicCategory {
    Relax,
    Sleep,
    Focus,
}

impl MusicCategory {
    pub const ALL: [MusicCategory; 3] = [Self::Relax, Self::Sleep, Self::Focus];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Relax => "Relax/Anxiety",
            Self::Sleep => "Sleep",
            Self::Focus => "Focus",
        }
    }

    pub fn frequency_band(self) -> &'static str {
        match self {
            Self::Relax => "3-7 Hz Theta",
            Self::Sleep => "2-3 Hz Delta",
            Self::Focus => "40 Hz Gamma",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relax => "relax",
            Self::Sleep => "sleep",
            Self::Focus => "focus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relax" => Some(Self::Relax),
            "sleep" => Some(Self::Sleep),
            "focus" => Some(Self::Focus),
            _ => None,
        }
    }
}

/// Opaque reference to a bundled audio asset, resolved by the host decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AudioResource(pub &'static str);

impl AudioResource {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicTrack {
    pub id: u32,
    pub category: MusicCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub resource: AudioResource,
}

const CATALOG: &[MusicTrack] = &[
    MusicTrack {
        id: 1,
        category: MusicCategory::Relax,
        title: "Deep Relaxation",
        description: "3 Hz Delta - Relaksasi mendalam",
        resource: AudioResource("relax_music_1"),
    },
    MusicTrack {
        id: 2,
        category: MusicCategory::Relax,
        title: "Anxiety Relief",
        description: "6 Hz Theta - Mengurangi kecemasan",
        resource: AudioResource("relax_music_2"),
    },
    MusicTrack {
        id: 3,
        category: MusicCategory::Relax,
        title: "Calm Mind",
        description: "7 Hz Theta - Menenangkan pikiran",
        resource: AudioResource("relax_music_3"),
    },
    MusicTrack {
        id: 4,
        category: MusicCategory::Sleep,
        title: "Night Sleep",
        description: "2 Hz Delta - Tidur nyenyak",
        resource: AudioResource("sleep_music_1"),
    },
    MusicTrack {
        id: 5,
        category: MusicCategory::Sleep,
        title: "Deep Sleep",
        description: "2.5 Hz Delta - Tidur dalam",
        resource: AudioResource("sleep_music_2"),
    },
    MusicTrack {
        id: 6,
        category: MusicCategory::Sleep,
        title: "Bedtime Relaxation",
        description: "3 Hz Delta - Relaksasi sebelum tidur",
        resource: AudioResource("sleep_music_3"),
    },
    MusicTrack {
        id: 7,
        category: MusicCategory::Focus,
        title: "Work Focus",
        description: "40 Hz Gamma - Fokus kerja",
        resource: AudioResource("focus_music_1"),
    },
    MusicTrack {
        id: 8,
        category: MusicCategory::Focus,
        title: "Study Boost",
        description: "40 Hz Gamma - Konsentrasi belajar",
        resource: AudioResource("focus_music_2"),
    },
];

/// Returns the full built-in catalog in display order.
pub fn builtin_catalog() -> Vec<MusicTrack> {
    CATALOG.to_vec()
}

/// Returns tracks matching `category`, or every track for `None`.
pub fn filter_tracks(tracks: &[MusicTrack], category: Option<MusicCategory>) -> Vec<MusicTrack> {
    match category {
        Some(category) => tracks
            .iter()
            .filter(|track| track.category == category)
            .cloned()
            .collect(),
        None => tracks.to_vec(),
    }
}
