//! Emoji codes, per-emotion intensity tables and the humor rank.
//!
//! Codes name emojione 3.1 assets (`{code}.png`, 128x128 RGBA).

use crate::error::{EmojifyError, Result};
use crate::likelihood::Likelihood;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmojiCode {
    SlightlySmiling,
    SlightlyFrowning,
    Worried,
    Disappointed,
    Crying,
    Neutral,
    Angry,
    Hushed,
    OpenMouth,
    Astonished,
    Fearful,
    Relieved,
    SmilingOpenMouth,
    Grinning,
    Laughing,
    CowboyHat,
    Sunglasses,
    Nerd,
}

impl EmojiCode {
    pub const ALL: [EmojiCode; 18] = [
        EmojiCode::SlightlySmiling,
        EmojiCode::SlightlyFrowning,
        EmojiCode::Worried,
        EmojiCode::Disappointed,
        EmojiCode::Crying,
        EmojiCode::Neutral,
        EmojiCode::Angry,
        EmojiCode::Hushed,
        EmojiCode::OpenMouth,
        EmojiCode::Astonished,
        EmojiCode::Fearful,
        EmojiCode::Relieved,
        EmojiCode::SmilingOpenMouth,
        EmojiCode::Grinning,
        EmojiCode::Laughing,
        EmojiCode::CowboyHat,
        EmojiCode::Sunglasses,
        EmojiCode::Nerd,
    ];

    /// Unicode codepoint string, also the asset file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            EmojiCode::SlightlySmiling => "1f642",
            EmojiCode::SlightlyFrowning => "1f641",
            EmojiCode::Worried => "1f61f",
            EmojiCode::Disappointed => "1f61e",
            EmojiCode::Crying => "1f622",
            EmojiCode::Neutral => "1f610",
            EmojiCode::Angry => "1f620",
            EmojiCode::Hushed => "1f62f",
            EmojiCode::OpenMouth => "1f62e",
            EmojiCode::Astonished => "1f632",
            EmojiCode::Fearful => "1f628",
            EmojiCode::Relieved => "1f60c",
            EmojiCode::SmilingOpenMouth => "1f603",
            EmojiCode::Grinning => "1f601",
            EmojiCode::Laughing => "1f606",
            EmojiCode::CowboyHat => "1f920",
            EmojiCode::Sunglasses => "1f60e",
            EmojiCode::Nerd => "1f913",
        }
    }
}

impl fmt::Display for EmojiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmojiCode {
    type Err = EmojifyError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        EmojiCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == needle)
            .ok_or_else(|| EmojifyError::UnknownEmojiCode(s.to_string()))
    }
}

/// Emotion categories that map a likelihood onto an emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sorrow,
    Anger,
    Surprise,
    Joy,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Sorrow,
        Category::Anger,
        Category::Surprise,
        Category::Joy,
    ];
}

/// Intensity table indexed by UNLIKELY, POSSIBLE, LIKELY, VERY_LIKELY.
pub type IntensityTable = [EmojiCode; 4];

#[derive(Debug, Clone)]
pub struct Catalog {
    pub sorrow: IntensityTable,
    pub anger: IntensityTable,
    pub surprise: IntensityTable,
    pub joy: IntensityTable,
    pub default_code: EmojiCode,
    pub headwear_code: EmojiCode,
    /// Lower index wins ties between candidates.
    pub humor_rank: &'static [EmojiCode],
    /// Label descriptions recognized by the slow label fallback.
    pub labels: &'static [(&'static str, EmojiCode)],
}

pub const DEFAULT_CODE: EmojiCode = EmojiCode::SlightlySmiling;
pub const HEADWEAR_CODE: EmojiCode = EmojiCode::CowboyHat;

// Rare emotions first, so sorrow beats joy and everything beats the default.
pub static HUMOR_RANK: [EmojiCode; 18] = [
    EmojiCode::Sunglasses,
    EmojiCode::Nerd,
    EmojiCode::Crying,
    EmojiCode::Disappointed,
    EmojiCode::Worried,
    EmojiCode::SlightlyFrowning,
    EmojiCode::Angry,
    EmojiCode::Neutral,
    EmojiCode::Fearful,
    EmojiCode::Astonished,
    EmojiCode::OpenMouth,
    EmojiCode::Hushed,
    EmojiCode::Laughing,
    EmojiCode::Grinning,
    EmojiCode::SmilingOpenMouth,
    EmojiCode::Relieved,
    EmojiCode::CowboyHat,
    EmojiCode::SlightlySmiling,
];

pub static LABEL_CODES: [(&str, EmojiCode); 2] = [
    ("sunglasses", EmojiCode::Sunglasses),
    ("glasses", EmojiCode::Nerd),
];

impl Default for Catalog {
    fn default() -> Self {
        Self {
            sorrow: [
                EmojiCode::SlightlyFrowning,
                EmojiCode::Worried,
                EmojiCode::Disappointed,
                EmojiCode::Crying,
            ],
            anger: [
                EmojiCode::Neutral,
                EmojiCode::Neutral,
                EmojiCode::Angry,
                EmojiCode::Angry,
            ],
            surprise: [
                EmojiCode::Hushed,
                EmojiCode::OpenMouth,
                EmojiCode::Astonished,
                EmojiCode::Fearful,
            ],
            joy: [
                EmojiCode::Relieved,
                EmojiCode::SmilingOpenMouth,
                EmojiCode::Grinning,
                EmojiCode::Laughing,
            ],
            default_code: DEFAULT_CODE,
            headwear_code: HEADWEAR_CODE,
            humor_rank: &HUMOR_RANK,
            labels: &LABEL_CODES,
        }
    }
}

impl Catalog {
    pub fn table(&self, category: Category) -> &IntensityTable {
        match category {
            Category::Sorrow => &self.sorrow,
            Category::Anger => &self.anger,
            Category::Surprise => &self.surprise,
            Category::Joy => &self.joy,
        }
    }

    /// Code for one category at the given likelihood; anything below
    /// UNLIKELY carries no signal and maps to the default code.
    pub fn code_for(&self, category: Category, likelihood: Likelihood) -> EmojiCode {
        let table = self.table(category);
        match likelihood {
            Likelihood::Unknown | Likelihood::VeryUnlikely => self.default_code,
            Likelihood::Unlikely => table[0],
            Likelihood::Possible => table[1],
            Likelihood::Likely => table[2],
            Likelihood::VeryLikely => table[3],
        }
    }

    pub fn rank(&self, code: EmojiCode) -> Result<usize> {
        self.humor_rank
            .iter()
            .position(|&c| c == code)
            .ok_or_else(|| EmojifyError::UnknownEmojiCode(code.to_string()))
    }

    /// Exact match on a label description, case-insensitive.
    pub fn label_code(&self, description: &str) -> Option<EmojiCode> {
        self.labels
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(description.trim()))
            .map(|&(_, code)| code)
    }

    /// Every code the selector can produce, deduplicated.
    pub fn selectable_codes(&self) -> Vec<EmojiCode> {
        let mut codes: Vec<EmojiCode> = Category::ALL
            .iter()
            .flat_map(|&c| self.table(c).iter().copied())
            .chain([self.default_code, self.headwear_code])
            .chain(self.labels.iter().map(|&(_, code)| code))
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }

    /// Startup self-check: every selectable code must have a humor rank.
    pub fn validate(&self) -> Result<()> {
        for code in self.selectable_codes() {
            self.rank(code)?;
        }
        Ok(())
    }
}
