use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::TestType;

/// Canonical key of one scored dimension, trait or type within an instrument.
///
/// `all()` is the fixed key set every successful result must carry and
/// `code()` is the string consumers see in the score maps. `parse` is the only
/// place external spellings are accepted.
pub trait InstrumentKey: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    const TEST_TYPE: TestType;

    fn all() -> &'static [Self];

    fn code(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self>;
}

/// Bipolar MBTI (OEJTS) dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MbtiDimension {
    EI,
    SN,
    TF,
    JP,
}

impl MbtiDimension {
    pub const ALL: [Self; 4] = [Self::EI, Self::SN, Self::TF, Self::JP];

    /// Letter chosen when the net score is below zero.
    pub const fn negative_pole(self) -> char {
        match self {
            Self::EI => 'I',
            Self::SN => 'S',
            Self::TF => 'T',
            Self::JP => 'J',
        }
    }

    /// Letter chosen when the net score is above zero.
    pub const fn positive_pole(self) -> char {
        match self {
            Self::EI => 'E',
            Self::SN => 'N',
            Self::TF => 'F',
            Self::JP => 'P',
        }
    }
}

impl InstrumentKey for MbtiDimension {
    const TEST_TYPE: TestType = TestType::Oejts;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            Self::EI => "EI",
            Self::SN => "SN",
            Self::TF => "TF",
            Self::JP => "JP",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "EI" | "IE" => Some(Self::EI),
            "SN" | "NS" => Some(Self::SN),
            "TF" | "FT" => Some(Self::TF),
            "JP" | "PJ" => Some(Self::JP),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BigFiveTrait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl BigFiveTrait {
    pub const ALL: [Self; 5] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
    ];
}

impl InstrumentKey for BigFiveTrait {
    const TEST_TYPE: TestType = TestType::BigFive;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openness" | "o" => Some(Self::Openness),
            "conscientiousness" | "c" => Some(Self::Conscientiousness),
            "extraversion" | "e" => Some(Self::Extraversion),
            "agreeableness" | "a" => Some(Self::Agreeableness),
            "neuroticism" | "n" => Some(Self::Neuroticism),
            _ => None,
        }
    }
}

/// Holland occupational theme. Variants are declared in hexagon order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiasecType {
    R,
    I,
    A,
    S,
    E,
    C,
}

impl RiasecType {
    pub const ALL: [Self; 6] = [Self::R, Self::I, Self::A, Self::S, Self::E, Self::C];

    pub const fn letter(self) -> char {
        match self {
            Self::R => 'R',
            Self::I => 'I',
            Self::A => 'A',
            Self::S => 'S',
            Self::E => 'E',
            Self::C => 'C',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::R => "Realistic",
            Self::I => "Investigative",
            Self::A => "Artistic",
            Self::S => "Social",
            Self::E => "Enterprising",
            Self::C => "Conventional",
        }
    }

    /// Position on the hexagon, `R = 0` through `C = 5`.
    pub(crate) const fn hexagon_index(self) -> u8 {
        match self {
            Self::R => 0,
            Self::I => 1,
            Self::A => 2,
            Self::S => 3,
            Self::E => 4,
            Self::C => 5,
        }
    }
}

impl InstrumentKey for RiasecType {
    const TEST_TYPE: TestType = TestType::Riasec;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::I => "I",
            Self::A => "A",
            Self::S => "S",
            Self::E => "E",
            Self::C => "C",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "r" | "realistic" => Some(Self::R),
            "i" | "investigative" => Some(Self::I),
            "a" | "artistic" => Some(Self::A),
            "s" | "social" => Some(Self::S),
            "e" | "enterprising" => Some(Self::E),
            "c" | "conventional" => Some(Self::C),
            _ => None,
        }
    }
}

/// Canonical Enneagram type, always within `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EnneagramType(u8);

const ENNEAGRAM_CODES: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];

const ENNEAGRAM_ALL: [EnneagramType; 9] = [
    EnneagramType(1),
    EnneagramType(2),
    EnneagramType(3),
    EnneagramType(4),
    EnneagramType(5),
    EnneagramType(6),
    EnneagramType(7),
    EnneagramType(8),
    EnneagramType(9),
];

impl EnneagramType {
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= 9 {
            Some(Self(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Decodes the numeric encoding `"1"` through `"9"`.
    pub fn from_numeric(raw: &str) -> Option<Self> {
        match raw.trim().parse::<u8>() {
            Ok(number) => Self::new(number),
            Err(_) => None,
        }
    }

    /// Decodes the letter encoding `"A"` (type 1) through `"I"` (type 9).
    pub fn from_letter(raw: &str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => {
                let offset = letter.to_ascii_uppercase() as u8;
                if (b'A'..=b'I').contains(&offset) {
                    Self::new(offset - b'A' + 1)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Letter encoding of this type.
    pub const fn letter(self) -> char {
        (b'A' + self.0 - 1) as char
    }

    /// Lower and upper neighbors on the 1-9 circle.
    pub const fn neighbors(self) -> (Self, Self) {
        let lower = if self.0 == 1 { 9 } else { self.0 - 1 };
        let upper = if self.0 == 9 { 1 } else { self.0 + 1 };
        (Self(lower), Self(upper))
    }
}

impl InstrumentKey for EnneagramType {
    const TEST_TYPE: TestType = TestType::Enneagram;

    fn all() -> &'static [Self] {
        &ENNEAGRAM_ALL
    }

    fn code(self) -> &'static str {
        ENNEAGRAM_CODES[(self.0 - 1) as usize]
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::from_numeric(raw).or_else(|| Self::from_letter(raw))
    }
}

impl TryFrom<u8> for EnneagramType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("enneagram type {value} outside 1-9"))
    }
}

impl From<EnneagramType> for u8 {
    fn from(value: EnneagramType) -> Self {
        value.0
    }
}

impl fmt::Display for EnneagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
