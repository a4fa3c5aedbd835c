//! The fixed pi.ai voice vocabulary.
//!
//! The upstream exposes exactly six synthesis voices, addressed by positional
//! identifier. Resolution is a pure lookup: exact match, case-sensitive, no
//! fuzzy matching. Adding a voice means extending this enum and its mapping.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// One of the six voices pi.ai can synthesize audio with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    William,
    Samantha,
    Peter,
    Amy,
    Alice,
    Harry,
}

impl Voice {
    /// Every supported voice, in upstream-identifier order.
    pub const ALL: [Voice; 6] = [
        Voice::William,
        Voice::Samantha,
        Voice::Peter,
        Voice::Amy,
        Voice::Alice,
        Voice::Harry,
    ];

    /// The positional identifier the upstream assigns this voice.
    pub fn upstream_id(self) -> u8 {
        match self {
            Voice::William => 1,
            Voice::Samantha => 2,
            Voice::Peter => 3,
            Voice::Amy => 4,
            Voice::Alice => 5,
            Voice::Harry => 6,
        }
    }

    /// The value sent in the synthesis call's `voice` query parameter.
    pub fn query_value(self) -> String {
        format!("voice{}", self.upstream_id())
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::William => "William",
            Voice::Samantha => "Samantha",
            Voice::Peter => "Peter",
            Voice::Amy => "Amy",
            Voice::Alice => "Alice",
            Voice::Harry => "Harry",
        }
    }

    fn allowed_names() -> String {
        Voice::ALL
            .iter()
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Voice {
    type Err = Error;

    /// Exact, case-sensitive match against the fixed set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Voice::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                Error::voice_not_found(format!(
                    "invalid voice {:?}; available voices: {}",
                    s,
                    Voice::allowed_names()
                ))
            })
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
