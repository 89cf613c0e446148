//! Difficulty-ordered word list
//!
//! Words are sorted roughly from easiest to hardest. Selection starts at an
//! index equal to the level, so each level drops the easiest remaining word
//! from the pool.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::error::ResourceError;

/// Built-in list, shortest and most common words first
pub const DEFAULT_WORDS: &[&str] = &[
    "go", "up", "sky", "sun", "ion", "orb", "ray", "jet", "fly", "arc", "dust", "moon", "star",
    "void", "beam", "mars", "nova", "dark", "glow", "core", "ring", "atom", "rock", "fuel",
    "orbit", "comet", "laser", "solar", "lunar", "probe", "radar", "pulse", "space", "alien",
    "blast", "flare", "ozone", "quark", "venus", "earth", "pluto", "titan", "gamma", "rocket",
    "meteor", "planet", "photon", "cosmic", "galaxy", "plasma", "saturn", "uranus", "vacuum",
    "zenith", "shield", "thrust", "debris", "module", "impact", "nebula", "quasar", "crater",
    "fusion", "jupiter", "mercury", "neptune", "gravity", "eclipse", "stellar", "horizon",
    "capsule", "voyager", "cluster", "density", "fission", "kinetic", "asteroid", "lightyear",
    "satellite", "spaceship", "telescope", "astronaut", "cosmonaut", "magnetism", "supernova",
    "hyperspace", "ionosphere", "trajectory", "propulsion", "atmosphere", "observatory",
    "equilibrium", "interstellar", "constellation", "thermodynamics", "electromagnetic",
    "extraterrestrial", "circumnavigation", "magnetohydrodynamics",
];

/// Owned, validated word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WordList {
    words: Vec<String>,
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for WordList {
    type Error = ResourceError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<WordList> for Vec<String> {
    fn from(list: WordList) -> Self {
        list.words
    }
}

impl WordList {
    /// Build a list from host-supplied words.
    ///
    /// Every word must be non-empty lowercase ASCII, since that is all the
    /// player can type.
    pub fn new<I, S>(words: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(ResourceError::WordList("list is empty".to_string()));
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || !w.bytes().all(|b| b.is_ascii_lowercase()))
        {
            return Err(ResourceError::WordList(format!(
                "{bad:?} is not a lowercase ascii word"
            )));
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Index range `[start, end)` eligible on `level`
    pub fn tier_range(&self, level: u32, max_level: usize) -> (usize, usize) {
        let level = (level as usize).min(max_level);
        let end = self.words.len().saturating_sub(1);
        (level, end)
    }

    /// Pick a word for `level`: uniform over `[level, len - 1)` with the level
    /// capped at `max_level`. Falls back to the capped level index (bounded by
    /// the list) when that range is empty.
    pub fn pick(&self, level: u32, max_level: usize, rng: &mut dyn RandomSource) -> &str {
        let (start, end) = self.tier_range(level, max_level);
        let index = if start < end {
            rng.range_usize(start, end)
        } else {
            start.min(self.words.len() - 1)
        };
        &self.words[index]
    }
}
