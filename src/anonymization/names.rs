//! Synthetic name generation
//!
//! Names are `adjective-noun` pairs drawn from fixed word lists, e.g.
//! `brave-otter`. The scrubber turns them into `brave.otter@<domain>` emails
//! and splits them into given and family names.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Separator between the two words of a generated name
pub const NAME_SEPARATOR: char = '-';

/// Source of synthetic `adjective-noun` names
pub trait NameGenerator: Send {
    /// Produce the next name
    fn next_name(&mut self) -> String;
}

const ADJECTIVES: &[&str] = &[
    "admiring", "agile", "amber", "ancient", "bold", "brave", "breezy", "bright", "calm",
    "clever", "cosmic", "crimson", "curious", "dapper", "daring", "eager", "elegant", "fancy",
    "fearless", "festive", "fluffy", "gentle", "gifted", "glowing", "golden", "happy", "hardy",
    "honest", "humble", "jolly", "keen", "kind", "lively", "lucky", "mellow", "merry", "mighty",
    "modest", "nimble", "noble", "patient", "plucky", "polite", "proud", "quick", "quiet",
    "rapid", "silent", "snowy", "steady", "sunny", "swift", "tender", "tidy", "trusty",
    "upbeat", "vivid", "witty", "zealous", "zesty",
];

const NOUNS: &[&str] = &[
    "albatross", "badger", "beaver", "bison", "bobcat", "buffalo", "camel", "caribou",
    "cheetah", "condor", "cougar", "coyote", "crane", "dolphin", "eagle", "falcon", "ferret",
    "finch", "fox", "gazelle", "gecko", "heron", "hornet", "ibis", "jackal", "jaguar", "koala",
    "lemur", "leopard", "lynx", "magpie", "marmot", "meerkat", "mole", "moose", "narwhal",
    "newt", "ocelot", "osprey", "otter", "owl", "panda", "panther", "pelican", "penguin",
    "puffin", "quail", "rabbit", "raven", "salmon", "seal", "sparrow", "swan", "tapir",
    "tiger", "toucan", "walrus", "weasel", "wombat", "yak",
];

/// Picks random words from the built-in adjective and noun lists
pub struct MonikerGenerator {
    rng: StdRng,
}

impl MonikerGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator producing a reproducible sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for MonikerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator for MonikerGenerator {
    fn next_name(&mut self) -> String {
        // Both lists are non-empty constants
        let adjective = ADJECTIVES.choose(&mut self.rng).copied().unwrap_or("quiet");
        let noun = NOUNS.choose(&mut self.rng).copied().unwrap_or("otter");
        format!("{adjective}{NAME_SEPARATOR}{noun}")
    }
}
