//! URI minting for every resource this service describes.
//!
//! Generated resources (annotations, sequences) get a random pronounceable
//! slug such as `http://localhost:8008/vol1/annotation/fuzzy-brave-teal-otter`.
//! Canvases, manifests and the search service get deterministic URIs so the
//! search and manifest pipelines agree on them without sharing state.

use rand::{Rng, seq::IndexedRandom};

const ADJECTIVES: &[&str] = &[
    "able", "agile", "ancient", "angry", "bald", "bashful", "bold", "bouncy",
    "brave", "bright", "bumpy", "calm", "chubby", "clever", "clumsy", "cozy",
    "crafty", "curious", "dizzy", "eager", "fancy", "fierce", "fluffy", "fuzzy",
    "gentle", "giant", "gloomy", "grumpy", "happy", "hasty", "hungry", "jolly",
    "jumpy", "kind", "lazy", "little", "lively", "lucky", "mighty", "moody",
    "nervous", "nimble", "noisy", "odd", "plump", "polite", "proud", "quick",
    "quiet", "rusty", "scruffy", "shaggy", "shy", "silly", "sleepy", "sneaky",
    "spiky", "stout", "swift", "tiny", "wacky", "wild", "wise", "zesty",
];

const COLORS: &[&str] = &[
    "amber", "aqua", "azure", "beige", "black", "blue", "bronze", "brown",
    "coral", "crimson", "cyan", "gold", "gray", "green", "indigo", "ivory",
    "jade", "lemon", "lilac", "lime", "magenta", "maroon", "mint", "navy",
    "olive", "orange", "pink", "plum", "purple", "red", "teal", "violet",
];

const CREATURES: &[&str] = &[
    "badger", "banshee", "basilisk", "beetle", "bugbear", "centaur", "chimera", "cyclops",
    "dragon", "dryad", "dwarf", "elf", "ettin", "faun", "ghoul", "giant",
    "gnoll", "gnome", "goblin", "golem", "gorgon", "gremlin", "griffin", "harpy",
    "hobbit", "hydra", "imp", "jackal", "kobold", "kraken", "leprechaun", "lich",
    "manticore", "medusa", "minotaur", "mummy", "naga", "nymph", "ogre", "orc",
    "owlbear", "pixie", "phoenix", "satyr", "selkie", "siren", "sphinx", "sprite",
    "troll", "unicorn", "vampire", "wendigo", "werewolf", "wight", "wisp", "wizard",
    "wraith", "wyvern", "yeti", "zombie", "otter", "raven", "toad", "weasel",
];

/// Lowercase, hyphen-separated random token: two adjectives, a color, a creature.
pub fn random_slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    let parts = [
        pick(rng, ADJECTIVES),
        pick(rng, ADJECTIVES),
        pick(rng, COLORS),
        pick(rng, CREATURES),
    ];
    parts.join("-")
}

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or("plain")
}

#[derive(Debug, Clone)]
pub struct IdentifierGenerator {
    base_url: String,
}

impl IdentifierGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{volume_id}/{resource_type}/{slug}`
    pub fn generate(&self, volume_id: &str, resource_type: &str) -> String {
        self.generate_with(&mut rand::rng(), volume_id, resource_type)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, volume_id: &str, resource_type: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, volume_id, resource_type, random_slug(rng))
    }

    pub fn annotation_id(&self, volume_id: &str) -> String {
        self.generate(volume_id, "annotation")
    }

    pub fn canvas_uri(&self, volume_id: &str, page_id: &str) -> String {
        format!("{}/{}/canvas/{}", self.base_url, volume_id, page_id)
    }

    pub fn canvas_region_uri(&self, volume_id: &str, page_id: &str, x: i64, y: i64, w: i64, h: i64) -> String {
        format!("{}#xywh={},{},{},{}", self.canvas_uri(volume_id, page_id), x, y, w, h)
    }

    pub fn manifest_uri(&self, volume_id: &str) -> String {
        format!("{}/{}/manifest", self.base_url, volume_id)
    }

    pub fn search_service_uri(&self, volume_id: &str) -> String {
        format!("{}/{}/search", self.base_url, volume_id)
    }

    /// The query is interpolated as-is, not percent-encoded.
    pub fn search_response_uri(&self, volume_id: &str, query: &str) -> String {
        format!("{}?q={}", self.search_service_uri(volume_id), query)
    }
}
