//! Static word catalog, grouped into four difficulty pools.
//!
//! All entries are lowercase ASCII; key matching and completion checks
//! rely on one byte per character.

/// Which catalog pool a difficulty tier draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Short everyday words (roughly 3-4 letters)
pub const EASY: &[&str] = &[
    "cat", "dog", "run", "jump", "red", "blue", "sky", "sun", "box", "toy", "key", "car", "bus",
    "map", "cup", "pen", "hat", "bag", "fox", "owl", "bat", "ant", "bee", "fly", "day", "night",
    "moon", "star", "tree", "bird", "fish", "sand", "wind", "fire", "ice", "gold", "ring", "book",
    "desk", "lamp", "clock", "bell", "door", "wall", "floor", "hand", "foot", "face", "head",
    "eye", "nose", "mouth", "ear", "coat", "dress", "shirt", "pants", "sock", "boot", "shoe",
    "duck", "frog", "tiger", "lion", "bear", "wolf", "zebra", "horse", "camel", "giraffe",
    "panda", "rabbit", "mouse", "turtle", "snake", "crab", "lobster", "shrimp", "octopus",
    "dolphin", "whale", "shark", "penguin", "kiwi", "emu", "ostrich", "peacock",
];

/// Medium words (roughly 5-6 letters)
pub const MEDIUM: &[&str] = &[
    "apple", "table", "water", "house", "chair", "cloud", "grass", "happy", "music", "light",
    "night", "dream", "beach", "mount", "space", "star", "river", "forest", "ocean", "desert",
    "valley", "canyon", "island", "snow", "bread", "pizza", "burger", "fries", "sushi", "salad",
    "soup", "cake", "coffee", "tea", "milk", "juice", "wine", "beer", "french", "chinese",
    "american", "japanese", "indian", "italian", "mexican", "spanish", "russian", "german",
    "portuguese", "dutch", "swedish", "norwegian", "finnish", "danish", "polish", "czech",
    "hungarian", "romanian", "bulgarian", "greek", "turkish", "arabic", "hebrew", "korean",
    "vietnamese", "thai",
];

/// Longer words (roughly 7-9 letters)
pub const HARD: &[&str] = &[
    "computer",
    "elephant",
    "mountain",
    "adventure",
    "chocolate",
    "telephone",
    "butterfly",
    "purple",
    "orange",
    "yellow",
    "green",
];

/// Long technical words
pub const EXPERT: &[&str] = &[
    "programming",
    "astronomy",
    "mathematics",
    "python",
    "javascript",
    "typescript",
    "react",
    "vue",
    "angular",
    "nodejs",
    "reactjs",
    "vuejs",
    "angulajs",
    "nodemon",
    "webpack",
    "vite",
    "babel",
];

/// Catalog pool for a difficulty label
pub fn pool(difficulty: WordDifficulty) -> &'static [&'static str] {
    match difficulty {
        WordDifficulty::Easy => EASY,
        WordDifficulty::Medium => MEDIUM,
        WordDifficulty::Hard => HARD,
        WordDifficulty::Expert => EXPERT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_nonempty() {
        for d in [
            WordDifficulty::Easy,
            WordDifficulty::Medium,
            WordDifficulty::Hard,
            WordDifficulty::Expert,
        ] {
            assert!(!pool(d).is_empty(), "{d:?} pool is empty");
        }
    }

    #[test]
    fn test_pools_lowercase_ascii() {
        for words in [EASY, MEDIUM, HARD, EXPERT] {
            for w in words {
                assert!(!w.is_empty());
                assert!(
                    w.bytes().all(|b| b.is_ascii_lowercase()),
                    "{w:?} is not lowercase ascii"
                );
            }
        }
    }
}
