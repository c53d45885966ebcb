//! Random password generation

use rand::Rng;

/// Letter pool (both cases).
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Digit pool.
const NUMBERS: &str = "0123456789";

/// Symbol pool.
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}<>?/|";

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 16;

/// Character-class selection for the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub letters: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            letters: true,
            numbers: true,
            symbols: true,
        }
    }
}

/// Generate a random password by drawing uniformly from the pool of
/// enabled character classes. Returns an empty string when no class is
/// enabled.
pub fn generate(options: &GeneratorOptions) -> String {
    let mut pool = String::new();
    if options.letters {
        pool.push_str(LETTERS);
    }
    if options.numbers {
        pool.push_str(NUMBERS);
    }
    if options.symbols {
        pool.push_str(SYMBOLS);
    }

    if pool.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = pool.chars().collect();
    let mut rng = rand::thread_rng();
    (0..options.length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}
