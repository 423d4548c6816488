//! Game modes, symbol universes and bubble styling rules
//!
//! A mode decides which symbols can appear on a board and how a bubble
//! carrying a symbol is drawn. Matching is always done on the symbol, never
//! on the fill.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// A matchable bubble value ("A", "7", "Red", ...)
pub type Symbol = &'static str;

pub const LETTERS: [Symbol; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

pub const DIGITS: [Symbol; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

pub const COLOR_NAMES: [Symbol; 4] = ["Red", "Blue", "Green", "Yellow"];

/// A named fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
}

/// Bubble fill palette (high-contrast therapy colors)
pub const PALETTE: [Swatch; 4] = [
    Swatch { name: "Yellow", hex: "#FFD600" },
    Swatch { name: "Blue", hex: "#00A6FF" },
    Swatch { name: "Red", hex: "#FF1E1E" },
    Swatch { name: "Green", hex: "#00D26A" },
];

/// Look up a palette entry by its color name
pub fn swatch_named(name: &str) -> Option<Swatch> {
    PALETTE.iter().copied().find(|s| s.name == name)
}

/// Which symbol universe the board is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Letters,
    Digits,
    Colors,
}

/// How a bubble's fill relates to its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    /// Independent random palette entry, purely decorative
    Random,
    /// The palette entry named by the symbol
    Named,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Letters, Mode::Digits, Mode::Colors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Letters => "Letters",
            Mode::Digits => "Digits",
            Mode::Colors => "Colors",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "letters" | "alphabets" => Some(Mode::Letters),
            "digits" | "numbers" => Some(Mode::Digits),
            "colors" | "colours" => Some(Mode::Colors),
            _ => None,
        }
    }

    /// Every symbol this mode can place on a board
    pub fn universe(&self) -> &'static [Symbol] {
        match self {
            Mode::Letters => &LETTERS,
            Mode::Digits => &DIGITS,
            Mode::Colors => &COLOR_NAMES,
        }
    }

    pub fn fill_rule(&self) -> FillRule {
        match self {
            Mode::Colors => FillRule::Named,
            Mode::Letters | Mode::Digits => FillRule::Random,
        }
    }

    /// Text drawn on the bubble. Color bubbles carry no label.
    pub fn label(&self, symbol: Symbol) -> Option<Symbol> {
        match self {
            Mode::Colors => None,
            Mode::Letters | Mode::Digits => Some(symbol),
        }
    }

    /// Noun used when announcing a target ("letter", "number", "color")
    pub fn noun(&self) -> &'static str {
        match self {
            Mode::Letters => "letter",
            Mode::Digits => "number",
            Mode::Colors => "color",
        }
    }

    /// Mode the toggle button switches to
    pub fn next(&self) -> Mode {
        match self {
            Mode::Letters => Mode::Digits,
            Mode::Digits => Mode::Colors,
            Mode::Colors => Mode::Letters,
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.universe().iter().any(|s| *s == symbol)
    }

    /// Uniform draw from the universe
    pub fn random_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        // Universes are non-empty constants
        self.universe().choose(rng).copied().unwrap_or(LETTERS[0])
    }
}

impl FillRule {
    /// Pick the fill for a bubble carrying `symbol`
    pub fn fill_for<R: Rng + ?Sized>(&self, symbol: Symbol, rng: &mut R) -> Swatch {
        match self {
            FillRule::Named => swatch_named(symbol).unwrap_or(PALETTE[0]),
            FillRule::Random => PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_universe_sizes() {
        assert_eq!(Mode::Letters.universe().len(), 26);
        assert_eq!(Mode::Digits.universe().len(), 10);
        assert_eq!(Mode::Colors.universe(), &["Red", "Blue", "Green", "Yellow"]);
    }

    #[test]
    fn test_every_color_name_has_a_swatch() {
        for name in COLOR_NAMES {
            let swatch = swatch_named(name).expect("missing swatch");
            assert_eq!(swatch.name, name);
        }
    }

    #[test]
    fn test_colors_fill_follows_symbol() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let symbol = Mode::Colors.random_symbol(&mut rng);
            let fill = Mode::Colors.fill_rule().fill_for(symbol, &mut rng);
            assert_eq!(fill.name, symbol);
            assert_eq!(Mode::Colors.label(symbol), None);
        }
    }

    #[test]
    fn test_letters_label_is_symbol() {
        assert_eq!(Mode::Letters.label("Q"), Some("Q"));
        assert_eq!(Mode::Digits.label("4"), Some("4"));
    }

    #[test]
    fn test_mode_cycle_and_parse() {
        assert_eq!(Mode::Letters.next(), Mode::Digits);
        assert_eq!(Mode::Digits.next(), Mode::Colors);
        assert_eq!(Mode::Colors.next(), Mode::Letters);
        assert_eq!(Mode::from_str("Numbers"), Some(Mode::Digits));
        assert_eq!(Mode::from_str("alphabets"), Some(Mode::Letters));
        assert_eq!(Mode::from_str("shapes"), None);
        for mode in Mode::ALL {
            assert_eq!(Mode::from_str(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_random_symbol_stays_in_universe() {
        let mut rng = Pcg32::seed_from_u64(1);
        for mode in Mode::ALL {
            for _ in 0..100 {
                assert!(mode.contains(mode.random_symbol(&mut rng)));
            }
        }
    }
}
