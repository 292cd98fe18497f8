// ═══════════════════════════════════════════════════════════════════════
// Card model — characters, estates, weapons, and the 14-card deck
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

// ── Character cards ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterName {
    Lucilla,
    Bert,
    Malina,
    Percy,
}

impl CharacterName {
    pub const ALL: [CharacterName; 4] = [
        CharacterName::Lucilla,
        CharacterName::Bert,
        CharacterName::Malina,
        CharacterName::Percy,
    ];

    /// Glyph shown on the board: the character's first letter, upper case.
    pub fn initial(self) -> char {
        match self {
            CharacterName::Lucilla => 'L',
            CharacterName::Bert => 'B',
            CharacterName::Malina => 'M',
            CharacterName::Percy => 'P',
        }
    }

    pub fn from_initial(c: char) -> Option<CharacterName> {
        CharacterName::ALL.iter().copied().find(|n| n.initial() == c)
    }
}

impl std::fmt::Display for CharacterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterName::Lucilla => write!(f, "Lucilla"),
            CharacterName::Bert => write!(f, "Bert"),
            CharacterName::Malina => write!(f, "Malina"),
            CharacterName::Percy => write!(f, "Percy"),
        }
    }
}

impl std::str::FromStr for CharacterName {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        CharacterName::ALL
            .iter()
            .copied()
            .find(|n| n.to_string().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

// ── Estate cards ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstateName {
    HauntedHouse,
    ManicManor,
    VillaCelia,
    CalamityCastle,
    PerilPalace,
}

impl EstateName {
    pub const ALL: [EstateName; 5] = [
        EstateName::HauntedHouse,
        EstateName::ManicManor,
        EstateName::VillaCelia,
        EstateName::CalamityCastle,
        EstateName::PerilPalace,
    ];

    /// Single-letter code used in the board layout and for corner tiles.
    pub fn code(self) -> char {
        match self {
            EstateName::HauntedHouse => 'h',
            EstateName::ManicManor => 'm',
            EstateName::VillaCelia => 'v',
            EstateName::CalamityCastle => 'c',
            EstateName::PerilPalace => 'p',
        }
    }

    pub fn from_code(c: char) -> Option<EstateName> {
        EstateName::ALL.iter().copied().find(|n| n.code() == c)
    }
}

impl std::fmt::Display for EstateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstateName::HauntedHouse => write!(f, "Haunted House"),
            EstateName::ManicManor => write!(f, "Manic Manor"),
            EstateName::VillaCelia => write!(f, "Villa Celia"),
            EstateName::CalamityCastle => write!(f, "Calamity Castle"),
            EstateName::PerilPalace => write!(f, "Peril Palace"),
        }
    }
}

impl std::str::FromStr for EstateName {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        EstateName::ALL
            .iter()
            .copied()
            .find(|n| n.to_string().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

// ── Weapon cards ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponName {
    Broom,
    Scissors,
    Knife,
    Shovel,
    IPad,
}

impl WeaponName {
    pub const ALL: [WeaponName; 5] = [
        WeaponName::Broom,
        WeaponName::Scissors,
        WeaponName::Knife,
        WeaponName::Shovel,
        WeaponName::IPad,
    ];

    /// Weapons are shown on the board as their index digit, '0'–'4'.
    pub fn digit(self) -> char {
        match self {
            WeaponName::Broom => '0',
            WeaponName::Scissors => '1',
            WeaponName::Knife => '2',
            WeaponName::Shovel => '3',
            WeaponName::IPad => '4',
        }
    }
}

impl std::fmt::Display for WeaponName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeaponName::Broom => write!(f, "Broom"),
            WeaponName::Scissors => write!(f, "Scissors"),
            WeaponName::Knife => write!(f, "Knife"),
            WeaponName::Shovel => write!(f, "Shovel"),
            WeaponName::IPad => write!(f, "iPad"),
        }
    }
}

impl std::str::FromStr for WeaponName {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        WeaponName::ALL
            .iter()
            .copied()
            .find(|n| n.to_string().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

// ── Card (sum over the three kinds) ────────────────────────────────────

/// A playing card. Identity is the named variant: two cards are equal
/// iff they name the same character, estate, or weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Character(CharacterName),
    Estate(EstateName),
    Weapon(WeaponName),
}

impl Card {
    /// Glyph used when this card is shown inside an estate's display tiles.
    pub fn initial(self) -> char {
        match self {
            Card::Character(c) => c.initial(),
            Card::Estate(e) => e.code(),
            Card::Weapon(w) => w.digit(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Character(c) => c.fmt(f),
            Card::Estate(e) => e.fmt(f),
            Card::Weapon(w) => w.fmt(f),
        }
    }
}

impl std::str::FromStr for Card {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        if let Ok(c) = s.parse::<CharacterName>() {
            return Ok(Card::Character(c));
        }
        if let Ok(e) = s.parse::<EstateName>() {
            return Ok(Card::Estate(e));
        }
        if let Ok(w) = s.parse::<WeaponName>() {
            return Ok(Card::Weapon(w));
        }
        Err(())
    }
}

// ── Guess triple ───────────────────────────────────────────────────────

/// One card of each kind. Used for guesses, solve attempts, and the
/// secret solution itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub character: CharacterName,
    pub estate: EstateName,
    pub weapon: WeaponName,
}

impl Guess {
    pub fn cards(&self) -> [Card; 3] {
        [
            Card::Character(self.character),
            Card::Estate(self.estate),
            Card::Weapon(self.weapon),
        ]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards().contains(&card)
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.character, self.estate, self.weapon)
    }
}

// ── Deck ───────────────────────────────────────────────────────────────

/// The full 14-card deck: 4 characters, 5 estates, 5 weapons.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(14);
    deck.extend(CharacterName::ALL.iter().map(|&c| Card::Character(c)));
    deck.extend(EstateName::ALL.iter().map(|&e| Card::Estate(e)));
    deck.extend(WeaponName::ALL.iter().map(|&w| Card::Weapon(w)));
    deck
}
