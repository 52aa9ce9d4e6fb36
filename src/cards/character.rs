//! Character roster.
//!
//! Characters set a player's hit points. Their skills are flavour text only;
//! no rule reads them.

use serde::{Deserialize, Serialize};

/// A selectable character.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub skill: String,
    pub description: String,
    pub hit_points: u32,
}

const ROSTER: [(&str, &str, u32, &str); 10] = [
    ("Liu Bei", "Benevolence", 4, "May give hand cards to other characters"),
    ("Guan Yu", "Warrior Saint", 4, "Red hand cards may be used as Attack"),
    ("Zhang Fei", "Roar", 4, "May use any number of Attacks in the Play phase"),
    ("Zhao Yun", "Dragon Courage", 4, "Attack may be used as Dodge, and Dodge as Attack"),
    ("Ma Chao", "Horsemanship", 4, "Distance to other characters is reduced by one"),
    ("Huang Zhong", "Fierce Bow", 4, "May Attack characters within distance two"),
    ("Cao Cao", "Villainous Hero", 4, "After taking damage, may take the card that caused it"),
    ("Guo Jia", "Heaven's Envy", 3, "Draws two cards for every hit point lost"),
    ("Sima Yi", "Feedback", 3, "After taking damage, may take a hand card from the source"),
    ("Xiahou Dun", "Unyielding", 4, "After taking damage, may judge to strike back"),
];

impl Character {
    /// Create a character.
    pub fn new(
        name: impl Into<String>,
        skill: impl Into<String>,
        hit_points: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            skill: skill.into(),
            description: description.into(),
            hit_points,
        }
    }

    /// The full ten-character roster.
    ///
    /// ```
    /// use kingdoms_engine::cards::Character;
    ///
    /// let roster = Character::roster();
    /// assert_eq!(roster.len(), 10);
    /// assert_eq!(roster[0].name, "Liu Bei");
    /// ```
    #[must_use]
    pub fn roster() -> Vec<Character> {
        ROSTER
            .iter()
            .map(|&(name, skill, hp, description)| Character::new(name, skill, hp, description))
            .collect()
    }

    /// Look up a roster character by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Character> {
        ROSTER
            .iter()
            .find(|(n, ..)| *n == name)
            .map(|&(name, skill, hp, description)| Character::new(name, skill, hp, description))
    }
}
