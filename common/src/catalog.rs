//! Item category catalog
//!
//! Static registry of every item category the rule engine knows. Each entry
//! carries its display texts, the keywords used to steer AI classification,
//! and its guided questions. The rule logic itself lives in `rules`.

use crate::error::{Error, Result};
use crate::rules;
use crate::types::{Answers, Language, Localized, Verdict};
use std::fmt;
use std::str::FromStr;

/// Category identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryId {
    BatterySpare,
    BatteryInstalled,
    LiquidsGeneral,
    Knife,
    Scissors,
    Tools,
    Lighter,
    Matches,
    ECigarette,
    Electronics,
    SmartLuggageRemovable,
    SmartLuggageFixed,
    LuggageTracker,
    BluntObjects,
    SportsEquipment,
    Fireworks,
    FuelPaste,
    ToxicCorrosive,
    GasCartridges,
    Paints,
}

impl CategoryId {
    pub const ALL: [CategoryId; 20] = [
        CategoryId::BatterySpare,
        CategoryId::BatteryInstalled,
        CategoryId::LiquidsGeneral,
        CategoryId::Knife,
        CategoryId::Scissors,
        CategoryId::Tools,
        CategoryId::Lighter,
        CategoryId::Matches,
        CategoryId::ECigarette,
        CategoryId::Electronics,
        CategoryId::SmartLuggageRemovable,
        CategoryId::SmartLuggageFixed,
        CategoryId::LuggageTracker,
        CategoryId::BluntObjects,
        CategoryId::SportsEquipment,
        CategoryId::Fireworks,
        CategoryId::FuelPaste,
        CategoryId::ToxicCorrosive,
        CategoryId::GasCartridges,
        CategoryId::Paints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::BatterySpare => "battery_spare",
            CategoryId::BatteryInstalled => "battery_installed",
            CategoryId::LiquidsGeneral => "liquids_general",
            CategoryId::Knife => "knife",
            CategoryId::Scissors => "scissors",
            CategoryId::Tools => "tools",
            CategoryId::Lighter => "lighter",
            CategoryId::Matches => "matches",
            CategoryId::ECigarette => "e_cigarette",
            CategoryId::Electronics => "electronics",
            CategoryId::SmartLuggageRemovable => "smart_luggage_removable",
            CategoryId::SmartLuggageFixed => "smart_luggage_fixed",
            CategoryId::LuggageTracker => "luggage_tracker",
            CategoryId::BluntObjects => "blunt_objects",
            CategoryId::SportsEquipment => "sports_equipment",
            CategoryId::Fireworks => "fireworks",
            CategoryId::FuelPaste => "fuel_paste",
            CategoryId::ToxicCorrosive => "toxic_corrosive",
            CategoryId::GasCartridges => "gas_cartridges",
            CategoryId::Paints => "paints",
        }
    }
}

impl FromStr for CategoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CategoryId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::CategoryNotFound(s.to_string()))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable answer
#[derive(Debug, Clone, Copy)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: Localized,
}

/// Guided question (single choice)
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub text: Localized,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Catalog entry
#[derive(Debug, Clone, Copy)]
pub struct ItemCategory {
    pub id: CategoryId,
    pub name: Localized,
    pub group: Localized,
    /// Hints for the image classifier
    pub keywords: &'static str,
    pub questions: &'static [Question],
}

impl ItemCategory {
    /// No questions: selecting the category yields a verdict immediately.
    pub fn is_direct(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn evaluate(&self, answers: &Answers, lang: Language) -> Verdict {
        rules::evaluate(self.id, answers, lang)
    }
}

const fn opt(value: &'static str, de: &'static str, en: &'static str) -> QuestionOption {
    QuestionOption {
        value,
        label: Localized::new(de, en),
    }
}

const GROUP_BATTERIES: Localized = Localized::new("Batterien & Powerbanks", "Batteries & Power Banks");
const GROUP_LIQUIDS: Localized = Localized::new("Flüssigkeiten", "Liquids");
const GROUP_SHARP: Localized = Localized::new("Scharfe Gegenstände", "Sharp Objects");
const GROUP_FIRE: Localized = Localized::new("Feuer & Brennbar", "Fire & Flammable");
const GROUP_ELECTRONICS: Localized = Localized::new("Elektronik", "Electronics");
const GROUP_SPORTS: Localized = Localized::new("Sport & Stumpfe Gegenstände", "Sports & Blunt Objects");
const GROUP_PROHIBITED: Localized = Localized::new("Verboten", "Prohibited");

const BLADE_SIZE_OPTIONS_KNIFE: &[QuestionOption] = &[
    opt("short", "Ja, kürzer als 6 cm", "Yes, shorter than 6 cm"),
    opt("long", "Nein, 6 cm oder länger", "No, 6 cm or longer"),
];

const BLADE_SIZE_OPTIONS_SCISSORS: &[QuestionOption] = &[
    opt("short", "Ja, kürzer als 6 cm (z.B. Nagelschere)", "Yes, shorter than 6 cm (e.g. nail scissors)"),
    opt("long", "Nein, 6 cm oder länger", "No, 6 cm or longer"),
];

const BLADE_SIZE_TEXT: Localized = Localized::new(
    "Ist die Klinge kürzer als 6 cm?",
    "Is the blade shorter than 6 cm?",
);

/// All categories, in display order
pub static CATEGORIES: &[ItemCategory] = &[
    ItemCategory {
        id: CategoryId::BatterySpare,
        name: Localized::new("Ersatzbatterie / Powerbank", "Spare Battery / Power Bank"),
        group: GROUP_BATTERIES,
        keywords: "power bank, portable charger, spare battery, external battery, battery pack",
        questions: &[Question {
            id: "size",
            text: Localized::new(
                "Welche Art Powerbank / Ersatzbatterie haben Sie?",
                "What kind of power bank / spare battery do you have?",
            ),
            options: &[
                opt("small", "Standard (z.B. Handy-Ladegerät, kleine Powerbank)", "Standard (e.g. phone charger, small power bank)"),
                opt("large", "Gross (z.B. Laptop-Powerbank, grosse Kapazität)", "Large (e.g. laptop power bank, high capacity)"),
                opt("xlarge", "Sehr gross / Industriell", "Very large / Industrial"),
            ],
        }],
    },
    ItemCategory {
        id: CategoryId::BatteryInstalled,
        name: Localized::new("Batterie im Gerät verbaut", "Battery Installed in Device"),
        group: GROUP_BATTERIES,
        keywords: "laptop battery, phone battery, tablet battery, device with built-in battery",
        questions: &[Question {
            id: "device_type",
            text: Localized::new("Was für ein Gerät ist es?", "What kind of device is it?"),
            options: &[
                opt("small", "Handy, Tablet, Kamera oder ähnlich", "Phone, tablet, camera or similar"),
                opt("medium", "Laptop oder grösseres Gerät", "Laptop or larger device"),
                opt("large", "Sehr grosses Gerät (E-Bike-Akku, etc.)", "Very large device (e-bike battery, etc.)"),
            ],
        }],
    },
    ItemCategory {
        id: CategoryId::LiquidsGeneral,
        name: Localized::new("Flüssigkeiten, Gels & Aerosole", "Liquids, Gels & Aerosols"),
        group: GROUP_LIQUIDS,
        keywords: "water, perfume, shampoo, lotion, gel, spray, deodorant, toothpaste, cream, drink, juice, oil",
        questions: &[
            Question {
                id: "container_size",
                text: Localized::new(
                    "Ist der Behälter Reisegrösse (100 ml oder kleiner)?",
                    "Is the container travel-sized (100 ml or smaller)?",
                ),
                options: &[
                    opt("small", "Ja, 100 ml oder kleiner", "Yes, 100 ml or smaller"),
                    opt("large", "Nein, grösser als 100 ml", "No, larger than 100 ml"),
                ],
            },
            Question {
                id: "liquid_type",
                text: Localized::new(
                    "Um was für eine Flüssigkeit handelt es sich?",
                    "What type of liquid is it?",
                ),
                options: &[
                    opt("regular", "Normale Flüssigkeit (Parfüm, Shampoo, etc.)", "Regular liquid (perfume, shampoo, etc.)"),
                    opt("medication", "Medikament", "Medication"),
                    opt("baby_food", "Babynahrung / Spezialdiät", "Baby food / Special diet"),
                    opt("duty_free", "Duty-Free-Kauf", "Duty-free purchase"),
                ],
            },
        ],
    },
    ItemCategory {
        id: CategoryId::Knife,
        name: Localized::new("Messer", "Knife"),
        group: GROUP_SHARP,
        keywords: "knife, pocket knife, swiss army knife, utility knife, kitchen knife, hunting knife",
        questions: &[Question {
            id: "blade_size",
            text: BLADE_SIZE_TEXT,
            options: BLADE_SIZE_OPTIONS_KNIFE,
        }],
    },
    ItemCategory {
        id: CategoryId::Scissors,
        name: Localized::new("Schere", "Scissors"),
        group: GROUP_SHARP,
        keywords: "scissors, shears, craft scissors, nail scissors",
        questions: &[Question {
            id: "blade_size",
            text: BLADE_SIZE_TEXT,
            options: BLADE_SIZE_OPTIONS_SCISSORS,
        }],
    },
    ItemCategory {
        id: CategoryId::Tools,
        name: Localized::new("Werkzeuge (Schraubenzieher, etc.)", "Tools (screwdrivers, etc.)"),
        group: GROUP_SHARP,
        keywords: "screwdriver, wrench, pliers, hammer tool, multi-tool, spanner",
        questions: &[Question {
            id: "tool_size",
            text: Localized::new("Ist das Werkzeug kürzer als 6 cm?", "Is the tool shorter than 6 cm?"),
            options: BLADE_SIZE_OPTIONS_KNIFE,
        }],
    },
    ItemCategory {
        id: CategoryId::Lighter,
        name: Localized::new("Feuerzeug", "Lighter"),
        group: GROUP_FIRE,
        keywords: "lighter, zippo, gas lighter, cigarette lighter, torch lighter",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::Matches,
        name: Localized::new("Streichhölzer", "Matches"),
        group: GROUP_FIRE,
        keywords: "matches, matchbox, matchstick",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::ECigarette,
        name: Localized::new("E-Zigarette / Vape", "E-Cigarette / Vape"),
        group: GROUP_ELECTRONICS,
        keywords: "e-cigarette, vape, vaping device, e-pipe, juul, vape pen",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::Electronics,
        name: Localized::new("Laptop / Tablet / Handy / Kamera", "Laptop / Tablet / Phone / Camera"),
        group: GROUP_ELECTRONICS,
        keywords: "laptop, tablet, phone, camera, smartphone, macbook, ipad, DSLR, gopro, kindle",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::SmartLuggageRemovable,
        name: Localized::new("Smart Luggage (Akku herausnehmbar)", "Smart Luggage (removable battery)"),
        group: GROUP_ELECTRONICS,
        keywords: "smart suitcase, smart luggage with removable battery",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::SmartLuggageFixed,
        name: Localized::new("Smart Luggage (Akku fest verbaut)", "Smart Luggage (built-in battery)"),
        group: GROUP_ELECTRONICS,
        keywords: "smart suitcase with permanent battery",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::LuggageTracker,
        name: Localized::new("Gepäcktracker (AirTag, etc.)", "Luggage Tracker (AirTag, etc.)"),
        group: GROUP_ELECTRONICS,
        keywords: "airtag, tile tracker, luggage tracker, gps tracker",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::BluntObjects,
        name: Localized::new("Stumpfe Gegenstände (Schläger, Hämmer)", "Blunt Objects (bats, hammers)"),
        group: GROUP_SPORTS,
        keywords: "baseball bat, golf club, hammer, cricket bat, hockey stick",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::SportsEquipment,
        name: Localized::new("Sportausrüstung (Schläger, Stöcke)", "Sports Equipment (rackets, poles)"),
        group: GROUP_SPORTS,
        keywords: "tennis racket, badminton racket, ski poles, hiking poles",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::Fireworks,
        name: Localized::new("Feuerwerk / Wunderkerzen", "Fireworks / Sparklers"),
        group: GROUP_PROHIBITED,
        keywords: "fireworks, sparklers, firecrackers, pyrotechnics",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::FuelPaste,
        name: Localized::new("Brennpasten / Brennbare Flüssigkeiten", "Fuel Paste / Flammable Liquids"),
        group: GROUP_PROHIBITED,
        keywords: "fuel, gasoline, lighter fluid, flammable liquid",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::ToxicCorrosive,
        name: Localized::new("Säuren / Giftige / Ätzende Stoffe", "Acids / Toxic / Corrosive Substances"),
        group: GROUP_PROHIBITED,
        keywords: "acid, bleach, corrosive, toxic chemical, poison",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::GasCartridges,
        name: Localized::new("Gaskartuschen / Druckgas", "Gas Cartridges / Compressed Gas"),
        group: GROUP_PROHIBITED,
        keywords: "gas cartridge, compressed gas, propane, butane, pepper spray",
        questions: &[],
    },
    ItemCategory {
        id: CategoryId::Paints,
        name: Localized::new("Farben / Lösungsmittel", "Paints / Solvents"),
        group: GROUP_PROHIBITED,
        keywords: "paint, paint thinner, solvent, turpentine, acetone",
        questions: &[],
    },
];

/// All categories in display order
pub fn categories() -> &'static [ItemCategory] {
    CATEGORIES
}

/// Look up a category by its wire id
pub fn find(id: &str) -> Result<&'static ItemCategory> {
    let id: CategoryId = id.parse()?;
    Ok(category(id))
}

/// Catalog entry for a typed id
pub fn category(id: CategoryId) -> &'static ItemCategory {
    // CATEGORIES is listed in CategoryId::ALL order
    &CATEGORIES[id as usize]
}

/// Evaluate a category's rules
///
/// Fails only for an unknown id; missing answers fall back to each
/// category's defaults.
pub fn evaluate(id: &str, answers: &Answers, lang: Language) -> Result<Verdict> {
    let category = find(id)?;
    Ok(category.evaluate(answers, lang))
}

/// Distinct group names in first-appearance order
pub fn groups(lang: Language) -> Vec<&'static str> {
    let mut groups: Vec<&'static str> = Vec::new();
    for c in CATEGORIES {
        let name = c.group.get(lang);
        if !groups.contains(&name) {
            groups.push(name);
        }
    }
    groups
}

/// Categories belonging to a group
pub fn in_group(group: &str, lang: Language) -> Vec<&'static ItemCategory> {
    CATEGORIES
        .iter()
        .filter(|c| c.group.get(lang) == group)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_matches_ids() {
        assert_eq!(CATEGORIES.len(), CategoryId::ALL.len());
        for (entry, id) in CATEGORIES.iter().zip(CategoryId::ALL) {
            assert_eq!(entry.id, id);
            assert_eq!(category(id).id, id);
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<&str> = CATEGORIES.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), CATEGORIES.len());
    }

    #[test]
    fn test_question_ids_unique_within_category() {
        for c in CATEGORIES {
            let ids: HashSet<&str> = c.questions.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), c.questions.len(), "{}", c.id);
            for q in c.questions {
                assert!(!q.options.is_empty(), "{}.{}", c.id, q.id);
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("knife").unwrap().id, CategoryId::Knife);
        assert!(matches!(find("umbrella"), Err(Error::CategoryNotFound(id)) if id == "umbrella"));
        assert!(find("").is_err());
    }

    #[test]
    fn test_id_round_trip_through_str() {
        for id in CategoryId::ALL {
            assert_eq!(id.as_str().parse::<CategoryId>().unwrap(), id);
        }
    }

    #[test]
    fn test_direct_categories() {
        assert!(category(CategoryId::Lighter).is_direct());
        assert!(!category(CategoryId::LiquidsGeneral).is_direct());
        assert_eq!(category(CategoryId::LiquidsGeneral).questions.len(), 2);
    }

    #[test]
    fn test_groups_first_appearance_order() {
        let groups = groups(Language::En);
        assert_eq!(
            groups,
            vec![
                "Batteries & Power Banks",
                "Liquids",
                "Sharp Objects",
                "Fire & Flammable",
                "Electronics",
                "Sports & Blunt Objects",
                "Prohibited",
            ]
        );
        assert_eq!(in_group("Sharp Objects", Language::En).len(), 3);
        assert_eq!(in_group("Verboten", Language::De).len(), 5);
    }

    #[test]
    fn test_evaluate_unknown_category() {
        let result = evaluate("parachute", &Answers::new(), Language::En);
        assert!(matches!(result, Err(Error::CategoryNotFound(_))));
    }
}
