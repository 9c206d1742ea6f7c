//! Rule evaluator
//!
//! One exhaustive match over `CategoryId`. Every arm reads only its own
//! answer keys and falls back to the category's default when a key is
//! absent, so zero or partial answers still produce a verdict. Within a
//! category the most restrictive tier is checked first.

use crate::catalog::CategoryId;
use crate::types::{Answers, BaggageVerdict, Language, Verdict, VerdictStatus};

use VerdictStatus::{Allowed, Conditional, NotAllowed};

/// Pick the text for the active language
fn t(lang: Language, de: &str, en: &str) -> String {
    match lang {
        Language::De => de.to_string(),
        Language::En => en.to_string(),
    }
}

fn answer<'a>(answers: &'a Answers, key: &str, default: &'a str) -> &'a str {
    answers.get(key).map(String::as_str).unwrap_or(default)
}

fn bv(status: VerdictStatus, text: String) -> BaggageVerdict {
    BaggageVerdict::new(status, text)
}

fn checked_allowed(lang: Language) -> BaggageVerdict {
    bv(Allowed, t(lang, "Im aufgegebenen Gepäck erlaubt.", "Allowed in checked baggage."))
}

fn pack_in_checked_tip(lang: Language) -> String {
    t(lang, "Im aufgegebenen Gepäck verpacken.", "Pack in checked baggage.")
}

fn prohibited_everywhere(lang: Language, hand_de: &str, hand_en: &str) -> Verdict {
    Verdict::new(
        bv(NotAllowed, t(lang, hand_de, hand_en)),
        bv(NotAllowed, t(lang, "In allen Gepäckarten verboten.", "Prohibited in all baggage.")),
    )
}

/// Evaluate the rules of one category
pub fn evaluate(id: CategoryId, answers: &Answers, lang: Language) -> Verdict {
    match id {
        CategoryId::BatterySpare => battery_spare(answers, lang),
        CategoryId::BatteryInstalled => battery_installed(answers, lang),
        CategoryId::LiquidsGeneral => liquids_general(answers, lang),
        CategoryId::Knife => sharp_object(
            answer(answers, "blade_size", "short"),
            lang,
            ("Messer mit Klingen ab 6 cm sind im Handgepäck verboten.", "Knives with blades 6 cm or longer are prohibited in hand baggage."),
            ("Messer mit Klingen unter 6 cm sind im Handgepäck erlaubt.", "Knives with blades under 6 cm are allowed in hand baggage."),
        ),
        CategoryId::Scissors => sharp_object(
            answer(answers, "blade_size", "short"),
            lang,
            ("Scheren mit Klingen ab 6 cm sind im Handgepäck verboten.", "Scissors with blades 6 cm or longer are prohibited in hand baggage."),
            ("Kleine Scheren (unter 6 cm) sind im Handgepäck erlaubt.", "Small scissors (under 6 cm) are allowed in hand baggage."),
        ),
        CategoryId::Tools => sharp_object(
            answer(answers, "tool_size", "short"),
            lang,
            ("Werkzeuge ab 6 cm Länge sind im Handgepäck nicht erlaubt.", "Tools 6 cm or longer are not allowed in hand baggage."),
            ("Kleine Werkzeuge (unter 6 cm) sind im Handgepäck erlaubt.", "Small tools (under 6 cm) are allowed in hand baggage."),
        ),
        CategoryId::Lighter => Verdict::new(
            bv(NotAllowed, t(lang, "Feuerzeuge sind im Handgepäck verboten.", "Lighters are prohibited in hand baggage."))
                .with_tip(t(
                    lang,
                    "Sie dürfen ein Feuerzeug am Körper tragen (z.B. in der Hosentasche).",
                    "You may carry one lighter on your person (e.g. in your pocket).",
                )),
            bv(
                NotAllowed,
                t(
                    lang,
                    "Feuerzeuge sind im aufgegebenen Gepäck verboten. Sie dürfen EIN Feuerzeug am Körper tragen.",
                    "Lighters are prohibited in checked baggage. You may carry ONE lighter on your person.",
                ),
            ),
        ),
        CategoryId::Matches => Verdict::new(
            bv(NotAllowed, t(lang, "Streichhölzer sind im Handgepäck verboten.", "Matches are prohibited in hand baggage."))
                .with_tip(t(
                    lang,
                    "Sie dürfen eine Schachtel Streichhölzer am Körper tragen.",
                    "You may carry one box of matches on your person.",
                )),
            bv(NotAllowed, t(lang, "Streichhölzer sind im aufgegebenen Gepäck verboten.", "Matches are prohibited in checked baggage.")),
        ),
        CategoryId::ECigarette => Verdict::new(
            bv(
                Allowed,
                t(lang, "E-Zigaretten und Vapes sind nur im Handgepäck erlaubt.", "E-cigarettes and vapes are only allowed in hand baggage."),
            ),
            bv(
                NotAllowed,
                t(lang, "Im aufgegebenen Gepäck wegen Brandgefahr nie erlaubt.", "Never allowed in checked baggage due to fire risk."),
            )
            .with_tip(t(lang, "Immer im Handgepäck mitführen.", "Always carry in hand baggage.")),
        ),
        CategoryId::Electronics => Verdict::new(
            bv(
                Allowed,
                t(
                    lang,
                    "Elektronische Geräte sind erlaubt. Bei der Sicherheitskontrolle separat in eine Schale legen.",
                    "Electronic devices are allowed. Place separately in a tray at security.",
                ),
            ),
            bv(
                Allowed,
                t(
                    lang,
                    "Im aufgegebenen Gepäck erlaubt. Gerät muss vollständig ausgeschaltet sein.",
                    "Allowed in checked baggage. Device must be completely switched off.",
                ),
            ),
        ),
        CategoryId::SmartLuggageRemovable => Verdict::new(
            bv(Allowed, t(lang, "Smart Luggage als Handgepäck erlaubt.", "Smart luggage allowed as hand baggage.")),
            bv(
                Conditional,
                t(
                    lang,
                    "Der Akku muss entfernt und im Handgepäck mitgeführt werden. Pole abkleben.",
                    "Battery must be removed and carried in hand baggage. Tape the terminals.",
                ),
            )
            .with_tip(t(lang, "Akku vor dem Einchecken entfernen.", "Remove battery before check-in.")),
        ),
        CategoryId::SmartLuggageFixed => {
            let text = t(
                lang,
                "Smart Luggage mit fest verbauter Batterie ist nicht erlaubt.",
                "Smart luggage with a built-in battery is not allowed.",
            );
            Verdict::new(
                bv(NotAllowed, text.clone()).with_tip(t(
                    lang,
                    "Verwenden Sie Gepäck mit herausnehmbarem Akku.",
                    "Use luggage with a removable battery.",
                )),
                bv(NotAllowed, text),
            )
        }
        CategoryId::LuggageTracker => Verdict::new(
            bv(Allowed, t(lang, "Gepäcktracker sind im Handgepäck erlaubt.", "Luggage trackers are allowed in hand baggage.")),
            bv(
                Allowed,
                t(lang, "Gepäcktracker sind im aufgegebenen Gepäck erlaubt.", "Luggage trackers are allowed in checked baggage."),
            ),
        ),
        CategoryId::BluntObjects => Verdict::new(
            bv(
                NotAllowed,
                t(
                    lang,
                    "Schläger, Hämmer und ähnliche stumpfe Gegenstände sind im Handgepäck verboten.",
                    "Bats, hammers and similar blunt objects are prohibited in hand baggage.",
                ),
            )
            .with_tip(pack_in_checked_tip(lang)),
            checked_allowed(lang),
        ),
        CategoryId::SportsEquipment => Verdict::new(
            bv(NotAllowed, t(lang, "Sportausrüstung ist im Handgepäck nicht erlaubt.", "Sports equipment is not allowed in hand baggage."))
                .with_tip(pack_in_checked_tip(lang)),
            bv(
                Allowed,
                t(
                    lang,
                    "Im aufgegebenen Gepäck erlaubt. Grössen-/Gewichtslimits der Fluggesellschaft beachten.",
                    "Allowed in checked baggage. Check airline size/weight limits.",
                ),
            ),
        ),
        CategoryId::Fireworks => {
            let text = t(lang, "Feuerwerk ist in allen Gepäckarten verboten.", "Fireworks are prohibited in all baggage.");
            Verdict::new(
                bv(NotAllowed, text.clone())
                    .with_tip(t(lang, "Darf nicht per Flugzeug transportiert werden.", "Cannot be transported by air.")),
                bv(NotAllowed, text),
            )
        }
        CategoryId::FuelPaste => prohibited_everywhere(
            lang,
            "Brennpasten und brennbare Flüssigkeiten sind verboten.",
            "Fuel paste and flammable liquids are prohibited.",
        ),
        CategoryId::ToxicCorrosive => prohibited_everywhere(
            lang,
            "Giftige und ätzende Stoffe sind verboten.",
            "Toxic and corrosive substances are prohibited.",
        ),
        CategoryId::GasCartridges => prohibited_everywhere(
            lang,
            "Gaskartuschen und Druckgas sind verboten.",
            "Gas cartridges and compressed gas are prohibited.",
        ),
        CategoryId::Paints => prohibited_everywhere(
            lang,
            "Farben und Lösungsmittel sind verboten.",
            "Paints and solvents are prohibited.",
        ),
    }
}

/// Spare batteries and power banks: never in checked baggage
fn battery_spare(answers: &Answers, lang: Language) -> Verdict {
    let never_checked = || {
        bv(
            NotAllowed,
            t(lang, "Ersatzbatterien sind im aufgegebenen Gepäck nie erlaubt.", "Spare batteries are never allowed in checked baggage."),
        )
        .with_tip(t(lang, "Muss im Handgepäck mitgeführt werden.", "Must be carried in hand baggage."))
    };

    match answer(answers, "size", "small") {
        // over 160 Wh
        "xlarge" => Verdict::new(
            bv(
                NotAllowed,
                t(
                    lang,
                    "Sehr grosse Batterien (über 160 Wh) sind in allen Gepäckarten verboten.",
                    "Very large batteries (over 160 Wh) are prohibited in all baggage.",
                ),
            )
            .with_tip(t(lang, "Lassen Sie diesen Gegenstand zu Hause.", "Leave this item at home.")),
            bv(
                NotAllowed,
                t(lang, "Sehr grosse Batterien sind in allen Gepäckarten verboten.", "Very large batteries are prohibited in all baggage."),
            ),
        ),
        // 100-160 Wh
        "large" => Verdict::new(
            bv(
                Conditional,
                t(
                    lang,
                    "Grosse Powerbanks (100–160 Wh) sind im Handgepäck erlaubt. Max. 2 Stück. Genehmigung der Fluggesellschaft erforderlich. Pole müssen abgeklebt sein.",
                    "Large power banks (100–160 Wh) are allowed in hand baggage. Max 2 units. Airline approval required. Terminals must be taped.",
                ),
            )
            .with_tip(t(lang, "Kontaktieren Sie Ihre Fluggesellschaft vor der Reise.", "Contact your airline before travelling.")),
            never_checked(),
        ),
        _ => Verdict::new(
            bv(
                Conditional,
                t(
                    lang,
                    "Standard-Powerbanks (unter 100 Wh) sind im Handgepäck erlaubt. Pole müssen abgeklebt oder einzeln geschützt sein.",
                    "Standard power banks (under 100 Wh) are allowed in hand baggage. Terminals must be taped or individually protected.",
                ),
            ),
            never_checked(),
        ),
    }
}

fn battery_installed(answers: &Answers, lang: Language) -> Verdict {
    match answer(answers, "device_type", "small") {
        "large" => Verdict::new(
            bv(
                NotAllowed,
                t(
                    lang,
                    "Geräte mit sehr grossen Batterien (über 160 Wh) sind verboten.",
                    "Devices with very large batteries (over 160 Wh) are prohibited.",
                ),
            ),
            bv(
                NotAllowed,
                t(lang, "Geräte mit sehr grossen Batterien sind verboten.", "Devices with very large batteries are prohibited."),
            ),
        ),
        "medium" => Verdict::new(
            bv(
                Allowed,
                t(
                    lang,
                    "Laptops sind im Handgepäck erlaubt. Muss bei der Sicherheitskontrolle separat in eine Schale gelegt werden.",
                    "Laptops are allowed in hand baggage. Must be placed separately in a tray at security.",
                ),
            ),
            bv(
                Allowed,
                t(
                    lang,
                    "Im aufgegebenen Gepäck erlaubt. Gerät muss vollständig ausgeschaltet sein.",
                    "Allowed in checked baggage. Device must be completely switched off.",
                ),
            ),
        ),
        _ => Verdict::new(
            bv(
                Allowed,
                t(lang, "Handys, Tablets und Kameras sind im Handgepäck erlaubt.", "Phones, tablets and cameras are allowed in hand baggage."),
            ),
            bv(
                Allowed,
                t(lang, "Im aufgegebenen Gepäck erlaubt. Gerät muss ausgeschaltet sein.", "Allowed in checked baggage. Device must be switched off."),
            ),
        ),
    }
}

/// Liquids: the exemption by type wins over container size
fn liquids_general(answers: &Answers, lang: Language) -> Verdict {
    let size = answer(answers, "container_size", "small");
    let liquid_type = answer(answers, "liquid_type", "regular");

    if liquid_type == "medication" || liquid_type == "baby_food" {
        return Verdict::new(
            bv(
                Allowed,
                t(
                    lang,
                    "Medikamente und Babynahrung dürfen 100 ml überschreiten. Nachweis mitführen (Rezept, etc.).",
                    "Medication and baby food may exceed 100 ml. Carry proof (prescription, etc.).",
                ),
            ),
            checked_allowed(lang),
        );
    }

    if liquid_type == "duty_free" && size == "large" {
        return Verdict::new(
            bv(
                Conditional,
                t(
                    lang,
                    "Duty-Free-Flüssigkeiten über 100 ml sind nur mit Kaufbeleg in einem versiegelten Sicherheitsbeutel erlaubt.",
                    "Duty-free liquids over 100 ml are only allowed with receipt in a sealed security bag.",
                ),
            )
            .with_tip(t(lang, "Beleg und Beutel bis zum Zielort aufbewahren.", "Keep receipt and sealed bag until destination.")),
            checked_allowed(lang),
        );
    }

    if size == "large" {
        return Verdict::new(
            bv(
                NotAllowed,
                t(lang, "Behälter über 100 ml sind im Handgepäck nicht erlaubt.", "Containers over 100 ml are not allowed in hand baggage."),
            )
            .with_tip(t(
                lang,
                "In einen kleineren Behälter umfüllen oder im aufgegebenen Gepäck verpacken.",
                "Transfer to a smaller container or pack in checked baggage.",
            )),
            bv(
                Allowed,
                t(
                    lang,
                    "Im aufgegebenen Gepäck ohne Grössenbeschränkung erlaubt.",
                    "Allowed in checked baggage without size restriction.",
                ),
            ),
        );
    }

    Verdict::new(
        bv(
            Conditional,
            t(
                lang,
                "Im Handgepäck erlaubt. Muss in einem transparenten, wiederverschliessbaren Plastikbeutel (max. 1 Liter) verpackt sein.",
                "Allowed in hand baggage. Must be packed in a transparent, resealable plastic bag (max 1 litre).",
            ),
        ),
        checked_allowed(lang),
    )
}

/// Knives, scissors, tools: 6 cm threshold, hand baggage only affected
fn sharp_object(size: &str, lang: Language, long: (&str, &str), short: (&str, &str)) -> Verdict {
    if size == "long" {
        return Verdict::new(
            bv(NotAllowed, t(lang, long.0, long.1)).with_tip(pack_in_checked_tip(lang)),
            checked_allowed(lang),
        );
    }
    Verdict::new(bv(Allowed, t(lang, short.0, short.1)), checked_allowed(lang))
}
