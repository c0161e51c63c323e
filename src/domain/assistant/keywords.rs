//! Keyword detection over normalized user text.
//!
//! The assistant does no real language parsing: utterances are lowercased,
//! stripped of diacritics, and scanned for ordered keyword lists with
//! first-match-wins semantics.

use crate::domain::catalog::Category;

/// Alias lists per category, tried top-down. Aliases are matched against
/// normalized text, so accented forms collapse onto these spellings.
const CATEGORY_ALIASES: &[(Category, &[&str])] = &[
    (Category::Hotel, &["hotel", "hoteles"]),
    (
        Category::Restaurante,
        &["restaurante", "restaurantes", "comida", "gastronomia"],
    ),
    (
        Category::Alojamiento,
        &[
            "alojamiento",
            "alojamientos",
            "cabanas",
            "casa",
            "departamento",
        ],
    ),
];

/// Phrases that restart the recommendation flow from a finished session.
const NEW_SEARCH_TRIGGERS: &[&str] = &[
    "que otros lugares",
    "que otro lugar",
    "otros lugares",
    "otro lugar",
    "otra categoria",
    "otros destinos",
    "algo diferente",
];

/// Lowercases and strips Spanish diacritics so keyword lists only need one
/// spelling per word.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Scans the utterance for a category keyword. First alias hit wins.
pub fn detect_category(text: &str) -> Option<Category> {
    let normalized = normalize_text(text);
    CATEGORY_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| normalized.contains(alias)))
        .map(|(category, _)| *category)
}

/// True when the utterance asks for a fresh batch of recommendations.
pub fn is_new_search_request(text: &str) -> bool {
    let normalized = normalize_text(text);
    NEW_SEARCH_TRIGGERS
        .iter()
        .any(|trigger| normalized.contains(trigger))
}
