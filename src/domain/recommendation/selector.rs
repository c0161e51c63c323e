//! Candidate filtering, history biasing and bounded sampling.
//!
//! Runs once the dialogue reaches its terminal step. Hard filters
//! (availability) come first; the survivor pool is then biased toward
//! entries the user has not reviewed yet and sampled uniformly without
//! replacement. Diversity over relevance: once the hard constraints hold,
//! no ranking is applied.

use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashSet;

use crate::domain::assistant::{prompts, RecommendedPlace, TravelPreferences};
use crate::domain::catalog::{is_available_for_stay, is_available_for_visit, CatalogEntry, Category};
use crate::domain::foundation::PlaceId;

/// Bounds for the sampling stage.
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    /// Hard cap on the number of recommendations per reply.
    pub max_results: usize,
    /// Minimum size of the not-yet-reviewed pool before reviewed entries
    /// are mixed back in.
    pub fresh_pool_threshold: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_results: 3,
            fresh_pool_threshold: 3,
        }
    }
}

/// Reply text plus the light references kept in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub message: String,
    pub places: Vec<RecommendedPlace>,
}

impl Selection {
    fn empty(category: Category) -> Self {
        Self {
            message: prompts::empty_results(category).to_string(),
            places: Vec::new(),
        }
    }
}

/// Turns completed preferences plus queried candidates into a bounded,
/// deduplicated recommendation set.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSelector {
    config: SelectorConfig,
}

impl RecommendationSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Filters, biases and samples the candidates.
    ///
    /// `reviewed` is the set of entry ids the user already wrote reviews
    /// for; `rng` is caller-supplied so tests can pin the sample.
    pub fn select(
        &self,
        category: Category,
        prefs: &TravelPreferences,
        candidates: &[CatalogEntry],
        reviewed: &HashSet<PlaceId>,
        user_name: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Selection {
        let survivors: Vec<&CatalogEntry> = candidates
            .iter()
            .filter(|entry| self.is_obtainable(category, prefs, entry))
            .collect();

        if survivors.is_empty() {
            return Selection::empty(category);
        }

        let (fresh, seen): (Vec<&CatalogEntry>, Vec<&CatalogEntry>) = survivors
            .iter()
            .copied()
            .partition(|entry| !reviewed.contains(&entry.id));
        let pool = if fresh.len() >= self.config.fresh_pool_threshold {
            fresh
        } else {
            fresh.into_iter().chain(seen).collect()
        };

        let sample_size = self.config.max_results.min(pool.len());
        let sampled: Vec<&CatalogEntry> =
            pool.choose_multiple(rng, sample_size).copied().collect();

        tracing::info!(
            category = %category,
            survivors = survivors.len(),
            sampled = sampled.len(),
            "recommendation sample drawn"
        );

        let mut lines = Vec::with_capacity(sampled.len());
        let mut places = Vec::with_capacity(sampled.len());
        for (idx, entry) in sampled.iter().enumerate() {
            lines.push(format_entry_line(idx + 1, entry, category));
            places.push(RecommendedPlace {
                id: Some(entry.id),
                name: entry.name.clone(),
                category: Some(entry.category),
            });
        }

        let message = format!(
            "{}{}",
            prompts::recommendation_intro(category, user_name),
            lines.join(" ")
        );
        Selection { message, places }
    }

    fn is_obtainable(
        &self,
        category: Category,
        prefs: &TravelPreferences,
        entry: &CatalogEntry,
    ) -> bool {
        if category.is_restaurant() {
            if let (Some(date), Some(time)) = (prefs.visit_date, prefs.visit_time) {
                return is_available_for_visit(entry, date, time);
            }
            true
        } else {
            if let (Some(check_in), Some(check_out)) = (prefs.check_in, prefs.check_out) {
                return is_available_for_stay(entry, check_in, check_out);
            }
            true
        }
    }
}

fn format_entry_line(position: usize, entry: &CatalogEntry, category: Category) -> String {
    let unit = if category.is_restaurant() {
        "ticket estimado"
    } else {
        "noche"
    };
    format!(
        "{}) {} – {} - ⭐ {} - {}/{}.",
        position,
        entry.name,
        entry.location_label(),
        format_rating(entry.rating),
        format_price(entry.price_per_night),
        unit
    )
}

fn format_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{:.1}", rating)
    } else {
        "Sin reseñas".to_string()
    }
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) if value >= 0.0 => format!("${}", format_thousands(value as i64)),
        _ => "Precio a consultar".to_string(),
    }
}

/// Dot-separated thousands, the local display convention.
fn format_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assistant::DialogueStep;
    use chrono::{NaiveDate, NaiveTime};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn hotel(id: i64, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: PlaceId::new(id),
            name: name.to_string(),
            category: Category::Hotel,
            country: Some("Argentina".to_string()),
            city_state: Some("Mendoza".to_string()),
            price_per_night: Some(80_000.0),
            capacity: Some(4),
            rating: 4.5,
            blocked: vec![],
            schedule: vec![],
        }
    }

    fn lodging_prefs() -> TravelPreferences {
        TravelPreferences::new()
            .with_category(Category::Hotel, DialogueStep::Complete)
            .with_check_in(date(2025, 12, 5), DialogueStep::Complete)
            .with_check_out(date(2025, 12, 12), DialogueStep::Complete)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn selector() -> RecommendationSelector {
        RecommendationSelector::new(SelectorConfig::default())
    }

    #[test]
    fn caps_the_sample_at_max_results_with_distinct_ids() {
        let candidates: Vec<CatalogEntry> = (1..=10)
            .map(|id| hotel(id, &format!("Hotel {}", id)))
            .collect();
        let selection = selector().select(
            Category::Hotel,
            &lodging_prefs(),
            &candidates,
            &HashSet::new(),
            None,
            &mut rng(),
        );

        assert_eq!(selection.places.len(), 3);
        let ids: HashSet<_> = selection.places.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(selection.message.starts_with("Te recomiendo"));
    }

    #[test]
    fn unavailable_entries_never_survive() {
        let mut blocked = hotel(1, "Bloqueado");
        blocked.blocked = vec![crate::domain::catalog::BlockedInterval::new(
            date(2025, 12, 1),
            date(2025, 12, 31),
        )];
        let open = hotel(2, "Abierto");

        let selection = selector().select(
            Category::Hotel,
            &lodging_prefs(),
            &[blocked, open],
            &HashSet::new(),
            None,
            &mut rng(),
        );

        assert_eq!(selection.places.len(), 1);
        assert_eq!(selection.places[0].name, "Abierto");
    }

    #[test]
    fn prefers_entries_the_user_has_not_reviewed() {
        let candidates: Vec<CatalogEntry> = (1..=6)
            .map(|id| hotel(id, &format!("Hotel {}", id)))
            .collect();
        // Three fresh entries remain, so reviewed ones must not appear.
        let reviewed: HashSet<PlaceId> =
            [1, 2, 3].into_iter().map(PlaceId::new).collect();

        let selection = selector().select(
            Category::Hotel,
            &lodging_prefs(),
            &candidates,
            &reviewed,
            None,
            &mut rng(),
        );

        assert_eq!(selection.places.len(), 3);
        for place in &selection.places {
            assert!(!reviewed.contains(&place.id.unwrap()));
        }
    }

    #[test]
    fn tops_up_with_reviewed_entries_when_fresh_pool_is_small() {
        let candidates: Vec<CatalogEntry> = (1..=4)
            .map(|id| hotel(id, &format!("Hotel {}", id)))
            .collect();
        // Only one fresh entry; pool must include reviewed ones too.
        let reviewed: HashSet<PlaceId> =
            [1, 2, 3].into_iter().map(PlaceId::new).collect();

        let selection = selector().select(
            Category::Hotel,
            &lodging_prefs(),
            &candidates,
            &reviewed,
            None,
            &mut rng(),
        );

        assert_eq!(selection.places.len(), 3);
    }

    #[test]
    fn empty_survivor_set_returns_guidance_not_an_error() {
        let selection = selector().select(
            Category::Hotel,
            &lodging_prefs(),
            &[],
            &HashSet::new(),
            None,
            &mut rng(),
        );

        assert!(selection.places.is_empty());
        assert_eq!(selection.message, prompts::NO_LODGING_RESULTS);
    }

    #[test]
    fn restaurant_path_filters_by_visit_date_and_time() {
        let mut closed_monday = hotel(1, "Cerrado los lunes");
        closed_monday.category = Category::Restaurante;
        closed_monday.schedule = vec![crate::domain::catalog::ScheduleRow::closed(0)];
        let mut always_open = hotel(2, "Siempre abierto");
        always_open.category = Category::Restaurante;

        let prefs = TravelPreferences::new()
            .with_category(Category::Restaurante, DialogueStep::Complete)
            // 2025-12-15 is a Monday
            .with_visit_dates(date(2025, 12, 15), None, DialogueStep::Complete)
            .with_visit_times(time(21, 0), None, DialogueStep::Complete);

        let selection = selector().select(
            Category::Restaurante,
            &prefs,
            &[closed_monday, always_open],
            &HashSet::new(),
            Some("Ana"),
            &mut rng(),
        );

        assert_eq!(selection.places.len(), 1);
        assert_eq!(selection.places[0].name, "Siempre abierto");
        assert!(selection.message.starts_with("Ana sugiero"));
        assert!(selection.message.contains("/ticket estimado."));
    }

    #[test]
    fn same_pool_same_seed_same_sample() {
        let candidates: Vec<CatalogEntry> = (1..=10)
            .map(|id| hotel(id, &format!("Hotel {}", id)))
            .collect();
        let pick = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            selector()
                .select(
                    Category::Hotel,
                    &lodging_prefs(),
                    &candidates,
                    &HashSet::new(),
                    None,
                    &mut rng,
                )
                .places
        };

        assert_eq!(pick(42), pick(42));
    }

    mod formatting {
        use super::*;

        #[test]
        fn prices_use_dot_separated_thousands() {
            assert_eq!(format_price(Some(40_000.0)), "$40.000");
            assert_eq!(format_price(Some(1_250_000.0)), "$1.250.000");
            assert_eq!(format_price(Some(950.0)), "$950");
            assert_eq!(format_price(None), "Precio a consultar");
        }

        #[test]
        fn ratings_show_one_decimal_or_fallback() {
            assert_eq!(format_rating(4.25), "4.2");
            assert_eq!(format_rating(0.0), "Sin reseñas");
        }

        #[test]
        fn entry_line_carries_position_location_and_unit() {
            let entry = hotel(1, "Hotel Uno");
            let line = format_entry_line(1, &entry, Category::Hotel);
            assert_eq!(line, "1) Hotel Uno – Mendoza - ⭐ 4.5 - $80.000/noche.");
        }
    }
}
