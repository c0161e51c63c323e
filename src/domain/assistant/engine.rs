//! Per-step transition function of the recommendation dialogue.
//!
//! The engine owns no session state: each call takes the caller-supplied
//! slot record plus the new utterance and returns either the next prompt
//! with the replacement record, the completed record ready for the
//! selector, or a reset when the record arrives in a shape the flow
//! cannot continue from.

use chrono::NaiveDate;

use super::extraction::{
    extract_number, parse_bundle, parse_date, parse_date_range, parse_time_range,
};
use super::keywords::detect_category;
use super::preferences::TravelPreferences;
use super::prompts;
use super::step::DialogueStep;

/// Result of advancing the dialogue by one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Ask the user for the (next or retried) slot; the preferences must
    /// be round-tripped on the following turn.
    Prompt {
        message: String,
        preferences: TravelPreferences,
    },
    /// Every slot is filled; run the recommendation selector.
    Ready { preferences: TravelPreferences },
    /// The record cannot be continued (tampered or stale step); the
    /// session should be dropped after showing the message.
    Reset { message: String },
}

impl TurnOutcome {
    fn prompt(message: impl Into<String>, preferences: TravelPreferences) -> Self {
        TurnOutcome::Prompt {
            message: message.into(),
            preferences,
        }
    }

    fn reset() -> Self {
        TurnOutcome::Reset {
            message: prompts::RESET_DIALOGUE.to_string(),
        }
    }
}

/// The dialogue transition function.
///
/// Carries only the reference date used to complete yearless date tokens;
/// the application layer passes "today", tests pass a fixture.
#[derive(Debug, Clone, Copy)]
pub struct DialogueEngine {
    reference_date: NaiveDate,
}

impl DialogueEngine {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Advances the dialogue by one user turn.
    pub fn advance(&self, prefs: &TravelPreferences, user_text: &str) -> TurnOutcome {
        tracing::debug!(step = ?prefs.step, "advancing recommendation dialogue");
        match prefs.step {
            DialogueStep::NeedCategory => self.on_category(prefs, user_text),
            DialogueStep::NeedBundle => self.on_bundle(prefs, user_text),
            DialogueStep::NeedLocation => self.on_location(prefs, user_text),
            DialogueStep::NeedPriceMin
            | DialogueStep::NeedPriceMax
            | DialogueStep::NeedGuests
            | DialogueStep::NeedCheckIn
            | DialogueStep::NeedCheckOut => {
                if prefs.is_restaurant() {
                    return TurnOutcome::reset();
                }
                self.on_lodging_slot(prefs, user_text)
            }
            DialogueStep::NeedVisitDate | DialogueStep::NeedVisitTime => {
                if !prefs.is_restaurant() {
                    return TurnOutcome::reset();
                }
                self.on_restaurant_slot(prefs, user_text)
            }
            DialogueStep::Complete => TurnOutcome::reset(),
        }
    }

    fn on_category(&self, prefs: &TravelPreferences, user_text: &str) -> TurnOutcome {
        let Some(category) = detect_category(user_text) else {
            return TurnOutcome::prompt(prompts::ASK_CATEGORY, prefs.clone());
        };
        let next = prefs.with_category(category, DialogueStep::NeedBundle);
        TurnOutcome::prompt(prompts::bundle_instructions(category), next)
    }

    fn on_bundle(&self, prefs: &TravelPreferences, user_text: &str) -> TurnOutcome {
        match parse_bundle(prefs, user_text, self.reference_date) {
            Ok(completed) => TurnOutcome::Ready {
                preferences: completed,
            },
            Err(err) => TurnOutcome::prompt(err.to_string(), prefs.clone()),
        }
    }

    fn on_location(&self, prefs: &TravelPreferences, user_text: &str) -> TurnOutcome {
        let location = user_text.trim();
        if location.chars().count() < 2 {
            return TurnOutcome::prompt(prompts::ASK_LOCATION_RETRY, prefs.clone());
        }
        if prefs.is_restaurant() {
            let next = prefs.with_location(location, DialogueStep::NeedVisitDate);
            TurnOutcome::prompt(prompts::ASK_VISIT_DATE, next)
        } else {
            let next = prefs.with_location(location, DialogueStep::NeedPriceMin);
            TurnOutcome::prompt(prompts::ASK_PRICE_MIN, next)
        }
    }

    fn on_lodging_slot(&self, prefs: &TravelPreferences, user_text: &str) -> TurnOutcome {
        match prefs.step {
            DialogueStep::NeedPriceMin => {
                let Some(min_price) = extract_number(user_text) else {
                    return TurnOutcome::prompt(prompts::PRICE_MIN_RETRY, prefs.clone());
                };
                let next = prefs.with_min_price(min_price as f64, DialogueStep::NeedPriceMax);
                TurnOutcome::prompt(prompts::ASK_PRICE_MAX, next)
            }
            DialogueStep::NeedPriceMax => {
                let Some(max_price) = extract_number(user_text) else {
                    return TurnOutcome::prompt(prompts::PRICE_MAX_RETRY, prefs.clone());
                };
                let max_price = max_price as f64;
                if prefs.min_price.is_some_and(|min| max_price < min) {
                    return TurnOutcome::prompt(prompts::PRICE_MAX_BELOW_MIN, prefs.clone());
                }
                let next = prefs.with_max_price(max_price, DialogueStep::NeedGuests);
                TurnOutcome::prompt(prompts::ASK_GUESTS, next)
            }
            DialogueStep::NeedGuests => {
                let guests = extract_number(user_text);
                let Some(guests) = guests.filter(|n| *n > 0) else {
                    return TurnOutcome::prompt(prompts::GUESTS_RETRY, prefs.clone());
                };
                let next = prefs.with_guests(guests as u32, DialogueStep::NeedCheckIn);
                TurnOutcome::prompt(prompts::ASK_CHECK_IN, next)
            }
            DialogueStep::NeedCheckIn => {
                let Some(check_in) = parse_date(user_text) else {
                    return TurnOutcome::prompt(prompts::CHECK_IN_RETRY, prefs.clone());
                };
                let next = prefs.with_check_in(check_in, DialogueStep::NeedCheckOut);
                TurnOutcome::prompt(prompts::ASK_CHECK_OUT, next)
            }
            DialogueStep::NeedCheckOut => {
                let check_out = parse_date(user_text);
                let (Some(check_out), Some(check_in)) = (check_out, prefs.check_in) else {
                    return TurnOutcome::prompt(prompts::CHECK_OUT_RETRY, prefs.clone());
                };
                if check_out <= check_in {
                    return TurnOutcome::prompt(prompts::CHECK_OUT_BEFORE_IN, prefs.clone());
                }
                TurnOutcome::Ready {
                    preferences: prefs.with_check_out(check_out, DialogueStep::Complete),
                }
            }
            _ => TurnOutcome::reset(),
        }
    }

    fn on_restaurant_slot(&self, prefs: &TravelPreferences, user_text: &str) -> TurnOutcome {
        match prefs.step {
            DialogueStep::NeedVisitDate => {
                let dates = parse_date_range(user_text, self.reference_date);
                if dates.is_empty() || dates.get(1).is_some_and(|end| *end < dates[0]) {
                    return TurnOutcome::prompt(prompts::VISIT_DATE_RETRY, prefs.clone());
                }
                let next = prefs.with_visit_dates(
                    dates[0],
                    dates.get(1).copied(),
                    DialogueStep::NeedVisitTime,
                );
                TurnOutcome::prompt(prompts::ASK_VISIT_TIME, next)
            }
            DialogueStep::NeedVisitTime => {
                let times = parse_time_range(user_text);
                if times.is_empty() || times.get(1).is_some_and(|end| *end < times[0]) {
                    return TurnOutcome::prompt(prompts::VISIT_TIME_RETRY, prefs.clone());
                }
                TurnOutcome::Ready {
                    preferences: prefs.with_visit_times(
                        times[0],
                        times.get(1).copied(),
                        DialogueStep::Complete,
                    ),
                }
            }
            _ => TurnOutcome::reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Category;
    use chrono::NaiveTime;

    fn engine() -> DialogueEngine {
        DialogueEngine::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn prompt_of(outcome: TurnOutcome) -> (String, TravelPreferences) {
        match outcome {
            TurnOutcome::Prompt {
                message,
                preferences,
            } => (message, preferences),
            other => panic!("expected prompt, got {:?}", other),
        }
    }

    fn ready_of(outcome: TurnOutcome) -> TravelPreferences {
        match outcome {
            TurnOutcome::Ready { preferences } => preferences,
            other => panic!("expected ready, got {:?}", other),
        }
    }

    mod category_step {
        use super::*;

        #[test]
        fn unknown_text_reprompts_the_same_step() {
            let prefs = TravelPreferences::new();
            let (message, next) = prompt_of(engine().advance(&prefs, "algo lindo"));
            assert_eq!(message, prompts::ASK_CATEGORY);
            assert_eq!(next.step, DialogueStep::NeedCategory);
        }

        #[test]
        fn hotel_keyword_advances_to_bundle_with_lodging_instructions() {
            let prefs = TravelPreferences::new();
            let (message, next) = prompt_of(engine().advance(&prefs, "quiero un hotel"));
            assert_eq!(message, prompts::BUNDLE_INSTRUCTIONS_LODGING);
            assert_eq!(next.step, DialogueStep::NeedBundle);
            assert_eq!(next.category, Some(Category::Hotel));
        }

        #[test]
        fn restaurant_keyword_gets_restaurant_instructions() {
            let prefs = TravelPreferences::new();
            let (message, next) = prompt_of(engine().advance(&prefs, "un restaurante"));
            assert_eq!(message, prompts::BUNDLE_INSTRUCTIONS_RESTAURANT);
            assert_eq!(next.category, Some(Category::Restaurante));
        }
    }

    mod bundle_step {
        use super::*;

        #[test]
        fn valid_bundle_finalizes_every_slot() {
            let prefs = TravelPreferences::new()
                .with_category(Category::Hotel, DialogueStep::NeedBundle);
            let done = ready_of(engine().advance(
                &prefs,
                "Mendoza, 40000, 120000, 4, 05/12/2025 al 12/12/2025",
            ));
            assert_eq!(done.step, DialogueStep::Complete);
            assert_eq!(done.check_out, Some(date(2025, 12, 12)));
        }

        #[test]
        fn failed_bundle_surfaces_the_hint_and_keeps_the_step() {
            let prefs = TravelPreferences::new()
                .with_category(Category::Hotel, DialogueStep::NeedBundle);
            let (message, next) = prompt_of(engine().advance(&prefs, "Mendoza"));
            assert!(message.contains("precio mínimo"));
            assert_eq!(next, prefs);
        }
    }

    mod lodging_branch {
        use super::*;

        fn at(step: DialogueStep) -> TravelPreferences {
            TravelPreferences::new()
                .with_category(Category::Alojamiento, step)
                .with_location("Bariloche", step)
        }

        #[test]
        fn location_splits_into_the_price_branch() {
            let prefs = TravelPreferences::new()
                .with_category(Category::Hotel, DialogueStep::NeedLocation);
            let (message, next) = prompt_of(engine().advance(&prefs, "Salta"));
            assert_eq!(message, prompts::ASK_PRICE_MIN);
            assert_eq!(next.step, DialogueStep::NeedPriceMin);
            assert_eq!(next.location.as_deref(), Some("Salta"));
        }

        #[test]
        fn short_location_reprompts() {
            let prefs = TravelPreferences::new()
                .with_category(Category::Hotel, DialogueStep::NeedLocation);
            let (message, next) = prompt_of(engine().advance(&prefs, "x"));
            assert_eq!(message, prompts::ASK_LOCATION_RETRY);
            assert_eq!(next.step, DialogueStep::NeedLocation);
        }

        #[test]
        fn prices_guests_and_dates_advance_in_order() {
            let e = engine();
            let (_, p1) = prompt_of(e.advance(&at(DialogueStep::NeedPriceMin), "40000"));
            assert_eq!(p1.step, DialogueStep::NeedPriceMax);

            let (_, p2) = prompt_of(e.advance(&p1, "120000"));
            assert_eq!(p2.step, DialogueStep::NeedGuests);

            let (_, p3) = prompt_of(e.advance(&p2, "somos 4"));
            assert_eq!(p3.step, DialogueStep::NeedCheckIn);
            assert_eq!(p3.guests, Some(4));

            let (_, p4) = prompt_of(e.advance(&p3, "15/11/2025"));
            assert_eq!(p4.step, DialogueStep::NeedCheckOut);

            let done = ready_of(e.advance(&p4, "20/11/2025"));
            assert_eq!(done.step, DialogueStep::Complete);
            assert_eq!(done.check_in, Some(date(2025, 11, 15)));
            assert_eq!(done.check_out, Some(date(2025, 11, 20)));
        }

        #[test]
        fn max_below_min_reprompts_and_keeps_the_min() {
            let prefs = at(DialogueStep::NeedPriceMax).with_min_price(
                50_000.0,
                DialogueStep::NeedPriceMax,
            );
            let (message, next) = prompt_of(engine().advance(&prefs, "30000"));
            assert_eq!(message, prompts::PRICE_MAX_BELOW_MIN);
            assert_eq!(next.min_price, Some(50_000.0));
            assert_eq!(next.max_price, None);
            assert_eq!(next.step, DialogueStep::NeedPriceMax);
        }

        #[test]
        fn zero_guests_reprompts() {
            let (message, next) = prompt_of(engine().advance(&at(DialogueStep::NeedGuests), "0"));
            assert_eq!(message, prompts::GUESTS_RETRY);
            assert_eq!(next.step, DialogueStep::NeedGuests);
        }

        #[test]
        fn check_out_not_after_check_in_reprompts_with_fields_retained() {
            let prefs = at(DialogueStep::NeedCheckOut)
                .with_check_in(date(2025, 11, 15), DialogueStep::NeedCheckOut);
            let (message, next) = prompt_of(engine().advance(&prefs, "15/11/2025"));
            assert_eq!(message, prompts::CHECK_OUT_BEFORE_IN);
            assert_eq!(next.check_in, Some(date(2025, 11, 15)));
            assert_eq!(next.step, DialogueStep::NeedCheckOut);
        }

        #[test]
        fn unreadable_check_out_reprompts() {
            let prefs = at(DialogueStep::NeedCheckOut)
                .with_check_in(date(2025, 11, 15), DialogueStep::NeedCheckOut);
            let (message, _) = prompt_of(engine().advance(&prefs, "el finde"));
            assert_eq!(message, prompts::CHECK_OUT_RETRY);
        }
    }

    mod restaurant_branch {
        use super::*;

        fn at(step: DialogueStep) -> TravelPreferences {
            TravelPreferences::new()
                .with_category(Category::Restaurante, step)
                .with_location("Palermo", step)
        }

        #[test]
        fn location_splits_into_the_visit_branch() {
            let prefs = TravelPreferences::new()
                .with_category(Category::Restaurante, DialogueStep::NeedLocation);
            let (message, next) = prompt_of(engine().advance(&prefs, "Palermo"));
            assert_eq!(message, prompts::ASK_VISIT_DATE);
            assert_eq!(next.step, DialogueStep::NeedVisitDate);
        }

        #[test]
        fn visit_date_range_advances_to_the_time_slot() {
            let (message, next) =
                prompt_of(engine().advance(&at(DialogueStep::NeedVisitDate), "25/10 al 27/10"));
            assert_eq!(message, prompts::ASK_VISIT_TIME);
            assert_eq!(next.visit_date, Some(date(2025, 10, 25)));
            assert_eq!(next.visit_date_end, Some(date(2025, 10, 27)));
        }

        #[test]
        fn inverted_visit_range_reprompts() {
            let (message, _) =
                prompt_of(engine().advance(&at(DialogueStep::NeedVisitDate), "27/10 al 25/10"));
            assert_eq!(message, prompts::VISIT_DATE_RETRY);
        }

        #[test]
        fn visit_time_completes_the_flow() {
            let prefs = at(DialogueStep::NeedVisitTime)
                .with_visit_dates(date(2025, 10, 25), None, DialogueStep::NeedVisitTime);
            let done = ready_of(engine().advance(&prefs, "20:00 a 22:00"));
            assert_eq!(done.step, DialogueStep::Complete);
            assert_eq!(done.visit_time, NaiveTime::from_hms_opt(20, 0, 0));
            assert_eq!(done.visit_time_end, NaiveTime::from_hms_opt(22, 0, 0));
        }

        #[test]
        fn unreadable_time_reprompts() {
            let (message, _) =
                prompt_of(engine().advance(&at(DialogueStep::NeedVisitTime), "a la noche"));
            assert_eq!(message, prompts::VISIT_TIME_RETRY);
        }
    }

    mod resets {
        use super::*;

        #[test]
        fn complete_step_resets_the_dialogue() {
            let prefs = TravelPreferences::new()
                .with_category(Category::Hotel, DialogueStep::Complete);
            assert!(matches!(
                engine().advance(&prefs, "hola"),
                TurnOutcome::Reset { .. }
            ));
        }

        #[test]
        fn branch_step_mismatch_resets() {
            // Restaurant category round-tripped with a lodging step
            let prefs = TravelPreferences::new()
                .with_category(Category::Restaurante, DialogueStep::NeedPriceMin);
            assert!(matches!(
                engine().advance(&prefs, "40000"),
                TurnOutcome::Reset { .. }
            ));

            let prefs = TravelPreferences::new()
                .with_category(Category::Hotel, DialogueStep::NeedVisitDate);
            assert!(matches!(
                engine().advance(&prefs, "25/10"),
                TurnOutcome::Reset { .. }
            ));
        }
    }
}
