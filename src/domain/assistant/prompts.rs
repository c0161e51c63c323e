//! User-facing prompt and hint text (es-AR).
//!
//! Every string the dialogue can emit lives here so the engine stays free
//! of literals and the voice stays consistent across steps.

use crate::domain::catalog::Category;

pub const ASK_CATEGORY: &str =
    "Decime si buscás un hotel, un restaurante o un alojamiento y seguimos con los detalles.";

pub const ASK_CATEGORY_FRESH: &str = "¿Qué buscás esta vez: hoteles, restaurantes o alojamientos?";

pub const BUNDLE_INSTRUCTIONS_RESTAURANT: &str = "Entendido. Ingresá ahora los datos que se adapten a tu plan: ubicación del restaurante, fecha o rango de fechas, y horario o franja horaria. Ejemplo: \"Buenos Aires, 05/12/2025 al 12/12/2025, 20:00 a 23:00\".";

pub const BUNDLE_INSTRUCTIONS_LODGING: &str = "Entendido. Ingresá ahora los datos que mejor se adapten a tu plan: ubicación, precio mínimo y máximo, cantidad de huéspedes y el rango de fechas de estadía. Ejemplo: \"Mendoza, 40000, 120000, 4, 05/12/2025 al 12/12/2025\".";

pub const ASK_LOCATION_RETRY: &str =
    "Necesito un nombre de ciudad, provincia o zona para orientarme. ¿Dónde te gustaría buscar?";

pub const ASK_VISIT_DATE: &str =
    "¿Qué día querés ir? Podés escribir un día (25/10/2024) o un rango (25/10 al 27/10).";

pub const ASK_PRICE_MIN: &str =
    "¿Cuál es el precio mínimo por noche que querés pagar? Indicá un número aproximado.";

pub const PRICE_MIN_RETRY: &str = "No pude reconocer el monto mínimo. Indicá un número como 40000.";

pub const ASK_PRICE_MAX: &str = "¿Y el precio máximo por noche?";

pub const PRICE_MAX_RETRY: &str =
    "No pude reconocer el monto máximo. Indicá un número como 120000.";

pub const PRICE_MAX_BELOW_MIN: &str =
    "El máximo no puede ser menor al mínimo. Indicá un valor más alto.";

pub const ASK_GUESTS: &str = "¿Para cuántas personas tiene que haber capacidad?";

pub const GUESTS_RETRY: &str = "Decime un número entero de personas para continuar.";

pub const ASK_CHECK_IN: &str = "¿Cuál es la fecha de check-in? (ej. 15/11/2024)";

pub const CHECK_IN_RETRY: &str = "No reconocí la fecha. Escribila como 15/11/2024.";

pub const ASK_CHECK_OUT: &str = "¿Cuál es la fecha de check-out?";

pub const CHECK_OUT_RETRY: &str = "No reconocí la fecha. Intentá con un formato como 20/11/2024.";

pub const CHECK_OUT_BEFORE_IN: &str =
    "La fecha de salida tiene que ser posterior a la de ingreso.";

pub const VISIT_DATE_RETRY: &str = "No reconocí la fecha. Escribila como 28/10/2024 o indicá un rango como 28/10/2024 al 30/10/2024.";

pub const ASK_VISIT_TIME: &str =
    "¿A qué hora te gustaría ir? Podés indicar una hora (20:30) o un rango (20:00 a 22:00).";

pub const VISIT_TIME_RETRY: &str =
    "No reconocí el horario. Probá con 20:30 o un rango como 20:00 a 22:00.";

pub const RESET_DIALOGUE: &str =
    "Sigamos con la recomendación. ¿Querés probar nuevamente especificando categoría?";

pub const NO_LODGING_RESULTS: &str = "Ningún establecimiento coincide con todos los criterios (zona, precios, fechas y capacidad). Podés ajustar los montos o las fechas y volver a intentarlo.";

pub const NO_RESTAURANT_RESULTS: &str = "No encontré restaurantes disponibles con esa zona, fecha y horario. Podés ajustar alguno de los datos y volver a preguntar.";

pub const FALLBACK_MESSAGE: &str = "No entendí tu pregunta, ¿podés volver a escribirla?";

/// Instructions shown right after the category is confirmed.
pub fn bundle_instructions(category: Category) -> &'static str {
    if category.is_restaurant() {
        BUNDLE_INSTRUCTIONS_RESTAURANT
    } else {
        BUNDLE_INSTRUCTIONS_LODGING
    }
}

/// Intro line for a recommendation reply, personalized when a name is known.
pub fn recommendation_intro(category: Category, user_name: Option<&str>) -> String {
    let name = user_name.unwrap_or("Te");
    if category.is_restaurant() {
        format!("{} sugiero estos restaurantes para vos:\n\n", name)
    } else {
        format!("{} recomiendo estas opciones para vos:\n\n", name)
    }
}

/// Guidance shown when no candidate survives the filters.
pub fn empty_results(category: Category) -> &'static str {
    if category.is_restaurant() {
        NO_RESTAURANT_RESULTS
    } else {
        NO_LODGING_RESULTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_instructions_differ_per_branch() {
        assert!(bundle_instructions(Category::Restaurante).contains("franja horaria"));
        assert!(bundle_instructions(Category::Hotel).contains("huéspedes"));
        assert_eq!(
            bundle_instructions(Category::Alojamiento),
            bundle_instructions(Category::Hotel)
        );
    }

    #[test]
    fn intro_uses_the_user_name_when_present() {
        let intro = recommendation_intro(Category::Hotel, Some("Lua"));
        assert!(intro.starts_with("Lua recomiendo"));
        let anon = recommendation_intro(Category::Restaurante, None);
        assert!(anon.starts_with("Te sugiero"));
    }

    #[test]
    fn empty_results_guidance_matches_the_branch() {
        assert!(empty_results(Category::Restaurante).contains("restaurantes"));
        assert!(empty_results(Category::Hotel).contains("establecimiento"));
    }
}
