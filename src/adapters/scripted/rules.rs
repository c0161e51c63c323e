//! Static keyword-table responder.
//!
//! The platform's canned answers: each rule carries trigger substrings
//! matched against normalized text, first rule wins. A greeting check runs
//! before the table so short salutations get a personalized hello instead
//! of a table miss. Templates may reference `{user}`.

use crate::domain::assistant::{normalize_text, PendingIntent};
use crate::ports::{ScriptedReply, ScriptedResponder};

struct ScriptedRule {
    triggers: &'static [&'static str],
    template: &'static str,
    next_intent: Option<PendingIntent>,
}

impl ScriptedRule {
    fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|trigger| normalized.contains(trigger))
    }
}

const GREETING_KEYWORDS: &[&str] = &["hola", "buen dia", "buenas", "que tal", "hey"];

const GREETING_REPLY: &str =
    "¡Hola {user}! Soy la asistente de la plataforma. Contame qué necesitás y te ayudo.";

const RULES: &[ScriptedRule] = &[
    ScriptedRule {
        triggers: &["quien sos", "quien eres", "que sos"],
        template: "Soy la asistente virtual de la plataforma, una guía que vive dentro del sitio. Te cuento cómo usar cada sección y te acompaño paso a paso cuando necesitás una mano.",
        next_intent: None,
    },
    ScriptedRule {
        triggers: &["que puedo hacer en esta pagina", "que puedo hacer aca"],
        template: "Acá podés buscar hoteles, restaurantes y alojamientos, leer y escribir reseñas reales, y publicar tus propios establecimientos si sos propietario. Todo se maneja desde la home, el detalle del establecimiento y tu perfil.",
        next_intent: None,
    },
    ScriptedRule {
        triggers: &["como funciona la busqueda", "como buscar establecimientos"],
        template: "En la home usás la barra de búsqueda para elegir entre hoteles, restaurantes o alojamientos, escribís una ciudad o nombre y aplicás los filtros que quieras. Apenas encontrás uno que te interese, abrís su ficha para ver fotos, reseñas y más detalles.",
        next_intent: None,
    },
    ScriptedRule {
        triggers: &["como puedo publicar una resena", "como publico una resena", "como escribir una resena"],
        template: "Para publicar una reseña buscá el establecimiento, abrí su ficha y presioná \"Escribir reseña sobre este lugar\". Elegís la puntuación de 1 a 5 estrellas, agregás título, descripción y fotos. Después podés editarla o eliminarla desde tu perfil.",
        next_intent: None,
    },
    ScriptedRule {
        triggers: &["como puedo publicar un establecimiento", "quiero publicar un establecimiento"],
        template: "En la home aparece el botón \"Publicar tu Establecimiento\". Si todavía no sos propietario, activá la casilla \"Soy propietario\" en tu perfil. Luego completás nombre, ubicación, categoría, capacidad, precio por noche, fechas no disponibles y horarios por día.",
        next_intent: None,
    },
    ScriptedRule {
        triggers: &["que tipos de filtros", "como funcionan los filtros", "filtros de busqueda"],
        template: "En la búsqueda principal filtrás por rango de fechas (check-in y check-out), precio mínimo y máximo, cantidad de huéspedes, categoría y texto libre por nombre o ciudad. Dentro del detalle podés filtrar y ordenar las reseñas.",
        next_intent: None,
    },
    ScriptedRule {
        triggers: &[
            "que destinos me recomendas",
            "que destinos recomiendas",
            "recomendame destinos",
            "donde me recomendas viajar",
            "que lugares me recomendas",
        ],
        template: "¡Tengo algunas ideas! Decime primero si buscás un hotel, un restaurante o un alojamiento.",
        next_intent: Some(PendingIntent::TravelRecommendation),
    },
];

/// Table-driven [`ScriptedResponder`] over the built-in rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticScriptedResponder;

impl StaticScriptedResponder {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptedResponder for StaticScriptedResponder {
    fn match_response(&self, text: &str, user_name: Option<&str>) -> Option<ScriptedReply> {
        let normalized = normalize_text(text);
        if is_greeting(&normalized) {
            return Some(ScriptedReply::new(personalize(GREETING_REPLY, user_name)));
        }
        RULES.iter().find(|rule| rule.matches(&normalized)).map(|rule| {
            let reply = ScriptedReply::new(personalize(rule.template, user_name));
            match rule.next_intent {
                Some(intent) => reply.with_next_intent(intent),
                None => reply,
            }
        })
    }
}

fn personalize(template: &str, user_name: Option<&str>) -> String {
    template.replace("{user}", user_name.unwrap_or("viajero"))
}

fn is_greeting(normalized: &str) -> bool {
    if normalized.is_empty() {
        return false;
    }
    // Questions that happen to start politely are not greetings.
    if ["gracias", "como", "publicar"]
        .iter()
        .any(|word| normalized.contains(word))
    {
        return false;
    }
    GREETING_KEYWORDS
        .iter()
        .any(|word| normalized.starts_with(word))
        && normalized.split_whitespace().count() <= 4
}
