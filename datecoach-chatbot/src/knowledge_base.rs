//! Static Dutch knowledge base.

use serde::Serialize;

use crate::intent::Intent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub label: &'static str,
    /// Id of the entry this suggestion opens.
    pub payload: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseEntry {
    pub id: &'static str,
    pub category: &'static str,
    pub intent: Intent,
    pub question: &'static str,
    pub answer: &'static str,
    pub quick_replies: &'static [QuickReply],
    pub tags: &'static [&'static str],
}

const fn reply(label: &'static str, payload: &'static str) -> QuickReply {
    QuickReply { label, payload }
}

static KNOWLEDGE_BASE: &[KnowledgeBaseEntry] = &[
    KnowledgeBaseEntry {
        id: "faq-what-is-da",
        category: "Algemeen",
        intent: Intent::Faq,
        question: "Wat is de DatingAssistent?",
        answer: "DatingAssistent is jouw digitale datingcoach. Je krijgt profielhulp, openingszinnen, platformadvies, date-ideeën en zelfvertrouwenstips die je direct kunt toepassen.",
        quick_replies: &[
            reply("Hoe werkt het?", "faq-hoe-werkt-het"),
            reply("Welke pakketten zijn er?", "pricing-overview"),
        ],
        tags: &["algemeen", "intro", "start"],
    },
    KnowledgeBaseEntry {
        id: "faq-hoe-werkt-het",
        category: "Algemeen",
        intent: Intent::Faq,
        question: "Hoe werkt DatingAssistent?",
        answer: "Maak een account, kies je doelen en voer tekst of spraak in. De AI-coach maakt profielteksten, gespreksopeners en geeft date-advies afgestemd op jouw situatie.",
        quick_replies: &[
            reply("Kan ik inspreken?", "faq-profiel-inspreken"),
            reply("Is het LVB-vriendelijk?", "faq-lvb-friendly"),
        ],
        tags: &["werkwijze", "onboarding"],
    },
    KnowledgeBaseEntry {
        id: "faq-profiel-inspreken",
        category: "Profielhulp",
        intent: Intent::Faq,
        question: "Kan ik mijn profiel inspreken?",
        answer: "Ja, je kunt je verhaal inspreken. De assistent zet het om naar een warm en duidelijk profiel dat je daarna kunt aanpassen.",
        quick_replies: &[],
        tags: &["profiel", "spraak", "input"],
    },
    KnowledgeBaseEntry {
        id: "faq-lvb-friendly",
        category: "Inclusie & toegankelijkheid",
        intent: Intent::Faq,
        question: "Is DatingAssistent LVB-vriendelijk?",
        answer: "Zeker. We bieden eenvoudige taal, pictogrammen, spraakopties en de mogelijkheid om een begeleider mee te laten kijken.",
        quick_replies: &[],
        tags: &["inclusie", "toegankelijkheid"],
    },
    KnowledgeBaseEntry {
        id: "faq-privacy",
        category: "Account & Privacy",
        intent: Intent::Privacy,
        question: "Hoe gaat de app om met privacy?",
        answer: "We verwerken alleen gegevens die nodig zijn voor je coaching. Alles is conform AVG en je kunt je data inzien, exporteren of verwijderen. Bekijk https://datingassistent.nl/privacyverklaring voor details.",
        quick_replies: &[],
        tags: &["privacy", "avg"],
    },
    KnowledgeBaseEntry {
        id: "support-login",
        category: "Account & Privacy",
        intent: Intent::Support,
        question: "Ik kan niet inloggen",
        answer: "Reset eerst je wachtwoord via https://datingassistent.nl/forgot-password. Blijft het probleem? Kies “Praat met medewerker” of mail support@datingassistent.nl.",
        quick_replies: &[
            reply("Wachtwoord resetten", "support-reset-password"),
            reply("Contact support", "support-contact"),
        ],
        tags: &["support", "login"],
    },
    KnowledgeBaseEntry {
        id: "support-reset-password",
        category: "Account & Privacy",
        intent: Intent::Support,
        question: "Hoe reset ik mijn wachtwoord?",
        answer: "Ga naar https://datingassistent.nl/reset-password, vul je e-mailadres in en volg de stappen. Lukt het niet, neem contact op met support.",
        quick_replies: &[],
        tags: &["support", "password"],
    },
    KnowledgeBaseEntry {
        id: "sales-pricing",
        category: "Prijzen",
        intent: Intent::Pricing,
        question: "Wat kost een abonnement?",
        answer: "Gratis: basisprofiel en FAQ. Core: €24,50 p/m met uitgebreide coaching. Premium en zakelijke pakketten op aanvraag. Wil je een PDF met prijzen ontvangen?",
        quick_replies: &[
            reply("Stuur prijsoverzicht", "sales-send-pricing-pdf"),
            reply("Plan een demo", "sales-book-demo"),
        ],
        tags: &["pricing", "sales"],
    },
    KnowledgeBaseEntry {
        id: "sales-lead-capture",
        category: "Sales",
        intent: Intent::Sales,
        question: "Kan ik een demo plannen?",
        answer: "Natuurlijk. Laat je naam, e-mail en voorkeursmoment achter. We sturen direct een link om een afspraak in te plannen.",
        quick_replies: &[reply("Plan demo", "sales-book-demo")],
        tags: &["sales", "demo"],
    },
    KnowledgeBaseEntry {
        id: "faq-safety",
        category: "Veiligheid",
        intent: Intent::Faq,
        question: "Wat zijn veiligheidsregels voor dates?",
        answer: "Plan je eerste date op een openbare plek, deel je locatie met een vertrouwde persoon en respecteer grenzen. Bekijk onze volledige gids op https://datingassistent.nl/faq.",
        quick_replies: &[],
        tags: &["veiligheid", "date"],
    },
    KnowledgeBaseEntry {
        id: "pricing-overview",
        category: "Prijzen",
        intent: Intent::Pricing,
        question: "Overzicht prijzen",
        answer: "Onze pakketten: Sociaal €9,95 p/m, Core €24,50 p/m, Pro €39,50 p/m en Premium €69,50 p/m. Jaarabonnementen bieden 2 maanden voordeel. Vraag gerust naar een offerte op maat.",
        quick_replies: &[],
        tags: &["prijs", "overzicht", "kosten"],
    },
    KnowledgeBaseEntry {
        id: "sales-send-pricing-pdf",
        category: "Prijzen",
        intent: Intent::Sales,
        question: "Prijsoverzicht per mail",
        answer: "Laat je e-mailadres achter dan sturen we direct de prijslijst (PDF) en optionele kortingen voor teams of begeleiders.",
        quick_replies: &[],
        tags: &["pricing", "pdf"],
    },
    KnowledgeBaseEntry {
        id: "sales-book-demo",
        category: "Sales",
        intent: Intent::Sales,
        question: "Demo plannen",
        answer: "Top! Stuur je naam, organisatie en voorkeursmoment. We sturen je daarna een kalenderlink om de demo in te plannen.",
        quick_replies: &[],
        tags: &["demo", "afspraak"],
    },
    KnowledgeBaseEntry {
        id: "support-contact",
        category: "Account & Privacy",
        intent: Intent::Support,
        question: "Contact met support",
        answer: "Je bereikt ons via WhatsApp, support@datingassistent.nl of telefonisch via 06 14470977 (ma-vr 09:00-17:00). Voor urgentie kun je \"Praat met medewerker\" kiezen.",
        quick_replies: &[],
        tags: &["support", "contact"],
    },
    KnowledgeBaseEntry {
        id: "faq-platform-advies",
        category: "Profielhulp",
        intent: Intent::Faq,
        question: "Welke dating app past bij mij?",
        answer: "Dat hangt af van je doelen. Tinder voor casual dates, Bumble voor gelijke kansen, Hinge voor relaties, en EliteSingles voor serieuzere daters. Ik kan je helpen kiezen gebaseerd op je profiel.",
        quick_replies: &[reply("Platform advies krijgen", "platform-match")],
        tags: &["platform", "app", "datingapp", "kiezen"],
    },
    KnowledgeBaseEntry {
        id: "faq-profiel-foto",
        category: "Profielhulp",
        intent: Intent::Faq,
        question: "Hoe maak ik goede profielfoto's?",
        answer: "Gebruik recente, duidelijke foto's waar je gezicht goed zichtbaar is. Toon je persoonlijkheid met hobby-foto's. Vermijd groepsfoto's waar niet duidelijk is wie jij bent.",
        quick_replies: &[],
        tags: &["profiel", "foto", "profielfoto"],
    },
    KnowledgeBaseEntry {
        id: "faq-gesprek-starters",
        category: "Gesprekscoach",
        intent: Intent::Faq,
        question: "Wat zijn goede openingszinnen?",
        answer: "Vraag naar gedeelde interesses uit het profiel, geef een oprechte compliment, of stel een leuke vraag. Vermijd \"Hoi\" of \"Hoe gaat het?\". Ik kan persoonlijke suggesties geven.",
        quick_replies: &[reply("Openingszinnen genereren", "generate-openers")],
        tags: &["gesprek", "openingszin", "starters"],
    },
    KnowledgeBaseEntry {
        id: "faq-date-planner",
        category: "Dateplanner",
        intent: Intent::Faq,
        question: "Wat is een goed eerste date idee?",
        answer: "Kies iets laagdrempeligs zoals koffie, een wandeling in het park, of een museum. Zorg voor een openbare plek en houd het kort (1-2 uur). Ik kan gepersonaliseerde date ideeën geven.",
        quick_replies: &[reply("Date ideeën krijgen", "date-ideas")],
        tags: &["date", "eerste date", "ontmoeting"],
    },
    KnowledgeBaseEntry {
        id: "faq-zelfvertrouwen",
        category: "Zelfvertrouwen",
        intent: Intent::Faq,
        question: "Hoe word ik zelfverzekerder bij daten?",
        answer: "Focus op je sterke punten, oefen met vrienden, en onthoud dat afwijzing normaal is. Elke \"nee\" brengt je dichter bij een \"ja\". Ik help je met zelfvertrouwen tips.",
        quick_replies: &[reply("Zelfvertrouwen tips", "confidence-tips")],
        tags: &["zelfvertrouwen", "vertrouwen", "angst"],
    },
    KnowledgeBaseEntry {
        id: "faq-red-flags",
        category: "Veiligheid",
        intent: Intent::Faq,
        question: "Welke rode vlaggen moet ik herkennen?",
        answer: "Let op: te snel willen trouwen, geheimzinnig over werk/relatie, druk uitoefenen voor geld, of inconsistent verhalen. Neem contact op als iets niet klopt.",
        quick_replies: &[],
        tags: &["veiligheid", "red flags", "waarschuwing"],
    },
    KnowledgeBaseEntry {
        id: "faq-ghosting",
        category: "Gesprekscoach",
        intent: Intent::Faq,
        question: "Wat moet ik doen bij ghosting?",
        answer: "Geef het een paar dagen, stuur dan één beleefd bericht. Als er geen reactie komt, ga door. Het zegt meer over hen dan over jou. Blijf positief en ga door met daten.",
        quick_replies: &[],
        tags: &["ghosting", "afwijzing", "gesprek"],
    },
    KnowledgeBaseEntry {
        id: "faq-online-safety",
        category: "Veiligheid",
        intent: Intent::Faq,
        question: "Hoe blijf ik veilig bij online daten?",
        answer: "Deel locatie pas na vertrouwen, ontmoet op openbare plekken, neem een vriend mee bij eerste date, en vertrouw je gevoel. Nooit geld sturen naar dates.",
        quick_replies: &[],
        tags: &["veiligheid", "online", "bescherming"],
    },
    KnowledgeBaseEntry {
        id: "faq-profile-writing",
        category: "Profielhulp",
        intent: Intent::Faq,
        question: "Hoe schrijf ik een goed profiel?",
        answer: "Wees specifiek over hobby's, humoristisch, en authentiek. Vermijd negatieve uitspraken. Toon wat je zoekt in een relatie. Ik kan je helpen met profielteksten.",
        quick_replies: &[reply("Profiel hulp krijgen", "profile-help")],
        tags: &["profiel", "tekst", "schrijven"],
    },
    KnowledgeBaseEntry {
        id: "faq-matching",
        category: "Algemeen",
        intent: Intent::Faq,
        question: "Waarom match ik niet?",
        answer: "Check je foto's, bio, en swipe gedrag. Wees selectief maar niet te kieskeurig. Het gaat om kwaliteit over kwantiteit. Ik kan je profiel analyseren.",
        quick_replies: &[reply("Profiel analyse", "profile-analysis")],
        tags: &["matching", "swipe", "profiel"],
    },
    KnowledgeBaseEntry {
        id: "faq-conversation-flow",
        category: "Gesprekscoach",
        intent: Intent::Faq,
        question: "Hoe houd ik een gesprek gaande?",
        answer: "Stel open vragen, deel verhalen, toon interesse in hun antwoorden. Luister meer dan je praat. Vraag door op interessante onderwerpen.",
        quick_replies: &[],
        tags: &["gesprek", "communicatie", "flow"],
    },
    KnowledgeBaseEntry {
        id: "faq-age-difference",
        category: "Algemeen",
        intent: Intent::Faq,
        question: "Is leeftijd belangrijk bij daten?",
        answer: "Leeftijd kan een rol spelen maar is niet doorslaggevend. Focus op compatibiliteit, waarden, en connectie. Wat voor jou werkt is het belangrijkste.",
        quick_replies: &[],
        tags: &["leeftijd", "verschil", "relatie"],
    },
    KnowledgeBaseEntry {
        id: "faq-long-distance",
        category: "Dateplanner",
        intent: Intent::Faq,
        question: "Werkt lange afstand daten?",
        answer: "Het kan werken met goede communicatie, regelmatige bezoeken, en duidelijke doelen. Maar het is uitdagend. Wees eerlijk over verwachtingen.",
        quick_replies: &[],
        tags: &["lange afstand", "distance", "relatie"],
    },
    KnowledgeBaseEntry {
        id: "faq-breakup-advice",
        category: "Zelfvertrouwen",
        intent: Intent::Faq,
        question: "Hoe ga ik om met een break-up?",
        answer: "Geef jezelf tijd om te rouwen, focus op zelfzorg, blijf actief met vrienden, en overweeg counseling. Het wordt beter met tijd. Je bent sterk.",
        quick_replies: &[],
        tags: &["breakup", "relatie", "rouw"],
    },
];

pub fn entries() -> &'static [KnowledgeBaseEntry] {
    KNOWLEDGE_BASE
}

/// Entry whose id equals `payload` after trimming, case-insensitively.
pub fn find_entry(payload: &str) -> Option<&'static KnowledgeBaseEntry> {
    let normalized = payload.trim().to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .find(|entry| entry.id.to_lowercase() == normalized)
}

/// Distinct categories in knowledge-base order.
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for entry in KNOWLEDGE_BASE {
        if !seen.contains(&entry.category) {
            seen.push(entry.category);
        }
    }
    seen
}
