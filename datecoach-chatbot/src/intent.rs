use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Faq,
    Privacy,
    Support,
    Sales,
    Pricing,
    /// Answer generated by the language model.
    Ai,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Faq => "faq",
            Intent::Privacy => "privacy",
            Intent::Support => "support",
            Intent::Sales => "sales",
            Intent::Pricing => "pricing",
            Intent::Ai => "ai",
        }
    }

    /// Sales and pricing entries answer each other's questions.
    pub fn same_family(&self, other: Intent) -> bool {
        let family = |intent: Intent| match intent {
            Intent::Pricing => Intent::Sales,
            other => other,
        };
        family(*self) == family(other)
    }

    /// Entry returned when this keyword intent fires but no entry of its
    /// family matches the message.
    pub fn default_entry_id(&self) -> Option<&'static str> {
        match self {
            Intent::Privacy => Some("faq-privacy"),
            Intent::Support => Some("support-contact"),
            Intent::Pricing => Some("pricing-overview"),
            Intent::Sales => Some("sales-lead-capture"),
            Intent::Faq | Intent::Ai => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const PRIVACY_KEYWORDS: &[&str] = &[
    "privacy",
    "avg",
    "gdpr",
    "persoonsgegevens",
    "mijn gegevens",
    "data verwijderen",
    "data inzien",
    "cookies",
];

const SUPPORT_KEYWORDS: &[&str] = &[
    "inloggen",
    "login",
    "wachtwoord",
    "password",
    "account",
    "werkt niet",
    "foutmelding",
    "storing",
    "support",
    "medewerker",
    "klantenservice",
];

const PRICING_KEYWORDS: &[&str] = &[
    "prijs",
    "prijzen",
    "kost",
    "tarief",
    "abonnement",
    "pakket",
    "betalen",
    "korting",
    "€",
];

const SALES_KEYWORDS: &[&str] = &["demo", "offerte", "zakelijk", "bestellen", "kopen"];

/// First keyword intent whose list has a substring in `lowered`, checked in
/// priority order privacy, support, pricing, sales.
pub fn keyword_intent(lowered: &str) -> Option<Intent> {
    let tiers: [(Intent, &[&str]); 4] = [
        (Intent::Privacy, PRIVACY_KEYWORDS),
        (Intent::Support, SUPPORT_KEYWORDS),
        (Intent::Pricing, PRICING_KEYWORDS),
        (Intent::Sales, SALES_KEYWORDS),
    ];
    tiers
        .into_iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(intent, _)| intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privacy_outranks_support_and_pricing() {
        assert_eq!(
            keyword_intent("ik wil mijn account en privacy gegevens zien"),
            Some(Intent::Privacy)
        );
        assert_eq!(
            keyword_intent("mijn account kost te veel"),
            Some(Intent::Support)
        );
    }

    #[test]
    fn pricing_is_checked_before_sales() {
        assert_eq!(keyword_intent("wat kost een demo"), Some(Intent::Pricing));
        assert_eq!(keyword_intent("kan ik een demo plannen"), Some(Intent::Sales));
    }

    #[test]
    fn no_keywords_means_no_intent() {
        assert_eq!(keyword_intent("hoe begin ik een gesprek"), None);
    }

    #[test]
    fn families() {
        assert!(Intent::Sales.same_family(Intent::Pricing));
        assert!(Intent::Pricing.same_family(Intent::Sales));
        assert!(!Intent::Support.same_family(Intent::Privacy));
        assert!(Intent::Faq.same_family(Intent::Faq));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Intent::Pricing).unwrap(), "\"pricing\"");
        assert_eq!(Intent::Ai.to_string(), "ai");
    }
}
