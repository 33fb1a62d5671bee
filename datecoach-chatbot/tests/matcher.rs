use datecoach_chatbot::{entries, match_intent, Intent, MatchSource};

#[test]
fn payload_selects_entry_directly() {
    let found = match_intent("", Some("support-reset-password")).unwrap();
    assert_eq!(found.entry.id, "support-reset-password");
    assert_eq!(found.intent, Intent::Support);
    assert_eq!(found.source, MatchSource::Payload);
}

#[test]
fn message_equal_to_id_is_a_payload_lookup() {
    let found = match_intent(" faq-hoe-werkt-het ", None).unwrap();
    assert_eq!(found.entry.id, "faq-hoe-werkt-het");
    assert_eq!(found.source, MatchSource::Payload);
}

#[test]
fn unknown_payload_falls_back_to_message() {
    let found = match_intent("Hoe werkt DatingAssistent?", Some("no-such-entry")).unwrap();
    assert_eq!(found.entry.id, "faq-hoe-werkt-het");
    assert_eq!(found.source, MatchSource::WordOverlap);
}

#[test]
fn subscription_cost_routes_to_pricing() {
    let found = match_intent("Wat kost een abonnement", None).unwrap();
    assert!(matches!(found.intent, Intent::Pricing | Intent::Sales));
    assert_eq!(found.entry.id, "sales-pricing");
    assert_eq!(found.source, MatchSource::Keyword);
}

#[test]
fn privacy_keyword_wins_over_other_words() {
    let found = match_intent("Wat doen jullie met mijn privacy?", None).unwrap();
    assert_eq!(found.intent, Intent::Privacy);
    assert_eq!(found.entry.id, "faq-privacy");
}

#[test]
fn support_keyword_without_family_match_uses_default_entry() {
    let found = match_intent("Er is een storing", None).unwrap();
    assert_eq!(found.entry.id, "support-contact");
    assert_eq!(found.source, MatchSource::KeywordDefault);
}

#[test]
fn sales_keyword_without_family_match_uses_lead_capture() {
    let found = match_intent("offerte graag", None).unwrap();
    assert_eq!(found.entry.id, "sales-lead-capture");
    assert_eq!(found.source, MatchSource::KeywordDefault);
}

#[test]
fn whole_word_tag_matches() {
    let found = match_intent("Ik word steeds geghost, ghosting is rot", None).unwrap();
    assert_eq!(found.entry.id, "faq-ghosting");
    assert_eq!(found.source, MatchSource::Tag);
}

#[test]
fn tag_must_match_whole_word() {
    // "profiel" is a tag, "profielfoto" is a separate tag on a later entry.
    let found = match_intent("profielfoto", None).unwrap();
    assert_eq!(found.entry.id, "faq-profiel-foto");
}

#[test]
fn multi_word_tags_match() {
    let found = match_intent("Zie ik red flags?", None).unwrap();
    assert_eq!(found.entry.id, "faq-red-flags");
    assert_eq!(found.source, MatchSource::Tag);
}

#[test]
fn tag_hits_never_skip_past_the_tagged_entry() {
    for (index, entry) in entries().iter().enumerate() {
        for tag in entry.tags {
            let message = format!("iets over {tag}");
            let Some(found) = match_intent(&message, None) else {
                panic!("tag {tag:?} of {} matched nothing", entry.id);
            };
            if matches!(found.source, MatchSource::Keyword | MatchSource::KeywordDefault) {
                continue;
            }
            let position = entries()
                .iter()
                .position(|candidate| candidate.id == found.entry.id)
                .unwrap();
            assert!(
                position <= index,
                "tag {tag:?} of {} routed to later entry {}",
                entry.id,
                found.entry.id
            );
        }
    }
}

#[test]
fn unrelated_message_matches_nothing() {
    assert!(match_intent("Vertel iets over sterrenkunde", None).is_none());
}
