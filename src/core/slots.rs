//! Slot descriptor tables: which elements of each card template get filled,
//! and how they are located.
//!
//! A slot that cannot be located in a template is skipped when building the
//! card. [`missing_slots`] reports them so a broken template shows up in the
//! log instead of silently producing half-empty cards.

use crate::core::dom::{Element, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Event,
    Partner,
    Member,
    Provider,
}

impl CardKind {
    pub const ALL: [CardKind; 4] = [
        CardKind::Event,
        CardKind::Partner,
        CardKind::Member,
        CardKind::Provider,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CardKind::Event => "event",
            CardKind::Partner => "partner",
            CardKind::Member => "member",
            CardKind::Provider => "provider",
        }
    }

    pub fn slots(&self) -> &'static [SlotDescriptor] {
        match self {
            CardKind::Event => EVENT_SLOTS,
            CardKind::Partner => PARTNER_SLOTS,
            CardKind::Member => MEMBER_SLOTS,
            CardKind::Provider => PROVIDER_SLOTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Text,
    Link,
    Image,
    /// Emptied and refilled with generated rows.
    Container,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Every shipped template has it; absence is worth a warning.
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Select(Selector<'static>),
    /// The element right after the first match of the anchor, if it has the given tag.
    NextSibling {
        anchor: Selector<'static>,
        tag: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDescriptor {
    pub name: &'static str,
    pub locator: Locator,
    pub kind: SlotKind,
    pub presence: Presence,
}

const fn slot(
    name: &'static str,
    selector: Selector<'static>,
    kind: SlotKind,
    presence: Presence,
) -> SlotDescriptor {
    SlotDescriptor {
        name,
        locator: Locator::Select(selector),
        kind,
        presence,
    }
}

pub const EVENT_SLOTS: &[SlotDescriptor] = &[
    slot("month", Selector::Class("event-month"), SlotKind::Text, Presence::Required),
    slot("title", Selector::Class("event-title"), SlotKind::Text, Presence::Required),
    slot("link", Selector::Class("event-link"), SlotKind::Link, Presence::Optional),
];

pub const PARTNER_SLOTS: &[SlotDescriptor] = &[
    slot("logo", Selector::Class("partner-logo"), SlotKind::Image, Presence::Optional),
    slot("name", Selector::Class("partner-name"), SlotKind::Text, Presence::Required),
    slot("description", Selector::Class("partner-description"), SlotKind::Text, Presence::Optional),
    slot("website", Selector::TagClass("a", "btn"), SlotKind::Link, Presence::Optional),
];

pub const MEMBER_SLOTS: &[SlotDescriptor] = &[
    slot("image", Selector::Class("member-image"), SlotKind::Image, Presence::Optional),
    slot("name", Selector::Tag("h3"), SlotKind::Text, Presence::Required),
    SlotDescriptor {
        name: "position",
        locator: Locator::NextSibling {
            anchor: Selector::Tag("h3"),
            tag: "p",
        },
        kind: SlotKind::Text,
        presence: Presence::Optional,
    },
    slot("description", Selector::Class("member-description"), SlotKind::Text, Presence::Optional),
    slot("social", Selector::Class("member-social"), SlotKind::Container, Presence::Optional),
];

pub const PROVIDER_SLOTS: &[SlotDescriptor] = &[
    slot("logo", Selector::Class("provider-logo"), SlotKind::Image, Presence::Optional),
    slot("name", Selector::Class("provider-name"), SlotKind::Text, Presence::Required),
    slot("website", Selector::Class("provider-website"), SlotKind::Container, Presence::Optional),
    slot("contacts", Selector::Class("provider-contacts"), SlotKind::Container, Presence::Optional),
];

impl SlotDescriptor {
    pub fn locate<'a>(&self, card: &'a mut Element) -> Option<&'a mut Element> {
        match self.locator {
            Locator::Select(selector) => card.find_mut(&selector),
            Locator::NextSibling { anchor, tag } => card
                .next_sibling_of_mut(&anchor)
                .filter(|el| el.tag.eq_ignore_ascii_case(tag)),
        }
    }

    pub fn is_present_in(&self, template: &Element) -> bool {
        // locate() wants a mutable tree
        match self.locator {
            Locator::Select(selector) => template.find(&selector).is_some(),
            Locator::NextSibling { .. } => self.locate(&mut template.clone()).is_some(),
        }
    }
}

/// Looks up a slot by name in a card's table and locates it in the card.
pub fn slot_mut<'a>(kind: CardKind, card: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    let descriptor = kind.slots().iter().find(|d| d.name == name)?;
    let found = descriptor.locate(card);
    if found.is_none() {
        tracing::trace!("{} card has no '{}' slot, skipping", kind.name(), name);
    }
    found
}

/// Names of the slots of `kind` that `template` does not contain.
pub fn missing_slots(kind: CardKind, template: &Element) -> Vec<(&'static str, Presence)> {
    kind.slots()
        .iter()
        .filter(|d| !d.is_present_in(template))
        .map(|d| (d.name, d.presence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::parse_first_element;

    #[test]
    fn test_every_table_has_unique_names() {
        for kind in CardKind::ALL {
            let slots = kind.slots();
            for (i, a) in slots.iter().enumerate() {
                assert!(
                    slots[i + 1..].iter().all(|b| b.name != a.name),
                    "duplicate slot {} in {}",
                    a.name,
                    kind.name()
                );
            }
        }
    }

    #[test]
    fn test_missing_slots_reports_partial_template() {
        let template = parse_first_element(
            r#"<div class="event"><span class="event-month"></span></div>"#,
        )
        .unwrap();

        let missing = missing_slots(CardKind::Event, &template);
        assert_eq!(
            missing,
            vec![("title", Presence::Required), ("link", Presence::Optional)]
        );
    }

    #[test]
    fn test_position_slot_requires_paragraph_after_heading() {
        let with_p = parse_first_element(r#"<div><h3></h3><p class="x"></p></div>"#).unwrap();
        let with_span = parse_first_element(r#"<div><h3></h3><span></span></div>"#).unwrap();

        let position = MEMBER_SLOTS.iter().find(|d| d.name == "position").unwrap();
        assert!(position.is_present_in(&with_p));
        assert!(!position.is_present_in(&with_span));
    }

    #[test]
    fn test_slot_mut_unknown_name() {
        let mut card = parse_first_element(r#"<div><h3></h3></div>"#).unwrap();
        assert!(slot_mut(CardKind::Member, &mut card, "name").is_some());
        assert!(slot_mut(CardKind::Member, &mut card, "nonexistent").is_none());
    }
}
