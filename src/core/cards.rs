//! Card Builder: stamps a template once per record and fills its slots.

use crate::core::dom::{Element, Node};
use crate::core::slots::{slot_mut, CardKind};
use crate::domain::model::{
    present, ContactRecord, EventRecord, PartnerRecord, ProviderRecord, SocialLinks,
    TeamMemberRecord,
};

const LINK_COLOR: &str = "color: var(--primary-red);";
const PROVIDER_CATEGORY: &str = "tutoring-providers";

/// Contact channels of a team member, in the order their rows are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Website,
    Cv,
    Twitter,
    Linkedin,
}

impl Channel {
    pub const ORDER: [Channel; 5] = [
        Channel::Email,
        Channel::Website,
        Channel::Cv,
        Channel::Twitter,
        Channel::Linkedin,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            Channel::Email => "mail",
            Channel::Website => "globe",
            Channel::Cv => "file-text",
            Channel::Twitter => "twitter",
            Channel::Linkedin => "linkedin",
        }
    }

    pub fn value<'a>(&self, social: &'a SocialLinks) -> Option<&'a str> {
        let field = match self {
            Channel::Email => &social.email,
            Channel::Website => &social.website,
            Channel::Cv => &social.cv,
            Channel::Twitter => &social.twitter,
            Channel::Linkedin => &social.linkedin,
        };
        present(field)
    }

    fn href(&self, value: &str) -> String {
        match self {
            Channel::Email => format!("mailto:{}", value),
            _ => value.to_string(),
        }
    }

    fn label(&self, value: &str) -> String {
        match self {
            Channel::Email => value.to_string(),
            Channel::Cv => "CV".to_string(),
            _ => display_url(value).to_string(),
        }
    }
}

/// Drops one leading `http://`/`https://` and one trailing slash.
pub fn display_url(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.strip_suffix('/').unwrap_or(without_scheme)
}

fn feather_icon(name: &str, size_class: &str) -> Element {
    Element::new("i")
        .with_attr("data-feather", name)
        .with_class(size_class)
}

/// `<div><a><i data-feather/><span>label</span></a></div>`, the row shape shared
/// by member socials and provider links.
fn link_row(href: &str, icon: &str, icon_size: &str, label: &str, new_tab: bool) -> Element {
    let mut link = Element::new("a").with_attr("href", href);
    if new_tab {
        link.set_attr("target", "_blank");
        link.set_attr("rel", "noopener noreferrer");
    }
    let link = link
        .with_class("text-decoration-none")
        .with_attr("style", LINK_COLOR)
        .with_child(feather_icon(icon, icon_size))
        .with_child(Element::new("span").with_text(label));

    Element::new("div")
        .with_class("d-flex align-items-center gap-2")
        .with_child(link)
}

/// One row per present channel; absent channels produce nothing.
pub fn social_rows(social: &SocialLinks) -> Vec<Element> {
    Channel::ORDER
        .iter()
        .filter_map(|channel| {
            let value = channel.value(social)?;
            Some(link_row(
                &channel.href(value),
                channel.icon(),
                "icon-24",
                &channel.label(value),
                *channel != Channel::Email,
            ))
        })
        .collect()
}

fn set_image(img: &mut Element, src: &str, alt: &str) {
    img.set_attr("src", src);
    img.set_attr("alt", alt);
}

pub fn build_event_card(event: &EventRecord, template: &Element) -> Element {
    let mut card = template.clone();
    let kind = CardKind::Event;

    if let Some(month) = slot_mut(kind, &mut card, "month") {
        month.set_text(&event.month);
    }
    if let Some(title) = slot_mut(kind, &mut card, "title") {
        title.set_text(&event.title);
    }
    if let Some(link) = slot_mut(kind, &mut card, "link") {
        match present(&event.slides_url) {
            Some(url) => {
                link.set_attr("href", url);
                link.show();
            }
            None => link.hide(),
        }
    }

    card
}

pub fn build_partner_card(partner: &PartnerRecord, template: &Element) -> Element {
    let mut card = template.clone();
    let kind = CardKind::Partner;
    let name = present(&partner.name);

    if let (Some(logo), Some(img)) = (slot_mut(kind, &mut card, "logo"), present(&partner.img)) {
        set_image(logo, img, &format!("{} logo", name.unwrap_or("Partner")));
    }
    if let Some(el) = slot_mut(kind, &mut card, "name") {
        el.set_text(name.unwrap_or("Partner Name"));
    }
    if let Some(el) = slot_mut(kind, &mut card, "description") {
        el.set_text(present(&partner.description).unwrap_or(""));
    }
    if let Some(link) = slot_mut(kind, &mut card, "website") {
        match present(&partner.website) {
            Some(url) => link.set_attr("href", url),
            None => {
                link.remove_attr("href");
                link.add_class("disabled");
            }
        }
    }

    card
}

pub fn build_member_card(member: &TeamMemberRecord, template: &Element, category: &str) -> Element {
    let mut card = template.clone();
    let kind = CardKind::Member;
    let name = present(&member.name);

    card.set_attr("data-category", category);

    if let (Some(image), Some(img)) = (slot_mut(kind, &mut card, "image"), present(&member.img)) {
        set_image(image, img, &format!("{} headshot", name.unwrap_or("Member")));
    }
    if let Some(el) = slot_mut(kind, &mut card, "name") {
        el.set_text(name.unwrap_or("Member Name"));
    }
    if let Some(el) = slot_mut(kind, &mut card, "position") {
        el.set_text(present(&member.position).unwrap_or("Position Title"));
    }
    if let Some(el) = slot_mut(kind, &mut card, "description") {
        let description = member.description.as_deref().unwrap_or("").trim();
        el.set_text(description);
        if description.is_empty() {
            el.add_class("d-none");
        } else {
            el.remove_class("d-none");
        }
    }
    // 沒有 social 欄位時保留模板原樣
    if let (Some(container), Some(social)) = (slot_mut(kind, &mut card, "social"), &member.social) {
        container.clear_children();
        for row in social_rows(social) {
            container.append(row);
        }
    }

    card
}

fn contact_row(contact: &ContactRecord) -> Element {
    let mut row = Element::new("div").with_class("provider-contact d-flex gap-3");

    if let Some(img) = present(&contact.img) {
        let alt = format!("{} headshot", present(&contact.name).unwrap_or("Contact"));
        let image = Element::new("img")
            .with_attr("src", img)
            .with_attr("alt", &alt)
            .with_class("provider-contact-image");
        row.append(
            Element::new("div")
                .with_class("provider-contact-image-container")
                .with_child(image),
        );
    }

    let mut info = Element::new("div").with_class("provider-contact-info d-flex flex-column gap-1");
    if let Some(name) = present(&contact.name) {
        info.append(
            Element::new("div")
                .with_class("provider-contact-name")
                .with_text(name),
        );
    }
    if let Some(title) = present(&contact.title) {
        info.append(
            Element::new("div")
                .with_class("provider-contact-title")
                .with_text(title),
        );
    }
    if let Some(homepage) = present(&contact.homepage) {
        info.append(link_row(homepage, "globe", "icon-20", display_url(homepage), true));
    }
    let bio = contact.bio.as_deref().unwrap_or("").trim();
    if !bio.is_empty() {
        info.append(
            Element::new("p")
                .with_class("provider-contact-bio mb-0")
                .with_text(bio),
        );
    }

    row.with_child(info)
}

pub fn build_provider_card(provider: &ProviderRecord, template: &Element) -> Element {
    let mut card = template.clone();
    let kind = CardKind::Provider;

    card.set_attr("data-category", PROVIDER_CATEGORY);

    if let (Some(logo), Some(img)) = (slot_mut(kind, &mut card, "logo"), present(&provider.img)) {
        let alt = format!("{} logo", present(&provider.company).unwrap_or("Provider"));
        set_image(logo, img, &alt);
    }
    if let Some(el) = slot_mut(kind, &mut card, "name") {
        el.set_text(present(&provider.company).unwrap_or(""));
    }
    if let Some(container) = slot_mut(kind, &mut card, "website") {
        container.clear_children();
        if let Some(website) = present(&provider.website) {
            container.append(link_row(website, "globe", "icon-24", display_url(website), true));
        }
    }
    if let (Some(container), Some(contacts)) = (slot_mut(kind, &mut card, "contacts"), &provider.contacts) {
        container.children = contacts.iter().map(contact_row).map(Node::from).collect();
    }

    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::{parse_first_element, Selector};

    const EVENT_TEMPLATE: &str = r##"
        <div class="col-md-6">
          <div class="card">
            <span class="event-month">Month</span>
            <h4 class="event-title">Title</h4>
            <a class="event-link" href="#">Slides</a>
          </div>
        </div>"##;

    const PARTNER_TEMPLATE: &str = r##"
        <div class="col-md-4">
          <img class="partner-logo" src="" alt="">
          <h3 class="partner-name"></h3>
          <p class="partner-description"></p>
          <a class="btn btn-outline-dark" href="#">Website</a>
        </div>"##;

    const MEMBER_TEMPLATE: &str = r#"
        <div class="col-lg-4 member-card">
          <img class="member-image" src="placeholder.jpg" alt="">
          <h3 class="h5">Name</h3>
          <p class="text-muted">Position</p>
          <p class="member-description d-none"></p>
          <div class="member-social"><span>placeholder</span></div>
        </div>"#;

    const PROVIDER_TEMPLATE: &str = r#"
        <div class="col-12 provider-card">
          <img class="provider-logo" src="" alt="">
          <h3 class="provider-name"></h3>
          <div class="provider-website"><span>old</span></div>
          <div class="provider-contacts"><span>old</span></div>
        </div>"#;

    fn template(markup: &str) -> Element {
        parse_first_element(markup).unwrap()
    }

    fn icons(card: &Element) -> Vec<String> {
        card.find_all(&Selector::Tag("i"))
            .iter()
            .filter_map(|i| i.attr("data-feather").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_display_url() {
        assert_eq!(display_url("https://example.org/"), "example.org");
        assert_eq!(display_url("http://example.org/team/"), "example.org/team");
        assert_eq!(display_url("example.org//"), "example.org/");
        assert_eq!(display_url("ftp://example.org"), "ftp://example.org");
    }

    #[test]
    fn test_event_card_with_and_without_slides() {
        let tpl = template(EVENT_TEMPLATE);
        let with = build_event_card(
            &EventRecord {
                month: "March 15".to_string(),
                title: "Kickoff".to_string(),
                slides_url: Some("https://slides.example.org/1".to_string()),
            },
            &tpl,
        );
        let without = build_event_card(
            &EventRecord {
                month: "April".to_string(),
                title: "Follow-up".to_string(),
                slides_url: None,
            },
            &tpl,
        );

        assert_eq!(with.find(&Selector::Class("event-month")).unwrap().text_content(), "March 15");
        let link = with.find(&Selector::Class("event-link")).unwrap();
        assert_eq!(link.attr("href"), Some("https://slides.example.org/1"));
        assert!(!link.is_hidden());

        assert!(without.find(&Selector::Class("event-link")).unwrap().is_hidden());
        // template itself is untouched
        assert_eq!(tpl.find(&Selector::Class("event-title")).unwrap().text_content(), "Title");
    }

    #[test]
    fn test_partner_card_fallbacks() {
        let card = build_partner_card(&PartnerRecord::default(), &template(PARTNER_TEMPLATE));

        assert_eq!(card.find(&Selector::Class("partner-name")).unwrap().text_content(), "Partner Name");
        let logo = card.find(&Selector::Class("partner-logo")).unwrap();
        assert_eq!(logo.attr("src"), Some(""));
        let link = card.find(&Selector::TagClass("a", "btn")).unwrap();
        assert_eq!(link.attr("href"), None);
        assert!(link.has_class("disabled"));
    }

    #[test]
    fn test_partner_without_website_is_disabled_not_hidden() {
        let partner = PartnerRecord {
            name: Some("Learning Lab".to_string()),
            ..Default::default()
        };
        let card = build_partner_card(&partner, &template(PARTNER_TEMPLATE));

        let link = card.find(&Selector::TagClass("a", "btn")).unwrap();
        assert!(!link.is_hidden());
        assert_eq!(link.attr("href"), None);
        assert!(link.has_class("disabled"));
        assert_eq!(link.text_content(), "Website");
    }

    #[test]
    fn test_partner_card_populated() {
        let partner = PartnerRecord {
            name: Some("Learning Lab".to_string()),
            description: Some("Research partner".to_string()),
            img: Some("img/lab.png".to_string()),
            website: Some("https://lab.example.org".to_string()),
        };
        let card = build_partner_card(&partner, &template(PARTNER_TEMPLATE));

        let logo = card.find(&Selector::Class("partner-logo")).unwrap();
        assert_eq!(logo.attr("src"), Some("img/lab.png"));
        assert_eq!(logo.attr("alt"), Some("Learning Lab logo"));
        let link = card.find(&Selector::TagClass("a", "btn")).unwrap();
        assert_eq!(link.attr("href"), Some("https://lab.example.org"));
        assert!(!link.has_class("disabled"));
    }

    #[test]
    fn test_member_with_only_email_has_one_row() {
        let member = TeamMemberRecord {
            name: Some("Jane Doe".to_string()),
            social: Some(SocialLinks {
                email: Some("j@x.org".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let card = build_member_card(&member, &template(MEMBER_TEMPLATE), "core-team");

        let social = card.find(&Selector::Class("member-social")).unwrap();
        assert_eq!(social.element_children().count(), 1);
        assert_eq!(icons(social), vec!["mail"]);
        let link = social.find(&Selector::Tag("a")).unwrap();
        assert_eq!(link.attr("href"), Some("mailto:j@x.org"));
        assert_eq!(link.attr("target"), None);
        assert_eq!(link.text_content(), "j@x.org");
        assert_eq!(card.attr("data-category"), Some("core-team"));
    }

    #[test]
    fn test_member_channels_follow_fixed_order() {
        let member = TeamMemberRecord {
            name: Some("Sam Lee".to_string()),
            position: Some("Director".to_string()),
            description: Some("  Leads research.  ".to_string()),
            img: Some("img/sam.jpg".to_string()),
            social: Some(SocialLinks {
                linkedin: Some("https://www.linkedin.com/in/sam/".to_string()),
                twitter: Some("".to_string()),
                cv: Some("docs/sam.pdf".to_string()),
                website: Some("https://sam.example.org/".to_string()),
                email: None,
            }),
        };
        let card = build_member_card(&member, &template(MEMBER_TEMPLATE), "national-advisory-board");

        let social = card.find(&Selector::Class("member-social")).unwrap();
        assert_eq!(icons(social), vec!["globe", "file-text", "linkedin"]);
        let labels: Vec<String> = social
            .find_all(&Selector::Tag("span"))
            .iter()
            .map(|s| s.text_content())
            .collect();
        assert_eq!(labels, vec!["sam.example.org", "CV", "www.linkedin.com/in/sam"]);

        assert_eq!(card.find(&Selector::Tag("h3")).unwrap().text_content(), "Sam Lee");
        assert_eq!(card.find(&Selector::TagClass("p", "text-muted")).unwrap().text_content(), "Director");
        let description = card.find(&Selector::Class("member-description")).unwrap();
        assert_eq!(description.text_content(), "Leads research.");
        assert!(!description.has_class("d-none"));
        let image = card.find(&Selector::Class("member-image")).unwrap();
        assert_eq!(image.attr("alt"), Some("Sam Lee headshot"));
    }

    #[test]
    fn test_member_without_social_keeps_template_markup() {
        let card = build_member_card(&TeamMemberRecord::default(), &template(MEMBER_TEMPLATE), "core-team");

        assert_eq!(card.find(&Selector::Tag("h3")).unwrap().text_content(), "Member Name");
        assert_eq!(
            card.find(&Selector::TagClass("p", "text-muted")).unwrap().text_content(),
            "Position Title"
        );
        assert!(card.find(&Selector::Class("member-description")).unwrap().has_class("d-none"));
        let social = card.find(&Selector::Class("member-social")).unwrap();
        assert_eq!(social.text_content(), "placeholder");
    }

    #[test]
    fn test_member_card_tolerates_missing_slots() {
        let bare = template(r#"<div class="member"></div>"#);
        let card = build_member_card(
            &TeamMemberRecord {
                name: Some("Nobody".to_string()),
                ..Default::default()
            },
            &bare,
            "core-team",
        );
        assert!(card.children.is_empty());
        assert_eq!(card.attr("data-category"), Some("core-team"));
    }

    #[test]
    fn test_provider_card_contacts() {
        let provider = ProviderRecord {
            company: Some("Tutor Co".to_string()),
            img: Some("img/tutorco.png".to_string()),
            website: Some("https://tutor.example.com/".to_string()),
            contacts: Some(vec![
                ContactRecord {
                    name: Some("Ana".to_string()),
                    title: Some("CEO".to_string()),
                    homepage: Some("http://ana.example.com".to_string()),
                    bio: Some(" Founder. ".to_string()),
                    img: Some("img/ana.jpg".to_string()),
                },
                ContactRecord {
                    name: Some("Ben".to_string()),
                    ..Default::default()
                },
            ]),
        };
        let card = build_provider_card(&provider, &template(PROVIDER_TEMPLATE));

        assert_eq!(card.attr("data-category"), Some("tutoring-providers"));
        assert_eq!(card.find(&Selector::Class("provider-name")).unwrap().text_content(), "Tutor Co");
        let website = card.find(&Selector::Class("provider-website")).unwrap();
        assert_eq!(website.text_content(), "tutor.example.com");

        let contacts = card.find(&Selector::Class("provider-contacts")).unwrap();
        let rows = contacts.find_all(&Selector::Class("provider-contact"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].count(&Selector::Class("provider-contact-image")), 1);
        assert_eq!(
            rows[0].find(&Selector::Class("provider-contact-bio")).unwrap().text_content(),
            "Founder."
        );
        assert_eq!(rows[0].find(&Selector::Tag("span")).unwrap().text_content(), "ana.example.com");
        assert_eq!(rows[1].count(&Selector::Class("provider-contact-image")), 0);
        assert_eq!(rows[1].count(&Selector::Class("provider-contact-title")), 0);
        assert_eq!(rows[1].count(&Selector::Tag("a")), 0);
    }

    #[test]
    fn test_provider_without_website_clears_container() {
        let card = build_provider_card(&ProviderRecord::default(), &template(PROVIDER_TEMPLATE));
        let website = card.find(&Selector::Class("provider-website")).unwrap();
        assert!(website.children.is_empty());
        let logo = card.find(&Selector::Class("provider-logo")).unwrap();
        assert_eq!(logo.attr("alt"), Some(""));
    }

    #[test]
    fn test_provider_contacts_kept_unless_list_given() {
        let tpl = template(PROVIDER_TEMPLATE);

        let untouched = build_provider_card(&ProviderRecord::default(), &tpl);
        let contacts = untouched.find(&Selector::Class("provider-contacts")).unwrap();
        assert_eq!(contacts.text_content(), "old");

        let emptied = build_provider_card(
            &ProviderRecord {
                contacts: Some(vec![]),
                ..Default::default()
            },
            &tpl,
        );
        let contacts = emptied.find(&Selector::Class("provider-contacts")).unwrap();
        assert!(contacts.children.is_empty());
    }
}
