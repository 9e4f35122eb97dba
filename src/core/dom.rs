//! Owned HTML tree standing in for the browser DOM.
//!
//! Markup is parsed with `scraper` and converted into plain [`Element`] /
//! [`Node`] values. `Clone` is a deep copy, so a template stamped into many
//! cards never shares state with them.

use scraper::{ElementRef, Html};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// The subset of CSS selectors the site scripts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Tag(&'a str),
    Class(&'a str),
    TagClass(&'a str, &'a str),
    Id(&'a str),
}

impl Selector<'_> {
    pub fn matches(&self, el: &Element) -> bool {
        match *self {
            Selector::Tag(tag) => el.tag.eq_ignore_ascii_case(tag),
            Selector::Class(class) => el.has_class(class),
            Selector::TagClass(tag, class) => el.tag.eq_ignore_ascii_case(tag) && el.has_class(class),
            Selector::Id(id) => el.attr("id") == Some(id),
        }
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = kept.join(" ");
        self.set_attr("class", &joined);
    }

    /// Replaces all children with a single text node, like `textContent = …`.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn style_property(&self, property: &str) -> Option<String> {
        self.style_declarations()
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Sets one inline style property, or removes it when `value` is `None`.
    pub fn set_style_property(&mut self, property: &str, value: Option<&str>) {
        let mut declarations = self.style_declarations();
        declarations.retain(|(name, _)| name != property);
        if let Some(value) = value {
            declarations.push((property.to_string(), value.to_string()));
        }

        if declarations.is_empty() {
            self.remove_attr("style");
        } else {
            let style = declarations
                .iter()
                .map(|(name, value)| format!("{}: {};", name, value))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("style", &style);
        }
    }

    fn style_declarations(&self) -> Vec<(String, String)> {
        self.attr("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_ascii_lowercase(), value.trim().to_string()))
            })
            .collect()
    }

    pub fn hide(&mut self) {
        self.set_style_property("display", Some("none"));
    }

    pub fn show(&mut self) {
        self.set_style_property("display", None);
    }

    pub fn is_hidden(&self) -> bool {
        self.style_property("display").as_deref() == Some("none")
    }

    /// Child-index path to the first descendant (pre-order) satisfying `pred`.
    pub fn path_where(&self, pred: &dyn Fn(&Element) -> bool) -> Option<Vec<usize>> {
        for (i, child) in self.children.iter().enumerate() {
            if let Node::Element(el) = child {
                if pred(el) {
                    return Some(vec![i]);
                }
                if let Some(mut path) = el.path_where(pred) {
                    path.insert(0, i);
                    return Some(path);
                }
            }
        }
        None
    }

    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        match path.split_first() {
            None => Some(self),
            Some((&idx, rest)) => self.children.get(idx)?.as_element()?.element_at(rest),
        }
    }

    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        match path.split_first() {
            None => Some(self),
            Some((&idx, rest)) => self
                .children
                .get_mut(idx)?
                .as_element_mut()?
                .element_at_mut(rest),
        }
    }

    /// First matching descendant, like `querySelector`. The element itself is not considered.
    pub fn find(&self, selector: &Selector<'_>) -> Option<&Element> {
        let path = self.path_where(&|el: &Element| selector.matches(el))?;
        self.element_at(&path)
    }

    pub fn find_mut(&mut self, selector: &Selector<'_>) -> Option<&mut Element> {
        let path = self.path_where(&|el: &Element| selector.matches(el))?;
        self.element_at_mut(&path)
    }

    pub fn find_all(&self, selector: &Selector<'_>) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_matches(selector, &mut found);
        found
    }

    fn collect_matches<'s>(&'s self, selector: &Selector<'_>, found: &mut Vec<&'s Element>) {
        for el in self.element_children() {
            if selector.matches(el) {
                found.push(el);
            }
            el.collect_matches(selector, found);
        }
    }

    pub fn count(&self, selector: &Selector<'_>) -> usize {
        self.find_all(selector).len()
    }

    /// Applies `f` to every matching descendant, in document order.
    pub fn for_each_mut(&mut self, selector: &Selector<'_>, f: &mut dyn FnMut(&mut Element)) {
        for child in self.children.iter_mut() {
            if let Node::Element(el) = child {
                if selector.matches(el) {
                    f(el);
                }
                el.for_each_mut(selector, f);
            }
        }
    }

    /// `querySelector(anchor).nextElementSibling`.
    pub fn next_sibling_of_mut(&mut self, anchor: &Selector<'_>) -> Option<&mut Element> {
        let mut path = self.path_where(&|el: &Element| anchor.matches(el))?;
        let anchor_idx = path.pop()?;
        let parent = self.element_at(&path)?;
        let sibling_idx = parent
            .children
            .iter()
            .enumerate()
            .skip(anchor_idx + 1)
            .find(|(_, node)| node.as_element().is_some())
            .map(|(i, _)| i)?;
        path.push(sibling_idx);
        self.element_at_mut(&path)
    }

    /// `querySelector(target).closest(ancestor)`: the nearest element matching
    /// `ancestor` on the way from the first `target` match up to (not including) `self`.
    pub fn closest_mut(
        &mut self,
        target: &Selector<'_>,
        ancestor: &Selector<'_>,
    ) -> Option<&mut Element> {
        let mut path = self.path_where(&|el: &Element| target.matches(el))?;
        while !path.is_empty() {
            if self.element_at(&path).is_some_and(|el| ancestor.matches(el)) {
                return self.element_at_mut(&path);
            }
            path.pop();
        }
        None
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        let raw = RAW_TEXT_ELEMENTS.contains(&self.tag.as_str());
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) if raw => out.push_str(text),
                Node::Text(text) => escape_into(text, false, out),
                Node::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Element(_) => ElementRef::wrap(child).map(|el| Node::Element(convert_element(el))),
            scraper::Node::Text(text) => Some(Node::Text(text.text.to_string())),
            scraper::Node::Comment(comment) => Some(Node::Comment(comment.comment.to_string())),
            _ => None,
        })
        .collect()
}

fn convert_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    Element {
        tag: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(name, v)| (name.to_string(), v.to_string()))
            .collect(),
        children: convert_children(el),
    }
}

/// Parses markup as the content of a container (`innerHTML = …`).
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let html = Html::parse_fragment(markup);
    convert_children(html.root_element())
}

/// Parses markup and keeps its first element, the way the loaders use
/// `wrapper.firstElementChild`.
pub fn parse_first_element(markup: &str) -> Option<Element> {
    parse_fragment(markup.trim())
        .into_iter()
        .find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
}

/// A full host page.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        Self {
            root: convert_element(html.root_element()),
        }
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        if Selector::Id(id).matches(&self.root) {
            return Some(&self.root);
        }
        self.root.find(&Selector::Id(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if Selector::Id(id).matches(&self.root) {
            return Some(&mut self.root);
        }
        self.root.find_mut(&Selector::Id(id))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        self.root.write_html(&mut out);
        out
    }
}
