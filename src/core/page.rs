use crate::core::dom::{Document, Node};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// A host page being rendered, shared by every collaborator that fills it.
///
/// Each container carries a render generation. Starting a render clears the
/// container and bumps its generation; a render may only append while its
/// generation is still the newest, so an older, slower render of the same
/// container cannot interleave with a newer one.
pub struct Page {
    name: String,
    state: Mutex<PageState>,
}

struct PageState {
    document: Document,
    generations: HashMap<String, u64>,
}

/// Proof that a render started on a container; compared on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderToken(u64);

impl Page {
    pub fn new(name: impl Into<String>, document: Document) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(PageState {
                document,
                generations: HashMap::new(),
            }),
        }
    }

    pub fn parse(name: impl Into<String>, markup: &str) -> Self {
        Self::new(name, Document::parse(markup))
    }

    /// File name of the page, e.g. `team.html`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state.document)
    }

    pub async fn has_element(&self, id: &str) -> bool {
        self.with_document(|doc| doc.element_by_id(id).is_some()).await
    }

    /// Clears the container and starts a new generation for it. `None` when
    /// the page has no such container.
    pub async fn begin_render(&self, container_id: &str) -> Option<RenderToken> {
        let mut state = self.state.lock().await;
        state.document.element_by_id_mut(container_id)?.clear_children();

        let generation = state.generations.entry(container_id.to_string()).or_insert(0);
        *generation += 1;
        Some(RenderToken(*generation))
    }

    /// Appends `nodes` if `token` is still the container's newest render.
    pub async fn commit_render(
        &self,
        container_id: &str,
        token: RenderToken,
        nodes: Vec<Node>,
    ) -> bool {
        let mut state = self.state.lock().await;
        if state.generations.get(container_id).copied() != Some(token.0) {
            return false;
        }
        match state.document.element_by_id_mut(container_id) {
            Some(container) => {
                container.children.extend(nodes);
                true
            }
            None => false,
        }
    }

    pub async fn to_html(&self) -> String {
        self.with_document(|doc| doc.to_html()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Element;

    fn page() -> Page {
        Page::parse(
            "index.html",
            r#"<html><body><div id="partners-grid"><p>old</p></div></body></html>"#,
        )
    }

    fn card(text: &str) -> Vec<Node> {
        vec![Element::new("div").with_text(text).into()]
    }

    #[tokio::test]
    async fn test_begin_render_clears_container() {
        let page = page();
        assert!(page.begin_render("partners-grid").await.is_some());
        let html = page.to_html().await;
        assert!(html.contains(r#"<div id="partners-grid"></div>"#));
    }

    #[tokio::test]
    async fn test_missing_container_has_no_token() {
        assert!(page().begin_render("events-container").await.is_none());
    }

    #[tokio::test]
    async fn test_stale_commit_is_discarded() {
        let page = page();
        let first = page.begin_render("partners-grid").await.unwrap();
        let second = page.begin_render("partners-grid").await.unwrap();

        assert!(page.commit_render("partners-grid", second, card("new")).await);
        assert!(!page.commit_render("partners-grid", first, card("old")).await);

        let text = page
            .with_document(|doc| doc.element_by_id("partners-grid").unwrap().text_content())
            .await;
        assert_eq!(text, "new");
    }
}
