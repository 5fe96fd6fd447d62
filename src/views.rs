//! Render-ready views of the three page types.
//!
//! | View | Page | Built from |
//! |------|------|------------|
//! | [`catalog`] | site root: carousel of case cards | children of the root |
//! | [`ficha`] | case page: summary, video, documents | case node + its questions |
//! | [`question`] | question page: statement + pagination strip | question node + case context |
//!
//! Views are plain data. Turning them into markup is the renderer's job.

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::documents;
use crate::navigator::{self, CaseContext, NavError, NavigationState, PageLink};
use crate::tree::PageTree;
use crate::types::{DocumentDescriptor, NodeId, fields};
use serde::Serialize;

/// One card of the case carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    pub id: NodeId,
    pub title: String,
    pub question_count: usize,
    /// First question, where the card links to. `None` for an empty case.
    pub first_question: Option<NodeId>,
}

/// The case page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ficha {
    pub case_id: NodeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Player URL for the modal video, if the case has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_embed: Option<String>,
    pub documents: Vec<DocumentDescriptor>,
    pub questions: CaseContext,
}

/// A question page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub case_id: NodeId,
    pub case_title: String,
    pub id: NodeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference for the interactive-question embed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<String>,
    pub navigation: NavigationState,
    pub pages: Vec<PageLink>,
}

/// The slice of case cards a carousel currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselPage {
    /// Index of the first visible card.
    pub index: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub cards: Vec<CaseSummary>,
}

/// Cut the cards visible at the carousel's position.
pub fn carousel_page(cards: &[CaseSummary], carousel: &Carousel) -> CarouselPage {
    let visible = carousel.visible();
    CarouselPage {
        index: carousel.index(),
        total: cards.len(),
        has_prev: carousel.has_prev(),
        has_next: carousel.has_next(),
        cards: cards.get(visible).map(<[CaseSummary]>::to_vec).unwrap_or_default(),
    }
}

/// Ordered case cards under the site root.
pub fn catalog<T: PageTree + ?Sized>(tree: &T, root_id: NodeId) -> Result<Vec<CaseSummary>, NavError> {
    if tree.get_node(root_id).is_none() {
        return Err(NavError::RootNotFound(root_id));
    }
    let cases = navigator::build(tree, root_id)?;
    cases
        .question_ids
        .iter()
        .map(|&case_id| -> Result<CaseSummary, NavError> {
            let node = tree.get_node(case_id).ok_or(NavError::NotFound(case_id))?;
            let questions = navigator::build(tree, case_id)?;
            Ok(CaseSummary {
                id: case_id,
                title: node.title,
                question_count: questions.len(),
                first_question: questions.first(),
            })
        })
        .collect()
}

/// The case page: ficha text, video player URL, documents and question list.
pub fn ficha<T: PageTree + ?Sized>(
    tree: &T,
    case_id: NodeId,
    config: &SiteConfig,
) -> Result<Ficha, NavError> {
    let node = tree.get_node(case_id).ok_or(NavError::NotFound(case_id))?;
    let questions = navigator::build(tree, case_id)?;
    let documents = documents::documents_of(tree, case_id, &config.documents);

    Ok(Ficha {
        case_id,
        description: node.text_field(fields::DESCRIPTION).map(String::from),
        video_embed: node.text_field(fields::VIDEO).map(embed_url),
        title: node.title,
        documents,
        questions,
    })
}

/// The resolved document list of an existing case.
pub fn documents<T: PageTree + ?Sized>(
    tree: &T,
    case_id: NodeId,
    config: &SiteConfig,
) -> Result<Vec<DocumentDescriptor>, NavError> {
    if tree.get_node(case_id).is_none() {
        return Err(NavError::NotFound(case_id));
    }
    Ok(documents::documents_of(tree, case_id, &config.documents))
}

/// A question page inside its case.
///
/// A question that does not belong to the case still renders: its
/// navigation is `NotFound` and no page in the strip is active.
pub fn question<T: PageTree + ?Sized>(
    tree: &T,
    case_id: NodeId,
    question_id: NodeId,
) -> Result<QuestionView, NavError> {
    let case = tree.get_node(case_id).ok_or(NavError::NotFound(case_id))?;
    let node = tree
        .get_node(question_id)
        .ok_or(NavError::QuestionNotFound(question_id))?;
    let (context, navigation) = navigator::navigate(tree, case_id, question_id)?;

    Ok(QuestionView {
        case_id,
        case_title: case.title,
        id: question_id,
        description: node.text_field(fields::DESCRIPTION).map(String::from),
        embed: node.text_field(fields::EMBED).map(String::from),
        title: node.title,
        navigation,
        pages: navigator::pagination(&context, question_id),
    })
}

/// Rewrite a video page URL into its embeddable player URL.
///
/// - `https://www.youtube.com/watch?v=ID&t=1` → `https://www.youtube.com/embed/ID`
/// - `https://youtu.be/ID?si=x` → `https://www.youtube.com/embed/ID`
/// - `https://vimeo.com/123` → `https://player.vimeo.com/video/123`
/// - anything else (including URLs already in embed form) is returned trimmed
pub fn embed_url(url: &str) -> String {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    if let Some(query) = rest
        .strip_prefix("youtube.com/watch?")
        .or_else(|| rest.strip_prefix("m.youtube.com/watch?"))
        && let Some(id) = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .filter(|id| !id.is_empty())
    {
        return format!("https://www.youtube.com/embed/{id}");
    }

    if let Some(path) = rest.strip_prefix("youtu.be/") {
        let id = path.split(['?', '&', '/']).next().unwrap_or_default();
        if !id.is_empty() {
            return format!("https://www.youtube.com/embed/{id}");
        }
    }

    if let Some(path) = rest.strip_prefix("vimeo.com/") {
        let id = path.split(['?', '/']).next().unwrap_or_default();
        if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
            return format!("https://player.vimeo.com/video/{id}");
        }
    }

    url.to_string()
}
