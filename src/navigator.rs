//! Case → question navigation.
//!
//! A case page owns an ordered run of question pages. Navigation is derived
//! fresh on every call from the tree's current snapshot:
//!
//! ```text
//! build(tree, case)         → CaseContext { case_id, question_ids }
//! locate(&context, current) → NavigationState::Found { position, prev, next }
//!                           | NavigationState::NotFound
//! pagination(&context, cur) → [PageLink { number, active }, ...]
//! ```
//!
//! Ordering is by `sort_order`, then by id, so siblings that share a sort
//! order still come out in a stable sequence.
//!
//! A question that does not belong to the case is not an error for
//! rendering: [`locate`] returns [`NavigationState::NotFound`], which reports
//! no previous and no next page. [`locate_strict`] surfaces the same
//! situation as [`NavError::InvalidState`] for callers that want it.

use crate::tree::PageTree;
use crate::types::NodeId;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavError {
    #[error("Case not found: {0}")]
    NotFound(NodeId),
    #[error("Question not found: {0}")]
    QuestionNotFound(NodeId),
    #[error("Site root not found: {0}")]
    RootNotFound(NodeId),
    #[error("Question {current} does not belong to case {case}")]
    InvalidState { case: NodeId, current: NodeId },
}

/// Ordered questions of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseContext {
    pub case_id: NodeId,
    pub question_ids: Vec<NodeId>,
}

impl CaseContext {
    pub fn len(&self) -> usize {
        self.question_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.question_ids.is_empty()
    }

    /// First question, the landing target of a case page.
    pub fn first(&self) -> Option<NodeId> {
        self.question_ids.first().copied()
    }
}

/// Where the current question sits inside its case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NavigationState {
    Found {
        current_id: NodeId,
        position: usize,
        prev: Option<NodeId>,
        next: Option<NodeId>,
    },
    NotFound {
        current_id: NodeId,
    },
}

impl NavigationState {
    pub fn current_id(&self) -> NodeId {
        match self {
            NavigationState::Found { current_id, .. } | NavigationState::NotFound { current_id } => {
                *current_id
            }
        }
    }

    /// 0-based position, or `None` when the question is not part of the case.
    pub fn position(&self) -> Option<usize> {
        match self {
            NavigationState::Found { position, .. } => Some(*position),
            NavigationState::NotFound { .. } => None,
        }
    }

    /// Position with `-1` standing in for "not found", for renderers that
    /// only deal in integers.
    pub fn position_or_sentinel(&self) -> i64 {
        self.position().map_or(-1, |p| p as i64)
    }

    pub fn prev(&self) -> Option<NodeId> {
        match self {
            NavigationState::Found { prev, .. } => *prev,
            NavigationState::NotFound { .. } => None,
        }
    }

    pub fn next(&self) -> Option<NodeId> {
        match self {
            NavigationState::Found { next, .. } => *next,
            NavigationState::NotFound { .. } => None,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.prev().is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next().is_some()
    }

    pub fn is_found(&self) -> bool {
        matches!(self, NavigationState::Found { .. })
    }
}

/// One entry of the question pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub id: NodeId,
    /// 1-based label shown in the strip.
    pub number: usize,
    pub active: bool,
}

/// Collect the ordered questions of `case_id`.
///
/// Every direct child of the case is included exactly once, sorted by
/// `(sort_order, id)`.
pub fn build<T: PageTree + ?Sized>(tree: &T, case_id: NodeId) -> Result<CaseContext, NavError> {
    if tree.get_node(case_id).is_none() {
        return Err(NavError::NotFound(case_id));
    }

    let mut children = tree.get_children(case_id);
    children.sort_by_key(|n| (n.sort_order, n.id));
    let mut question_ids: Vec<NodeId> = children.into_iter().map(|n| n.id).collect();
    // A store that reports a child twice must not produce a repeated page.
    question_ids.dedup();

    debug!(case = %case_id, questions = question_ids.len(), "built case context");
    Ok(CaseContext {
        case_id,
        question_ids,
    })
}

/// Find `current_id` among the case's questions.
pub fn locate(context: &CaseContext, current_id: NodeId) -> NavigationState {
    match context.question_ids.iter().position(|&id| id == current_id) {
        Some(position) => NavigationState::Found {
            current_id,
            position,
            prev: position
                .checked_sub(1)
                .map(|p| context.question_ids[p]),
            next: context.question_ids.get(position + 1).copied(),
        },
        None => {
            debug!(case = %context.case_id, current = %current_id, "question not in case");
            NavigationState::NotFound { current_id }
        }
    }
}

/// Like [`locate`], but a question outside the case is an error.
pub fn locate_strict(context: &CaseContext, current_id: NodeId) -> Result<NavigationState, NavError> {
    match locate(context, current_id) {
        NavigationState::NotFound { .. } => Err(NavError::InvalidState {
            case: context.case_id,
            current: current_id,
        }),
        found => Ok(found),
    }
}

/// Build and locate in one step. Only a missing case is an error.
pub fn navigate<T: PageTree + ?Sized>(
    tree: &T,
    case_id: NodeId,
    current_id: NodeId,
) -> Result<(CaseContext, NavigationState), NavError> {
    let context = build(tree, case_id)?;
    let state = locate(&context, current_id);
    Ok((context, state))
}

/// The numbered question strip with the current question highlighted.
///
/// At most one link is active; none when `current_id` is not in the case.
pub fn pagination(context: &CaseContext, current_id: NodeId) -> Vec<PageLink> {
    context
        .question_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| PageLink {
            id,
            number: i + 1,
            active: id == current_id,
        })
        .collect()
}
