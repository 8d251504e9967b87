//! Enumerations shared by DTOs and entities.
//!
//! All of them travel as their declared variant names so payloads stay stable
//! when variants are added.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Lifecycle status of reviews, objectives, tasks and comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    #[default]
    Open,
    Closed,
    Done,
}

/// Kind of review objective (phase of the review).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewObjectiveKind {
    #[default]
    Prr,
    Srr,
}

/// Model view a comment was made from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    #[default]
    None,
    BudgetView,
    ProductBreakdownStructureView,
    RequirementBreakdownStructureView,
    InterfaceView,
    DocumentBased,
}

/// Permission granted to a participant through its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessRight {
    CreateReview,
    DeleteReview,
    CreateReviewObjective,
    DeleteReviewObjective,
    CreateReviewTask,
    DeleteReviewTask,
    AssignTask,
    ReviewTask,
    CreateComment,
    ReplyComment,
}

impl AccessRight {
    pub const ALL: [AccessRight; 10] = [
        AccessRight::CreateReview,
        AccessRight::DeleteReview,
        AccessRight::CreateReviewObjective,
        AccessRight::DeleteReviewObjective,
        AccessRight::CreateReviewTask,
        AccessRight::DeleteReviewTask,
        AccessRight::AssignTask,
        AccessRight::ReviewTask,
        AccessRight::CreateComment,
        AccessRight::ReplyComment,
    ];

    /// Human-readable label, e.g. `"Create review objective"`.
    pub fn display_name(self) -> &'static str {
        ACCESS_RIGHT_NAMES
            .get(&self)
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl ReviewObjectiveKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ReviewObjectiveKind::Prr => "PRR",
            ReviewObjectiveKind::Srr => "SRR",
        }
    }
}

impl View {
    pub const ALL: [View; 6] = [
        View::None,
        View::BudgetView,
        View::ProductBreakdownStructureView,
        View::RequirementBreakdownStructureView,
        View::InterfaceView,
        View::DocumentBased,
    ];

    pub fn display_name(self) -> &'static str {
        VIEW_NAMES.get(&self).map(String::as_str).unwrap_or("")
    }
}

// Built once on first use, read-only afterwards.
static ACCESS_RIGHT_NAMES: LazyLock<HashMap<AccessRight, String>> = LazyLock::new(|| {
    AccessRight::ALL
        .into_iter()
        .map(|r| (r, split_words(&format!("{r:?}"))))
        .collect()
});

static VIEW_NAMES: LazyLock<HashMap<View, String>> = LazyLock::new(|| {
    View::ALL
        .into_iter()
        .map(|v| (v, split_words(&format!("{v:?}"))))
        .collect()
});

/// `"CreateReviewObjective"` -> `"Create review objective"`.
fn split_words(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
