//! Phrasing content held by table cells and paragraphs
//!
//! The table codec never looks inside these nodes except to find inline
//! code, whose value follows table-specific escaping rules.

use super::position::Position;

/// An inline node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text
    Text {
        value: String,
        position: Option<Position>,
    },
    /// `*emphasis*`
    Emphasis {
        children: Vec<Inline>,
        position: Option<Position>,
    },
    /// `**strong**`
    Strong {
        children: Vec<Inline>,
        position: Option<Position>,
    },
    /// `` `code` ``
    InlineCode {
        value: String,
        position: Option<Position>,
    },
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text {
            value: value.into(),
            position: None,
        }
    }

    pub fn emphasis(children: Vec<Inline>) -> Self {
        Inline::Emphasis {
            children,
            position: None,
        }
    }

    pub fn strong(children: Vec<Inline>) -> Self {
        Inline::Strong {
            children,
            position: None,
        }
    }

    pub fn code(value: impl Into<String>) -> Self {
        Inline::InlineCode {
            value: value.into(),
            position: None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Inline::Text { position, .. }
            | Inline::Emphasis { position, .. }
            | Inline::Strong { position, .. }
            | Inline::InlineCode { position, .. } => *position,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Inline::InlineCode { .. })
    }

    /// Drop positions from this node and its descendants
    pub fn strip_positions(&mut self) {
        match self {
            Inline::Text { position, .. } | Inline::InlineCode { position, .. } => {
                *position = None;
            }
            Inline::Emphasis { children, position } | Inline::Strong { children, position } => {
                *position = None;
                children.iter_mut().for_each(Inline::strip_positions);
            }
        }
    }

    /// Apply `f` to every inline code value in this subtree
    pub fn map_code_values(&mut self, f: &impl Fn(&str) -> String) {
        match self {
            Inline::InlineCode { value, .. } => *value = f(value),
            Inline::Emphasis { children, .. } | Inline::Strong { children, .. } => {
                for child in children {
                    child.map_code_values(f);
                }
            }
            Inline::Text { .. } => {}
        }
    }
}
