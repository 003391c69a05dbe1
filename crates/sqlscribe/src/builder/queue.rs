//! Ordered clause queues.

/// Role of a token inside its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A list item (projection column, join, group/order key).
    Item,
    /// A complete boolean operand.
    Condition,
    And,
    Or,
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClauseToken {
    pub(crate) kind: TokenKind,
    pub(crate) text: String,
}

/// Append-only token sequence for one clause category.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClauseQueue {
    tokens: Vec<ClauseToken>,
}

impl ClauseQueue {
    pub(crate) fn push(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens.push(ClauseToken {
            kind,
            text: text.into(),
        });
    }

    pub(crate) fn push_item(&mut self, text: impl Into<String>) {
        self.push(TokenKind::Item, text);
    }

    pub(crate) fn push_condition(&mut self, text: impl Into<String>) {
        self.push(TokenKind::Condition, text);
    }

    pub(crate) fn clear(&mut self) {
        self.tokens.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    pub(crate) fn texts(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.text.as_str())
    }

    /// Item texts joined with `sep`.
    pub(crate) fn join(&self, sep: &str) -> String {
        self.texts().collect::<Vec<_>>().join(sep)
    }

    /// Boolean rendering: tokens separated by single spaces, no padding inside
    /// parentheses, and `AND` between two operands that have no connective.
    pub(crate) fn render_conditions(&self) -> String {
        let mut out = String::new();
        let mut prev: Option<TokenKind> = None;

        for token in &self.tokens {
            let starts_operand = matches!(token.kind, TokenKind::Condition | TokenKind::Open);
            let ends_operand = matches!(prev, Some(TokenKind::Condition | TokenKind::Close));

            if starts_operand && ends_operand {
                out.push_str(" AND ");
            } else if prev.is_some_and(|p| p != TokenKind::Open) && token.kind != TokenKind::Close {
                out.push(' ');
            }
            out.push_str(&token.text);
            prev = Some(token.kind);
        }
        out
    }
}
