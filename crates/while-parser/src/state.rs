//! A positioned token queue with single-token lookahead, following the
//! shape of `ParserContext` (`compiler/parser/src/parser/context.rs`):
//! `peek`/`next`/`expect(kind)` plus a `prev` span for building up spans as
//! parsing proceeds. Unlike `ParserContext`, `expect_*` here never consumes
//! a token that fails to match — the caller decides whether to recover —
//! since WHILE parsing must keep going past every error rather than bail
//! out through a `Handler`.

use while_ast::{Keyword, Symbol, Token, TokenKind};
use while_errors::{Diagnostic, DiagnosticReport};
use while_span::Span;

pub struct StateManager {
    tokens: Vec<Token>,
    pos: usize,
    prev_span: Span,
    diagnostics: DiagnosticReport,
}

impl StateManager {
    /// `tokens` must end with a `TokenKind::Eof` sentinel (as produced by
    /// `while_lexer::lex`), so lookahead never needs special-case bounds
    /// checks.
    pub fn new(tokens: Vec<Token>) -> Self {
        assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "StateManager requires a trailing Eof token"
        );
        let first_span = tokens[0].span;
        Self { tokens, pos: 0, prev_span: Span::at(first_span.start), diagnostics: DiagnosticReport::new() }
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or_else(|| self.tokens.last().expect("non-empty"))
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// The span of the most recently consumed token; `start` of the first
    /// token before anything has been consumed. Used to build up a node's
    /// span as its parts are parsed.
    pub fn prev_span(&self) -> Span {
        self.prev_span
    }

    /// Advances past the current token and returns it. A no-op at `Eof` —
    /// callers must check `is_eof` before relying on forward progress.
    pub fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        self.prev_span = token.span;
        token
    }

    pub fn eat_symbol(&mut self, symbol: Symbol) -> bool {
        if matches!(&self.peek().kind, TokenKind::Symbol(s) if *s == symbol) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if matches!(&self.peek().kind, TokenKind::Keyword(k) if *k == keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes and returns the current token's symbol, or emits
    /// `on_missing` and leaves the cursor in place.
    pub fn expect_symbol(&mut self, symbol: Symbol, on_missing: impl FnOnce(&Token) -> Diagnostic) -> bool {
        if self.eat_symbol(symbol) {
            true
        } else {
            self.emit(on_missing(self.peek()));
            false
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword, on_missing: impl FnOnce(&Token) -> Diagnostic) -> bool {
        if self.eat_keyword(keyword) {
            true
        } else {
            self.emit(on_missing(self.peek()));
            false
        }
    }

    pub fn expect_identifier(&mut self, on_missing: impl FnOnce(&Token) -> Diagnostic) -> Option<String> {
        if let TokenKind::Identifier(name) = &self.peek().kind {
            let name = name.clone();
            self.bump();
            Some(name)
        } else {
            self.emit(on_missing(self.peek()));
            None
        }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.emit(diagnostic);
    }

    /// Synchronises after an error within a command by consuming tokens up
    /// to (but not including) the next `;` or `}`, whichever comes first
    ///.
    pub fn consume_until_sync(&mut self) {
        while !self.is_eof() {
            if matches!(&self.peek().kind, TokenKind::Symbol(Symbol::Semicolon) | TokenKind::Symbol(Symbol::RBrace)) {
                break;
            }
            self.bump();
        }
    }

    pub fn into_diagnostics(self) -> DiagnosticReport {
        self.diagnostics
    }
}
