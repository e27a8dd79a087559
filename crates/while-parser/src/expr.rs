//! Expression parsing.
//! Every operator consumes a fixed arity read positionally — there is no
//! precedence climbing to do. The one genuine ambiguity is `=`, which is
//! parsed as a second pass over an already-parsed operand so it can never
//! be confused with the delimited forms (`cons`/`hd`/`tl` arguments,
//! list/tree-expr slots) that call `parse_operand` directly instead.

use while_ast::{Expr, Op, OpKind, Symbol, TokenKind};
use while_tree::Tree;

use crate::messages;
use crate::parser::Parser;

impl Parser {
    /// `expression ::= ... | expression '=' expression` at the top, with
    /// everything else delegated to [`Parser::parse_operand`].
    pub(crate) fn parse_expression(&mut self) -> Expr {
        let left = self.parse_operand();
        if !self.pure_only && self.state.eat_symbol(Symbol::Equals) {
            let right = self.parse_expression();
            let complete = left.is_complete() && right.is_complete();
            let span = left.span().merge(right.span());
            Expr::Equal { left: Box::new(left), right: Box::new(right), complete, span }
        } else {
            left
        }
    }

    fn parse_operand(&mut self) -> Expr {
        let token = self.state.peek().clone();
        match &token.kind {
            TokenKind::Identifier(name) if name == "nil" => {
                self.state.bump();
                Expr::TreeLiteral { value: Tree::Nil, span: token.span }
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.state.bump();
                Expr::Ident { name, span: token.span }
            }
            TokenKind::Number(n) if !self.pure_only => {
                let n = *n;
                self.state.bump();
                Expr::TreeLiteral { value: Tree::encode_nat(n), span: token.span }
            }
            TokenKind::Op(Op::True) if !self.pure_only => {
                self.state.bump();
                Expr::TreeLiteral { value: Tree::encode_bool(true), span: token.span }
            }
            TokenKind::Op(Op::False) if !self.pure_only => {
                self.state.bump();
                Expr::TreeLiteral { value: Tree::encode_bool(false), span: token.span }
            }
            TokenKind::Op(Op::Cons) => self.parse_op(OpKind::Cons),
            TokenKind::Op(Op::Hd) => self.parse_op(OpKind::Hd),
            TokenKind::Op(Op::Tl) => self.parse_op(OpKind::Tl),
            TokenKind::Symbol(Symbol::LParen) => self.parse_paren(),
            TokenKind::Symbol(Symbol::LBracket) if !self.pure_only => self.parse_list(),
            TokenKind::Symbol(Symbol::LAngle) if !self.pure_only => self.parse_angle(),
            _ => {
                self.state.emit(messages::expected_expression_or_identifier(&token));
                Expr::Missing { span: token.span }
            }
        }
    }

    fn parse_op(&mut self, kind: OpKind) -> Expr {
        let start = self.state.bump().span; // the op keyword itself
        let mut args = Vec::with_capacity(kind.arity());
        for _ in 0..kind.arity() {
            args.push(self.parse_operand());
        }
        let complete = args.iter().all(Expr::is_complete);
        let span = start.merge(self.state.prev_span());
        Expr::Op { kind, args, complete, span }
    }

    fn parse_paren(&mut self) -> Expr {
        let start = self.state.bump().span; // '('
        let inner = self.parse_expression();
        let closed = self.state.expect_symbol(Symbol::RParen, |t| messages::unexpected_token(t, ")"));
        let span = start.merge(self.state.prev_span());
        // The parenthesised form is transparent: it exists only to let the
        // operand grammar accept a nested full expression, so the AST
        // keeps the inner node but widens its span and completeness to
        // cover the parentheses.
        rewrap(inner, span, closed)
    }

    /// `*'[' (expression (',' expression)*)? ']'`.
    fn parse_list(&mut self) -> Expr {
        let start = self.state.bump().span; // '['
        let mut elements = Vec::new();
        let mut complete = true;
        if !matches!(self.state.peek().kind, TokenKind::Symbol(Symbol::RBracket)) {
            loop {
                let element = self.parse_expression();
                complete &= element.is_complete();
                elements.push(element);
                if !self.state.eat_symbol(Symbol::Comma) {
                    break;
                }
            }
        }
        let closed = self.state.expect_symbol(Symbol::RBracket, |t| messages::unexpected_token(t, "]"));
        complete &= closed;
        let span = start.merge(self.state.prev_span());
        Expr::List { elements, complete, span }
    }

    /// `*'<' expression '.' expression '>'` or `*'<' name '>' expression`.
    /// The two are distinguished by a 2-token lookahead: `< IDENT >` with
    /// nothing else in between is unambiguously a macro call, since a
    /// tree-expression always has a `.` before its closing `>`.
    fn parse_angle(&mut self) -> Expr {
        let start = self.state.bump().span; // '<'

        let is_macro_call = matches!(&self.state.peek().kind, TokenKind::Identifier(_))
            && matches!(self.state.peek_at(1).kind, TokenKind::Symbol(Symbol::RAngle));

        if is_macro_call {
            let program_name = match &self.state.peek().kind {
                TokenKind::Identifier(name) => name.clone(),
                _ => unreachable!("checked above"),
            };
            self.state.bump();
            self.state.bump(); // '>'
            let input = self.parse_operand();
            let complete = input.is_complete();
            let span = start.merge(self.state.prev_span());
            return Expr::MacroCall { program_name, input: Box::new(input), complete, span };
        }

        let left = self.parse_operand();
        let got_dot = self.state.expect_symbol(Symbol::Dot, |t| messages::unexpected_token(t, "."));
        let right = self.parse_operand();
        let closed = self.state.expect_symbol(Symbol::RAngle, |t| messages::unexpected_token(t, ">"));
        let complete = left.is_complete() && got_dot && right.is_complete() && closed;
        let span = start.merge(self.state.prev_span());
        Expr::TreeExpr { left: Box::new(left), right: Box::new(right), complete, span }
    }
}

/// `'(' expression ')'` is not its own AST node (the grammar only uses it
/// to let a single operand position accept a nested full expression) so we
/// splice the wrapped span/completeness back into whichever variant came
/// out of the inner parse rather than introducing a `Paren` variant.
fn rewrap(inner: Expr, span: while_span::Span, closed: bool) -> Expr {
    match inner {
        Expr::Ident { name, .. } => Expr::Ident { name, span },
        Expr::Op { kind, args, complete, .. } => Expr::Op { kind, args, complete: complete && closed, span },
        Expr::TreeLiteral { value, .. } => Expr::TreeLiteral { value, span },
        Expr::Equal { left, right, complete, .. } => Expr::Equal { left, right, complete: complete && closed, span },
        Expr::List { elements, complete, .. } => Expr::List { elements, complete: complete && closed, span },
        Expr::TreeExpr { left, right, complete, .. } => Expr::TreeExpr { left, right, complete: complete && closed, span },
        Expr::MacroCall { program_name, input, complete, .. } => {
            Expr::MacroCall { program_name, input, complete: complete && closed, span }
        }
        Expr::Missing { .. } => Expr::Missing { span },
    }
}
