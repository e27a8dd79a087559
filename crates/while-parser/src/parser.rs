use while_ast::{Block, Command, Keyword, Program, Symbol, SwitchCase, TokenKind};
use while_errors::DiagnosticReport;

use crate::messages;
use crate::state::StateManager;

pub struct Parser {
    pub(crate) state: StateManager,
    pub(crate) pure_only: bool,
}

impl Parser {
    pub fn new(tokens: Vec<while_ast::Token>, pure_only: bool) -> Self {
        Self { state: StateManager::new(tokens), pure_only }
    }

    pub fn parse(mut self) -> (Program, DiagnosticReport) {
        let program = self.parse_program();
        (program, self.state.into_diagnostics())
    }

    /// `program ::= name 'read' var block 'write' var`.
    fn parse_program(&mut self) -> Program {
        let start = self.state.peek().span;

        let name = self.state.expect_identifier(messages::missing_program_name);
        let read_ok = self.state.expect_keyword(Keyword::Read, |t| messages::unexpected_token(t, "read"));
        let input_var = self.state.expect_identifier(messages::missing_input_variable);
        let body = self.parse_block();
        let write_ok = self.state.expect_keyword(Keyword::Write, |t| messages::unexpected_token(t, "write"));
        let output_var = self.state.expect_identifier(|t| messages::unexpected_token(t, "an identifier"));

        let complete =
            name.is_some() && read_ok && input_var.is_some() && body.complete && write_ok && output_var.is_some();
        let span = start.merge(self.state.prev_span());

        Program { name, input_var, body, output_var, complete, span }
    }

    /// `block ::= '{' '}' | '{' statement_list '}'`.
    pub(crate) fn parse_block(&mut self) -> Block {
        let start = self.state.peek().span;
        let opened = self.state.expect_symbol(Symbol::LBrace, |t| messages::unexpected_token(t, "{"));
        let (commands, list_complete) = if opened {
            self.parse_statement_list(is_rbrace)
        } else {
            (Vec::new(), true)
        };
        let closed = self.state.expect_symbol(Symbol::RBrace, |t| messages::unexpected_token(t, "}"));
        let span = start.merge(self.state.prev_span());
        Block::new(commands, opened && list_complete && closed, span)
    }

    /// `statement_list ::= command (';' command)*`. `stop` identifies the
    /// token kinds that legally follow the list (`}`, or `case`/`default`
    /// inside a switch body) without another command being required.
    pub(crate) fn parse_statement_list(&mut self, stop: impl Fn(&TokenKind) -> bool) -> (Vec<Command>, bool) {
        let mut commands = Vec::new();
        let mut complete = true;

        if stop(&self.state.peek().kind) || self.state.is_eof() {
            return (commands, true);
        }

        loop {
            let command = self.parse_command();
            complete &= command.is_complete();
            commands.push(command);

            if !self.state.eat_symbol(Symbol::Semicolon) {
                break;
            }
            if stop(&self.state.peek().kind) || self.state.is_eof() {
                // A trailing `;` before the closing delimiter is not
                // allowed: another command was promised but
                // none follows.
                self.state.emit(messages::expected_command(self.state.peek()));
                complete = false;
                break;
            }
        }

        (commands, complete)
    }

    fn parse_command(&mut self) -> Command {
        let command = match &self.state.peek().kind {
            TokenKind::Keyword(Keyword::If) => self.parse_cond(),
            TokenKind::Keyword(Keyword::While) => self.parse_loop(),
            TokenKind::Keyword(Keyword::Switch) if !self.pure_only => self.parse_switch(),
            _ => self.parse_assign(),
        };
        if !command.is_complete() {
            self.state.consume_until_sync();
        }
        command
    }

    fn parse_assign(&mut self) -> Command {
        let start = self.state.peek().span;
        let target = self.state.expect_identifier(|t| messages::unexpected_token(t, "an identifier"));
        let got_assign = self.state.expect_symbol(Symbol::Assign, |t| messages::unexpected_token(t, ":="));
        let value = self.parse_expression();
        let complete = target.is_some() && got_assign && value.is_complete();
        let span = start.merge(self.state.prev_span());
        Command::Assign { target, value: Some(value), complete, span }
    }

    fn parse_cond(&mut self) -> Command {
        let start = self.state.bump().span; // 'if'
        let condition = self.parse_expression();
        let then_body = self.parse_block();
        let else_body = if self.state.eat_keyword(Keyword::Else) { Some(self.parse_block()) } else { None };
        let complete = condition.is_complete() && then_body.complete && else_body.as_ref().is_none_or(|b| b.complete);
        let span = start.merge(self.state.prev_span());
        Command::Cond { condition: Some(condition), then_body, else_body, complete, span }
    }

    fn parse_loop(&mut self) -> Command {
        let start = self.state.bump().span; // 'while'
        let condition = self.parse_expression();
        let body = self.parse_block();
        let complete = condition.is_complete() && body.complete;
        let span = start.merge(self.state.prev_span());
        Command::Loop { condition: Some(condition), body, complete, span }
    }

    /// `*'switch' expression '{' rule* ('default' ':' statement_list)? '}'`
    /// (extended dialect only).
    fn parse_switch(&mut self) -> Command {
        let start = self.state.bump().span; // 'switch'
        let condition = self.parse_expression();
        let opened = self.state.expect_symbol(Symbol::LBrace, |t| messages::unexpected_token(t, "{"));

        let mut cases = Vec::new();
        let mut default_body = None;
        let mut seen_default = false;
        let mut complete = opened && condition.is_complete();

        loop {
            match &self.state.peek().kind {
                TokenKind::Keyword(Keyword::Case) => {
                    let case_start = self.state.bump().span;
                    if seen_default {
                        self.state.emit(messages::switch_default_not_last(case_start));
                        complete = false;
                    }
                    let value = self.parse_expression();
                    let got_colon = self.state.expect_symbol(Symbol::Colon, |t| messages::unexpected_token(t, ":"));
                    let (commands, list_complete) = self.parse_statement_list(is_case_boundary);
                    let body_span = case_start.merge(self.state.prev_span());
                    let mut case_complete = value.is_complete() && got_colon && list_complete;
                    if commands.is_empty() {
                        self.state.emit(messages::switch_case_empty_body(body_span));
                        case_complete = false;
                    }
                    complete &= case_complete;
                    cases.push(SwitchCase {
                        value: Some(value),
                        body: Block::new(commands, list_complete, body_span),
                        complete: case_complete,
                        span: body_span,
                    });
                }
                TokenKind::Keyword(Keyword::Default) => {
                    let default_start = self.state.bump().span;
                    seen_default = true;
                    let got_colon = self.state.expect_symbol(Symbol::Colon, |t| messages::unexpected_token(t, ":"));
                    let (commands, list_complete) = self.parse_statement_list(is_case_boundary);
                    let body_span = default_start.merge(self.state.prev_span());
                    complete &= got_colon && list_complete;
                    default_body = Some(Block::new(commands, list_complete, body_span));
                }
                TokenKind::Symbol(Symbol::RBrace) => break,
                _ => {
                    self.state.emit(messages::expected_command(self.state.peek()));
                    complete = false;
                    if self.state.is_eof() {
                        break;
                    }
                    self.state.consume_until_sync();
                    if !self.state.eat_symbol(Symbol::Semicolon) {
                        break;
                    }
                }
            }
            if self.state.is_eof() {
                break;
            }
        }

        let closed = self.state.expect_symbol(Symbol::RBrace, |t| messages::unexpected_token(t, "}"));
        complete &= closed;
        let span = start.merge(self.state.prev_span());
        Command::Switch { condition: Some(condition), cases, default_body, complete, span }
    }
}

fn is_rbrace(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Symbol(Symbol::RBrace))
}

fn is_case_boundary(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Keyword(Keyword::Case) | TokenKind::Keyword(Keyword::Default) | TokenKind::Symbol(Symbol::RBrace))
}
