//! The AST model. Every non-leaf node carries a
//! `complete` flag: when the parser cannot fully populate a node it sets
//! `complete = false`, fills what it can, and leaves an absent marker
//! (`None`, an empty `Vec`, or [`Expr::Missing`]) in the rest — the parser
//! always returns *a* program, never a yes/no.

use serde::{Deserialize, Serialize};
use while_span::Span;
use while_tree::Tree;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum OpKind {
    Cons,
    Hd,
    Tl,
}

impl OpKind {
    pub fn arity(self) -> usize {
        match self {
            OpKind::Cons => 2,
            OpKind::Hd | OpKind::Tl => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Cons => "cons",
            OpKind::Hd => "hd",
            OpKind::Tl => "tl",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Expr {
    Ident { name: String, span: Span },
    Op { kind: OpKind, args: Vec<Expr>, complete: bool, span: Span },
    TreeLiteral { value: Tree, span: Span },
    /// extended only
    Equal { left: Box<Expr>, right: Box<Expr>, complete: bool, span: Span },
    /// extended only
    List { elements: Vec<Expr>, complete: bool, span: Span },
    /// extended only; angle-bracket tree constructor `<l.r>`
    TreeExpr { left: Box<Expr>, right: Box<Expr>, complete: bool, span: Span },
    /// extended only
    MacroCall { program_name: String, input: Box<Expr>, complete: bool, span: Span },
    /// the absent marker filled into a slot the parser could not populate
    Missing { span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident { span, .. }
            | Expr::Op { span, .. }
            | Expr::TreeLiteral { span, .. }
            | Expr::Equal { span, .. }
            | Expr::List { span, .. }
            | Expr::TreeExpr { span, .. }
            | Expr::MacroCall { span, .. }
            | Expr::Missing { span } => *span,
        }
    }

    /// Whether this node, and everything beneath it, parsed without error.
    pub fn is_complete(&self) -> bool {
        match self {
            Expr::Ident { .. } | Expr::TreeLiteral { .. } => true,
            Expr::Op { complete, args, .. } => *complete && args.iter().all(Expr::is_complete),
            Expr::Equal { complete, left, right, .. } => *complete && left.is_complete() && right.is_complete(),
            Expr::List { complete, elements, .. } => *complete && elements.iter().all(Expr::is_complete),
            Expr::TreeExpr { complete, left, right, .. } => *complete && left.is_complete() && right.is_complete(),
            Expr::MacroCall { complete, input, .. } => *complete && input.is_complete(),
            Expr::Missing { .. } => false,
        }
    }

    /// A program is "pure" iff every expression uses only `ident`,
    /// `op(cons|hd|tl)`, and `tree_literal(nil)`.
    pub fn is_pure(&self) -> bool {
        match self {
            Expr::Ident { .. } => true,
            Expr::TreeLiteral { value, .. } => value.is_nil(),
            Expr::Op { args, .. } => args.iter().all(Expr::is_pure),
            Expr::Equal { .. } | Expr::List { .. } | Expr::TreeExpr { .. } | Expr::MacroCall { .. } | Expr::Missing { .. } => false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: Option<Expr>,
    pub body: Block,
    pub complete: bool,
    pub span: Span,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    Assign { target: Option<String>, value: Option<Expr>, complete: bool, span: Span },
    Cond { condition: Option<Expr>, then_body: Block, else_body: Option<Block>, complete: bool, span: Span },
    Loop { condition: Option<Expr>, body: Block, complete: bool, span: Span },
    /// extended only
    Switch { condition: Option<Expr>, cases: Vec<SwitchCase>, default_body: Option<Block>, complete: bool, span: Span },
}

impl Command {
    pub fn span(&self) -> Span {
        match self {
            Command::Assign { span, .. }
            | Command::Cond { span, .. }
            | Command::Loop { span, .. }
            | Command::Switch { span, .. } => *span,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Command::Assign { target, value, complete, .. } => {
                *complete && target.is_some() && value.as_ref().is_some_and(Expr::is_complete)
            }
            Command::Cond { condition, then_body, else_body, complete, .. } => {
                *complete
                    && condition.as_ref().is_some_and(Expr::is_complete)
                    && then_body.complete
                    && else_body.as_ref().is_none_or(|b| b.complete)
            }
            Command::Loop { condition, body, complete, .. } => {
                *complete && condition.as_ref().is_some_and(Expr::is_complete) && body.complete
            }
            Command::Switch { condition, cases, default_body, complete, .. } => {
                *complete
                    && condition.as_ref().is_some_and(Expr::is_complete)
                    && cases.iter().all(|c| c.complete)
                    && default_body.as_ref().is_none_or(|b| b.complete)
            }
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Block {
    pub commands: Vec<Command>,
    pub complete: bool,
    pub span: Span,
}

impl Block {
    pub fn new(commands: Vec<Command>, complete: bool, span: Span) -> Self {
        Self { commands, complete, span }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Program {
    pub name: Option<String>,
    pub input_var: Option<String>,
    pub body: Block,
    pub output_var: Option<String>,
    pub complete: bool,
    pub span: Span,
}

impl Program {
    /// Whether the whole program — its own intro/outro slots, and every
    /// command and expression beneath it — parsed without error.
    pub fn is_complete(&self) -> bool {
        self.complete
            && self.name.is_some()
            && self.input_var.is_some()
            && self.output_var.is_some()
            && self.body.complete
            && self.body.commands.iter().all(Command::is_complete)
    }

    /// A program is "pure" iff it contains no `switch` and every
    /// expression in it uses only `ident`, `op(cons|hd|tl)`, and
    /// `tree_literal(nil)`.
    pub fn is_pure(&self) -> bool {
        fn block_is_pure(block: &Block) -> bool {
            block.commands.iter().all(command_is_pure)
        }
        fn command_is_pure(command: &Command) -> bool {
            match command {
                Command::Assign { value, .. } => value.as_ref().is_none_or(Expr::is_pure),
                Command::Cond { condition, then_body, else_body, .. } => {
                    condition.as_ref().is_none_or(Expr::is_pure)
                        && block_is_pure(then_body)
                        && else_body.as_ref().is_none_or(block_is_pure)
                }
                Command::Loop { condition, body, .. } => condition.as_ref().is_none_or(Expr::is_pure) && block_is_pure(body),
                Command::Switch { .. } => false,
            }
        }
        block_is_pure(&self.body)
    }
}
