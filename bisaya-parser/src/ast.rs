// Bisaya++ AST Definitions
// Immutable statement and expression nodes with source positions

use std::fmt;

/// Source position information for tokens and AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line of the first character
    pub line: usize,
    /// 1-based column of the first character
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span covering both `self` and `other`, positioned at whichever starts first
    pub fn merge(&self, other: &Span) -> Span {
        let first = if self.start <= other.start {
            self
        } else {
            other
        };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// The four declarable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Numero, // integer
    Tipik,  // float
    Letra,  // single character
    Tinuod, // boolean, "OO" / "DILI"
}

impl DataType {
    pub fn keyword(&self) -> &'static str {
        match self {
            DataType::Numero => "NUMERO",
            DataType::Tipik => "TIPIK",
            DataType::Letra => "LETRA",
            DataType::Tinuod => "TINUOD",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed program: the statements between `SUGOD` and `KATAPUSAN`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Block,
    pub span: Span,
}

/// Ordered statement sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `IPAKITA: a & b & c`
    Print(Vec<Expression>),
    /// `DAWAT: x, y`
    Input(Vec<Identifier>),
    Expression(Expression),
    VarDecl(VarDecl),
    Conditional(Vec<ConditionalBranch>),
    ForLoop(ForLoop),
    WhileLoop(WhileLoop),
}

/// `MUGNA <type> name (= init)?, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub data_type: DataType,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Identifier,
    pub initializer: Option<Expression>,
}

/// One arm of a `KUNG` chain; `condition` is `None` for the trailing `KUNG WALA`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Option<Expression>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub initializer: Expression,
    pub condition: Expression,
    pub update: Expression,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expression,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(Literal),
    Variable(Identifier),
    Assign(Assignment),
    BinaryOp(BinaryOperation),
    UnaryOp(UnaryOperation),
    PostfixOp(PostfixOperation),
    Grouping(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    /// Contents of a `'...'` literal; length is checked when stored
    Character(String),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic operators
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %

    // Comparison operators
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=
    Equal,        // ==
    NotEqual,     // <>

    // Logical operators
    And, // UG
    Or,  // O

    Concat, // &
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,      // +
    Minus,     // -
    Increment, // ++
    Decrement, // --
    Not,       // DILI
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixOperation {
    pub operand: Box<Expression>,
    pub operator: PostfixOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Increment, // ++
    Decrement, // --
}

impl Expression {
    /// Name of the variable this expression reads, if it is a bare variable
    pub fn as_variable(&self) -> Option<&Identifier> {
        match &self.kind {
            ExpressionKind::Variable(id) => Some(id),
            _ => None,
        }
    }
}

// Display renders nodes back in source form

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::And => "UG",
            BinaryOperator::Or => "O",
            BinaryOperator::Concat => "&",
        };
        f.write_str(op)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
            UnaryOperator::Not => "DILI ",
        };
        f.write_str(op)
    }
}

impl fmt::Display for PostfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixOperator::Increment => f.write_str("++"),
            PostfixOperator::Decrement => f.write_str("--"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Character(c) => write!(f, "'{}'", c),
            Literal::String(s) if s == "\n" => f.write_str("$"),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Literal(lit) => write!(f, "{}", lit),
            ExpressionKind::Variable(id) => f.write_str(&id.name),
            ExpressionKind::Assign(assign) => {
                write!(f, "{} = {}", assign.target.name, assign.value)
            }
            ExpressionKind::BinaryOp(op) => {
                write!(f, "{} {} {}", op.left, op.operator, op.right)
            }
            ExpressionKind::UnaryOp(op) => write!(f, "{}{}", op.operator, op.operand),
            ExpressionKind::PostfixOp(op) => write!(f, "{}{}", op.operand, op.operator),
            ExpressionKind::Grouping(inner) => write!(f, "({})", inner),
        }
    }
}
