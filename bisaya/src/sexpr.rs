// S-expression formatter for the Bisaya++ AST
// Renders parsed programs as readable Lisp-like trees for `bisaya parse`

use bisaya_parser::*;

pub fn format_program_as_sexpr(program: &Program) -> String {
    let statements = format_statements(&program.body.statements, 2);
    format_list("program", statements, 0)
}

/// `(head item...)` on one line when short, otherwise one item per indented line
fn format_list(head: &str, items: Vec<String>, indent: usize) -> String {
    let width: usize = items.iter().map(String::len).sum();
    if items.is_empty() {
        format!("({head})")
    } else if items.iter().all(|item| !item.contains('\n')) && head.len() + width < 60 {
        format!("({} {})", head, items.join(" "))
    } else {
        format!(
            "({}\n{}{})",
            head,
            " ".repeat(indent + 2),
            items.join(&format!("\n{}", " ".repeat(indent + 2)))
        )
    }
}

fn format_statements(statements: &[Statement], indent: usize) -> Vec<String> {
    statements
        .iter()
        .map(|statement| format_statement_with_indent(statement, indent))
        .collect()
}

fn format_statement_with_indent(statement: &Statement, indent: usize) -> String {
    match &statement.kind {
        StatementKind::VarDecl(decl) => format_declaration_with_indent(decl, indent),
        StatementKind::Print(parts) => {
            let parts = parts
                .iter()
                .map(|part| format_expression_with_indent(part, indent + 2))
                .collect();
            format_list("print", parts, indent)
        }
        StatementKind::Input(names) => {
            format_list("input", names.iter().map(|n| n.name.clone()).collect(), indent)
        }
        StatementKind::Expression(expr) => format_expression_with_indent(expr, indent),
        StatementKind::Conditional(branches) => {
            let branches = branches
                .iter()
                .map(|branch| format_branch_with_indent(branch, indent + 2))
                .collect();
            format_list("if", branches, indent)
        }
        StatementKind::ForLoop(for_loop) => {
            let items = vec![
                format_expression_with_indent(&for_loop.initializer, indent + 2),
                format_expression_with_indent(&for_loop.condition, indent + 2),
                format_expression_with_indent(&for_loop.update, indent + 2),
                format_block_with_indent(&for_loop.body, indent + 2),
            ];
            format_list("for", items, indent)
        }
        StatementKind::WhileLoop(while_loop) => {
            let items = vec![
                format_expression_with_indent(&while_loop.condition, indent + 2),
                format_block_with_indent(&while_loop.body, indent + 2),
            ];
            format_list("while", items, indent)
        }
    }
}

fn format_declaration_with_indent(decl: &VarDecl, indent: usize) -> String {
    let mut items = vec![decl.data_type.to_string()];
    for declarator in &decl.declarators {
        let item = match &declarator.initializer {
            Some(init) => format!(
                "({} {})",
                declarator.name.name,
                format_expression_with_indent(init, indent + 2)
            ),
            None => declarator.name.name.clone(),
        };
        items.push(item);
    }
    format_list("declare", items, indent)
}

fn format_branch_with_indent(branch: &ConditionalBranch, indent: usize) -> String {
    let body = format_block_with_indent(&branch.body, indent + 2);
    match &branch.condition {
        Some(condition) => format_list(
            "when",
            vec![format_expression_with_indent(condition, indent + 2), body],
            indent,
        ),
        None => format_list("else", vec![body], indent),
    }
}

fn format_block_with_indent(block: &Block, indent: usize) -> String {
    format_list("block", format_statements(&block.statements, indent + 2), indent)
}

fn format_expression_with_indent(expr: &Expression, indent: usize) -> String {
    match &expr.kind {
        ExpressionKind::Literal(Literal::Number(n)) => format!("(number {n})"),
        ExpressionKind::Literal(Literal::Character(c)) => format!("(character '{c}')"),
        ExpressionKind::Literal(Literal::String(s)) => format!("{s:?}"),
        ExpressionKind::Variable(id) => id.name.clone(),
        ExpressionKind::Assign(assign) => format_list(
            "=",
            vec![
                assign.target.name.clone(),
                format_expression_with_indent(&assign.value, indent + 2),
            ],
            indent,
        ),
        ExpressionKind::BinaryOp(op) => format_list(
            &op.operator.to_string(),
            vec![
                format_expression_with_indent(&op.left, indent + 2),
                format_expression_with_indent(&op.right, indent + 2),
            ],
            indent,
        ),
        ExpressionKind::UnaryOp(op) => format_list(
            format_unary_operator_as_sexpr(op.operator),
            vec![format_expression_with_indent(&op.operand, indent + 2)],
            indent,
        ),
        ExpressionKind::PostfixOp(op) => {
            let head = match op.operator {
                PostfixOperator::Increment => "post++",
                PostfixOperator::Decrement => "post--",
            };
            format_list(
                head,
                vec![format_expression_with_indent(&op.operand, indent + 2)],
                indent,
            )
        }
        ExpressionKind::Grouping(inner) => format_list(
            "group",
            vec![format_expression_with_indent(inner, indent + 2)],
            indent,
        ),
    }
}

fn format_unary_operator_as_sexpr(op: UnaryOperator) -> &'static str {
    match op {
        UnaryOperator::Plus => "+",
        UnaryOperator::Minus => "neg",
        UnaryOperator::Increment => "pre++",
        UnaryOperator::Decrement => "pre--",
        UnaryOperator::Not => "DILI",
    }
}
