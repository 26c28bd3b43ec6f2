//! Statement executor for the Bisaya++ interpreter.
//!
//! Owns the environment and the console boundary for one execution.

use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::evaluator::ExpressionEvaluator;
use crate::io::{InputError, InputSource, OutputSink};
use crate::value::Value;
use bisaya_parser::{
    Block, ConditionalBranch, DataType, Expression, ExpressionKind, ForLoop, Identifier, Program, Span,
    Statement, StatementKind, VarDecl, WhileLoop,
};

pub struct Interpreter<O: OutputSink, I: InputSource> {
    environment: Environment,
    evaluator: ExpressionEvaluator,
    output: O,
    input: I,
    /// Something was written since the last '\n'
    line_open: bool,
    /// Position of the last statement started, for errors raised outside any statement
    last_span: Span,
}

impl<O: OutputSink, I: InputSource> Interpreter<O, I> {
    pub fn new(output: O, input: I) -> Self {
        Self {
            environment: Environment::new(),
            evaluator: ExpressionEvaluator::new(),
            output,
            input,
            line_open: false,
            last_span: Span::default(),
        }
    }

    /// Run a whole program, then terminate the last output line
    ///
    /// The line is terminated even when execution stops on an error; output
    /// written before the error stays written.
    pub fn interpret(&mut self, program: &Program) -> Result<()> {
        tracing::debug!(
            statements = program.body.statements.len(),
            "interpreting program"
        );
        let executed = self.execute_block(&program.body);
        let finished = self.finish();
        executed?;
        finished
    }

    /// Run statements against the current environment without finishing the line
    pub fn execute_statements(&mut self, statements: &[Statement]) -> Result<()> {
        statements
            .iter()
            .try_for_each(|statement| self.execute(statement))
    }

    /// Write a final '\n' if the current output line is still open
    pub fn finish(&mut self) -> Result<()> {
        if self.line_open {
            self.write("\n", self.last_span)?;
        }
        Ok(())
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_parts(self) -> (Environment, O, I) {
        (self.environment, self.output, self.input)
    }

    fn execute_block(&mut self, block: &Block) -> Result<()> {
        self.execute_statements(&block.statements)
    }

    fn execute(&mut self, statement: &Statement) -> Result<()> {
        self.last_span = statement.span;
        match &statement.kind {
            StatementKind::Print(parts) => self.execute_print(parts, statement.span),
            StatementKind::Input(names) => self.execute_input(names, statement.span),
            StatementKind::Expression(expr) => {
                self.evaluator.evaluate(expr, &mut self.environment)?;
                Ok(())
            }
            StatementKind::VarDecl(decl) => self.execute_declaration(decl),
            StatementKind::Conditional(branches) => self.execute_conditional(branches),
            StatementKind::ForLoop(for_loop) => self.execute_for(for_loop),
            StatementKind::WhileLoop(while_loop) => self.execute_while(while_loop),
        }
    }

    fn execute_declaration(&mut self, decl: &VarDecl) -> Result<()> {
        for declarator in &decl.declarators {
            let value = match &declarator.initializer {
                Some(init) => self.evaluator.evaluate(init, &mut self.environment)?,
                None => Value::Absent,
            };
            self.environment
                .declare(&declarator.name.name, decl.data_type, value)
                .map_err(|e| RuntimeError::from_environment(e, declarator.name.span))?;
        }
        Ok(())
    }

    fn execute_print(&mut self, parts: &[Expression], span: Span) -> Result<()> {
        let mut text = String::new();
        for part in parts {
            let value = self.evaluator.evaluate(part, &mut self.environment)?;
            text.push_str(&value.to_display_string());
        }
        self.write(&text, span)
    }

    fn execute_input(&mut self, names: &[Identifier], span: Span) -> Result<()> {
        let line = self.input.read_line().map_err(|e| match e {
            InputError::Exhausted => RuntimeError::input_exhausted(span),
            InputError::Io(message) => RuntimeError::io(message, span),
        })?;

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != names.len() {
            return Err(RuntimeError::input_arity(names.len(), fields.len(), span));
        }

        for (name, field) in names.iter().zip(fields) {
            self.environment
                .assign(&name.name, Value::String(field.to_string()))
                .map_err(|e| RuntimeError::from_environment(e, name.span))?;
        }
        Ok(())
    }

    fn execute_conditional(&mut self, branches: &[ConditionalBranch]) -> Result<()> {
        for (index, branch) in branches.iter().enumerate() {
            let taken = match &branch.condition {
                Some(condition) => self
                    .evaluator
                    .evaluate_condition(condition, &mut self.environment)?,
                None => true,
            };
            if taken {
                tracing::trace!(branch = index, "conditional branch taken");
                return self.execute_block(&branch.body);
            }
        }
        Ok(())
    }

    fn execute_for(&mut self, for_loop: &ForLoop) -> Result<()> {
        match &for_loop.initializer.kind {
            // an undeclared counter in `name = value` becomes a NUMERO holding that value
            ExpressionKind::Assign(assign) if !self.environment.is_declared(&assign.target.name) => {
                let value = self
                    .evaluator
                    .evaluate(&assign.value, &mut self.environment)?;
                self.environment
                    .declare(&assign.target.name, DataType::Numero, value)
                    .map_err(|e| RuntimeError::from_environment(e, assign.target.span))?;
            }
            _ => {
                self.evaluator
                    .evaluate(&for_loop.initializer, &mut self.environment)?;
            }
        }

        let mut iterations = 0usize;
        while self
            .evaluator
            .evaluate_condition(&for_loop.condition, &mut self.environment)?
        {
            self.execute_block(&for_loop.body)?;
            self.evaluator
                .evaluate(&for_loop.update, &mut self.environment)?;
            iterations += 1;
        }
        tracing::trace!(iterations, "ALANG SA loop finished");
        Ok(())
    }

    fn execute_while(&mut self, while_loop: &WhileLoop) -> Result<()> {
        let mut iterations = 0usize;
        while self
            .evaluator
            .evaluate_condition(&while_loop.condition, &mut self.environment)?
        {
            self.execute_block(&while_loop.body)?;
            iterations += 1;
        }
        tracing::trace!(iterations, "SAMTANG loop finished");
        Ok(())
    }

    fn write(&mut self, text: &str, span: Span) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.output
            .write(text)
            .map_err(|e| RuntimeError::io(e, span))?;
        self.line_open = !text.ends_with('\n');
        Ok(())
    }
}
