//! Core tool traits and types.

use crate::result::{Arity, CommandError, ExecResult};

use super::context::ExecContext;

/// What a tool returns: response text or a recoverable failure.
pub type ToolResult = Result<String, CommandError>;

/// Schema for a tool parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name.
    pub name: String,
    /// Whether this parameter is required.
    pub required: bool,
    /// Description for help text.
    pub description: String,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: description.into(),
        }
    }

    /// Create an optional parameter.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: description.into(),
        }
    }
}

/// Schema describing a tool's interface.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Tool name (the command mnemonic).
    pub name: String,
    /// Short description.
    pub description: String,
    /// Positional parameters, required ones first.
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    /// Create a new tool schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Accepted positional argument count.
    pub fn arity(&self) -> Arity {
        Arity {
            min: self.params.iter().filter(|p| p.required).count(),
            max: self.params.len(),
        }
    }

    /// One-line usage, e.g. `ls [path]`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for param in &self.params {
            if param.required {
                usage.push_str(&format!(" <{}>", param.name));
            } else {
                usage.push_str(&format!(" [{}]", param.name));
            }
        }
        usage
    }
}

/// Positional arguments after the command token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    pub positional: Vec<String>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect whitespace-split tokens.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            positional: tokens.into_iter().map(str::to_string).collect(),
        }
    }

    /// Get a positional argument by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }
}

/// Reject argument lists whose length the schema does not accept.
pub fn validate_arity(schema: &ToolSchema, args: &ToolArgs) -> Result<(), CommandError> {
    let expected = schema.arity();
    if expected.accepts(args.len()) {
        Ok(())
    } else {
        Err(CommandError::WrongArgCount {
            command: schema.name.clone(),
            expected,
            got: args.len(),
        })
    }
}

/// A command that can be executed.
pub trait Tool: Send + Sync {
    /// The tool's name (used for lookup).
    fn name(&self) -> &str;

    /// Get the tool's schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments already checked against the schema.
    fn execute(&self, args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ToolResult;

    /// Check arity, then execute, flattening the outcome.
    fn run(&self, args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
        let result = validate_arity(&self.schema(), args).and_then(|()| self.execute(args, ctx));
        ExecResult::from(result)
    }
}
