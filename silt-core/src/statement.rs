use crate::Value;
use std::fmt::{self, Display};

/// A parameterized SQL statement: text with `?` placeholders plus the values
/// bound to them, in order. User data never lands in the text itself.
#[derive(Debug, Default, Clone)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Statement {
    pub fn new(sql: String, values: Vec<Value>) -> Self {
        Self { sql, values }
    }

    /// A statement with no bound values.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            values: Vec::new(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Long statements are truncated when logged.
        const LIMIT: usize = 400;
        let mut sql = self.sql.as_str();
        let mut truncated = "";
        if sql.len() > LIMIT {
            let mut end = LIMIT;
            while !sql.is_char_boundary(end) {
                end -= 1;
            }
            sql = &sql[..end];
            truncated = "...";
        }
        write!(f, "{}{} ({} values)", sql, truncated, self.values.len())
    }
}
