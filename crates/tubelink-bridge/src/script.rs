//! Script host seam
//!
//! The bridge talks to the embed page through a host-toolkit facility that
//! registers named message channels, loads the rendered embed page, and
//! evaluates script statements in the page's context. This module defines
//! that seam plus the value and error types flowing across it.

use crate::error::Result;
use thiserror::Error;

/// A value decoded from the script environment.
///
/// Covers both script-evaluation results and inbound channel payloads
/// (payloads only use the `Null`/`Int`/`Float`/`Str`/`StrList` shapes).
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
    FloatList(Vec<f64>),
}

impl ScriptValue {
    /// Numeric coercion; integers widen to float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScriptValue::Float(f) => Some(*f),
            ScriptValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer coercion; integral floats narrow.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScriptValue::Int(i) => Some(*i),
            ScriptValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScriptValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            ScriptValue::StrList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_f64_list(&self) -> Option<&[f64]> {
        match self {
            ScriptValue::FloatList(list) => Some(list),
            _ => None,
        }
    }
}

/// Script evaluation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The evaluated expression legitimately returned no value. Some host
    /// toolkits report this as an error; callers treat it as success.
    #[error("evaluation returned an unsupported result type")]
    UnsupportedResultType,

    /// Any other evaluation failure. The associated state update is skipped.
    #[error("evaluation failed: {0}")]
    Failed(String),
}

impl EvalError {
    /// True for the benign "the remote call returned nothing" report.
    pub fn is_benign_no_value(&self) -> bool {
        matches!(self, EvalError::UnsupportedResultType)
    }
}

/// Outcome of one script evaluation.
pub type EvalResult = std::result::Result<ScriptValue, EvalError>;

/// Completion handler for one evaluation. Owned by the evaluation facility;
/// if the page is torn down before it fires, it simply never fires.
pub type EvalCompletion = Box<dyn FnOnce(EvalResult)>;

/// Did the evaluation succeed for command purposes? The benign no-value
/// error counts as success.
pub fn command_succeeded(result: &EvalResult) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => e.is_benign_no_value(),
    }
}

/// Host-toolkit facility the bridge drives.
///
/// Single-threaded cooperative contract: `evaluate` never completes
/// synchronously; its completion fires on a later turn of the event loop, on
/// the same thread, possibly out of issuance order. Message channels must be
/// registered before the embed page loads, because the page script only
/// posts to channels present at load time.
pub trait ScriptHost {
    /// Register a named message channel. Construction-time only.
    fn add_message_channel(&self, name: &str);

    /// Render and load the embed page from the serialized config object.
    fn load_embed_page(&self, player_config_json: &str) -> Result<()>;

    /// Evaluate a statement in the embed page's script context.
    fn evaluate(&self, statement: &str, completion: Option<EvalCompletion>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(ScriptValue::Float(42.5).as_f64(), Some(42.5));
        assert_eq!(ScriptValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(ScriptValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(ScriptValue::Float(3.5).as_i64(), None);
        assert_eq!(ScriptValue::Str("3".into()).as_f64(), None);
        assert_eq!(ScriptValue::Null.as_i64(), None);
    }

    #[test]
    fn test_benign_no_value_counts_as_command_success() {
        assert!(command_succeeded(&Ok(ScriptValue::Null)));
        assert!(command_succeeded(&Err(EvalError::UnsupportedResultType)));
        assert!(!command_succeeded(&Err(EvalError::Failed("boom".into()))));
    }
}
