//! In-memory script host for tests and demos
//!
//! Records channel registrations, loaded page configs, and every evaluated
//! statement, and holds completions in a pending queue the caller drains
//! explicitly. That models the real contract: an evaluation never completes
//! on the turn that issued it.

use crate::error::{BridgeError, Result};
use crate::script::{EvalCompletion, EvalResult, ScriptHost};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

struct PendingEval {
    statement: String,
    completion: Option<EvalCompletion>,
}

/// Script host double backed by in-memory queues.
#[derive(Default)]
pub struct MockScriptHost {
    channels: RefCell<Vec<String>>,
    loaded_configs: RefCell<Vec<Value>>,
    statements: RefCell<Vec<String>>,
    pending: RefCell<VecDeque<PendingEval>>,
}

impl MockScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels registered so far, in registration order.
    pub fn channels(&self) -> Vec<String> {
        self.channels.borrow().clone()
    }

    /// Parsed page config objects, one per load call.
    pub fn loaded_configs(&self) -> Vec<Value> {
        self.loaded_configs.borrow().clone()
    }

    pub fn last_config(&self) -> Option<Value> {
        self.loaded_configs.borrow().last().cloned()
    }

    /// Every statement ever evaluated, in issuance order.
    pub fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }

    /// Statements whose completions have not fired yet.
    pub fn pending_statements(&self) -> Vec<String> {
        self.pending.borrow().iter().map(|p| p.statement.clone()).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Complete the oldest pending evaluation with `result`. Returns false
    /// when nothing is pending.
    pub fn complete_next(&self, result: EvalResult) -> bool {
        let pending = self.pending.borrow_mut().pop_front();
        match pending {
            Some(eval) => {
                // Invoke after releasing the queue borrow: a completion may
                // re-enter evaluate() (e.g. a chained play command).
                if let Some(completion) = eval.completion {
                    completion(result);
                }
                true
            }
            None => false,
        }
    }

    /// Complete the oldest pending evaluation whose statement contains
    /// `fragment`. Returns false when none matches.
    pub fn complete_matching(&self, fragment: &str, result: EvalResult) -> bool {
        let position = self
            .pending
            .borrow()
            .iter()
            .position(|p| p.statement.contains(fragment));
        let Some(position) = position else {
            return false;
        };
        let eval = self.pending.borrow_mut().remove(position);
        match eval {
            Some(eval) => {
                if let Some(completion) = eval.completion {
                    completion(result);
                }
                true
            }
            None => false,
        }
    }

    /// Complete everything currently pending with clones of `result`.
    /// Completions queued by the completions themselves are left pending.
    pub fn complete_all(&self, result: EvalResult) {
        let mut drained: VecDeque<PendingEval> = std::mem::take(&mut *self.pending.borrow_mut());
        while let Some(eval) = drained.pop_front() {
            if let Some(completion) = eval.completion {
                completion(result.clone());
            }
        }
    }
}

impl ScriptHost for MockScriptHost {
    fn add_message_channel(&self, name: &str) {
        self.channels.borrow_mut().push(name.to_string());
    }

    fn load_embed_page(&self, player_config_json: &str) -> Result<()> {
        let config: Value = serde_json::from_str(player_config_json)
            .map_err(|e| BridgeError::PageLoad(e.to_string()))?;
        self.loaded_configs.borrow_mut().push(config);
        Ok(())
    }

    fn evaluate(&self, statement: &str, completion: Option<EvalCompletion>) {
        self.statements.borrow_mut().push(statement.to_string());
        self.pending.borrow_mut().push_back(PendingEval {
            statement: statement.to_string(),
            completion,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptValue;
    use std::rc::Rc;

    #[test]
    fn test_records_in_order() {
        let host = MockScriptHost::new();
        host.add_message_channel("onReady");
        host.evaluate("player.playVideo();", None);
        host.evaluate("player.pauseVideo();", None);
        assert_eq!(host.channels(), vec!["onReady"]);
        assert_eq!(
            host.statements(),
            vec!["player.playVideo();", "player.pauseVideo();"]
        );
        assert_eq!(host.pending_count(), 2);
    }

    #[test]
    fn test_complete_next_delivers_result() {
        let host = MockScriptHost::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        host.evaluate(
            "player.getDuration();",
            Some(Box::new(move |result| *sink.borrow_mut() = Some(result))),
        );
        assert!(host.complete_next(Ok(ScriptValue::Float(3.5))));
        assert_eq!(*seen.borrow(), Some(Ok(ScriptValue::Float(3.5))));
        assert!(!host.complete_next(Ok(ScriptValue::Null)));
    }

    #[test]
    fn test_completion_may_reenter_evaluate() {
        let host = Rc::new(MockScriptHost::new());
        let inner = host.clone();
        host.evaluate(
            "player.mute();",
            Some(Box::new(move |_| inner.evaluate("player.playVideo();", None))),
        );
        assert!(host.complete_next(Ok(ScriptValue::Null)));
        assert_eq!(host.pending_statements(), vec!["player.playVideo();"]);
    }
}
