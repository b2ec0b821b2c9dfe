//! In-memory runner for tests: records every invocation instead of
//! spawning it, optionally mutating the project to imitate a manager.

use super::{CommandRunner, Invocation};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

type Hook = Box<dyn Fn(&Invocation)>;

#[derive(Default)]
pub(crate) struct RecordingRunner {
    seen: RefCell<Vec<Invocation>>,
    exit_codes: HashMap<String, i32>,
    hook: Option<Hook>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` whenever `program` runs
    pub(crate) fn failing(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Called for every invocation before it is recorded as finished
    pub(crate) fn with_hook(mut self, hook: impl Fn(&Invocation) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.seen.borrow().clone()
    }

    /// Rendered command lines, in execution order
    pub(crate) fn lines(&self) -> Vec<String> {
        self.seen.borrow().iter().map(Invocation::display).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        self.seen.borrow_mut().push(invocation.clone());
        if let Some(hook) = &self.hook {
            hook(invocation);
        }
        Ok(self
            .exit_codes
            .get(&invocation.program)
            .copied()
            .unwrap_or(0))
    }
}
