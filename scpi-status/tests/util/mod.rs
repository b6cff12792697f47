//! Shared fixtures: a host interface recording control-channel activity and
//! slice/vec-backed parser collaborators.
#![allow(dead_code)]

use std::collections::VecDeque;

use scpi_status::error::{ArrayErrorQueue, Result};
use scpi_status::parser::{Formatter, Parameters};
use scpi_status::{Context, Control, Identification, Interface};

/// Records every service request and reset delivered by the context.
#[derive(Debug, Default)]
pub struct TestInterface {
    pub srq: Vec<u8>,
    pub resets: usize,
}

impl Interface for TestInterface {
    fn control(&mut self, _ctrl: Control, value: u8) {
        self.srq.push(value);
    }

    fn reset(&mut self) -> Result<()> {
        self.resets += 1;
        Ok(())
    }
}

pub type TestContext<const USER: usize = 0> =
    Context<'static, TestInterface, ArrayErrorQueue<4>, USER>;

pub fn context() -> TestContext {
    context_with_idn(Identification::default())
}

pub fn context_with_idn(idn: Identification<'static>) -> TestContext {
    Context::new(TestInterface::default(), ArrayErrorQueue::new(), idn, []).unwrap()
}

/// Integer arguments handed to a command handler.
pub struct TestParameters(VecDeque<i32>);

impl TestParameters {
    pub fn with(values: &[i32]) -> Self {
        TestParameters(values.iter().copied().collect())
    }

    pub fn empty() -> Self {
        TestParameters(VecDeque::new())
    }
}

impl Parameters for TestParameters {
    fn next_optional_i32(&mut self) -> Result<Option<i32>> {
        Ok(self.0.pop_front())
    }
}

/// Collects response data elements as one comma-separated ASCII unit.
#[derive(Debug, Default)]
pub struct TestFormatter(Vec<u8>);

impl TestFormatter {
    pub fn new() -> Self {
        TestFormatter::default()
    }

    /// Rendered response so far, leaving the formatter empty.
    pub fn take(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.0)).unwrap()
    }
}

impl Formatter for TestFormatter {
    fn push_i32(&mut self, value: i32) -> Result<()> {
        if !self.0.is_empty() {
            self.0.push(b',');
        }
        self.0.extend_from_slice(value.to_string().as_bytes());
        Ok(())
    }

    fn push_mnemonic(&mut self, mnemonic: &[u8]) -> Result<()> {
        if !self.0.is_empty() {
            self.0.push(b',');
        }
        self.0.extend_from_slice(mnemonic);
        Ok(())
    }
}
