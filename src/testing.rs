use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::model::TokenList;

/// Wraps a generator result to write fluent assertions.
pub struct TestResult<T> {
    inner: Result<T>,
}

impl<T: Debug> TestResult<T> {
    pub fn new(result: Result<T>) -> Self {
        Self { inner: result }
    }

    /// Asserts success and returns the value.
    pub fn assert_success(self) -> T {
        match self.inner {
            Ok(val) => val,
            Err(e) => {
                panic!("\nTEST FAILED (Expected Success, but got Error):\nMessage:  {}\nDetail:   {:?}\n", e, e);
            }
        }
    }

    /// Asserts success and compares the value.
    pub fn assert_success_is<E>(self, expected: E) -> T
    where
        T: PartialEq<E>,
        E: Debug,
    {
        let val = self.assert_success();
        if val != expected {
            panic!(
                "\nTEST FAILED (Value Mismatch):\nExpected: {:?}\nGot:      {:?}\n",
                expected, val
            );
        }
        val
    }

    /// Asserts failure and returns the error.
    pub fn assert_failure(self) -> Error {
        match self.inner {
            Ok(val) => {
                panic!(
                    "\nTEST FAILED (Expected Failure, but got Success):\nValue: {:?}\n",
                    val
                );
            }
            Err(e) => e,
        }
    }

    /// Asserts failure with a message containing `expected_msg_part`.
    pub fn assert_failure_contains(self, expected_msg_part: &str) -> Error {
        let err = self.assert_failure();
        let actual_msg = err.to_string();
        if !actual_msg.contains(expected_msg_part) {
            panic!(
                "\nTEST FAILED (Error Message Mismatch):\nExpected part: {:?}\nActual msg:    {:?}\n",
                expected_msg_part, actual_msg
            );
        }
        err
    }
}

impl TestResult<TokenList> {
    /// Asserts success and compares the token names in order, pointing at
    /// the first position that differs.
    pub fn assert_tokens_eq(self, expected: &[&str]) -> TokenList {
        let tokens = self.assert_success();
        let got: Vec<&str> = tokens.iter().collect();
        if let Some(pos) = got.iter().zip(expected).position(|(g, e)| g != e) {
            panic!(
                "\nTEST FAILED (Token Mismatch at #{}):\nExpected: {:?}\nGot:      {:?}\nFull:     {:?}\n",
                pos, expected[pos], got[pos], got
            );
        }
        if got.len() != expected.len() {
            panic!(
                "\nTEST FAILED (Token Count):\nExpected: {} tokens\nGot:      {} tokens {:?}\n",
                expected.len(),
                got.len(),
                got
            );
        }
        tokens
    }
}

pub trait Testable<T> {
    fn test(self) -> TestResult<T>;
}

impl<T: Debug> Testable<T> for Result<T> {
    fn test(self) -> TestResult<T> {
        TestResult::new(self)
    }
}
