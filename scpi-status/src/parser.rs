//! Interfaces towards the host's command parser and response formatter.
//!
//! Tokenizing, command-tree traversal and response encoding live outside
//! this crate; the command handlers only consume these two traits. The
//! parser hands decoded parameters in through [`Parameters`] and collects
//! response data elements through [`Formatter`].

use crate::error::{ErrorCode, Result};

/// Decoded command parameters, supplied by the parser.
pub trait Parameters {
    /// Decode the next integer parameter, if present.
    fn next_optional_i32(&mut self) -> Result<Option<i32>>;

    /// Decode the next integer parameter.
    ///
    /// A missing parameter is an error with [`ErrorCode::MissingParameter`].
    fn next_i32(&mut self) -> Result<i32> {
        self.next_optional_i32()?
            .ok_or_else(|| ErrorCode::MissingParameter.into())
    }
}

/// Response sink, supplied by the response formatter.
pub trait Formatter {
    /// Append an integer response data element.
    fn push_i32(&mut self, value: i32) -> Result<()>;

    /// Append a character (mnemonic) response data element.
    fn push_mnemonic(&mut self, mnemonic: &[u8]) -> Result<()>;
}
