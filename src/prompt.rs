//! Interactive yes/no confirmation.

use crate::core::error::Result;
use std::io::{BufRead, Write};

/// Prompt shown before saving a trained model
pub const SAVE_PROMPT: &str = "Save this model? (y|[n]): ";

/// Write `prompt` and read one line of input.
///
/// Returns `true` only when the trimmed answer is `y` in either case.
/// Anything else, including an empty line, bytes that are not UTF-8 or
/// end of input, is a no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut answer = Vec::new();
    if input.read_until(b'\n', &mut answer)? == 0 {
        return Ok(false);
    }

    Ok(String::from_utf8_lossy(&answer).trim().eq_ignore_ascii_case("y"))
}
