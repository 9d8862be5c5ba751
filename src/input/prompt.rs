//! Interactive prompt loop

use std::io::{BufRead, Write};

use crate::core::{AsianError, AsianResult};

/// Ask `question` until `validate` accepts the answer.
///
/// Invalid answers print the validator's hint and ask again. Any other
/// error, including end of input, is returned.
pub fn prompt_until_valid<R, W, T, F>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    validate: F,
) -> AsianResult<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> AsianResult<T>,
{
    loop {
        write!(writer, "{}", question)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(AsianError::invalid_input("input closed"));
        }

        match validate(&line) {
            Ok(value) => return Ok(value),
            Err(AsianError::InvalidInput(hint)) => {
                tracing::debug!("Rejected {:?}: {}", line.trim(), hint);
                writeln!(writer, "{}", hint)?;
            }
            Err(e) => return Err(e),
        }
    }
}
