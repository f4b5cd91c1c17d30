use std::fmt;
use std::io::{self, BufRead, Write};

use crate::errors::RequestError;

pub const PROMPT: &str = "Enter search query: ";

/// The query text forwarded verbatim as the `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picks the query from `args` (program name already stripped), or prompts on
/// `prompt_out` and reads one line from `input` when no argument was given.
pub fn resolve_query<R, W>(
    args: &[String],
    input: &mut R,
    prompt_out: &mut W,
) -> Result<Query, RequestError>
where
    R: BufRead,
    W: Write,
{
    if let Some(first) = args.first() {
        return Ok(Query::new(first.clone()));
    }

    prompt_out
        .write_all(PROMPT.as_bytes())
        .and_then(|_| prompt_out.flush())
        .map_err(RequestError::Input)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(RequestError::Input)?;
    if read == 0 {
        return Err(RequestError::Input(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "end of input before a query was entered",
        )));
    }

    Ok(Query::new(strip_line_ending(line)))
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_argument_wins_over_input() {
        let args = vec!["rust lang".to_string(), "ignored".to_string()];
        let mut input = Cursor::new("from stdin\n");
        let mut prompt = Vec::new();

        let query = resolve_query(&args, &mut input, &mut prompt).unwrap();

        assert_eq!(query.as_str(), "rust lang");
        assert!(prompt.is_empty());
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_argument_is_verbatim() {
        let args = vec!["  --weird  ".to_string()];
        let query = resolve_query(&args, &mut Cursor::new(""), &mut Vec::new()).unwrap();
        assert_eq!(query.as_str(), "  --weird  ");
    }

    #[test]
    fn test_prompts_when_no_argument() {
        let mut input = Cursor::new("hello world\nsecond line\n");
        let mut prompt = Vec::new();

        let query = resolve_query(&[], &mut input, &mut prompt).unwrap();

        assert_eq!(query.as_str(), "hello world");
        assert_eq!(String::from_utf8(prompt).unwrap(), PROMPT);
    }

    #[test]
    fn test_only_line_ending_is_stripped() {
        let cases = [
            (" padded \r\n", " padded "),
            ("tabs\t\n", "tabs\t"),
            ("no newline", "no newline"),
            ("\n", ""),
        ];
        for (raw, expected) in cases {
            let query = resolve_query(&[], &mut Cursor::new(raw), &mut Vec::new()).unwrap();
            assert_eq!(query.as_str(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let err = resolve_query(&[], &mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RequestError::Input(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
