pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a command's input: `--input <file>` wins, then JSON piped on
/// stdin, then `None` so the caller can build the input from flags.
pub fn from_file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_input(path)?));
    }
    stdin::read_stdin()
}
