//! Wordlist file naming and writing

use crate::output::OutputError;
use crate::url::host_key;
use crate::words::WordSet;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Longest file name derived from the seed host before falling back to a date
const MAX_FILE_NAME_LENGTH: usize = 250;

/// Derives the wordlist file name used when no output path is given
///
/// The name is `wordlist_<host>_HH-MM-SS.txt`, with every character of the
/// host (and port) outside `[A-Za-z0-9_-]` replaced by `_`. If that name is
/// longer than 250 characters, `wordlist_M-DD-YYYY_HH-MM-SS.txt` is used
/// instead.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use url::Url;
/// use wordsmith::output::default_output_path;
///
/// let seed = Url::parse("https://www.example.com/").unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
/// let path = default_output_path(&seed, now);
/// assert_eq!(path.to_str(), Some("wordlist_www_example_com_14-07-09.txt"));
/// ```
pub fn default_output_path<Tz>(seed: &Url, now: DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let host: String = host_key(seed)
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let name = format!("wordlist_{}_{}.txt", host, now.format("%H-%M-%S"));
    if name.len() > MAX_FILE_NAME_LENGTH {
        return PathBuf::from(format!("wordlist_{}.txt", now.format("%-m-%d-%Y_%H-%M-%S")));
    }

    PathBuf::from(name)
}

/// Writes the wordlist, one word per line, sorted
///
/// # Returns
///
/// * `Ok(usize)` - The number of words written
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_wordlist(path: &Path, words: &WordSet) -> Result<usize, OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    let sorted = words.to_sorted_vec();
    for word in &sorted {
        writeln!(writer, "{}", word).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    tracing::debug!("Wrote {} words to {}", sorted.len(), path.display());
    Ok(sorted.len())
}
