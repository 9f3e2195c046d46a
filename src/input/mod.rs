pub(crate) mod file;

use async_trait::async_trait;

use crate::error::ListError;

/// byte order mark some editors put in front of UTF-8 files
const BOM: char = '\u{feff}';

/// Input is the trait all list sources must implement
#[async_trait]
pub trait Input {
    /// list sources are supposed to provide the data line wise, without line terminator
    async fn line(&mut self) -> Result<Option<String>, ListError>;
}

/// drains an input into memory
pub async fn read_lines<I: Input + Send>(input: &mut I) -> Result<Vec<String>, ListError> {
    let mut lines: Vec<String> = Vec::new();
    while let Some(line) = input.line().await? {
        lines.push(line);
    }
    if let Some(first) = lines.first_mut() {
        if first.starts_with(BOM) {
            first.remove(0);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use crate::tests::helper::cursor_input::CursorInput;

    use super::*;

    #[tokio::test]
    async fn test_read_lines() {
        let mut input = CursorInput::new("# Ads\nads.example.com\r\n\ntracker.example.org");
        let lines = read_lines(&mut input).await.unwrap();
        assert_eq!(
            lines,
            vec!["# Ads", "ads.example.com", "", "tracker.example.org"]
        );
    }

    #[tokio::test]
    async fn test_read_lines_strips_bom() {
        let mut input = CursorInput::new("\u{feff}example.com\n");
        let lines = read_lines(&mut input).await.unwrap();
        assert_eq!(lines, vec!["example.com"]);
    }
}
