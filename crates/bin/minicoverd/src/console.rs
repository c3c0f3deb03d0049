//! Line-based command console.
//!
//! Each line is one command: `open`, `close`, `stop`, `position <pct>`,
//! `tilt <pct>`, `tilt open` or `tilt close`. Blank lines and lines starting
//! with `#` are ignored.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use minicover_adapter_mqtt::CoverHandle;
use minicover_domain::command::{CoverCommand, ParseCommandError};

/// Parse one console line, `None` when there is nothing to execute.
pub fn parse_line(line: &str) -> Option<Result<CoverCommand, ParseCommandError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.parse())
}

/// Read commands from `input` until it is exhausted.
pub async fn run<R>(handle: CoverHandle, input: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::error!(%err, "unable to read console input");
                break;
            }
        };
        let command = match parse_line(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                tracing::warn!(%err, "invalid console command");
                continue;
            }
        };
        match handle.execute(command).await {
            Ok(Some(change)) => tracing::debug!(%command, status = %change.status, "command applied"),
            Ok(None) => tracing::debug!(%command, "command sent"),
            Err(err) => tracing::error!(%err, %command, "command failed"),
        }
    }
    tracing::debug!("console input closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_skip_blank_and_comment_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("# close at night").is_none());
    }

    #[test]
    fn should_parse_commands() {
        assert_eq!(parse_line(" open "), Some(Ok(CoverCommand::Open)));
        assert_eq!(
            parse_line("position 30"),
            Some(Ok(CoverCommand::SetPosition(30)))
        );
        assert_eq!(parse_line("tilt close"), Some(Ok(CoverCommand::CloseTilt)));
    }

    #[test]
    fn should_report_invalid_commands() {
        assert_eq!(
            parse_line("position high"),
            Some(Err(ParseCommandError::InvalidPercentage("high".to_string())))
        );
        assert_eq!(
            parse_line("jump"),
            Some(Err(ParseCommandError::Unknown("jump".to_string())))
        );
    }
}
