//! Interpretation of one line typed by the user.

use burgerclick_server::domain::{PlayerName, ValueObjectError};

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click for this player
    Click(PlayerName),
    Quit,
}

/// Empty line clicks for `default_name`, `/quit` exits, anything else is a
/// player name to click for.
pub fn parse_line(line: &str, default_name: &PlayerName) -> Result<Command, ValueObjectError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Click(default_name.clone()));
    }
    if line.eq_ignore_ascii_case("/quit") || line.eq_ignore_ascii_case("/exit") {
        return Ok(Command::Quit);
    }
    PlayerName::new(line.to_string()).map(Command::Click)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> PlayerName {
        PlayerName::new("alice".to_string()).unwrap()
    }

    #[test]
    fn test_empty_line_clicks_default_name() {
        // テスト項目: 空行はデフォルトの名前でクリックする
        // then (期待する結果):
        assert_eq!(parse_line("", &alice()), Ok(Command::Click(alice())));
        assert_eq!(parse_line("  ", &alice()), Ok(Command::Click(alice())));
    }

    #[test]
    fn test_name_line_clicks_that_name() {
        // テスト項目: 名前を入力するとその名前でクリックする
        // when (操作):
        let command = parse_line("Bob 2", &alice()).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Click(PlayerName::new("Bob 2".to_string()).unwrap())
        );
    }

    #[test]
    fn test_quit() {
        // テスト項目: /quit で終了する
        // then (期待する結果):
        assert_eq!(parse_line("/quit", &alice()), Ok(Command::Quit));
        assert_eq!(parse_line("/EXIT", &alice()), Ok(Command::Quit));
    }

    #[test]
    fn test_invalid_name_rejected_locally() {
        // テスト項目: 不正な名前は送信前に拒否される
        // then (期待する結果):
        assert!(parse_line("bob!", &alice()).is_err());
    }
}
