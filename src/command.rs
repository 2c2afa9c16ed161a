//! Translation of keyboard keys and network tokens into game commands.

use crossterm::event::KeyCode;

use crate::components::Dir;
use crate::constants::{FIRST_ROUND, LAST_ROUND};
use crate::game::{Command, Phase};

/// Parses one line received on the command channel.
///
/// Direction words map to moves. "Center", telemetry lines such as
/// `yaw:12.0` and anything unrecognised are ignored.
pub fn parse_token(line: &str) -> Option<Command> {
    let token = line.trim();
    if token.contains(':') {
        return None;
    }
    let dir = match token {
        "Up" => Dir::Up,
        "Down" => Dir::Down,
        "Left" => Dir::Left,
        "Right" => Dir::Right,
        _ => return None,
    };
    Some(Command::Move(dir))
}

/// Maps a key press to a command. Confirm keys depend on the phase.
pub fn from_key(code: KeyCode, phase: Phase) -> Option<Command> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Dir::Right),
        KeyCode::Enter | KeyCode::Char(' ') => match phase {
            Phase::Menu => Command::Start,
            Phase::Win => Command::NextRound,
            Phase::GameOver => Command::Retry,
            Phase::Playing => return None,
        },
        KeyCode::Char('+') | KeyCode::Char('=') => Command::RoundUp,
        KeyCode::Char('-') => Command::RoundDown,
        KeyCode::Char('m') => Command::ToMenu,
        KeyCode::Char(c) => {
            let round = c.to_digit(10)?;
            if !(FIRST_ROUND..=LAST_ROUND).contains(&round) {
                return None;
            }
            Command::SelectRound(round)
        }
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::up("Up", Some(Command::Move(Dir::Up)))]
    #[case::down("Down\n", Some(Command::Move(Dir::Down)))]
    #[case::left(" Left ", Some(Command::Move(Dir::Left)))]
    #[case::right("Right\r\n", Some(Command::Move(Dir::Right)))]
    #[case::center("Center", None)]
    #[case::telemetry("yaw:-12.5", None)]
    #[case::lowercase("up", None)]
    #[case::empty("", None)]
    fn parses_tokens(#[case] line: &str, #[case] expected: Option<Command>) {
        assert_eq!(parse_token(line), expected);
    }

    #[rstest]
    #[case(Phase::Menu, Some(Command::Start))]
    #[case(Phase::Win, Some(Command::NextRound))]
    #[case(Phase::GameOver, Some(Command::Retry))]
    #[case(Phase::Playing, None)]
    fn enter_follows_phase(#[case] phase: Phase, #[case] expected: Option<Command>) {
        assert_eq!(from_key(KeyCode::Enter, phase), expected);
    }

    #[test]
    fn digits_select_rounds() {
        assert_eq!(
            from_key(KeyCode::Char('6'), Phase::Menu),
            Some(Command::SelectRound(6))
        );
        assert_eq!(from_key(KeyCode::Char('9'), Phase::Menu), None);
        assert_eq!(from_key(KeyCode::Char('0'), Phase::Menu), None);
        assert_eq!(from_key(KeyCode::Char('x'), Phase::Menu), None);
        assert_eq!(
            from_key(KeyCode::Char('h'), Phase::Playing),
            Some(Command::Move(Dir::Left))
        );
    }
}
