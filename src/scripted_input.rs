use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::game::Command;

/// Replays a recorded key script as game commands, one character per input.
/// Used by the integration tests and handy for reproducing a session by hand.
pub struct ScriptedInput {
    commands: Vec<Command>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut script = String::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            script.push_str(trimmed);
        }

        Ok(Self::from_script(&script))
    }

    pub fn from_script(script: &str) -> Self {
        let mut commands = Vec::new();
        for symbol in script.chars() {
            if symbol.is_whitespace() {
                continue;
            }
            if let Some(command) = char_to_command(symbol) {
                commands.push(command);
            } else {
                eprintln!("Warning: unknown key in script: {symbol}");
            }
        }
        Self {
            commands,
            cursor: 0,
        }
    }

    pub fn next_command(&mut self) -> Option<Command> {
        let command = self.commands.get(self.cursor).copied();
        if command.is_some() {
            self.cursor += 1;
        }
        command
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// The original keyboard layout: qwe/asd/zxc for the 8 directions around the
// stay-put 's', '/' for credits, 'r' for restart.
fn char_to_command(symbol: char) -> Option<Command> {
    match symbol.to_ascii_lowercase() {
        'q' => Some(Command::Step { dx: -1, dy: -1 }),
        'w' => Some(Command::Step { dx: 0, dy: -1 }),
        'e' => Some(Command::Step { dx: 1, dy: -1 }),
        'a' => Some(Command::Step { dx: -1, dy: 0 }),
        's' => Some(Command::Step { dx: 0, dy: 0 }),
        'd' => Some(Command::Step { dx: 1, dy: 0 }),
        'z' => Some(Command::Step { dx: -1, dy: 1 }),
        'x' => Some(Command::Step { dx: 0, dy: 1 }),
        'c' => Some(Command::Step { dx: 1, dy: 1 }),
        '/' | '?' => Some(Command::ToggleCredits),
        'r' => Some(Command::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_movement_grid() {
        let mut input = ScriptedInput::from_script("qwe asd zxc");
        let mut deltas = Vec::new();
        while let Some(Command::Step { dx, dy }) = input.next_command() {
            deltas.push((dx, dy));
        }
        assert_eq!(
            deltas,
            vec![
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (0, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ]
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let mut input = ScriptedInput::from_script("w!d");
        assert_eq!(input.len(), 2);
        assert_eq!(input.next_command(), Some(Command::Step { dx: 0, dy: -1 }));
        assert_eq!(input.next_command(), Some(Command::Step { dx: 1, dy: 0 }));
        assert_eq!(input.next_command(), None);
    }

    #[test]
    fn credits_and_restart_keys() {
        let mut input = ScriptedInput::from_script("/r?");
        assert_eq!(input.next_command(), Some(Command::ToggleCredits));
        assert_eq!(input.next_command(), Some(Command::Restart));
        assert_eq!(input.next_command(), Some(Command::ToggleCredits));
    }
}
