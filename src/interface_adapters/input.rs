// Local input: one text line per pointer/tap event from the terminal driver.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LocalInput {
    /// Pointer or touch moved.
    Aim { x: f32, y: f32 },
    /// Click or tap.
    Shoot,
    Resize { width: f32, height: f32 },
    SaveScore,
    ToggleLeaderboard,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError(String);

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InputError {}

/// Parses a line. An empty line is a click, like pressing the trigger.
pub fn parse_line(line: &str) -> Result<LocalInput, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(LocalInput::Shoot);
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "aim" | "move" => {
            let (x, y) = two_numbers(&mut words, command)?;
            LocalInput::Aim { x, y }
        }
        "shoot" | "s" | "fire" => LocalInput::Shoot,
        "resize" => {
            let (width, height) = two_numbers(&mut words, command)?;
            if width <= 0.0 || height <= 0.0 {
                return Err(InputError("resize needs positive dimensions".to_string()));
            }
            LocalInput::Resize { width, height }
        }
        "save" => LocalInput::SaveScore,
        "top" | "leaderboard" => LocalInput::ToggleLeaderboard,
        "quit" | "exit" | "q" => LocalInput::Quit,
        other => return Err(InputError(format!("unknown command `{other}`"))),
    };

    if words.next().is_some() {
        return Err(InputError(format!("too many arguments for `{command}`")));
    }
    Ok(input)
}

fn two_numbers<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &str,
) -> Result<(f32, f32), InputError> {
    let mut next = || -> Result<f32, InputError> {
        words
            .next()
            .and_then(|w| w.parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| InputError(format!("`{command}` needs two numbers")))
    };
    let a = next()?;
    let b = next()?;
    Ok((a, b))
}
