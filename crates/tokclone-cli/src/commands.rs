//! REPL command parsing.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tokclone_core::navigation::Tab;

/// Words offered by completion.
pub const COMMAND_NAMES: &[&str] = &[
    "next", "prev", "scroll", "resize", "tap", "like", "mute", "ai", "close", "tick", "tab",
    "login", "register", "logout", "show", "help", "quit",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Scroll(f64),
    Resize(f64),
    Tap,
    Like,
    Mute,
    Assistant,
    CloseAssistant,
    Tick(Duration),
    Tab(Tab),
    Login {
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();
        let arg = |index: usize| args.get(index).map(|s| s.to_string()).unwrap_or_default();

        let command = match name.to_ascii_lowercase().as_str() {
            "next" | "j" | "down" => Command::Next,
            "prev" | "k" | "up" => Command::Prev,
            "scroll" => Command::Scroll(number(&args, "scroll <pixels>")?),
            "resize" => {
                let height = number(&args, "resize <height>")?;
                if height <= 0.0 {
                    bail!("height must be positive");
                }
                Command::Resize(height)
            }
            "tap" | "play" | "pause" => Command::Tap,
            "like" => Command::Like,
            "mute" | "unmute" => Command::Mute,
            "ai" => Command::Assistant,
            "close" => Command::CloseAssistant,
            "tick" => {
                let secs = number(&args, "tick <seconds>")?;
                let elapsed = Duration::try_from_secs_f64(secs)
                    .map_err(|_| anyhow!("seconds must be a non-negative number"))?;
                Command::Tick(elapsed)
            }
            "tab" | "go" => {
                let target = args
                    .first()
                    .ok_or_else(|| anyhow!("usage: tab <feed|discover|inbox|profile>"))?;
                let tab = Tab::from_str(target).map_err(|_| anyhow!("unknown tab '{target}'"))?;
                Command::Tab(tab)
            }
            "login" => Command::Login {
                email: arg(0),
                password: arg(1),
            },
            "register" | "signup" => Command::Register {
                username: arg(0),
                email: arg(1),
                password: arg(2),
            },
            "logout" => Command::Logout,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}'. Type 'help' for a list."),
        };
        Ok(command)
    }
}

fn number(args: &[&str], usage: &str) -> Result<f64> {
    let raw = args.first().ok_or_else(|| anyhow!("usage: {usage}"))?;
    let value: f64 = raw
        .parse()
        .with_context(|| format!("'{raw}' is not a number"))?;
    if !value.is_finite() {
        bail!("'{raw}' is not a finite number");
    }
    Ok(value)
}

pub const HELP: &str = "\
  next | j              swipe to the next video
  prev | k              swipe to the previous video
  scroll <px>           scroll by a pixel delta without snapping
  resize <height>       change the viewport height
  tap                   play / pause the active video
  like                  like / unlike the active video
  mute                  toggle sound for every video
  ai                    open the AI caption assistant
  close                 hide the AI panel
  tick <secs>           advance the playback clock
  tab <name>            switch to feed, discover, inbox or profile
  login <email> <pw>    sign in
  register <user> <email> <pw>
                        create an account
  logout                sign out
  show                  redraw the current view
  quit                  exit";
