//! Line-oriented event adapter: turns text commands into controller calls.
//!
//! Commands:
//! - `open N`, `close`, `next`, `prev`, `goto N`
//! - `key NAME` (e.g. `key Escape`)
//! - `swipe X0 Y0 X1 Y1` (start + move + end in one line)
//! - `down X Y`, `move X Y`, `up X Y`, `cancel` (single gesture events)
//! - `backdrop`, `content` (modal clicks)
//! - `status`, `help`, `quit`

use std::str::FromStr;

use thiserror::Error;

use crate::carousel::{CarouselController, ClickTarget, Direction, Key};
use crate::presenter::Presenter;

pub const HELP: &str = "commands: open N | close | next | prev | goto N | key NAME | \
swipe X0 Y0 X1 Y1 | down X Y | move X Y | up X Y | cancel | backdrop | content | status | quit";

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected} argument(s)")]
    Arity {
        command: &'static str,
        expected: usize,
    },
    #[error("invalid number `{0}`")]
    Number(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Open(i64),
    Close,
    Navigate(Direction),
    Goto(i64),
    Key(Key),
    Swipe { from: (f64, f64), to: (f64, f64) },
    GestureStart(f64, f64),
    GestureMove(f64, f64),
    GestureEnd(f64, f64),
    GestureCancel,
    Click(ClickTarget),
    Status,
    Help,
    Quit,
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Continue,
    Print(String),
    Quit,
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match name {
            "open" => Self::Open(int(expect(&args, "open", 1)?[0])?),
            "close" => Self::Close,
            "next" => Self::Navigate(Direction::Next),
            "prev" | "previous" => Self::Navigate(Direction::Previous),
            "goto" => Self::Goto(int(expect(&args, "goto", 1)?[0])?),
            "key" => Self::Key(Key::from_name(expect(&args, "key", 1)?[0])),
            "swipe" => {
                let a = expect(&args, "swipe", 4)?;
                Self::Swipe {
                    from: (float(a[0])?, float(a[1])?),
                    to: (float(a[2])?, float(a[3])?),
                }
            }
            "down" => {
                let a = expect(&args, "down", 2)?;
                Self::GestureStart(float(a[0])?, float(a[1])?)
            }
            "move" => {
                let a = expect(&args, "move", 2)?;
                Self::GestureMove(float(a[0])?, float(a[1])?)
            }
            "up" => {
                let a = expect(&args, "up", 2)?;
                Self::GestureEnd(float(a[0])?, float(a[1])?)
            }
            "cancel" => Self::GestureCancel,
            "backdrop" => Self::Click(ClickTarget::Backdrop),
            "content" => Self::Click(ClickTarget::Content),
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

impl ShellCommand {
    pub fn apply<P: Presenter>(&self, carousel: &mut CarouselController<P>) -> Reply {
        match self {
            Self::Open(index) => carousel.open(*index),
            Self::Close => carousel.close(),
            Self::Navigate(direction) => carousel.navigate(*direction),
            Self::Goto(index) => carousel.navigate_to(*index),
            Self::Key(key) => carousel.handle_key(key),
            Self::Swipe { from, to } => {
                carousel.handle_gesture_start(from.0, from.1);
                carousel.handle_gesture_move(to.0, to.1);
                carousel.handle_gesture_end(to.0, to.1);
            }
            Self::GestureStart(x, y) => carousel.handle_gesture_start(*x, *y),
            Self::GestureMove(x, y) => carousel.handle_gesture_move(*x, *y),
            Self::GestureEnd(x, y) => carousel.handle_gesture_end(*x, *y),
            Self::GestureCancel => carousel.handle_gesture_cancel(),
            Self::Click(target) => carousel.handle_backdrop_click(*target),
            Self::Status => return Reply::Print(status_line(carousel)),
            Self::Help => return Reply::Print(HELP.to_string()),
            Self::Quit => return Reply::Quit,
        }
        Reply::Continue
    }
}

pub fn status_line<P: Presenter>(carousel: &CarouselController<P>) -> String {
    let state = if carousel.is_visible() { "open" } else { "closed" };
    match (carousel.current_index(), carousel.current_item()) {
        (Some(index), Some(item)) => format!(
            "{state}: {} of {} - {}",
            index + 1,
            carousel.len(),
            item
        ),
        _ => format!("{state}: no items"),
    }
}

fn expect<'a, 'b>(
    args: &'b [&'a str],
    command: &'static str,
    expected: usize,
) -> Result<&'b [&'a str], CommandError> {
    if args.len() == expected {
        Ok(args)
    } else {
        Err(CommandError::Arity { command, expected })
    }
}

fn int(value: &str) -> Result<i64, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::Number(value.to_string()))
}

fn float(value: &str) -> Result<f64, CommandError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::Number(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaItem;
    use crate::presenter::RecordingPresenter;

    fn carousel() -> CarouselController<RecordingPresenter> {
        let items = (0..3)
            .map(|i| MediaItem::new(format!("{i}.png"), format!("Item {i}")))
            .collect();
        CarouselController::new(items, RecordingPresenter::new())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("open 2".parse(), Ok(ShellCommand::Open(2)));
        assert_eq!("goto -1".parse(), Ok(ShellCommand::Goto(-1)));
        assert_eq!(
            "key Escape".parse(),
            Ok(ShellCommand::Key(Key::Escape))
        );
        assert_eq!(
            "swipe 100 100 20 100".parse(),
            Ok(ShellCommand::Swipe {
                from: (100.0, 100.0),
                to: (20.0, 100.0)
            })
        );
        assert_eq!("  prev ".parse(), Ok(ShellCommand::Navigate(Direction::Previous)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ShellCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "jump".parse::<ShellCommand>(),
            Err(CommandError::Unknown("jump".into()))
        );
        assert_eq!(
            "open".parse::<ShellCommand>(),
            Err(CommandError::Arity {
                command: "open",
                expected: 1
            })
        );
        assert_eq!(
            "open two".parse::<ShellCommand>(),
            Err(CommandError::Number("two".into()))
        );
        assert_eq!(
            "down 1 NaN".parse::<ShellCommand>(),
            Err(CommandError::Number("NaN".into()))
        );
    }

    #[test]
    fn test_apply_session() {
        let mut c = carousel();
        let run = |c: &mut CarouselController<RecordingPresenter>, line: &str| {
            line.parse::<ShellCommand>().unwrap().apply(c)
        };

        assert_eq!(run(&mut c, "status"), Reply::Print("closed: 1 of 3 - Item 0 (0.png)".into()));
        run(&mut c, "open 0");
        run(&mut c, "swipe 100 100 20 100");
        assert_eq!(c.current_index(), Some(1));
        run(&mut c, "key ArrowRight");
        assert_eq!(c.current_index(), Some(2));
        run(&mut c, "content");
        assert!(c.is_visible());
        run(&mut c, "backdrop");
        assert!(!c.is_visible());
        assert_eq!(run(&mut c, "quit"), Reply::Quit);
    }
}
