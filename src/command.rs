//! Command line grammar.
//!
//! A command line holds at most three whitespace-separated parts:
//! an optional NER (entry index), a command token, and a free-text argument
//! that keeps its inner whitespace. Which part is which depends on how many
//! tokens the line splits into:
//!
//! ```text
//! <NER>                    set the current NER
//! <cmd>                    run a command
//! <NER> <cmd>              set the NER, then run the command
//! <cmd> <text...>          run a command with an argument
//! <NER> <cmd> <text...>    set the NER, then run the command with an argument
//! ```

use std::fmt;

use thiserror::Error;

/// Every action a command line can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetIndex,
    Cut,
    Copy,
    Paste,
    Visualize,
    MakeDirectory,
    Find,
    AddNote,
    RemoveNote,
    NavigateInto,
    NavigateParent,
    Exit,
    Help,
    NoOp,
}

impl Action {
    /// Canonical token used to type this action.
    pub fn keyword(self) -> &'static str {
        match self {
            Action::SetIndex => "<NER>",
            Action::Cut => "cut",
            Action::Copy => "copy",
            Action::Paste => "paste",
            Action::Visualize => "visu",
            Action::MakeDirectory => "mkdir",
            Action::Find => "find",
            Action::AddNote => "+",
            Action::RemoveNote => "-",
            Action::NavigateInto => ".",
            Action::NavigateParent => "..",
            Action::Exit => "exit",
            Action::Help => "help",
            Action::NoOp => "",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoOp => f.write_str("<nothing>"),
            other => f.write_str(other.keyword()),
        }
    }
}

/// A successfully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    /// NER typed on the line, if any. `Some(0)` and `None` are distinct.
    pub index: Option<usize>,
    /// Trailing free text, if any. `Some("")` never comes out of `parse`.
    pub argument: Option<String>,
}

impl Command {
    pub fn noop() -> Self {
        Self {
            action: Action::NoOp,
            index: None,
            argument: None,
        }
    }

    fn action(action: Action) -> Self {
        Self {
            action,
            index: None,
            argument: None,
        }
    }

    /// Whether the line both selects a NER and asks for another action,
    /// e.g. `3 visu`: the index is applied first, then the action runs.
    pub fn dispatches_with_index(&self) -> bool {
        self.index.is_some() && self.action != Action::SetIndex
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::noop()
    }
}

/// The line could not be mapped to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Invalid command with one argument. See help.")]
    OneArgument,
    #[error("Invalid command with two arguments. See help.")]
    TwoArguments,
    #[error("Invalid command with three arguments. See help.")]
    ThreeArguments,
}

/// Parse one raw input line.
pub fn parse(line: &str) -> Result<Command, GrammarError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::noop());
    }

    match split_bounded(line, 3)[..] {
        [only] => parse_one(only),
        [first, second] => parse_two(first, second),
        [first, second, rest] => parse_three(line, first, second, rest),
        // a non-empty trimmed line always yields one to three tokens
        _ => Ok(Command::noop()),
    }
}

fn parse_one(token: &str) -> Result<Command, GrammarError> {
    if let Some(index) = parse_index(token) {
        return Ok(Command {
            action: Action::SetIndex,
            index: Some(index),
            argument: None,
        });
    }
    lookup_keyword(token)
        .map(Command::action)
        .ok_or(GrammarError::OneArgument)
}

fn parse_two(first: &str, second: &str) -> Result<Command, GrammarError> {
    if let Some(index) = parse_index(first) {
        let action = lookup_keyword(second).ok_or(GrammarError::TwoArguments)?;
        return Ok(Command {
            action,
            index: Some(index),
            argument: None,
        });
    }
    let action = lookup_keyword(first).ok_or(GrammarError::TwoArguments)?;
    Ok(Command {
        action,
        index: None,
        argument: Some(second.to_string()),
    })
}

fn parse_three(line: &str, first: &str, second: &str, rest: &str) -> Result<Command, GrammarError> {
    let Some(index) = parse_index(first) else {
        // `find my file` is a command followed by a multi-word argument.
        return match split_bounded(line, 2)[..] {
            [command, argument] => parse_two(command, argument),
            _ => Err(GrammarError::TwoArguments),
        };
    };
    let action = lookup_keyword(second).ok_or(GrammarError::ThreeArguments)?;
    Ok(Command {
        action,
        index: Some(index),
        argument: Some(rest.to_string()),
    })
}

/// Split on whitespace runs into at most `limit` tokens; the last token keeps
/// the remainder of the line verbatim.
fn split_bounded(line: &str, limit: usize) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(limit);
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        if tokens.len() + 1 == limit {
            tokens.push(rest.trim_end());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                tokens.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                tokens.push(rest);
                break;
            }
        }
    }
    tokens
}

/// A NER is a base-10 integer literal with a non-negative value.
fn parse_index(token: &str) -> Option<usize> {
    token
        .parse::<i32>()
        .ok()
        .and_then(|value| usize::try_from(value).ok())
}

/// Symbols are matched exactly; keywords ignore case.
fn lookup_keyword(token: &str) -> Option<Action> {
    let action = match token {
        "+" => Action::AddNote,
        "-" => Action::RemoveNote,
        ".." => Action::NavigateParent,
        "." => Action::NavigateInto,
        _ => match token.to_lowercase().as_str() {
            "cut" => Action::Cut,
            "copy" => Action::Copy,
            "paste" => Action::Paste,
            "visu" => Action::Visualize,
            "mkdir" => Action::MakeDirectory,
            "find" => Action::Find,
            "exit" => Action::Exit,
            "help" => Action::Help,
            _ => return None,
        },
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(action: Action, index: Option<usize>, argument: Option<&str>) -> Command {
        Command {
            action,
            index,
            argument: argument.map(str::to_string),
        }
    }

    #[test]
    fn empty_lines_are_noop() {
        for line in ["", " ", "\t  \t"] {
            assert_eq!(parse(line).unwrap(), Command::noop(), "line {:?}", line);
        }
    }

    #[test]
    fn single_token_lines() {
        let cases = [
            ("2", cmd(Action::SetIndex, Some(2), None)),
            ("+10", cmd(Action::SetIndex, Some(10), None)),
            ("0", cmd(Action::SetIndex, Some(0), None)),
            (" cut", cmd(Action::Cut, None, None)),
            ("+  ", cmd(Action::AddNote, None, None)),
            ("-", cmd(Action::RemoveNote, None, None)),
            (" . ", cmd(Action::NavigateInto, None, None)),
            ("..", cmd(Action::NavigateParent, None, None)),
            ("exit", cmd(Action::Exit, None, None)),
            ("paste", cmd(Action::Paste, None, None)),
            ("help", cmd(Action::Help, None, None)),
        ];
        for (line, expected) in cases {
            assert_eq!(parse(line).unwrap(), expected, "line {:?}", line);
        }
    }

    #[test]
    fn two_token_lines() {
        let cases = [
            ("2 cut ", cmd(Action::Cut, Some(2), None)),
            ("7 .", cmd(Action::NavigateInto, Some(7), None)),
            ("3 -", cmd(Action::RemoveNote, Some(3), None)),
            ("find file", cmd(Action::Find, None, Some("file"))),
            ("mkdir test", cmd(Action::MakeDirectory, None, Some("test"))),
            ("5 exit", cmd(Action::Exit, Some(5), None)),
            ("1 visu", cmd(Action::Visualize, Some(1), None)),
        ];
        for (line, expected) in cases {
            assert_eq!(parse(line).unwrap(), expected, "line {:?}", line);
        }
    }

    #[test]
    fn three_token_lines_keep_inner_whitespace() {
        assert_eq!(
            parse("2 + ceci est un test ").unwrap(),
            cmd(Action::AddNote, Some(2), Some("ceci est un test"))
        );
        assert_eq!(
            parse("  2  + hello    world  ").unwrap(),
            cmd(Action::AddNote, Some(2), Some("hello    world"))
        );
    }

    #[test]
    fn command_with_multi_word_argument_is_resplit() {
        assert_eq!(
            parse("+ 9 truc").unwrap(),
            cmd(Action::AddNote, None, Some("9 truc"))
        );
        assert_eq!(
            parse("find my  file.txt").unwrap(),
            cmd(Action::Find, None, Some("my  file.txt"))
        );
    }

    #[test]
    fn argument_that_looks_like_an_index_stays_text() {
        assert_eq!(
            parse("mkdir 42").unwrap(),
            cmd(Action::MakeDirectory, None, Some("42"))
        );
    }

    #[test]
    fn keywords_ignore_case_but_symbols_do_not() {
        assert_eq!(parse("CUT").unwrap().action, Action::Cut);
        assert_eq!(parse("Visu").unwrap().action, Action::Visualize);
        assert_eq!(parse("3 MkDir x").unwrap().action, Action::MakeDirectory);
        assert_eq!(parse("...").unwrap_err(), GrammarError::OneArgument);
    }

    #[test]
    fn invalid_lines() {
        let cases = [
            ("2 cuy ", GrammarError::TwoArguments),
            ("7 test 6 +", GrammarError::ThreeArguments),
            ("test 6 +", GrammarError::TwoArguments),
            ("-5 ", GrammarError::OneArgument),
            ("nothing", GrammarError::OneArgument),
            ("3 4", GrammarError::TwoArguments),
        ];
        for (line, expected) in cases {
            assert_eq!(parse(line).unwrap_err(), expected, "line {:?}", line);
        }
    }

    #[test]
    fn grammar_error_messages() {
        assert_eq!(
            GrammarError::TwoArguments.to_string(),
            "Invalid command with two arguments. See help."
        );
        assert_eq!(
            GrammarError::OneArgument.to_string(),
            "Invalid command with one argument. See help."
        );
    }

    #[test]
    fn negative_zero_is_an_index_but_negative_values_are_not() {
        assert_eq!(parse("-0").unwrap(), cmd(Action::SetIndex, Some(0), None));
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("99999999999"), None);
        assert_eq!(parse_index("1.5"), None);
    }

    #[test]
    fn split_bounded_keeps_remainder() {
        assert_eq!(split_bounded("a  b c  d", 3), vec!["a", "b", "c  d"]);
        assert_eq!(split_bounded("a  b c  d", 2), vec!["a", "b c  d"]);
        assert_eq!(split_bounded("a", 3), vec!["a"]);
    }

    #[test]
    fn dispatch_with_index() {
        assert!(parse("3 visu").unwrap().dispatches_with_index());
        assert!(!parse("3").unwrap().dispatches_with_index());
        assert!(!parse("visu").unwrap().dispatches_with_index());
    }

    #[test]
    fn action_display_uses_keyword() {
        assert_eq!(Action::Visualize.to_string(), "visu");
        assert_eq!(Action::NavigateParent.to_string(), "..");
    }
}
