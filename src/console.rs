use std::io::{self, BufRead, Write};

/// Line-oriented user interaction. The session and fetcher only talk to the
/// user through this, so they run the same against a terminal or a script.
pub trait Console {
    /// Shows `message` and reads one line. `Ok(None)` means input is closed.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;

    fn say(&mut self, line: &str);

    /// Replaces the current progress line in place.
    fn progress(&mut self, line: &str);
}

pub fn is_yes(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y"))
}

pub struct Terminal;

impl Console for Terminal {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{message}");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn progress(&mut self, line: &str) {
        print!("\r{line}");
        let _ = io::stdout().flush();
    }
}

#[cfg(test)]
pub use scripted::ScriptedConsole;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_is_case_insensitive_and_trimmed() {
        assert!(is_yes(Some("y")));
        assert!(is_yes(Some("Y")));
        assert!(is_yes(Some(" y ")));
        assert!(!is_yes(Some("yes")));
        assert!(!is_yes(Some("")));
        assert!(!is_yes(None));
    }

    #[test]
    fn scripted_console_runs_dry() {
        let mut console = ScriptedConsole::new(&["first"]);
        assert_eq!(console.prompt("a: ").unwrap().as_deref(), Some("first"));
        assert_eq!(console.prompt("b: ").unwrap(), None);
        assert_eq!(console.prompts, vec!["a: ", "b: "]);
    }
}
