//! Detection of AI-only commands
//!
//! Engines without an AI-control trigger let authors hide moves from humans
//! by giving them commands nobody can input: zero frames, or more inputs than
//! frames. The AI can still "press" such commands at will.

use super::extract::Command;
use super::token::{tokenize, ALTERNATION};

/// Number of discrete inputs in a command, one per token
pub fn input_count(command: &str) -> usize {
    tokenize(command, false)
        .chars()
        .filter(|&c| c != ALTERNATION && c != ',' && !c.is_whitespace())
        .count()
}

/// True when a human cannot perform `command` within its time window
pub fn is_ai_only(command: &Command) -> bool {
    if command.time == 0 {
        return true;
    }

    let inputs = input_count(&command.command) as i64;
    inputs > i64::from(command.time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(notation: &str, time: i32) -> Command {
        Command {
            name: "test".to_string(),
            command: notation.to_string(),
            time,
        }
    }

    #[test]
    fn test_zero_time_is_ai_only() {
        assert!(is_ai_only(&command("x", 0)));
        assert!(is_ai_only(&command("", 0)));
    }

    #[test]
    fn test_more_inputs_than_frames() {
        // ten inputs in three frames
        assert!(is_ai_only(&command("a,b,c,x,y,z,a,b,c,x", 3)));
    }

    #[test]
    fn test_performable_commands() {
        assert!(!is_ai_only(&command("~D,DF,F,x", 15)));
        assert!(!is_ai_only(&command("~D,DF,F,x", 4)));
        assert!(!is_ai_only(&command("x", 1)));
    }

    #[test]
    fn test_input_count_ignores_formatting() {
        assert_eq!(input_count("~30D,DF,F,x+y"), 5);
        assert_eq!(input_count("/B,>F,$D"), 3);
        // motions are not compressed when counting
        assert_eq!(input_count("~D,DF,F"), 3);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        assert!(!is_ai_only(&command("D,DF,F,x", 4)));
        assert!(is_ai_only(&command("D,DF,F,x", 3)));
    }
}
