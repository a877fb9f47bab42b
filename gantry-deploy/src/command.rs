//! Task command tokenizer

use crate::error::DeployError;

/// Split a shell-style command string into an argument vector
///
/// Quoting and escaping follow shell rules. An empty string yields an empty
/// vector, meaning no override: the container's default command runs.
pub fn parse_command(command: &str) -> Result<Vec<String>, DeployError> {
    Ok(shell_words::split(command)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(parse_command("echo hello").unwrap(), ["echo", "hello"]);
    }

    #[test]
    fn quoted_arguments_stay_whole() {
        assert_eq!(
            parse_command("sh -c 'echo hello world'").unwrap(),
            ["sh", "-c", "echo hello world"]
        );
    }

    #[test]
    fn empty_input_means_no_override() {
        assert!(parse_command("").unwrap().is_empty());
    }

    #[test]
    fn unbalanced_quote_is_an_error() {
        let error = parse_command("echo 'unterminated").unwrap_err();
        assert!(matches!(error, DeployError::CommandParse(_)));
    }
}
