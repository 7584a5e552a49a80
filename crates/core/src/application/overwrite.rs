// Ask before replacing an already imported session

use std::path::Path;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::port::Prompt;

/// Interpret a yes/no answer; `None` for anything else
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask whether `session_dir` may be overwritten, until a yes/no answer
///
/// # Errors
/// - AppError::Aborted if input ends before an answer
pub fn confirm_overwrite(session_dir: &Path, prompt: &dyn Prompt) -> Result<bool> {
    warn!(
        "BIDS folder for the provided participant and session already exists: {}",
        session_dir.display()
    );

    loop {
        info!("Do you want to overwrite the existing folder? [yes/no]: ");

        let Some(answer) = prompt.read_line()? else {
            return Err(AppError::Aborted("overwrite confirmation".to_string()));
        };

        match parse_yes_no(&answer) {
            Some(decision) => return Ok(decision),
            None => warn!("Invalid input. Please enter 'yes' or 'no'."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::prompt::mocks::ScriptedPrompt;

    #[test]
    fn test_parse_yes_no_is_case_insensitive() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" yes "), Some(true));
        assert_eq!(parse_yes_no("NO"), Some(false));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn test_reasks_on_invalid_answer() {
        let prompt = ScriptedPrompt::new(["sure", "", "No"]);
        let decision = confirm_overwrite(Path::new("/bids/sub-001/ses-01"), &prompt).unwrap();
        assert!(!decision);
        assert_eq!(prompt.asked(), 3);
    }

    #[test]
    fn test_end_of_input_aborts() {
        let prompt = ScriptedPrompt::new(Vec::<String>::new());
        let err = confirm_overwrite(Path::new("/bids"), &prompt).unwrap_err();
        assert!(matches!(err, AppError::Aborted(_)));
    }
}
