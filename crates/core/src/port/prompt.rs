// Operator Prompt Port

/// Source of operator answers
///
/// Questions are logged by the caller; implementations only read the answer.
pub trait Prompt: Send + Sync {
    /// Read one line of input without the trailing newline.
    /// Returns `None` once input is exhausted.
    fn read_line(&self) -> std::io::Result<Option<String>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed list of answers, then reports end of input
    pub struct ScriptedPrompt {
        answers: Mutex<VecDeque<String>>,
        asked: Mutex<usize>,
    }

    impl ScriptedPrompt {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
                asked: Mutex::new(0),
            }
        }

        /// Number of reads, including the ones that hit end of input
        pub fn asked(&self) -> usize {
            *self.asked.lock().unwrap()
        }

        pub fn remaining(&self) -> usize {
            self.answers.lock().unwrap().len()
        }
    }

    impl Prompt for ScriptedPrompt {
        fn read_line(&self) -> std::io::Result<Option<String>> {
            *self.asked.lock().unwrap() += 1;
            Ok(self.answers.lock().unwrap().pop_front())
        }
    }
}
