//! Bot classification seam

use isbot::Bots;

/// Guesses from a user-agent string alone whether it is an automated client
pub trait BotClassifier {
    fn is_bot(&self, user_agent: &str) -> bool;
}

/// Classifier backed by the `isbot` crate's built-in pattern set
pub struct IsBotClassifier {
    bots: Bots,
}

impl IsBotClassifier {
    pub fn new() -> Self {
        Self {
            bots: Bots::default(),
        }
    }
}

impl Default for IsBotClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BotClassifier for IsBotClassifier {
    fn is_bot(&self, user_agent: &str) -> bool {
        self.bots.is_bot(user_agent)
    }
}
