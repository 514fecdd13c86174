//! User-prompt port: blocking yes/no questions and notices.
//!
//! Force harvest, the forgotten-coupon nudge, product removal and logout ask
//! for confirmation; disaster narration and receipts are shown as notices.
//! Browsers answer both synchronously, so handlers can stay straight-line.

pub trait Prompt {
    fn confirm(&mut self, message: &str) -> bool;
    fn alert(&mut self, message: &str);
}

/// `window.confirm` / `window.alert`.
#[cfg(target_arch = "wasm32")]
pub struct DialogPrompt;

#[cfg(target_arch = "wasm32")]
impl Prompt for DialogPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}

/// Headless prompt for native builds: every question is declined.
#[cfg(not(target_arch = "wasm32"))]
pub struct SilentPrompt;

#[cfg(not(target_arch = "wasm32"))]
impl Prompt for SilentPrompt {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }

    fn alert(&mut self, _message: &str) {}
}

/// Test double: answers confirmations from a queue (declining once the queue
/// is empty) and records everything it was shown. Clones share the script,
/// so a test can keep a handle after boxing one into a `Page`.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    script: std::rc::Rc<std::cell::RefCell<Script>>,
}

#[cfg(test)]
#[derive(Debug, Default)]
struct Script {
    answers: std::collections::VecDeque<bool>,
    confirms: Vec<String>,
    alerts: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        let prompt = Self::default();
        prompt.script.borrow_mut().answers = answers.iter().copied().collect();
        prompt
    }

    pub fn confirms(&self) -> Vec<String> {
        self.script.borrow().confirms.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.script.borrow().alerts.clone()
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        let mut script = self.script.borrow_mut();
        script.confirms.push(message.to_string());
        script.answers.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        self.script.borrow_mut().alerts.push(message.to_string());
    }
}
