use hrchat_core::host::{LOGIN_PATH, Navigator};

/// Stands in for page navigation: tells the user where to go next.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        if path == LOGIN_PATH {
            eprintln!("Session ended. Run `hrchat login <employee-id>` to sign in again.");
        } else {
            eprintln!("Continue at {path}");
        }
    }
}
