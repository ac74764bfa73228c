// Terminal rendering of the chat widget: bubbles become prefixed lines on
// stdout, the status line goes to stderr so piped output stays clean.

use support_widget::{Bubble, BubbleRole, ChatView, Status};

pub struct TerminalView {
    /// Print the status line after every change (interactive mode).
    pub show_status: bool,
    /// Print user bubbles too; off when the terminal already shows what was typed.
    pub echo_user: bool,
}

impl TerminalView {
    /// Echo user lines only when stdin is piped, so transcripts read as a dialogue.
    pub fn interactive() -> Self {
        use std::io::IsTerminal;
        Self { show_status: true, echo_user: !std::io::stdin().is_terminal() }
    }

    pub fn one_shot() -> Self {
        Self { show_status: false, echo_user: false }
    }
}

pub fn bubble_line(bubble: &Bubble) -> String {
    let prefix = match bubble.role {
        BubbleRole::User => "you>",
        BubbleRole::Bot => "bot>",
    };
    let mut lines = bubble.text.lines();
    let mut out = format!("{} {}", prefix, lines.next().unwrap_or(""));
    for line in lines {
        out.push('\n');
        out.push_str("     ");
        out.push_str(line);
    }
    out
}

impl ChatView for TerminalView {
    fn append_bubble(&self, bubble: &Bubble) {
        if bubble.role == BubbleRole::User && !self.echo_user {
            return;
        }
        println!("{}", bubble_line(bubble));
    }

    fn clear_input(&self) {}

    fn set_status(&self, status: &Status) {
        if self.show_status && *status != Status::Sending {
            eprintln!("[{}]", status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_bubble() {
        assert_eq!(bubble_line(&Bubble::bot("hi there")), "bot> hi there");
        assert_eq!(bubble_line(&Bubble::user("hello")), "you> hello");
    }

    #[test]
    fn multi_line_bubble_is_indented() {
        assert_eq!(bubble_line(&Bubble::bot("one\ntwo")), "bot> one\n     two");
    }
}
