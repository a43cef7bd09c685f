// src/ui.rs
// Output buffers for one command: the main output pane and the detail pane
// that listings and charts are written to.

use console::{style, Emoji};

static INFO_EMOJI: Emoji = Emoji("ℹ️ ", "[i] ");
static SUCCESS_EMOJI: Emoji = Emoji("✅ ", "[√] ");
static ERROR_EMOJI: Emoji = Emoji("❌ ", "[x] ");
static WARNING_EMOJI: Emoji = Emoji("⚠️ ", "[!] ");

pub const LINE: &str = "____________________________________________________________\n";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageType {
    Info,
    Success,
    Error,
    Warning,
}

/// Formats messages for the terminal with optional color and emoji.
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    pub use_emoji: bool,
    pub use_colors: bool,
}

impl ConsoleRenderer {
    pub fn new(use_emoji: bool, use_colors: bool) -> Self {
        Self {
            use_emoji,
            use_colors,
        }
    }

    fn emoji(&self, message_type: MessageType) -> &str {
        let emoji = match message_type {
            MessageType::Info => &INFO_EMOJI,
            MessageType::Success => &SUCCESS_EMOJI,
            MessageType::Error => &ERROR_EMOJI,
            MessageType::Warning => &WARNING_EMOJI,
        };
        if self.use_emoji {
            emoji.0
        } else {
            emoji.1
        }
    }

    fn style_text(&self, text: &str, message_type: MessageType) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        match message_type {
            MessageType::Info => style(text).blue().to_string(),
            MessageType::Success => style(text).green().to_string(),
            MessageType::Error => style(text).red().bold().to_string(),
            MessageType::Warning => style(text).yellow().bold().to_string(),
        }
    }

    pub fn render(&self, message_type: MessageType, text: &str) -> String {
        format!(
            "{}{}",
            self.emoji(message_type),
            self.style_text(text, message_type)
        )
    }
}

pub struct Ui {
    output: String,
    details: String,
    renderer: ConsoleRenderer,
}

impl Default for Ui {
    fn default() -> Self {
        Self::plain()
    }
}

impl Ui {
    pub fn new(renderer: ConsoleRenderer) -> Self {
        Self {
            output: String::new(),
            details: String::new(),
            renderer,
        }
    }

    /// No colors, ASCII markers.
    pub fn plain() -> Self {
        Self::new(ConsoleRenderer::new(false, false))
    }

    pub fn append_to_output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn append_to_details(&mut self, text: &str) {
        self.details.push_str(text);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn clear(&mut self) {
        self.output.clear();
        self.details.clear();
    }

    pub fn renderer(&self) -> &ConsoleRenderer {
        &self.renderer
    }

    pub fn show_error(&self, message: &str) -> String {
        format!("{}\n", self.renderer.render(MessageType::Error, message))
    }

    pub fn show_warning(&self, message: &str) -> String {
        format!("{}\n", self.renderer.render(MessageType::Warning, message))
    }

    pub fn show_welcome(&self) -> String {
        let mut welcome = String::from(LINE);
        welcome.push_str(&self.renderer.render(
            MessageType::Info,
            "Hello! I'm your Financial Ghost. Type 'start' to begin.",
        ));
        welcome.push('\n');
        welcome.push_str(LINE);
        welcome
    }

    pub fn show_goodbye(&self) -> String {
        format!(
            "{}\n",
            self.renderer
                .render(MessageType::Success, "Bye. Hope to see you again soon!")
        )
    }
}
