use inksac::prelude::*;

const PROMPT: &str = ": ";

/// Styles the interactive surfaces: the prompt and error lines. The fixed
/// notice strings (background-pid reports, mode toggles, status output)
/// are printed uncolored elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct PromptStyler {
    color_support: ColorSupport,
}

impl Default for PromptStyler {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptStyler {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn prompt(&self) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return PROMPT.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Cyan).bold().build();
        PROMPT.style(prompt_style).to_string()
    }

    pub fn error(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        message.style(error_style).to_string()
    }
}
