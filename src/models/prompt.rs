use super::registry::SPECIAL_TOKENS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// ChatML prompt for the catalog's Qwen models.
#[derive(Clone, Debug, Default)]
pub struct ChatPrompt {
    turns: Vec<(Role, String)>,
}

impl ChatPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(self, content: impl Into<String>) -> Self {
        self.turn(Role::System, content)
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.turn(Role::User, content)
    }

    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.turn(Role::Assistant, content)
    }

    pub fn turn(mut self, role: Role, content: impl Into<String>) -> Self {
        self.turns.push((role, content.into()));
        self
    }

    /// Renders every turn, then leaves an assistant turn open for generation.
    pub fn render(&self) -> String {
        let mut prompt = String::new();
        for (role, content) in &self.turns {
            prompt.push_str(SPECIAL_TOKENS.im_start);
            prompt.push_str(role.as_str());
            prompt.push('\n');
            prompt.push_str(content);
            prompt.push_str(SPECIAL_TOKENS.im_end);
            prompt.push('\n');
        }
        prompt.push_str(SPECIAL_TOKENS.im_start);
        prompt.push_str(Role::Assistant.as_str());
        prompt.push('\n');
        prompt
    }
}
