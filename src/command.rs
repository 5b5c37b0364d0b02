/// Runtime-configurable session setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Speed,
    Mood,
    Model,
    Color,
}

impl Setting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Setting::Speed => "speed",
            Setting::Mood => "mood",
            Setting::Model => "model",
            Setting::Color => "color",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "speed" => Some(Setting::Speed),
            "mood" => Some(Setting::Mood),
            "model" => Some(Setting::Model),
            "color" => Some(Setting::Color),
            _ => None,
        }
    }
}

/// Topic of a `help <topic>` shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Setting(Setting),
    Api { full: bool },
    Memory,
}

impl HelpTopic {
    /// The command a `help <topic>` shortcut stands for.
    pub fn command(self) -> Command {
        match self {
            HelpTopic::Setting(setting) => Command::Select(setting),
            HelpTopic::Api { full } => Command::LastRequest { full },
            HelpTopic::Memory => Command::MemoryAnalysis,
        }
    }
}

/// Classified user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// General help when `None`.
    Help(Option<HelpTopic>),
    Show(Setting),
    ShowTurn,
    Select(Setting),
    LastRequest { full: bool },
    MemoryAnalysis,
    Malformed(String),
    Chat(String),
    /// Blank input; nothing to do.
    Empty,
}

/// Classify raw user input.
///
/// Matching is case-insensitive and ignores surrounding and repeated
/// whitespace. Exact phrases are checked before the malformed-command rules;
/// anything left over is conversation.
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let lowered = trimmed.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let text = words.join(" ");

    match text.as_str() {
        "quit" | "exit" | "bye" | "goodbye" => return Command::Quit,
        "help" | "?" => return Command::Help(None),
        "turn" => return Command::ShowTurn,
        "api" => return Command::LastRequest { full: false },
        "api all" => return Command::LastRequest { full: true },
        "memory" | "summary" => return Command::MemoryAnalysis,
        _ => {}
    }

    if let Some(topic) = text.strip_prefix("help ") {
        return Command::Help(help_topic(topic));
    }

    if let Some(setting) = Setting::from_token(words[0]) {
        return match words.get(1) {
            None => Command::Show(setting),
            Some(&"?") if words.len() == 2 => Command::Select(setting),
            Some(_) => Command::Malformed(format!(
                "Did you mean '{0} ?' to change the {0}?",
                setting.as_str()
            )),
        };
    }

    if words[0] == "api" && words.len() == 2 {
        return Command::Malformed(format!(
            "'{trimmed}' is not valid. Try 'api' or 'api all'."
        ));
    }

    Command::Chat(trimmed.to_string())
}

fn help_topic(topic: &str) -> Option<HelpTopic> {
    match topic {
        "api" => Some(HelpTopic::Api { full: false }),
        "api all" => Some(HelpTopic::Api { full: true }),
        "memory" | "summary" => Some(HelpTopic::Memory),
        other => Setting::from_token(other).map(HelpTopic::Setting),
    }
}
