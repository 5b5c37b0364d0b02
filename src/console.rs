//! Console presentation: wrapping, banners, help, menus and debug views.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::session::SessionState;
use crate::theme::Palette;
use crate::types::LastRequest;

pub const TEXT_WIDTH: usize = 72;
pub const PERSONA_PREFIX: &str = "THE WALL: ";

/// Messages longer than this are cut in the brief `api` view.
const TRUNCATE_AT: usize = 500;

/// Greedy word wrap. Words longer than `width` stay on their own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap with `prefix` on the first line and a matching hanging indent.
pub fn wrap_with_prefix(text: &str, prefix: &str) -> Vec<String> {
    let indent = " ".repeat(prefix.chars().count());
    wrap(text, TEXT_WIDTH.saturating_sub(indent.len()).max(1))
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{prefix}{line}")
            } else {
                format!("{indent}{line}")
            }
        })
        .collect()
}

pub fn separator() {
    println!("\n{}\n", "─".repeat(TEXT_WIDTH));
}

fn centered(text: &str) -> String {
    format!("{text:^TEXT_WIDTH$}")
}

pub fn persona_says(palette: &Palette, text: &str) {
    for line in wrap_with_prefix(text, PERSONA_PREFIX) {
        println!("{}", palette.persona(&line));
    }
}

pub fn system(palette: &Palette, text: &str) {
    println!("{}", palette.system(text));
}

pub fn alert(palette: &Palette, text: &str) {
    println!("{}", palette.alert(text));
}

pub fn intro(palette: &Palette) {
    let rule = "═".repeat(TEXT_WIDTH);
    let title = centered("THE EAST WING");
    for line in [
        rule.as_str(),
        title.as_str(),
        rule.as_str(),
        "",
        "You are a tourist visiting Washington DC to see the sights. A history",
        "nerd, you can't wait to see all of the historical buildings.",
        "",
        "You are wandering down Pennsylvania Ave to check out the White House",
        "and nearby buildings. You notice the East Wing of the White House",
        "has been demolished, with only a small wall and doorway still standing.",
        "",
        "You are surprised when the wall speaks to you...",
        "",
    ] {
        system(palette, line);
    }
    alert(
        palette,
        "Note: AI responses may take 5-10 seconds (or longer!). Please be patient...",
    );
    separator();
}

/// One-line state summary used by `turn` and the help banner.
pub fn state_line(session: &SessionState) -> String {
    format!(
        "Turn: {} | Mood: {} | Speed: {} | Model: {}",
        session.turn_count(),
        session.active_personality(),
        session.speed(),
        session.model().id
    )
}

pub fn help(session: &SessionState) {
    let palette = session.color().palette();
    let rule = "═".repeat(TEXT_WIDTH);
    let thin = "─".repeat(TEXT_WIDTH);
    let banner = format!(" CURRENT STATE: {}", state_line(session));
    let title = centered("HOW TO PLAY");

    let lines = [
        "",
        rule.as_str(),
        banner.as_str(),
        rule.as_str(),
        "",
        title.as_str(),
        thin.as_str(),
        "",
        "• Type your responses to chat with the character",
        "• The character will respond based on your conversation",
        "• Be curious, ask questions, share your thoughts!",
        "",
        "COMMANDS YOU MAY USE DURING THE CONVERSATION:",
        "",
        "help, ?      - show this message",
        "",
        "quit         - any of these will quit the program",
        "exit",
        "bye, goodbye",
        "ctrl-c",
        "",
        "speed        - show current game speed",
        "speed ?      - change the game speed",
        "",
        "mood         - show the current mood of 'the Wall'",
        "mood ?       - change the mood",
        "",
        "model        - show current AI model being used",
        "model ?      - change the AI model being used",
        "",
        "color        - show current color theme",
        "color ?      - change the color theme",
        "",
        "api          - show the last API request (brief)",
        "api all      - show the complete untruncated API request",
        "",
        "memory       - AI summarizes the last few exchanges",
        "summary        between the player and 'the Wall'.",
        "",
        "turn         - show current turn, speed, mood, and model",
        "",
        thin.as_str(),
        "",
    ];
    for line in lines {
        system(&palette, line);
    }
}

/// Render the last request, truncating long messages unless `full`.
pub fn render_last_request(request: &LastRequest, full: bool) -> Vec<String> {
    let mut out = vec![
        "=".repeat(TEXT_WIDTH),
        centered(if full {
            "LAST API REQUEST DETAILS (FULL)"
        } else {
            "LAST API REQUEST DETAILS (TRUNCATED)"
        }),
        "=".repeat(TEXT_WIDTH),
        String::new(),
    ];

    for (i, msg) in request.messages.iter().enumerate() {
        out.push(format!(
            "--- MESSAGE {}: {} ---",
            i + 1,
            msg.role.as_str().to_uppercase()
        ));
        let chars = msg.content.chars().count();
        if !full && chars > TRUNCATE_AT {
            let head: String = msg.content.chars().take(TRUNCATE_AT).collect();
            out.push(format!("{head}..."));
            out.push(format!("\n[Truncated - Full length: {chars} characters]"));
            out.push(format!(
                "*** Type 'api all' to see the full {chars} character message - it is long! ***"
            ));
        } else {
            out.push(msg.content.clone());
        }
        out.push(String::new());
    }

    out.push("--- LENGTH INSTRUCTION ---".into());
    out.push(request.length_instruction.clone());
    out.push(String::new());
    out.push("=".repeat(TEXT_WIDTH));
    out
}

pub fn memory_analysis(palette: &Palette, summaries: usize, analysis: &str) {
    let rule = "=".repeat(TEXT_WIDTH);
    system(palette, &format!("\n{rule}"));
    system(palette, &centered("CONVERSATION MEMORY EVOLUTION"));
    system(palette, &format!("{rule}\n"));
    system(palette, &format!("Analyzing last {summaries} summaries...\n"));
    for paragraph in analysis.split('\n') {
        if paragraph.trim().is_empty() {
            println!();
            continue;
        }
        for line in wrap(paragraph, TEXT_WIDTH) {
            system(palette, &line);
        }
    }
    system(palette, &format!("\n{rule}\n"));
}

/// A menu entry: value, display name, description.
pub struct MenuOption<T> {
    pub value: T,
    pub name: String,
    pub description: &'static str,
}

/// Numbered selection menu. `0` cancels; bad input re-prompts.
///
/// Returns `Ok(None)` on cancel, Ctrl-C or EOF.
pub fn select<T: Copy + PartialEq>(
    editor: &mut DefaultEditor,
    palette: &Palette,
    title: &str,
    options: &[MenuOption<T>],
    current: Option<T>,
) -> anyhow::Result<Option<T>> {
    let rule = "═".repeat(TEXT_WIDTH);
    system(palette, &format!("\n{rule}"));
    system(palette, &centered(title));
    system(palette, &format!("{rule}\n"));

    for (i, option) in options.iter().enumerate() {
        let marker = if Some(option.value) == current {
            " ★ CURRENT"
        } else {
            ""
        };
        system(palette, &format!("  [{}] {}{marker}", i + 1, option.name));
        system(palette, &format!("      → {}\n", option.description));
    }
    system(palette, "  [0] Cancel");
    system(palette, &"─".repeat(TEXT_WIDTH));

    loop {
        let prompt = format!("Select (0-{}): ", options.len());
        let choice = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match menu_choice(choice.trim(), options.len()) {
            Ok(None) => {
                system(palette, "Cancelled.\n");
                return Ok(None);
            }
            Ok(Some(index)) => {
                let option = &options[index];
                system(palette, &format!("Selected: {}\n", option.name));
                return Ok(Some(option.value));
            }
            Err(message) => alert(palette, &message),
        }
    }
}

/// Interpret a menu answer: `Ok(None)` to cancel, `Ok(Some(index))` for a
/// zero-based option, `Err` with a re-prompt message otherwise.
pub fn menu_choice(input: &str, count: usize) -> Result<Option<usize>, String> {
    match input.parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(n) if n <= count => Ok(Some(n - 1)),
        Ok(_) => Err(format!("Invalid choice. Please enter 0-{count}.")),
        Err(_) => Err("Please enter a number.".into()),
    }
}
