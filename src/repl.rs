use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};

use crate::agent::TurnExecutor;
use crate::command::{self, Command, Setting};
use crate::console::{self, MenuOption};
use crate::memory::analysis::NOT_ENOUGH_HISTORY;
use crate::models::MODELS;
use crate::session::SessionState;
use crate::stage::{Personality, ProgressionSpeed};
use crate::theme::ColorTheme;

const FAREWELL: &str = "Well, I suppose I'll just stand here alone then. Typical.";

enum Flow {
    Continue,
    Quit,
}

/// Interactive loop: one input is fully handled before the next is read.
pub struct Repl {
    executor: TurnExecutor,
    session: SessionState,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(executor: TurnExecutor, session: SessionState) -> anyhow::Result<Self> {
        Ok(Self {
            executor,
            session,
            editor: DefaultEditor::new()?,
        })
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let palette = self.session.color().palette();
        console::alert(
            &palette,
            "Type 'help' to switch models, speeds, moods, and colors.\n",
        );
        console::intro(&palette);

        match self.executor.opening(&mut self.session).await {
            Ok(greeting) => {
                console::persona_says(&palette, &greeting);
                console::separator();
            }
            Err(e) => {
                self.fail(&e.to_string());
                return Ok(());
            }
        }

        loop {
            let line = match self.editor.readline("YOU: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    println!("\n\nThanks for playing!");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            if !line.trim().is_empty() {
                let _ = self.editor.add_history_entry(line.as_str());
            }

            if let Flow::Quit = self.handle(command::parse(&line)).await? {
                return Ok(());
            }
        }
    }

    async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        let command = match command {
            Command::Help(Some(topic)) => topic.command(),
            other => other,
        };
        let palette = self.session.color().palette();

        match command {
            Command::Empty => {}
            Command::Quit => {
                println!();
                console::persona_says(&palette, FAREWELL);
                println!("\nThanks for playing!");
                return Ok(Flow::Quit);
            }
            Command::Malformed(message) => console::alert(&palette, &format!("\n{message}\n")),
            Command::Help(_) => console::help(&self.session),
            Command::Show(setting) => self.show(setting),
            Command::ShowTurn => console::system(
                &palette,
                &format!("\n{}\n", console::state_line(&self.session)),
            ),
            Command::Select(setting) => self.select(setting)?,
            Command::LastRequest { full } => match self.session.last_request() {
                Some(request) => {
                    for line in console::render_last_request(request, full) {
                        console::system(&palette, &line);
                    }
                }
                None => console::system(&palette, "\nNo API calls made yet.\n"),
            },
            Command::MemoryAnalysis => self.memory_analysis().await,
            Command::Chat(message) => return Ok(self.chat(&message).await),
        }
        Ok(Flow::Continue)
    }

    async fn chat(&mut self, message: &str) -> Flow {
        match self.executor.run_turn(&mut self.session, message).await {
            Ok(reply) => {
                let palette = self.session.color().palette();
                console::separator();
                console::persona_says(&palette, &reply);
                console::separator();
                Flow::Continue
            }
            Err(e) => {
                self.fail(&e.to_string());
                Flow::Quit
            }
        }
    }

    /// The session ends after a failed exchange.
    fn fail(&self, error: &str) {
        warn!(session = %self.session.id(), "ending session after failure: {error}");
        let palette = self.session.color().palette();
        console::alert(&palette, &format!("\nError communicating with the wall: {error}"));
        console::system(&palette, "The wall seems to have gone silent...\n");
    }

    async fn memory_analysis(&mut self) {
        let palette = self.session.color().palette();
        let summaries = self.session.memory().history_len();
        if summaries < 2 {
            console::system(&palette, &format!("\n{NOT_ENOUGH_HISTORY}\n"));
            return;
        }
        match self.executor.analyze_memory(&self.session).await {
            Ok(analysis) => console::memory_analysis(&palette, summaries, &analysis),
            Err(e) => console::alert(&palette, &format!("\nError performing meta-analysis: {e}\n")),
        }
    }

    fn show(&self, setting: Setting) {
        let palette = self.session.color().palette();
        let text = match setting {
            Setting::Speed => format!("\nCurrent game speed: {}\n", self.session.speed()),
            Setting::Mood => format!(
                "\nThe Wall's current mood: {}\n",
                self.session.active_personality()
            ),
            Setting::Model => {
                let model = self.session.model();
                format!(
                    "\nCurrent model: {}\n  {}\n  Performance: {} | Speed: {} | Cost: {}\n",
                    model.id, model.description, model.performance, model.speed, model.cost
                )
            }
            Setting::Color => {
                let theme = self.session.color();
                format!(
                    "\nCurrent color theme: {}\n  {}\n",
                    theme.title(),
                    theme.description()
                )
            }
        };
        console::system(&palette, &text);
    }

    fn select(&mut self, setting: Setting) -> anyhow::Result<()> {
        let palette = self.session.color().palette();
        match setting {
            Setting::Speed => {
                let options: Vec<_> = ProgressionSpeed::ALL
                    .into_iter()
                    .map(|s| MenuOption {
                        value: s,
                        name: s.title().to_string(),
                        description: s.description(),
                    })
                    .collect();
                let current = Some(self.session.speed());
                if let Some(speed) = console::select(
                    &mut self.editor,
                    &palette,
                    "SELECT GAME SPEED",
                    &options,
                    current,
                )? {
                    self.session.set_speed(speed);
                }
            }
            Setting::Mood => {
                let mut options: Vec<MenuOption<Option<Personality>>> = Personality::SELECTABLE
                    .into_iter()
                    .map(|p| MenuOption {
                        value: Some(p),
                        name: p.title().to_string(),
                        description: p.description(),
                    })
                    .collect();
                options.push(MenuOption {
                    value: None,
                    name: "Auto".to_string(),
                    description: "Let the mood follow the conversation",
                });
                let current = Some(self.session.mood_override());
                if let Some(choice) = console::select(
                    &mut self.editor,
                    &palette,
                    "SELECT THE WALL'S MOOD",
                    &options,
                    current,
                )? {
                    match choice {
                        Some(mood) => self.session.set_mood_override(mood),
                        None => self.session.clear_mood_override(),
                    }
                }
            }
            Setting::Model => {
                let options: Vec<_> = MODELS
                    .iter()
                    .map(|m| MenuOption {
                        value: m,
                        name: m.id.to_string(),
                        description: m.description,
                    })
                    .collect();
                let current = Some(self.session.model());
                if let Some(model) = console::select(
                    &mut self.editor,
                    &palette,
                    "SELECT AI MODEL",
                    &options,
                    current,
                )? {
                    info!(session = %self.session.id(), model = model.id, "model changed");
                    self.session.set_model(model);
                }
            }
            Setting::Color => {
                let options: Vec<_> = ColorTheme::ALL
                    .into_iter()
                    .map(|t| MenuOption {
                        value: t,
                        name: t.title().to_string(),
                        description: t.description(),
                    })
                    .collect();
                let current = Some(self.session.color());
                if let Some(theme) = console::select(
                    &mut self.editor,
                    &palette,
                    "SELECT COLOR THEME",
                    &options,
                    current,
                )? {
                    self.session.set_color(theme);
                    console::system(
                        &theme.palette(),
                        &format!("Color theme changed to: {}\n", theme.title()),
                    );
                }
            }
        }
        Ok(())
    }
}
