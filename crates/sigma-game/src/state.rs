//! Game state machine.
//!
//! `MENU -> LOADING -> RESULT -> MENU`, with `EXIT_CONFIRM` reachable from
//! any of them and resuming exactly where the player was. The selection
//! index is wrapped on every mutation; with an empty mission list every
//! mission-dependent action is a guarded no-op.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sigma_audio::SoundManager;
use sigma_fx::{LoadingFx, TypingReveal};
use sigma_missions::Mission;
use sigma_types::{Button, InputEvent};

/// What the frame loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Continue,
    Quit,
}

/// Live loading state, created on confirm and dropped on transition out.
pub struct LoadingSession {
    pub mission: Mission,
    pub fx: LoadingFx,
}

/// Outcome shown on the result screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionOutcome {
    pub mission: Mission,
    pub success: bool,
}

/// How mission outcomes are decided. `Random` is an explicit placeholder
/// until missions carry real logic; tests pin it with `Always`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomePolicy {
    Random,
    Always(bool),
}

impl OutcomePolicy {
    fn decide(&self, rng: &mut SmallRng) -> bool {
        match self {
            OutcomePolicy::Random => rng.r#gen::<bool>(),
            OutcomePolicy::Always(v) => *v,
        }
    }
}

/// The active screen.
pub enum Screen {
    Menu,
    Loading(LoadingSession),
    Result(MissionOutcome),
    /// Nested exit dialog; `resume` is restored verbatim on cancel.
    ExitConfirm { resume: Box<Screen> },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Loading(_) => "loading",
            Screen::Result(_) => "result",
            Screen::ExitConfirm { .. } => "exit-confirm",
        }
    }
}

/// The whole game: missions, selection, screen, and owned audio.
pub struct Game {
    pub(crate) missions: Vec<Mission>,
    pub(crate) selected: usize,
    pub(crate) screen: Screen,
    pub(crate) sounds: SoundManager,
    pub(crate) policy: OutcomePolicy,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) title: TypingReveal,
    pub(crate) rng: SmallRng,
}

impl Game {
    /// Build a game over an already-fetched mission list. `seed` fixes all
    /// decorative randomness for reproducible runs; `None` seeds from
    /// entropy.
    pub fn new(
        missions: Vec<Mission>,
        sounds: SoundManager,
        width: u32,
        height: u32,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        log::info!("game starting with {} mission(s)", missions.len());
        Self {
            missions,
            selected: 0,
            screen: Screen::Menu,
            sounds,
            policy: OutcomePolicy::Random,
            width,
            height,
            title: TypingReveal::new("SIGMA: AI HACKER PROTOCOL", 25.0),
            rng,
        }
    }

    pub fn with_policy(mut self, policy: OutcomePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The mission under the cursor, if any.
    pub fn selected_mission(&self) -> Option<&Mission> {
        self.missions.get(self.selected)
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn sounds(&self) -> &SoundManager {
        &self.sounds
    }

    pub fn sounds_mut(&mut self) -> &mut SoundManager {
        &mut self.sounds
    }

    /// Route one input event. Returns `Quit` only for user-initiated exit.
    pub fn handle_event(&mut self, event: &InputEvent) -> GameCommand {
        match event {
            InputEvent::Quit => {
                log::info!("quit requested");
                GameCommand::Quit
            },
            InputEvent::ButtonPress(button) => self.handle_button(*button),
        }
    }

    fn handle_button(&mut self, button: Button) -> GameCommand {
        if button == Button::Mute {
            self.sounds.toggle_mute();
            return GameCommand::Continue;
        }

        let screen = std::mem::replace(&mut self.screen, Screen::Menu);
        let from = screen.name();
        let (next, cmd) = match screen {
            Screen::Menu => self.menu_input(button),
            Screen::Loading(session) => self.loading_input(button, session),
            Screen::Result(outcome) => self.result_input(button, outcome),
            Screen::ExitConfirm { resume } => self.exit_confirm_input(button, resume),
        };
        if next.name() != from {
            log::debug!("screen {from} -> {}", next.name());
        }
        self.screen = next;
        cmd
    }

    fn menu_input(&mut self, button: Button) -> (Screen, GameCommand) {
        match button {
            Button::Up => {
                self.move_selection(-1);
                (Screen::Menu, GameCommand::Continue)
            },
            Button::Down => {
                self.move_selection(1);
                (Screen::Menu, GameCommand::Continue)
            },
            Button::Confirm => match self.missions.get(self.selected).cloned() {
                Some(mission) => {
                    self.sounds.play("confirm", 0.5);
                    (self.start_loading(mission), GameCommand::Continue)
                },
                None => {
                    log::debug!("confirm with no missions ignored");
                    (Screen::Menu, GameCommand::Continue)
                },
            },
            Button::Cancel => {
                self.sounds.play("back", 0.5);
                (
                    Screen::ExitConfirm {
                        resume: Box::new(Screen::Menu),
                    },
                    GameCommand::Continue,
                )
            },
            // Handled globally before screen dispatch.
            Button::Mute => (Screen::Menu, GameCommand::Continue),
        }
    }

    fn loading_input(&mut self, button: Button, mut session: LoadingSession) -> (Screen, GameCommand) {
        match button {
            // Designated skip key: jump to completion, the next tick
            // transitions to the result screen.
            Button::Confirm => {
                session.fx.finish();
                (Screen::Loading(session), GameCommand::Continue)
            },
            Button::Cancel => {
                self.sounds.play("back", 0.5);
                (
                    Screen::ExitConfirm {
                        resume: Box::new(Screen::Loading(session)),
                    },
                    GameCommand::Continue,
                )
            },
            _ => (Screen::Loading(session), GameCommand::Continue),
        }
    }

    fn result_input(&mut self, button: Button, outcome: MissionOutcome) -> (Screen, GameCommand) {
        match button {
            Button::Confirm | Button::Cancel => {
                self.sounds.play("back", 0.5);
                (Screen::Menu, GameCommand::Continue)
            },
            _ => (Screen::Result(outcome), GameCommand::Continue),
        }
    }

    fn exit_confirm_input(&mut self, button: Button, resume: Box<Screen>) -> (Screen, GameCommand) {
        match button {
            Button::Confirm => {
                log::info!("exit confirmed");
                (Screen::ExitConfirm { resume }, GameCommand::Quit)
            },
            Button::Cancel => {
                self.sounds.play("back", 0.5);
                (*resume, GameCommand::Continue)
            },
            _ => (Screen::ExitConfirm { resume }, GameCommand::Continue),
        }
    }

    /// Move the cursor with wrap-around. No-op on an empty list; with one
    /// mission the wrap lands back on it.
    fn move_selection(&mut self, delta: i64) {
        let n = self.missions.len() as i64;
        if n == 0 {
            return;
        }
        self.selected = (self.selected as i64 + delta).rem_euclid(n) as usize;
        self.sounds.play("select", 0.5);
    }

    fn start_loading(&mut self, mission: Mission) -> Screen {
        let kind = mission.kind().to_string();
        let seed = self.rng.r#gen();
        let fx = LoadingFx::for_kind(&kind, self.width, self.height, seed);
        self.sounds.play(start_sound(&kind), 0.4);
        log::info!(
            "mission '{}' engaged ({} ms {} animation)",
            mission.name,
            fx.duration_ms(),
            kind,
        );
        Screen::Loading(LoadingSession { mission, fx })
    }

    /// Advance timers and fades; transitions Loading -> Result when the
    /// animation completes.
    pub fn tick(&mut self, dt_ms: u32) {
        self.sounds.tick(dt_ms);
        self.title.advance(dt_ms);

        let screen = std::mem::replace(&mut self.screen, Screen::Menu);
        self.screen = match screen {
            Screen::Loading(mut session) => {
                if session.fx.advance(dt_ms) {
                    let success = self.policy.decide(&mut self.rng);
                    self.sounds
                        .play(if success { "success" } else { "failure" }, 0.6);
                    log::info!(
                        "mission '{}' {}",
                        session.mission.name,
                        if success { "accomplished" } else { "failed" },
                    );
                    Screen::Result(MissionOutcome {
                        mission: session.mission,
                        success,
                    })
                } else {
                    Screen::Loading(session)
                }
            },
            other => other,
        };
    }
}

/// Start sound for a mission kind; kinds without a dedicated effect share
/// the glitchy hack burst.
fn start_sound(kind: &str) -> &'static str {
    match kind {
        "download" => "download",
        "decrypt" => "decrypt",
        _ => "hack_start",
    }
}
