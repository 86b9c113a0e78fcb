//! Screen drawing.
//!
//! Each frame is redrawn from scratch: clear, draw the active screen (the
//! exit dialog draws its frozen background first), then the CRT overlays.

use rand::rngs::SmallRng;

use sigma_fx::overlay;
use sigma_fx::typing::TypingReveal;
use sigma_missions::Mission;
use sigma_types::{Canvas, Result};

use crate::palette;
use crate::state::{Game, MissionOutcome, Screen};

const MENU_LEFT: i32 = 40;
const ROW_HEIGHT: i32 = 36;
const TITLE_SIZE: u16 = 24;
const BODY_SIZE: u16 = 16;
const HINT_SIZE: u16 = 8;

impl Game {
    /// Draw the current screen and present the frame.
    pub fn render(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.clear(palette::BG)?;

        let Game {
            screen,
            missions,
            selected,
            title,
            rng,
            sounds,
            ..
        } = self;

        match screen {
            Screen::Menu => draw_menu(canvas, missions, *selected, title)?,
            Screen::Loading(session) => session.fx.render(canvas)?,
            Screen::Result(outcome) => draw_result(canvas, outcome, rng)?,
            Screen::ExitConfirm { resume } => {
                match resume.as_ref() {
                    Screen::Menu => draw_menu(canvas, missions, *selected, title)?,
                    Screen::Loading(session) => session.fx.render(canvas)?,
                    Screen::Result(outcome) => draw_result(canvas, outcome, rng)?,
                    Screen::ExitConfirm { .. } => {},
                }
                draw_exit_confirm(canvas)?;
            },
        }

        if sounds.is_muted() {
            let (w, _) = canvas.size();
            let text = "[MUTED]";
            let tw = canvas.measure_text(text, HINT_SIZE);
            canvas.draw_text(text, w as i32 - tw as i32 - 10, 10, HINT_SIZE, palette::AMBER)?;
        }

        overlay::scanlines(canvas, 4, 36)?;
        canvas.swap_buffers()
    }
}

fn draw_menu(
    canvas: &mut dyn Canvas,
    missions: &[Mission],
    selected: usize,
    title: &TypingReveal,
) -> Result<()> {
    let (w, h) = canvas.size();

    canvas.draw_text(title.visible(), MENU_LEFT, 40, TITLE_SIZE, palette::GREEN)?;
    canvas.draw_text(
        "> SELECT MISSION",
        MENU_LEFT,
        84,
        BODY_SIZE,
        palette::GREEN_DIM,
    )?;
    canvas.draw_line(
        MENU_LEFT,
        112,
        w as i32 - MENU_LEFT,
        112,
        palette::GREEN_DIM,
    )?;

    if missions.is_empty() {
        canvas.draw_text(
            "NO MISSIONS ON FILE",
            MENU_LEFT,
            150,
            BODY_SIZE,
            palette::AMBER,
        )?;
    }

    let top = 130;
    for (i, mission) in missions.iter().enumerate() {
        let y = top + i as i32 * ROW_HEIGHT;
        let is_selected = i == selected;

        if is_selected {
            canvas.fill_rect(
                MENU_LEFT - 10,
                y - 6,
                w.saturating_sub(2 * (MENU_LEFT as u32 - 10)),
                ROW_HEIGHT as u32 - 4,
                palette::HIGHLIGHT,
            )?;
        }

        let color = if !mission.active {
            palette::GRAY
        } else if is_selected {
            palette::GREEN
        } else {
            palette::GREEN_DIM
        };

        let marker = if is_selected { "> " } else { "  " };
        let label = if mission.active {
            format!("{marker}{}", mission.name)
        } else {
            format!("{marker}{} (offline)", mission.name)
        };
        canvas.draw_text(&label, MENU_LEFT, y, BODY_SIZE, color)?;

        let tag = format!("[{}]", mission.difficulty);
        let tag_w = canvas.measure_text(&tag, BODY_SIZE);
        canvas.draw_text(
            &tag,
            w as i32 - MENU_LEFT - tag_w as i32,
            y,
            BODY_SIZE,
            color,
        )?;
    }

    canvas.draw_text(
        "[UP/DOWN] SELECT   [ENTER] ENGAGE   [M] MUTE   [ESC] QUIT",
        MENU_LEFT,
        h as i32 - 30,
        HINT_SIZE,
        palette::GREEN_DIM,
    )?;
    Ok(())
}

fn draw_result(
    canvas: &mut dyn Canvas,
    outcome: &MissionOutcome,
    rng: &mut SmallRng,
) -> Result<()> {
    let (w, h) = canvas.size();
    let (banner, color) = if outcome.success {
        ("MISSION ACCOMPLISHED", palette::GREEN)
    } else {
        ("MISSION FAILED", palette::RED)
    };

    let bw = canvas.measure_text(banner, TITLE_SIZE);
    canvas.draw_text(
        banner,
        (w as i32 - bw as i32) / 2,
        h as i32 / 2 - 60,
        TITLE_SIZE,
        color,
    )?;

    let name = outcome.mission.name.as_str();
    let nw = canvas.measure_text(name, BODY_SIZE);
    canvas.draw_text(
        name,
        (w as i32 - nw as i32) / 2,
        h as i32 / 2 - 10,
        BODY_SIZE,
        palette::GREEN_DIM,
    )?;

    if !outcome.success {
        overlay::glitch_flicker(canvas, rng, 0.6)?;
    }

    let hint = "[ENTER] RETURN TO MENU";
    let hw = canvas.measure_text(hint, HINT_SIZE);
    canvas.draw_text(
        hint,
        (w as i32 - hw as i32) / 2,
        h as i32 - 60,
        HINT_SIZE,
        palette::GREEN_DIM,
    )?;
    Ok(())
}

fn draw_exit_confirm(canvas: &mut dyn Canvas) -> Result<()> {
    let (w, h) = canvas.size();
    canvas.fill_rect(0, 0, w, h, palette::BACKDROP)?;

    let (pw, ph) = (360u32, 120u32);
    let px = (w as i32 - pw as i32) / 2;
    let py = (h as i32 - ph as i32) / 2;
    canvas.fill_rect(px, py, pw, ph, palette::PANEL)?;
    canvas.stroke_rect(px, py, pw, ph, 2, palette::GREEN)?;

    let prompt = "ABORT SESSION?";
    let tw = canvas.measure_text(prompt, BODY_SIZE);
    canvas.draw_text(
        prompt,
        px + (pw as i32 - tw as i32) / 2,
        py + 30,
        BODY_SIZE,
        palette::AMBER,
    )?;

    let hint = "[ENTER] CONFIRM   [ESC] RESUME";
    let hw = canvas.measure_text(hint, HINT_SIZE);
    canvas.draw_text(
        hint,
        px + (pw as i32 - hw as i32) / 2,
        py + 75,
        HINT_SIZE,
        palette::GREEN_DIM,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::state::{Game, OutcomePolicy, Screen};
    use crate::test_utils::MockCanvas;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use sigma_audio::manager::register_default_sounds;
    use sigma_audio::{NullAudioOutput, SoundManager};
    use sigma_missions::{Difficulty, Mission};
    use sigma_types::{Button, InputEvent};

    fn mission(id: i64, name: &str, active: bool) -> Mission {
        Mission {
            id,
            name: name.into(),
            difficulty: Difficulty::Medium,
            active,
            kind: None,
        }
    }

    fn game_with(missions: Vec<Mission>) -> Game {
        let mut sounds = SoundManager::new(Box::new(NullAudioOutput::new()));
        let mut rng = SmallRng::seed_from_u64(0);
        register_default_sounds(&mut sounds, &mut rng);
        Game::new(missions, sounds, 800, 600, Some(0))
    }

    fn press(game: &mut Game, button: Button) {
        game.handle_event(&InputEvent::ButtonPress(button));
    }

    #[test]
    fn menu_lists_missions_and_difficulty_tags() {
        let mut game = game_with(vec![
            mission(1, "Trace Echo", true),
            mission(2, "Core Breach", true),
        ]);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("Trace Echo"));
        assert!(canvas.has_text("Core Breach"));
        assert!(canvas.has_text("[medium]"));
    }

    #[test]
    fn menu_marks_inactive_missions_offline() {
        let mut game = game_with(vec![mission(1, "Ghost Net", false)]);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("Ghost Net (offline)"));
    }

    #[test]
    fn empty_menu_shows_placeholder() {
        let mut game = game_with(vec![]);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("NO MISSIONS ON FILE"));
    }

    #[test]
    fn selected_row_is_highlighted() {
        let mut game = game_with(vec![mission(1, "A", true), mission(2, "B", true)]);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.fill_rect_count() >= 1);
        assert!(canvas.has_text("> A"));
    }

    #[test]
    fn result_screen_shows_banner() {
        let mut game = game_with(vec![mission(1, "Trace Echo", true)])
            .with_policy(OutcomePolicy::Always(true));
        press(&mut game, Button::Confirm);
        game.tick(3500);
        assert!(matches!(game.screen(), Screen::Result(_)));
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("MISSION ACCOMPLISHED"));
        assert!(canvas.has_text("Trace Echo"));
    }

    #[test]
    fn failed_result_shows_failure_banner() {
        let mut game = game_with(vec![mission(1, "X", true)])
            .with_policy(OutcomePolicy::Always(false));
        press(&mut game, Button::Confirm);
        game.tick(3500);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("MISSION FAILED"));
    }

    #[test]
    fn exit_dialog_draws_over_menu() {
        let mut game = game_with(vec![mission(1, "Trace Echo", true)]);
        press(&mut game, Button::Cancel);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        // Background menu still visible behind the dialog.
        assert!(canvas.has_text("Trace Echo"));
        assert!(canvas.has_text("ABORT SESSION?"));
    }

    #[test]
    fn mute_indicator_appears_when_muted() {
        let mut game = game_with(vec![mission(1, "X", true)]);
        press(&mut game, Button::Mute);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("[MUTED]"));
    }

    #[test]
    fn tiny_window_renders_without_panicking() {
        // Narrower than the menu margins; the highlight width bottoms out
        // at zero instead of underflowing.
        let mut game = game_with(vec![mission(1, "A", true), mission(2, "B", true)]);
        let mut canvas = MockCanvas::new(40, 60);
        game.render(&mut canvas).unwrap();
        assert!(canvas.has_text("> A"));
    }

    #[test]
    fn every_screen_presents_a_frame() {
        let mut game = game_with(vec![mission(1, "X", true)]);
        let mut canvas = MockCanvas::new(800, 600);
        game.render(&mut canvas).unwrap();
        press(&mut game, Button::Confirm);
        game.render(&mut canvas).unwrap();
        assert!(matches!(game.screen(), Screen::Loading(_)));
    }
}
