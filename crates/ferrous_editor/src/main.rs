// headless editor session: builds a small scene, replays a scripted mouse
// session through the tool modes and logs what ends up selected.
//
//     ferrous_editor [path/to/editor.toml]

use anyhow::Context as _;
use ferrous_core::{Camera, InputState, KeyCode, MouseButton, ScreenRect};
use ferrous_editor::{logging, Editor, EditorConfig, ModId, Viewport};
use glam::Vec3;

const FRAME_DT: f32 = 1.0 / 60.0;

// one scripted input step
enum Step {
    Move(f64, f64),
    Press,
    Release,
    Shift(bool),
    Mode(ModId),
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EditorConfig::load(&path)?,
        None => EditorConfig::default(),
    };
    logging::init(logging::parse_level(&config.log_level)?)?;

    let mut editor = Editor::new(config);
    let vp = editor.add_viewport(Viewport::new(
        "Viewport 1",
        ScreenRect::new(0.0, 0.0, 800.0, 600.0),
        Camera::looking_at(Vec3::new(0.0, 4.0, 10.0), Vec3::ZERO),
    ));
    editor.set_active_viewport(Some(vp));

    for (name, x) in [("Left", -3.0), ("Middle", 0.0), ("Right", 3.0)] {
        editor.world_mut().spawn_cube(name, Vec3::new(x, 0.5, 0.0));
    }
    editor.init().context("starting editor")?;

    // click the middle cube, shift-click the right one, box-select
    // everything, then drop the cursor on the grid
    let script = [
        Step::Move(400.0, 300.0),
        Step::Press,
        Step::Release,
        Step::Shift(true),
        Step::Move(560.0, 300.0),
        Step::Press,
        Step::Release,
        Step::Shift(false),
        Step::Move(20.0, 200.0),
        Step::Press,
        Step::Move(400.0, 300.0),
        Step::Move(780.0, 420.0),
        Step::Release,
        Step::Mode(ModId::Cursor),
        Step::Move(400.0, 520.0),
        Step::Press,
        Step::Release,
    ];

    let mut input = InputState::new();
    for step in script {
        match step {
            Step::Move(x, y) => input.set_mouse_position(x, y),
            Step::Press => input.update_mouse_button(MouseButton::Left, true),
            Step::Release => input.update_mouse_button(MouseButton::Left, false),
            Step::Shift(held) => input.update_key(KeyCode::ShiftLeft, held),
            Step::Mode(id) => editor.set_mod(true, id)?,
        }
        editor.frame(&input, FRAME_DT);
        input.end_frame();

        let names: Vec<_> = editor
            .world()
            .selection()
            .iter()
            .filter_map(|h| editor.world().get(h))
            .map(|e| e.name.as_str())
            .collect();
        log::info!(
            "[{} / {}] selection {:?}",
            editor.active_mod(),
            editor.mods().current_state().unwrap_or("-"),
            names
        );
    }

    log::info!("3D cursor at {:?}", editor.world().cursor_position());
    editor.uninit();
    Ok(())
}
