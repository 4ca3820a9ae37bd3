//! Render-pass rules: compositing order, off-grid skips, per-object error
//! containment, and diffed output.

use lcd_engine::display::HeadlessDisplay;
use lcd_engine::input::ScriptedInput;
use lcd_engine::{Bitmap, Engine, GameObject, Glyph, MemoryAssets, Position, Symbol};

#[derive(Clone)]
struct Tile {
    pos: Position,
    glyph: Glyph,
}

impl Tile {
    fn at(x: i32, y: i32, ch: char) -> Self {
        Self {
            pos: Position::new(x, y),
            glyph: Glyph::Char(ch),
        }
    }
}

impl GameObject for Tile {
    fn position(&self) -> Position {
        self.pos
    }
    fn render(&self) -> Glyph {
        self.glyph
    }
}

#[derive(Clone)]
struct PlayerTile {
    pos: Position,
}

impl GameObject for PlayerTile {
    fn position(&self) -> Position {
        self.pos
    }
    fn render(&self) -> Glyph {
        Glyph::Char('P')
    }
}

fn harness() -> (Engine, HeadlessDisplay) {
    let display = HeadlessDisplay::new();
    let probe = display.clone();
    let engine = Engine::new(Box::new(display), Box::new(ScriptedInput::default()));
    (engine, probe)
}

fn run_frames(engine: &mut Engine, frames: u64, mut per_frame: impl FnMut(&mut Engine, u64)) {
    let mut frame = 0;
    engine
        .run(1000, move |engine| {
            frame += 1;
            per_frame(engine, frame);
            if frame >= frames {
                engine.stop();
            }
        })
        .unwrap();
}

#[test]
fn later_inserted_object_wins_a_shared_cell() {
    let (mut engine, probe) = harness();
    engine.new_object(&Tile::at(5, 0, 'a'));
    engine.new_object(&Tile::at(5, 0, 'b'));

    run_frames(&mut engine, 1, |_, _| {});

    assert_eq!(probe.symbol_at(0, 5), Symbol::Char('b'));
}

#[test]
fn player_overlays_everything_regardless_of_insertion_order() {
    let (mut engine, probe) = harness();
    engine.set_player(&PlayerTile {
        pos: Position::new(5, 0),
    });
    engine.new_object(&Tile::at(5, 0, 'a'));
    engine.new_object(&Tile::at(5, 0, 'b'));

    run_frames(&mut engine, 1, |_, _| {});

    assert_eq!(probe.symbol_at(0, 5), Symbol::Char('P'));
}

#[test]
fn off_grid_objects_contribute_no_writes() {
    let (mut engine, probe) = harness();
    engine.new_object(&Tile::at(-1, 0, 'x'));
    engine.new_object(&Tile::at(16, 1, 'x'));
    engine.new_object(&Tile::at(3, 2, 'x'));

    run_frames(&mut engine, 1, |_, _| {});

    assert!(probe.writes().is_empty());
}

#[test]
fn unbound_glyph_slot_renders_blank_without_stalling_the_frame() {
    let (mut engine, probe) = harness();
    engine.new_object(&Tile {
        pos: Position::new(2, 0),
        glyph: Glyph::Slot(6),
    });
    engine.new_object(&Tile::at(9, 1, 'k'));

    run_frames(&mut engine, 1, |_, _| {});

    assert_eq!(probe.symbol_at(0, 2), Symbol::Blank);
    assert_eq!(probe.symbol_at(1, 9), Symbol::Char('k'), "frame completed");
    assert_eq!(engine.frame_count(), 1);
}

#[test]
fn bound_glyph_slot_renders_as_glyph_symbol() {
    let (mut engine, probe) = harness();
    let mut assets = MemoryAssets::new();
    assets.insert(
        "ship",
        Bitmap::new(5, 8, vec![[0, 0, 0, 255]; 40]).unwrap(),
    );
    let slot = engine.register_sprite(&assets, "ship", 2).unwrap();

    engine.new_object(&Tile {
        pos: Position::new(7, 1),
        glyph: Glyph::Slot(slot),
    });
    run_frames(&mut engine, 1, |_, _| {});

    assert_eq!(probe.symbol_at(1, 7), Symbol::Glyph(2));
}

#[test]
fn only_changed_cells_are_written_between_frames() {
    let (mut engine, probe) = harness();
    let id = engine.new_object(&Tile::at(2, 0, 'a'));

    run_frames(&mut engine, 3, |engine, frame| {
        if frame == 3 {
            // Move right one cell for the final frame.
            engine.object_mut::<Tile>(id).unwrap().pos.x = 3;
        }
    });

    // Frame 1 paints the cell, frame 2 is static, frame 3 blanks the old
    // cell and paints the new one.
    assert_eq!(
        probe.writes(),
        vec![
            (0, 2, Symbol::Char('a')),
            (0, 2, Symbol::Blank),
            (0, 3, Symbol::Char('a')),
        ]
    );
}

#[test]
fn static_frames_are_not_flushed() {
    let (mut engine, probe) = harness();
    engine.new_object(&Tile::at(0, 0, 'z'));

    run_frames(&mut engine, 4, |_, _| {});

    assert_eq!(probe.flushes(), 1, "one flush for the first paint only");
}

#[test]
fn backends_shut_down_after_run_returns() {
    let (mut engine, probe) = harness();
    run_frames(&mut engine, 1, |_, _| {});
    assert_eq!(probe.shutdowns(), 1);
}
