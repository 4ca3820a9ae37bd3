//! Collision pass: symmetric callbacks for coinciding cells, insertion-order
//! pairing, player included, bystanders untouched.

use lcd_engine::display::HeadlessDisplay;
use lcd_engine::input::ScriptedInput;
use lcd_engine::{Engine, GameObject, Glyph, Position};

#[derive(Clone)]
struct Ship {
    pos: Position,
    hits: u32,
}

impl GameObject for Ship {
    fn position(&self) -> Position {
        self.pos
    }
    fn render(&self) -> Glyph {
        Glyph::Char('A')
    }
    fn on_collision(&mut self, _other: &dyn GameObject) {
        self.hits += 1;
    }
}

#[derive(Clone)]
struct Alien {
    pos: Position,
    hits: u32,
}

impl GameObject for Alien {
    fn position(&self) -> Position {
        self.pos
    }
    fn render(&self) -> Glyph {
        Glyph::Char('M')
    }
    fn on_collision(&mut self, _other: &dyn GameObject) {
        self.hits += 1;
    }
}

fn engine() -> Engine {
    Engine::new(
        Box::new(HeadlessDisplay::new()),
        Box::new(ScriptedInput::default()),
    )
}

fn run_one_frame(engine: &mut Engine) {
    engine.run(1000, |engine| engine.stop()).unwrap();
}

fn ship(x: i32, y: i32) -> Ship {
    Ship {
        pos: Position::new(x, y),
        hits: 0,
    }
}

fn alien(x: i32, y: i32) -> Alien {
    Alien {
        pos: Position::new(x, y),
        hits: 0,
    }
}

#[test]
fn player_and_enemy_on_the_same_cell_each_get_one_callback() {
    let mut engine = engine();
    engine.set_player(&ship(3, 1));
    let enemy = engine.new_object(&alien(3, 1));
    let bystander = engine.new_object(&alien(10, 0));

    run_one_frame(&mut engine);

    assert_eq!(engine.player_as::<Ship>().unwrap().hits, 1);
    assert_eq!(engine.object::<Alien>(enemy).unwrap().hits, 1);
    assert_eq!(engine.object::<Alien>(bystander).unwrap().hits, 0);
}

#[test]
fn objects_on_distinct_cells_never_collide() {
    let mut engine = engine();
    engine.set_player(&ship(0, 0));
    let a = engine.new_object(&alien(1, 0));
    let b = engine.new_object(&alien(2, 0));

    run_one_frame(&mut engine);

    assert_eq!(engine.player_as::<Ship>().unwrap().hits, 0);
    assert_eq!(engine.object::<Alien>(a).unwrap().hits, 0);
    assert_eq!(engine.object::<Alien>(b).unwrap().hits, 0);
}

#[test]
fn overlapping_several_objects_delivers_multiple_callbacks() {
    let mut engine = engine();
    let a = engine.new_object(&alien(6, 1));
    let b = engine.new_object(&alien(6, 1));
    let c = engine.new_object(&alien(6, 1));

    run_one_frame(&mut engine);

    // Three coinciding objects form three pairs; each sees the other two.
    for id in [a, b, c] {
        assert_eq!(engine.object::<Alien>(id).unwrap().hits, 2);
    }
}

#[test]
fn player_overlapping_two_objects_hears_about_both() {
    let mut engine = engine();
    engine.set_player(&ship(4, 0));
    engine.new_object(&alien(4, 0));
    engine.new_object(&alien(4, 0));

    run_one_frame(&mut engine);

    assert_eq!(engine.player_as::<Ship>().unwrap().hits, 2);
}

#[test]
fn collision_pairs_are_symmetric_across_kinds() {
    let mut engine = engine();
    let s = engine.new_object(&ship(9, 1));
    let m = engine.new_object(&alien(9, 1));

    run_one_frame(&mut engine);

    assert_eq!(engine.object::<Ship>(s).unwrap().hits, 1);
    assert_eq!(engine.object::<Alien>(m).unwrap().hits, 1);
}
