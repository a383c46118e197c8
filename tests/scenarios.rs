use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use maze_chase::level::DEFAULT_MAZE;
use maze_chase::movement::Body;
use maze_chase::{
    Dir, Game, GameEvent, GhostAi, GhostEvent, GhostKind, GhostMode, Grid, MalformedGridError,
    ModeTimeline, NavGraph, Phase, Vec2,
};

fn default_graph() -> NavGraph {
    NavGraph::build(&Grid::parse(DEFAULT_MAZE).unwrap()).unwrap()
}

fn on_segment(graph: &NavGraph, body: &Body) -> bool {
    let a = graph.position(body.current);
    let b = graph.position(body.target);
    let p = body.position;
    let along = (p - a).magnitude() + (b - p).magnitude();
    (along - (b - a).magnitude()).abs() < 1e-6
}

#[test]
fn plus_grid_has_four_nodes_and_one_center_pickup() {
    let graph = NavGraph::build(&Grid::parse("X+X\n+.+\nX+X\n").unwrap()).unwrap();
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.pickups().len(), 1);
    assert_eq!(graph.pickups()[0].position, Vec2::new(24.0, 24.0));
    // Straight-line scans: each node sees only the node across the center.
    for (id, node) in graph.nodes() {
        let links: Vec<_> = node.links().collect();
        assert_eq!(links.len(), 1, "node {:?}", node.cell());
        let (dir, other) = links[0];
        assert_eq!(graph.neighbor(other, dir.opposite()), Some(id));
    }
}

#[test]
fn default_maze_links_are_symmetric_and_axis_aligned() {
    let graph = default_graph();
    assert_eq!(graph.len(), 25);
    for (id, node) in graph.nodes() {
        for (dir, other) in node.links() {
            assert_eq!(graph.neighbor(other, dir.opposite()), Some(id));
            let delta = graph.position(other) - node.position();
            let (dx, dy) = dir.delta();
            assert!(delta.x * dx as f64 >= 0.0 && delta.y * dy as f64 >= 0.0);
            assert!(delta.x == 0.0 || delta.y == 0.0);
        }
    }
}

#[test]
fn malformed_grids_are_rejected() {
    assert!(matches!(Grid::parse("\n\n"), Err(MalformedGridError::Empty)));
    assert!(matches!(
        Grid::parse("X+X\n+.\n"),
        Err(MalformedGridError::Ragged { row: 1, .. })
    ));
    assert!(matches!(
        Grid::parse("X+?\n"),
        Err(MalformedGridError::UnknownSymbol { symbol: '?', .. })
    ));
    let no_nodes = Grid::parse("X.X\n").unwrap();
    assert!(matches!(Game::new(no_nodes), Err(MalformedGridError::NoNodes)));
}

#[test]
fn chasing_ghost_steps_onto_player_neighbor() {
    let graph = default_graph();
    let mut rng = StdRng::seed_from_u64(3);
    let mut ai = GhostAi::new(&graph);
    let blinky = ai.ghost_mut(GhostKind::Blinky);
    blinky.mode = GhostMode::Chase;
    let (_, neighbor) = graph
        .node(blinky.body.current)
        .links()
        .next()
        .unwrap();
    let player = graph.position(neighbor);

    blinky.update(0.0, &graph, player, Vec2::ZERO, &mut rng);
    assert_eq!(blinky.body.target, neighbor);
}

#[test]
fn retreat_durations_saturate_after_four_phases() {
    let mut timeline = ModeTimeline::new();
    let mut retreats = 0;
    while retreats < 4 {
        if timeline.mode() == GhostMode::Scatter {
            retreats += 1;
        }
        timeline.tick(timeline.phase_remaining());
    }
    assert_eq!(timeline.index(), 3);
    for _ in 0..5 {
        timeline.tick(timeline.phase_remaining());
        assert_eq!(timeline.mode(), GhostMode::Scatter);
        assert_eq!(timeline.phase_duration(), 5.0);
        timeline.tick(timeline.phase_remaining());
    }
}

#[test]
fn frightened_window_leaves_pursuit_time_untouched() {
    let mut timeline = ModeTimeline::new();
    timeline.tick(7.0);
    timeline.tick(17.0);
    assert_eq!(timeline.mode(), GhostMode::Chase);
    assert_eq!(timeline.phase_remaining(), 3.0);

    timeline.frighten();
    for _ in 0..16 {
        timeline.tick(0.5);
    }
    assert!(!timeline.is_frightened());
    assert_eq!(timeline.phase_remaining(), 3.0);
}

#[test]
fn captured_ghost_walks_home_and_respawns() {
    let graph = default_graph();
    let mut rng = StdRng::seed_from_u64(9);
    let mut ai = GhostAi::new(&graph);
    let start = graph.player_start();
    let player = graph.position(start);
    ai.ghost_mut(GhostKind::Pinky).body.reset(&graph, start);
    ai.frighten();

    let events = ai.update(0.0, &graph, player, Vec2::ZERO, &mut rng);
    assert!(events.contains(&GhostEvent::Captured(GhostKind::Pinky)));
    assert_eq!(ai.ghost(GhostKind::Pinky).mode, GhostMode::Eaten);

    let far = Vec2::new(-10_000.0, -10_000.0);
    let mut home = false;
    for _ in 0..200 {
        let events = ai.update(0.05, &graph, far, Vec2::ZERO, &mut rng);
        if events.contains(&GhostEvent::Respawned(GhostKind::Pinky)) {
            home = true;
            break;
        }
    }
    assert!(home);
    let pinky = ai.ghost(GhostKind::Pinky);
    assert_eq!(pinky.mode, GhostMode::Scatter);
    assert_eq!(pinky.body.current, graph.ghost_spawns()[GhostKind::Pinky.index()]);
    assert_eq!(pinky.body.dir, None);
}

#[test]
fn long_session_keeps_bodies_on_edges() {
    let mut game = Game::new(Grid::parse(DEFAULT_MAZE).unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut input = StdRng::seed_from_u64(7);
    game.start();

    let mut desired = None;
    let mut score = 0;
    for step in 0..6_000 {
        if step % 30 == 0 {
            desired = match input.gen_range(0..5) {
                0 => None,
                n => Some(Dir::ALL[n - 1]),
            };
        }
        let lives = game.lives();
        let events = game.tick(1.0 / 60.0, desired, &mut rng);

        assert!(game.score() >= score);
        score = game.score();
        if !events.contains(&GameEvent::ExtraLife) {
            assert!(game.lives() <= lives);
        }
        assert!(on_segment(game.graph(), &game.player().body));
        for ghost in game.ghosts().ghosts() {
            assert!(on_segment(game.graph(), &ghost.body));
        }
        if game.phase() == Phase::GameOver {
            assert_eq!(game.lives(), 0);
            game.start();
            score = 0;
        }
    }
}
