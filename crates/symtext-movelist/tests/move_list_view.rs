use pretty_assertions::assert_eq;
use symtext_core::{DocumentView, RecordingSurface, RenderSurface, RopeSurface, SurfaceCall};
use symtext_movelist::{MoveCursor, MoveListWalker, MoveSymbol, MoveTree};

struct Game {
    walker: MoveListWalker,
    cursor: MoveCursor,
    view: DocumentView<MoveSymbol, RecordingSurface>,
}

impl Game {
    fn new(moves: &[&str]) -> Self {
        let mut walker = MoveListWalker::new(MoveTree::new());
        let mut cursor = MoveCursor::new(walker.tree());
        for san in moves {
            cursor.play(walker.tree_mut(), san).unwrap();
        }
        let mut view = DocumentView::new(RecordingSurface::new(RopeSurface::new()));
        view.refresh_from(&mut walker, cursor.is_active()).unwrap();
        view.surface_mut().take_calls();
        Self {
            walker,
            cursor,
            view,
        }
    }

    fn refresh(&mut self) -> symtext_core::ReconcileOutcome {
        self.view
            .refresh_from(&mut self.walker, self.cursor.is_active())
            .unwrap()
    }

    fn text(&self) -> String {
        self.view.surface().inner().text()
    }
}

#[test]
fn test_appending_a_ply_only_inserts() {
    let mut game = Game::new(&["e4", "e5"]);
    assert_eq!(game.text(), "1. e4 e5");

    game.cursor.play(game.walker.tree_mut(), "Nf3").unwrap();
    let outcome = game.refresh();

    assert_eq!(outcome.removed, None);
    assert_eq!(outcome.agree_index, 5);
    assert_eq!(
        game.view.surface_mut().take_calls(),
        vec![
            SurfaceCall::Insert {
                position: 8,
                text: " ".to_string()
            },
            SurfaceCall::Insert {
                position: 9,
                text: "2.".to_string()
            },
            SurfaceCall::Insert {
                position: 11,
                text: " ".to_string()
            },
            SurfaceCall::Insert {
                position: 12,
                text: "Nf3".to_string()
            },
            SurfaceCall::SetCaret(15),
        ]
    );
}

#[test]
fn test_variation_in_the_middle_rewrites_suffix() {
    let mut game = Game::new(&["e4", "e5", "Nf3"]);
    let e4 = game.walker.tree().main_line(game.walker.tree().root()).unwrap()[0];
    game.cursor.goto(game.walker.tree(), e4).unwrap();
    game.cursor.play(game.walker.tree_mut(), "c5").unwrap();

    let outcome = game.refresh();

    assert_eq!(game.text(), "1. e4 e5 (1... c5) 2. Nf3");
    assert_eq!(outcome.agree_index, 6);
    assert_eq!(outcome.removed, Some(9..15));
    assert_eq!(game.view.surface().caret_position(), 17);
    assert_eq!(
        game.view.active_element().map(|e| e.symbol().node()),
        Some(Some(game.cursor.active()))
    );
}

#[test]
fn test_deleting_the_active_ply() {
    let mut game = Game::new(&["e4", "e5", "Nf3"]);
    game.cursor.back(game.walker.tree()).unwrap();
    game.refresh();
    game.view.surface_mut().take_calls();

    game.cursor.delete_active(game.walker.tree_mut()).unwrap();
    let outcome = game.refresh();

    assert_eq!(game.text(), "1. e4");
    assert_eq!(outcome.removed, Some(5..15));
    assert_eq!(
        game.view.surface_mut().take_calls(),
        vec![SurfaceCall::Remove { start: 5, len: 10 }, SurfaceCall::SetCaret(5)]
    );
}

#[test]
fn test_promoting_a_variation() {
    let mut game = Game::new(&["e4", "e5", "Nf3"]);
    let tree = game.walker.tree_mut();
    let e4 = tree.main_line(tree.root()).unwrap()[0];
    let c5 = tree.add_move(e4, "c5").unwrap();
    game.refresh();
    assert_eq!(game.text(), "1. e4 e5 (1... c5) 2. Nf3");

    game.walker.tree_mut().promote(c5).unwrap();
    let outcome = game.refresh();

    assert_eq!(game.text(), "1. e4 c5 (1... e5 2. Nf3)");
    assert_eq!(outcome.agree_index, 4);
}

#[test]
fn test_stepping_through_moves_never_edits_text() {
    let mut game = Game::new(&["d4", "d5", "c4", "e6", "Nc3"]);
    while game.cursor.back(game.walker.tree()).unwrap() {
        assert!(game.refresh().is_noop());
    }
    assert_eq!(game.view.surface().caret_position(), 0);
    assert!(game.view.active_element().is_none());

    let calls = game.view.surface_mut().take_calls();
    assert!(
        calls
            .iter()
            .all(|call| matches!(call, SurfaceCall::SetCaret(_)))
    );
}
