//! Reconciliation consistency tests
//!
//! Validation criteria:
//! 1. Consistency: drive a view through many random producer changes (append, truncate, edit in
//!    the middle, navigate) and verify the surface text always equals a from-scratch rendering.
//! 2. Locality: the surface never sees an edit before the first changed symbol.

use rand::Rng;
use symtext_core::{DocumentView, RecordingSurface, RenderSurface, RopeSurface, SurfaceCall};

const VOCABULARY: [&str; 8] = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "♘c3", "O-O"];

fn render(symbols: &[String]) -> String {
    symbols.concat()
}

fn move_list(plies: &[&str]) -> Vec<String> {
    let mut symbols = Vec::new();
    for (i, ply) in plies.iter().enumerate() {
        if i % 2 == 0 {
            symbols.push(format!("{}.", i / 2 + 1));
            symbols.push(" ".to_string());
        }
        symbols.push((*ply).to_string());
        symbols.push(" ".to_string());
    }
    symbols
}

#[test]
fn test_random_game_edits_stay_consistent() {
    let operation_count = 500;
    let mut rng = rand::thread_rng();

    let mut plies: Vec<&str> = Vec::new();
    let mut active: Option<usize> = None;
    let mut view = DocumentView::new(RecordingSurface::new(RopeSurface::new()));

    for _ in 0..operation_count {
        let before = move_list(&plies);

        match rng.gen_range(0..4) {
            0 | 1 => plies.push(VOCABULARY[rng.gen_range(0..VOCABULARY.len())]),
            2 if !plies.is_empty() => {
                let keep = rng.gen_range(0..plies.len());
                plies.truncate(keep);
            }
            2 => {}
            _ if !plies.is_empty() => {
                let at = rng.gen_range(0..plies.len());
                plies[at] = VOCABULARY[rng.gen_range(0..VOCABULARY.len())];
            }
            _ => {}
        }
        active = match plies.len() {
            0 => None,
            len => Some(active.map_or(len - 1, |a| a.min(len - 1))),
        };

        let after = move_list(&plies);
        let target = active.map(|a| plies[a].to_string());

        view.surface_mut().take_calls();
        let outcome = view
            .refresh(after.clone(), |s| Some(s) == target.as_ref())
            .unwrap();

        assert_eq!(view.surface().inner().text(), render(&after));
        view.index().validate().unwrap();

        let prefix = before.iter().zip(&after).take_while(|(a, b)| a == b).count();
        assert_eq!(outcome.agree_index, prefix);
        let cut = render(&before[..prefix]).chars().count();
        for call in view.surface().calls() {
            match call {
                SurfaceCall::Remove { start, .. } => assert_eq!(*start, cut),
                SurfaceCall::Insert { position, .. } => assert!(*position >= cut),
                SurfaceCall::SetCaret(_) => {}
            }
        }

        match view.active_element() {
            Some(element) => {
                assert_eq!(Some(element.symbol()), target.as_ref());
                assert_eq!(view.surface().inner().caret_position(), element.end());
            }
            None => {
                assert!(target.is_none());
                assert_eq!(view.surface().inner().caret_position(), 0);
            }
        }
    }
}
