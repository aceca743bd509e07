use std::fmt::Write as _;

use cops_and_robber_core::{CellIndex, CopId, Phase};
use cops_and_robber_world::{query, World};

/// Renders the board, round label, and phase prompt as plain text.
///
/// Cops print as `C0`/`C1`, the robber as `R`, selectable tiles as `*`, and
/// the current highlight is bracketed.
pub(crate) fn board(world: &World) -> String {
    let graph = query::board(world);
    let tiles = query::tile_view(world);
    let pieces = query::pieces(world);
    let mut out = String::new();

    let _ = writeln!(out, "{}", query::rounds_label(world));
    for row in 0..graph.rows() {
        let mut line = String::new();
        for column in 0..graph.columns() {
            let cell = CellIndex::new(row * graph.columns() + column);
            let glyph = if cell == pieces.cop(CopId::First) {
                "C0"
            } else if cell == pieces.cop(CopId::Second) {
                "C1"
            } else if cell == pieces.robber() {
                "R"
            } else if tiles.is_selectable(cell) {
                "*"
            } else {
                "."
            };

            if tiles.is_current(cell) {
                let _ = write!(line, "[{glyph:<2}]");
            } else {
                let _ = write!(line, " {glyph:<2} ");
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    let _ = writeln!(out, "{}", prompt(world));
    out
}

/// One-line description of what the player can do next.
pub(crate) fn prompt(world: &World) -> String {
    match query::phase(world) {
        Phase::Idle => "select a cop with `cop <0|1>`".to_owned(),
        Phase::CopSelected { cop, .. } => {
            format!("cop {} selected; move it with `cell <index>`", cop.index())
        }
        Phase::DestinationConfirmed { .. } => "`finish` to hand the turn to the robber".to_owned(),
        Phase::RobberTurn {
            destination: Some(destination),
            ..
        } => format!(
            "robber moved to cell {}; `finish` to close the round",
            destination.get()
        ),
        Phase::RobberTurn {
            destination: None, ..
        } => "robber is choosing a move".to_owned(),
        Phase::GameOver { .. } => format!(
            "{} `again` to play a new game",
            query::game_over_message(world).unwrap_or_default()
        ),
        Phase::Resetting => "new game ready".to_owned(),
    }
}
