//! Text output for steps and finished dungeons

use dg_core::dungeon::PruneStep;
use dg_core::tilemap::TileState;
use dg_core::{GenerationStep, Tilemap};
use strum::IntoEnumIterator;

/// One line describing a generation step
pub fn describe_step(step: &GenerationStep) -> String {
    match step {
        GenerationStep::Split(split) => {
            let kept: Vec<String> = split
                .completed
                .iter()
                .map(|room| format!("{} {}", room.id, room.rect))
                .collect();
            let mut line = format!(
                "split {} along {} at {}",
                split.parent, split.axis, split.position
            );
            if !kept.is_empty() {
                line.push_str(&format!(", rooms {}", kept.join(", ")));
            }
            line
        }
        GenerationStep::PartitionComplete { rooms } => format!("partitioned into {} rooms", rooms),
        GenerationStep::Prune(PruneStep::Removed(room)) => {
            format!("removed room {} {}", room.id, room.rect)
        }
        GenerationStep::Prune(PruneStep::Rejected(room)) => {
            format!("kept room {} {}, removing it disconnects the layout", room.id, room.rect)
        }
        GenerationStep::GraphFinalized { rooms, connections } => {
            format!("{} rooms, {} connections", rooms, connections)
        }
        GenerationStep::Doors(step) => format!("room {}: {} doors", step.room, step.doors.len()),
        GenerationStep::Complete(dungeon) => format!(
            "done: {} rooms, {} doors",
            dungeon.rooms().len(),
            dungeon.doors().len()
        ),
    }
}

/// Walls as `#`, flooded floor as `.`, unreached space blank; top row first
pub fn render_map(tilemap: &Tilemap) -> String {
    let tiles = &tilemap.tiles;
    let mut out = String::with_capacity((tiles.width() + 1) * tiles.height());
    for y in (0..tiles.height()).rev() {
        for x in 0..tiles.width() {
            let symbol = match tiles.get(x, y) {
                Some(TileState::Wall) => TileState::Wall.symbol(),
                _ if is_floor(tilemap, x, y) => TileState::Empty.symbol(),
                _ => ' ',
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

/// Floor cell `(x, y)` is drawn on tile `(x + 1, y + 1)`
fn is_floor(tilemap: &Tilemap, x: usize, y: usize) -> bool {
    x > 0 && y > 0 && tilemap.floor.contains(x - 1, y - 1)
}

pub fn legend() -> String {
    TileState::iter()
        .map(|state| format!("{} {}", state.symbol(), state))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{generate, GeneratorConfig, Rect};

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            bounds: Rect::new(0, 0, 12, 10),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_render_single_room() {
        let dungeon = generate(&small_config()).unwrap();
        let map = render_map(&Tilemap::build(&dungeon));
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "############");
        assert_eq!(lines[9], "############");
        // Floor is drawn one tile up and right of its code cell, leaving the
        // bottom and left interior edge blank
        assert_eq!(lines[1], "# .........#");
        assert_eq!(lines[4], "# .........#");
        assert_eq!(lines[8], "#          #");
    }

    #[test]
    fn test_describe_complete() {
        let dungeon = generate(&small_config()).unwrap();
        let line = describe_step(&GenerationStep::Complete(Box::new(dungeon)));
        assert_eq!(line, "done: 1 rooms, 0 doors");
    }

    #[test]
    fn test_legend() {
        assert_eq!(legend(), ". Empty  # Wall");
    }
}
