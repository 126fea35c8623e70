use dg_core::dungeon::{Partitioner, Rect};
use dg_core::{generate, DungeonRng, GeneratorConfig, Pacing, Size};
use proptest::prelude::*;

/// Configs whose minimum room can always hold a door between its corners,
/// so the initial room graph is connected, with doors of at least two tiles
fn config_strategy() -> impl Strategy<Value = GeneratorConfig> {
    (
        any::<u64>(),
        (-20i32..20, -20i32..20, 12i32..56, 12i32..56),
        (5i32..10, 5i32..10),
        (0i32..8, 0i32..8),
        (0i32..24, 0i32..24),
        0u32..1000,
        0u32..1000,
    )
        .prop_map(
            |(seed, (x, y, width, height), (min_w, min_h), room_extra, gen_extra, overlap, door)| {
                let min_extent = min_w.min(min_h);
                let min_door_overlap = 2 + (overlap % (min_extent - 3) as u32) as i32;
                let door_length = 2 + (door % (min_door_overlap - 1) as u32) as i32;
                GeneratorConfig {
                    bounds: Rect::new(x, y, width, height),
                    max_generation_size: Size::new(min_w + 2 + gen_extra.0, min_h + 2 + gen_extra.1),
                    max_room_size: Size::new(
                        2 * min_w - 2 + room_extra.0,
                        2 * min_h - 2 + room_extra.1,
                    ),
                    min_room_size: Size::new(min_w, min_h),
                    min_door_overlap,
                    door_length,
                    seed,
                    pacing: Pacing::Fast,
                }
            },
        )
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-30i32..30, -30i32..30, 0i32..30, 0i32..30).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn intersects_agrees_with_intersection(a in arb_rect(), b in arb_rect()) {
        let overlap = a.intersection(&b);
        prop_assert_eq!(a.intersects(&b), overlap.width > 0 && overlap.height > 0);
        prop_assert_eq!(overlap, b.intersection(&a));
    }

    #[test]
    fn partition_tiles_the_bounds(config in config_strategy()) {
        prop_assert!(config.validate().is_ok());
        let rooms = Partitioner::new(&config)
            .unwrap()
            .run(&mut DungeonRng::new(config.seed));

        for room in &rooms {
            let r = room.rect;
            prop_assert!(config.bounds.contains_rect(&r));
            prop_assert!(r.width >= config.min_room_size.width && r.width <= config.max_room_size.width);
            prop_assert!(r.height >= config.min_room_size.height && r.height <= config.max_room_size.height);
        }

        // Rooms meet only along one-tile walls
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                let overlap = a.rect.intersection(&b.rect);
                prop_assert!(
                    overlap.is_empty() || overlap.width == 1 || overlap.height == 1,
                    "{} and {} overlap by {}", a.rect, b.rect, overlap
                );
            }
        }

        for (x, y) in config.bounds.positions() {
            prop_assert!(rooms.iter().any(|room| room.rect.contains_point(x, y)), "({}, {}) uncovered", x, y);
        }
    }

    #[test]
    fn generated_layout_is_connected(config in config_strategy()) {
        let dungeon = generate(&config).unwrap();
        let mut graph = dungeon.graph().clone();
        for room in dungeon.rooms() {
            prop_assert!(graph.dfs(room.id, false));
        }
        prop_assert_eq!(dungeon.doors().len(), dungeon.rooms().len() - 1);

        for door in dungeon.doors() {
            let (a, b) = door.rooms;
            prop_assert!(dungeon.graph().has_edge(a, b));
            let shared = dungeon.room(a).unwrap().rect.intersection(&dungeon.room(b).unwrap().rect);
            prop_assert!(shared.contains_rect(&door.rect), "door {} outside {}", door.rect, shared);
            prop_assert_eq!(door.rect.width.max(door.rect.height), config.door_length);
        }
    }

    #[test]
    fn same_seed_same_dungeon(config in config_strategy()) {
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        prop_assert_eq!(a.rooms(), b.rooms());
        prop_assert_eq!(a.doors(), b.doors());
    }
}
