use rand::rngs::StdRng;
use rand::SeedableRng;

use saucer::entities::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn labels_and_padded_lengths() {
    assert_eq!(EntityKind::Player.label(), "|");
    assert_eq!(EntityKind::Saucer.label(), "<--->");
    assert_eq!(EntityKind::Bullet.label(), "^");

    assert_eq!(Entity::player(24, 80).length(), 3);
    assert_eq!(Entity::saucer(&mut seeded_rng(), 80).length(), 7);
    assert_eq!(Entity::bullet().length(), 3);
}

#[test]
fn player_starts_centred_and_alive() {
    let p = Entity::player(24, 80);
    assert!(p.alive);
    assert_eq!(p.row, 22);
    assert_eq!(p.col, 40);
    assert_eq!(p.tick_delay, PLAYER_DELAY);
}

#[test]
fn saucer_spawns_within_board_and_speed_range() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let s = Entity::saucer(&mut rng, 80);
        assert!(s.alive);
        assert!((1..=ROWSCRS).contains(&s.row));
        assert!((1..=20).contains(&s.tick_delay));
        assert!(s.col >= 0);
        assert!(s.col + s.length() <= 80);
    }
}

#[test]
fn bullet_slot_starts_dead_and_parked() {
    let b = Entity::bullet();
    assert!(!b.alive);
    assert_eq!((b.row, b.col), (0, 0));
    assert_eq!(b.tick_delay, BULLET_DELAY);
}

#[test]
fn kill_rolls_countdown_and_speed_and_parks() {
    let mut rng = seeded_rng();
    let mut s = Entity::saucer(&mut rng, 80);
    s.row = 5;
    s.col = 30;

    s.kill(&mut rng);
    assert!(!s.alive);
    assert!((1..=100).contains(&s.respawn_countdown));
    assert!((1..=20).contains(&s.tick_delay));
    assert_eq!((s.row, s.col), (0, 0));
}

#[test]
fn revive_rerolls_row_only() {
    let mut rng = seeded_rng();
    let mut s = Entity::saucer(&mut rng, 80);
    s.kill(&mut rng);

    s.revive(&mut rng);
    assert!(s.alive);
    assert!((1..=ROWSCRS).contains(&s.row));
    assert_eq!(s.col, 0);
}

#[test]
fn table_has_fixed_slot_counts_and_zeroed_counters() {
    let table = GameTable::new(24, 80, &mut seeded_rng());
    assert_eq!(table.saucers.len(), MAXSCR);
    assert_eq!(table.bullets.len(), MAXBLS);
    assert_eq!(*table.score.lock(), 0);
    assert_eq!(*table.escaped.lock(), 0);
    assert!(table.player.lock().alive);
    assert_eq!(table.fire_row(), 21);
    assert!(!table.stop.load(std::sync::atomic::Ordering::Relaxed));
}
