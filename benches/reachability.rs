use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skirmish::board::reach::{reachable_bfs, reachable_radius};
use skirmish::board::{Board, Pos};

fn walled_board() -> Board {
    // A 32x32 board with a comb of walls, each leaving a gap at alternating ends.
    let mut rows = vec![vec![0u8; 32]; 32];
    for x in (3..32).step_by(4) {
        let gap = if (x / 4) % 2 == 0 { 0 } else { 31 };
        for (y, row) in rows.iter_mut().enumerate() {
            if y != gap {
                row[x] = 1;
            }
        }
    }
    Board::from_rows(&rows).unwrap()
}

fn bench_radius(c: &mut Criterion) {
    let board = walled_board();
    c.bench_function("reachable_radius", |b| {
        b.iter(|| reachable_radius(&board, black_box(Pos::new(16, 16)), 8, 2, |_| true))
    });
}

fn bench_bfs(c: &mut Criterion) {
    let board = walled_board();
    c.bench_function("reachable_bfs", |b| {
        b.iter(|| reachable_bfs(&board, black_box(Pos::new(16, 16)), 8, 2, |_| true))
    });
}

fn bench_bfs_long(c: &mut Criterion) {
    // Long walks with no jump have to thread the gaps.
    let board = walled_board();
    c.bench_function("reachable_bfs_long", |b| {
        b.iter(|| reachable_bfs(&board, black_box(Pos::new(0, 0)), 40, 0, |_| true))
    });
}

criterion_group!(benches, bench_radius, bench_bfs, bench_bfs_long);
criterion_main!(benches);
