//! Chess Engine Benchmarks
//!
//! Performance benchmarks for move generation, evaluation and search using Criterion.

use std::sync::Arc;

use chess_engine::evaluation::{Evaluator, PieceSquareEvaluator};
use chess_engine::move_gen::{generate_legal_moves, generate_pseudo_legal_moves, perft, AttackTables};
use chess_engine::types::MoveList;
use chess_engine::{Board, EngineContext, SearchConfig, Searcher};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_attack_tables(c: &mut Criterion) {
    c.bench_function("attack_tables_new", |b| b.iter(|| black_box(AttackTables::new())));
}

fn bench_move_generation_starting(c: &mut Criterion) {
    let tables = AttackTables::new();
    let board = Board::starting_position();
    let mut moves = MoveList::new();

    c.bench_function("generate_moves_starting_position", |b| {
        b.iter(|| black_box(generate_pseudo_legal_moves(&board, &tables, &mut moves)))
    });
}

fn bench_legal_moves_kiwipete(c: &mut Criterion) {
    let tables = AttackTables::new();
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    let mut moves = MoveList::new();

    c.bench_function("generate_legal_moves_kiwipete", |b| {
        b.iter(|| black_box(generate_legal_moves(&mut board, &tables, &mut moves)))
    });
}

fn bench_perft_3(c: &mut Criterion) {
    let tables = AttackTables::new();
    let mut board = Board::starting_position();

    c.bench_function("perft_3_starting_position", |b| {
        b.iter(|| black_box(perft(&mut board, &tables, 3)))
    });
}

fn bench_evaluate_position_starting(c: &mut Criterion) {
    let board = Board::starting_position();

    c.bench_function("evaluate_position_starting", |b| {
        b.iter(|| black_box(PieceSquareEvaluator.evaluate(&board)))
    });
}

fn bench_search_depth_4(c: &mut Criterion) {
    let ctx = Arc::new(EngineContext::default());
    let config = SearchConfig {
        use_book: false,
        tt_entries: 1 << 16,
        ..SearchConfig::default()
    };
    let mut searcher = Searcher::new(ctx, config);
    let mut board = Board::from_fen(KIWIPETE).unwrap();

    c.bench_function("search_depth_4_kiwipete", |b| {
        b.iter(|| black_box(searcher.search_depth(&mut board, 4)))
    });
}

criterion_group!(
    benches,
    bench_attack_tables,
    bench_move_generation_starting,
    bench_legal_moves_kiwipete,
    bench_perft_3,
    bench_evaluate_position_starting,
    bench_search_depth_4,
);
criterion_main!(benches);
