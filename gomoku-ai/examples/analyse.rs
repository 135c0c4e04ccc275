//! 局面分析
//!
//! 运行方式:
//! ```bash
//! RUST_LOG=gomoku_ai=debug cargo run -p gomoku-ai --example analyse
//! ```
//!
//! 可选参数：记谱字符串（15 行，以 `/` 分隔）和搜索层数。

use std::num::NonZeroU8;

use anyhow::Context;
use gomoku_ai::{Agent, AiConfig, Evaluator};
use gomoku_core::{Notation, Rules, Stone};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_POSITION: [&str; 15] = [
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "......O........",
    "......XXO......",
    ".......X.......",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
];

fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("gomoku_ai=info".parse()?))
        .init();

    let config = AiConfig::default();
    let mut args = std::env::args().skip(1);
    let position = args.next().unwrap_or_else(|| DEFAULT_POSITION.join("/"));
    let depth = match args.next() {
        Some(raw) => {
            let plies: u8 = raw.parse().context("depth must be a number")?;
            NonZeroU8::new(plies).context("depth must be at least 1")?
        }
        None => config.search_depth(),
    };

    let board = Notation::parse(&position)?;
    println!("局面: {}", Notation::to_string(&board));
    println!("状态: {:?}", Rules::status(&board));

    // 黑先：子数相等时轮到黑棋
    let own = if board.stone_count(Stone::Black) <= board.stone_count(Stone::White) {
        Stone::Black
    } else {
        Stone::White
    };

    let evaluator = Evaluator::from_config(&config);
    println!("静态评估 ({:?}): {}", own, evaluator.score(&board, own, own.opponent()));

    let mut agent = Agent::new(own, config)?;
    let start = std::time::Instant::now();
    match agent.next_move(&board, depth) {
        Some(pos) => {
            println!("最佳落子: {} 分数: {:?}", pos, agent.last_score());
            println!(
                "节点数: {}, 耗时: {:?}, 置换表: {:?}",
                agent.nodes_searched(),
                start.elapsed(),
                agent.tt_stats()
            );
        }
        None => println!("棋盘已满，和棋"),
    }

    Ok(())
}
