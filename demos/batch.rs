// 批量转换示例:模拟表格中读入的几行数据,其中一行纬度非法
use gk_convert::batch::DEFAULT_PREVIEW_ROWS;
use gk_convert::{run_batch, BatchOutcome, BatchRow, Converter, Direction, ZoneWidth, ZoningScheme};
use std::time::Instant;

fn main() {
    println!("Example: gk_convert batch");

    // 初始化日志记录器
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let rows = vec![
        BatchRow::new(1, "116.397428", "39.909230").with_note("北京天安门"),
        BatchRow::new(2, "121.473701", "99.0").with_note("上海外滩"),
        BatchRow::new(3, "113.264385", "23.129110").with_note("广州塔"),
        BatchRow::new(4, "一百", "23.1"),
    ];

    let converter: Converter = Converter::default();
    let scheme = ZoningScheme::new(ZoneWidth::Three, true);
    let run = run_batch(&converter, &rows, Direction::GeographicToProjected, scheme, 3);

    let t0 = Instant::now();
    let report = run.report();
    println!(
        "共 {} 行, 成功 {}, 失败 {} ({:.3}ms)",
        report.total(),
        report.succeeded(),
        report.failed(),
        t0.elapsed().as_micros() as f64 / 1000.0
    );

    for outcome in report.preview(DEFAULT_PREVIEW_ROWS) {
        match outcome {
            BatchOutcome::Success {
                index,
                note,
                result,
            } => println!(
                "#{index} 第 {} 带 {} {}",
                result.zone_number,
                result.combined,
                note.as_deref().unwrap_or("")
            ),
            BatchOutcome::Failure { input, error } => println!(
                "#{} 失败 [{}, {}]: {error}",
                input.index, input.primary, input.secondary
            ),
        }
    }
}
