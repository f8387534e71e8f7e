// ==========================================
// 住宿报价引擎 - 命令行入口
// ==========================================
// 用法: quote-engine <file> <start> <end> [--json]
// 流程: 加载配置 → 读取价格表文件 → 导入 → 区间报价
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use quote_engine::api::{IngestOutcome, QuoteApi};
use quote_engine::config::ConfigManager;
use quote_engine::importer::FilePriceSource;
use quote_engine::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quote-engine")]
#[command(about = "住宿报价引擎: 导入价格表并计算日期区间报价")]
#[command(version)]
struct Cli {
    /// 价格表文件（.csv / .json / .xlsx / .xls）
    file: PathBuf,

    /// 入住日期（YYYY-MM-DD、DD/MM/YYYY 等）
    start: String,

    /// 退房日期
    end: String,

    /// 工作表名（仅 Excel,默认第一张）
    #[arg(long)]
    sheet: Option<String>,

    /// 配置文件路径
    #[arg(long, env = "QUOTE_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    tracing::info!(version = quote_engine::VERSION, "{}", quote_engine::APP_NAME);

    // 配置
    let manager = match &cli.config {
        Some(path) => {
            let mut manager = ConfigManager::from_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))?;
            manager.apply_overrides(|key| std::env::var(key).ok())?;
            manager
        }
        None => ConfigManager::load().context("加载配置失败")?,
    };
    let api = QuoteApi::new(manager.config())?;

    // 日期参数
    let start = api.parse_date(&cli.start)?;
    let end = api.parse_date(&cli.end)?;

    // 导入
    let mut source = FilePriceSource::new(&cli.file);
    if let Some(sheet) = &cli.sheet {
        source = source.with_sheet(sheet.clone());
    }
    let outcome = api
        .refresh(&source)
        .await
        .with_context(|| format!("导入价格表失败: {}", cli.file.display()))?;

    // 报价
    let quote = api.quote(start, end)?;
    let nightly = api.nightly_prices(start, end)?;

    if cli.json {
        let output = serde_json::json!({
            "ingest": outcome,
            "range": { "start": start, "end": end },
            "quote": quote,
            "nightlyPrices": nightly,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &outcome {
        IngestOutcome::Replaced { version, summary } => {
            println!(
                "价格表: version={} 日期数={} 接收={} 拒收={} 重复覆盖={}",
                version,
                summary.distinct_dates,
                summary.accepted,
                summary.rejected,
                summary.duplicates_overwritten
            );
        }
        IngestOutcome::Skipped { reason } => println!("价格表: 未更新（{}）", reason),
        IngestOutcome::Cancelled => println!("价格表: 刷新已取消"),
    }

    if let Some((first, last)) = api.current_table().date_span() {
        println!("价格覆盖: {} → {}", first, last);
    }
    if let Some(max_days) = api.policy().max_days {
        println!("最大可选天数: {}", max_days);
    }

    println!("区间: {} → {}", start, end);
    for night in &nightly {
        match night.price {
            Some(price) => println!("  {}  {:.2}", night.date, price),
            None => println!("  {}  -", night.date),
        }
    }
    println!("晚数: {}", quote.nights);
    println!("总价: {:.2}", quote.total_price);
    println!("单晚加价: {:.1}%", quote.surcharge_percent);

    Ok(())
}
