use clap::Parser;
use colored::*;
use geoindex::algo;
use geoindex::{GeoIndex, GeoIndexConfig, RTree, Rectangle, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "geoindex.toml")]
    config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    generate_config: bool,

    /// 随机点数量
    #[arg(long, default_value_t = 10_000)]
    points: usize,

    /// 随机矩形数量
    #[arg(long, default_value_t = 0)]
    rects: usize,

    /// 随机数种子
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// 查询点，格式为 x,y
    #[arg(long, default_value = "0,0", value_parser = parse_point)]
    target: (f64, f64),

    /// 返回最近的 k 个条目
    #[arg(short, default_value_t = 10)]
    k: usize,

    /// 查询时在经度方向回绕
    #[arg(long)]
    wrap: bool,

    /// 输出 SVG 文件路径
    #[arg(long)]
    svg: Option<String>,

    /// 输出 JSON 文件路径
    #[arg(long)]
    json: Option<String>,

    /// Log level (overrides config file)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 生成默认配置文件
    if args.generate_config {
        let config = GeoIndexConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        return Ok(());
    }

    // 加载配置
    let mut config = GeoIndexConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(log_level) = args.log_level.clone() {
        config.logging.level = log_level;
    }

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging)?;

    info!("📦 geoindex {}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    let mut index = GeoIndex::new(RTree::from_config(&config.tree));
    let started = Instant::now();
    fill_random(&mut index, &args);
    info!(
        "🌲 Inserted {} items in {:?} (height {})",
        index.len(),
        started.elapsed(),
        index.inner().height()
    );

    let (x, y) = args.target;
    let target = Rectangle::from_point(x, y);
    let started = Instant::now();
    let mut results = Vec::with_capacity(args.k);
    if args.k > 0 {
        let wrap = args.wrap;
        let metric = |rect: &Rectangle, _| algo::box_dist_calc(&target, rect, wrap);
        index.nearby(metric, |rect, data: &String, dist| {
            results.push((*rect, data.clone(), dist));
            results.len() < args.k
        });
    }
    debug!(elapsed = ?started.elapsed(), "nearby query finished");

    println!(
        "{} nearest to ({}, {}):",
        results.len().to_string().green(),
        x,
        y
    );
    for (rank, (rect, label, dist)) in results.iter().enumerate() {
        println!(
            "{:>4}) {} {} dist={}",
            rank + 1,
            label.bold(),
            rect,
            format!("{:.6}", dist.sqrt()).cyan()
        );
    }

    if let Some(path) = &args.svg {
        std::fs::write(path, index.svg())?;
        info!("🖼  Wrote SVG to {}", path);
    }
    if let Some(path) = &args.json {
        std::fs::write(path, index.export_to_json()?)?;
        info!("📝 Wrote JSON to {}", path);
    }

    Ok(())
}

/// 按种子生成随机点和矩形并插入
fn fill_random(index: &mut GeoIndex<RTree<String>>, args: &Args) {
    let mut rng = StdRng::seed_from_u64(args.seed);
    for i in 0..args.points {
        let x = rng.gen_range(-180.0..180.0);
        let y = rng.gen_range(-90.0..90.0);
        index.insert(Rectangle::from_point(x, y), format!("point-{}", i));
    }
    for i in 0..args.rects {
        let x = rng.gen_range(-180.0..179.0);
        let y = rng.gen_range(-90.0..89.0);
        let w: f64 = rng.gen();
        let h: f64 = rng.gen();
        index.insert(Rectangle::new(x, y, x + w, y + h), format!("rect-{}", i));
    }
}

/// 初始化日志系统
fn init_logging(config: &geoindex::LoggingConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        // validate() 已拒绝缺少路径的文件输出
        _ => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }
    Ok(())
}
