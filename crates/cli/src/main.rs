use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use earnings_api::{create_router, AppState};
use earnings_config::AppConfig;
use earnings_core::models::SentimentResult;
use earnings_metrics::{
    build_earnings_report, format_markdown, IncomeStatement, MetricsInput, TranscriptInsights,
};
use earnings_nlp::report::{extractive_summary, guidance_statements};
use earnings_nlp::{
    analyze_sentiment, build_report, clean_transcript, get_keyword_analysis, ReportOptions,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "earnings", about = "Earnings call transcript sentiment analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the sentiment of a transcript
    Analyze {
        #[command(flatten)]
        input: TranscriptArgs,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Count financial keywords per category
    Keywords {
        #[command(flatten)]
        input: TranscriptArgs,
    },
    /// Full transcript report as JSON
    Report {
        #[command(flatten)]
        input: TranscriptArgs,
    },
    /// Compute earnings metrics from reported figures
    Metrics(MetricsArgs),
    /// Start API server
    Serve,
}

#[derive(Args)]
struct TranscriptArgs {
    /// Transcript file; reads stdin when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct MetricsArgs {
    /// Ticker symbol (e.g. AAPL)
    #[arg(short, long)]
    ticker: String,
    #[arg(long)]
    company: Option<String>,
    /// Fiscal period label (e.g. 2024-Q3)
    #[arg(long)]
    period: Option<String>,
    #[arg(long)]
    revenue: f64,
    #[arg(long, default_value_t = 0.0)]
    gross_profit: f64,
    #[arg(long, default_value_t = 0.0)]
    operating_income: f64,
    #[arg(long)]
    net_income: f64,
    #[arg(long)]
    shares: f64,
    /// Share price, for the P/E ratio
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    eps_estimate: Option<f64>,
    #[arg(long)]
    revenue_estimate: Option<f64>,
    /// Revenue in the same quarter last year
    #[arg(long)]
    prev_revenue: Option<f64>,
    /// Net income in the same quarter last year
    #[arg(long)]
    prev_net_income: Option<f64>,
    /// Earnings call transcript to fold into the report
    #[arg(long)]
    transcript: Option<PathBuf>,
    /// Print Markdown instead of JSON
    #[arg(long)]
    markdown: bool,
}

impl MetricsArgs {
    fn to_input(&self) -> MetricsInput {
        let year_ago = match (self.prev_revenue, self.prev_net_income) {
            (None, None) => None,
            (revenue, net_income) => Some(IncomeStatement {
                revenue: revenue.unwrap_or_default(),
                net_income: net_income.unwrap_or_default(),
                ..Default::default()
            }),
        };
        MetricsInput {
            ticker: self.ticker.clone(),
            company_name: self.company.clone(),
            period: self.period.clone(),
            current: IncomeStatement {
                revenue: self.revenue,
                gross_profit: self.gross_profit,
                operating_income: self.operating_income,
                net_income: self.net_income,
            },
            year_ago,
            shares_outstanding: self.shares,
            price: self.price,
            eps_estimate: self.eps_estimate,
            revenue_estimate: self.revenue_estimate,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = Path::new(&cli.config);
    let (config, config_found) = if config_path.exists() {
        (AppConfig::from_file(config_path)?, true)
    } else {
        (AppConfig::default(), false)
    };

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(io::stderr)
        .init();

    if !config_found {
        warn!(path = %cli.config, "config file not found, using built-in defaults");
    }

    match cli.command {
        Commands::Analyze { input, json } => {
            let text = read_transcript(input.file.as_deref())?;
            let result = analyze_sentiment(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_sentiment(&result);
            }
        }
        Commands::Keywords { input } => {
            let text = read_transcript(input.file.as_deref())?;
            let counts = get_keyword_analysis(&text);
            for (category, count) in &counts {
                println!("  {:<10} {:>5}", category.as_str(), count);
            }
        }
        Commands::Report { input } => {
            let text = read_transcript(input.file.as_deref())?;
            let report = build_report(&text, &report_options(&config));
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Metrics(args) => {
            cmd_metrics(&args, &config)?;
        }
        Commands::Serve => {
            run_server(&config).await?;
        }
    }

    Ok(())
}

fn report_options(config: &AppConfig) -> ReportOptions {
    ReportOptions {
        max_numbers: config.report.max_numbers,
        max_guidance: config.report.max_guidance,
        summary_sentences: config.report.summary_sentences,
    }
}

fn read_transcript(path: Option<&Path>) -> anyhow::Result<String> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read transcript {}", p.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transcript from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("transcript is empty");
    }
    Ok(text)
}

fn print_sentiment(r: &SentimentResult) {
    println!("Sentiment:  {} (score {:+.2})", r.overall_label, r.overall_score);
    println!("Confidence: {:.0}%", r.confidence * 100.0);
    println!(
        "Mix:        {:.0}% positive / {:.0}% negative / {:.0}% neutral",
        r.positive * 100.0,
        r.negative * 100.0,
        r.neutral * 100.0
    );

    if !r.key_phrases.is_empty() {
        println!("\nKey phrases:");
        for p in &r.key_phrases {
            println!("  {:<24} {:>4}", p.phrase, p.count);
        }
    }
    let sections = [("Positive signals", &r.positive_signals), ("Risk factors", &r.risk_factors)];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!("\n{title}:");
        for s in items {
            println!("  - {s}");
        }
    }
}

fn cmd_metrics(args: &MetricsArgs, config: &AppConfig) -> anyhow::Result<()> {
    let input = args.to_input();

    let insights = match &args.transcript {
        Some(path) => {
            let cleaned = clean_transcript(&read_transcript(Some(path))?);
            let options = report_options(config);
            TranscriptInsights {
                sentiment: Some(analyze_sentiment(&cleaned)),
                summary: extractive_summary(&cleaned, options.summary_sentences),
                guidance: guidance_statements(&cleaned, options.max_guidance),
            }
        }
        None => TranscriptInsights::default(),
    };

    let today = chrono::Local::now().date_naive();
    let report = build_earnings_report(&input, insights, today)?;
    if args.markdown {
        print!("{}", format_markdown(&report));
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.clone());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "earnings API server starting");
    println!("Earnings API listening on http://{addr}/api/health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_args_parse() {
        let cli = Cli::try_parse_from([
            "earnings",
            "metrics",
            "--ticker",
            "ACME",
            "--revenue",
            "100",
            "--net-income",
            "20",
            "--shares",
            "10",
            "--prev-revenue",
            "80",
        ])
        .unwrap();
        assert_eq!(cli.config, "config/default.toml");
        let Commands::Metrics(args) = cli.command else {
            panic!("expected metrics command");
        };
        let input = args.to_input();
        assert_eq!(input.current.net_income, 20.0);
        assert_eq!(input.year_ago.map(|s| s.revenue), Some(80.0));
        assert!(!args.markdown);
    }

    #[test]
    fn test_no_history_without_prev_figures() {
        let cli = Cli::try_parse_from([
            "earnings", "metrics", "-t", "ACME", "--revenue", "1", "--net-income", "1",
            "--shares", "1",
        ])
        .unwrap();
        let Commands::Metrics(args) = cli.command else {
            panic!("expected metrics command");
        };
        assert!(args.to_input().year_ago.is_none());
    }
}
