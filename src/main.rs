use anyhow::Context;
use clap::Parser;
use tip_receipts::{cli, config, export, ingest, logging, sample, summary, AppContext};
use cli::{Cli, Commands};
use config::Config;
use tip_receipts_common::ViewMode;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::View { input, view, mode, page, page_size, index, show_all } => {
            if let Some(size) = page_size {
                config.set_page_size(size)?;
            }
            if let Some(policy) = view.sort_policy {
                config.sort_policy = policy;
            }

            let records = ingest::load_records(&input)
                .with_context(|| format!("{} を読み込めません", input.display()))?;
            let mut ctx = AppContext::new(config);
            ctx.load(records, &view);

            if mode == ViewMode::Slideshow {
                ctx.view.toggle_view_mode(ViewMode::Slideshow);
                if show_all {
                    ctx.view.toggle_show_all();
                }
                if let Some(index) = index {
                    ctx.view.jump_to(index.saturating_sub(1));
                }
            }

            print!("{}", ctx.render(page.saturating_sub(1)));
        }

        Commands::Summary { input, view, json } => {
            if let Some(policy) = view.sort_policy {
                config.sort_policy = policy;
            }

            let records = ingest::load_records(&input)
                .with_context(|| format!("{} を読み込めません", input.display()))?;
            let mut ctx = AppContext::new(config);
            ctx.load(records, &view);

            let summary = summary::ReceiptSummary::from_records(ctx.view.displayed_records());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }

        Commands::Export { input, view, format, output, title } => {
            println!("🧾 tip-receipts - エクスポート\n");

            if let Some(policy) = view.sort_policy {
                config.sort_policy = policy;
            }
            let title = title.unwrap_or_else(|| config.export_title.clone());

            let records = ingest::load_records(&input)
                .with_context(|| format!("{} を読み込めません", input.display()))?;
            let mut ctx = AppContext::new(config);
            ctx.load(records, &view);
            println!(
                "- {}件中{}件を出力します",
                ctx.view.all_records().len(),
                ctx.view.displayed_records().len()
            );

            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let path = export::export_records(ctx.view.displayed_records(), format, &output_dir, &title)?;
            println!("✔ {}出力: {}", format, path.display());
        }

        Commands::Sample { output, count } => {
            let records = sample::generate(count);
            ingest::save_records(&records, &output)?;
            println!("✔ {}件のサンプルを保存: {}", records.len(), output.display());
        }

        Commands::Config { set_page_size, set_sort_policy, show } => {
            let mut changed = false;

            if let Some(size) = set_page_size {
                config.set_page_size(size)?;
                changed = true;
            }
            if let Some(policy) = set_sort_policy {
                config.sort_policy = policy;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  ページサイズ: {}", config.page_size);
                println!("  並べ替え: {} {}", config.default_sort.field, config.default_sort.direction);
                println!("  絞り込み時の並べ替え: {:?}", config.sort_policy);
                println!(
                    "  表示列: {}",
                    config.columns.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
                );
                println!("  出力タイトル: {}", config.export_title);
            }
        }
    }

    Ok(())
}
