use clap::Parser;
use skin_log::{autocomplete, catalog_source, cli, config, error, export, prompt, store};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use skin_log_common::{classify, filter_entries, search_scored, EntryDraft, EntryFilter};
use std::sync::Arc;
use std::time::Duration;
use store::EntryStore;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 検索系は設定が壊れていても既定値で動かす。書き込み系だけ厳密に読む
    let resolve_catalog = |config: &Config| cli.catalog.clone().or_else(|| config.catalog_path());

    match cli.command {
        Commands::Search { query, scores, json } => {
            let config = Config::load_or_default();
            let catalog_path = resolve_catalog(&config);
            let catalog = catalog_source::load_catalog_or_empty(catalog_path.as_deref());
            let query = query.join(" ");
            let candidates = search_scored(&query, catalog.records());

            if json {
                let records: Vec<_> = candidates.iter().map(|c| c.record).collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            if candidates.is_empty() {
                println!("該当する製品がありません: {}", query);
                return Ok(());
            }

            println!("🔍 「{}」: {}件\n", query, candidates.len());
            for (i, candidate) in candidates.iter().enumerate() {
                let record = candidate.record;
                let category = classify(&record.product_type)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".into());
                if scores {
                    println!(
                        "  {:>2}) [{:>3}] {} {} ({}) → {}",
                        i + 1, candidate.score, record.brand, record.name, record.product_type, category
                    );
                } else {
                    println!(
                        "  {:>2}) {} {} ({}) → {}",
                        i + 1, record.brand, record.name, record.product_type, category
                    );
                }
            }
        }

        Commands::Classify { type_text } => match classify(&type_text) {
            Some(category) => println!("{}", category),
            None => println!("(推定できません)"),
        },

        Commands::Add { name, brand, category, rating, notes } => {
            let config = Config::load()?;
            let catalog_path = resolve_catalog(&config);
            let owner = config.owner_id()?;
            let store_path = config.store_path()?;
            let mut store = EntryStore::load(&store_path)?;

            let mut draft = EntryDraft {
                product_name: name.clone().unwrap_or_default(),
                brand: brand.unwrap_or_default(),
                category: category.unwrap_or_default(),
                rating: rating.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };

            if name.is_none() {
                println!("🧴 skin-log - エントリ追加\n");
                let catalog = catalog_source::load_catalog_or_empty(catalog_path.as_deref());
                match prompt::run_interactive_add(&catalog, draft)? {
                    Some(completed) => draft = completed,
                    None => {
                        println!("キャンセルしました");
                        return Ok(());
                    }
                }
            }

            let entry = store.create(draft, &owner, chrono::Utc::now())?.clone();
            store.save(&store_path)?;

            println!(
                "✔ 登録しました: {} [{} / {}]",
                entry.product_name,
                entry.category.label(),
                entry.rating.label()
            );
        }

        Commands::List { search, category, rating, sort } => {
            let config = Config::load()?;
            let owner = config.owner_id()?;
            let store = EntryStore::load(&config.store_path()?)?;
            let entries = store.entries_for(&owner);

            let filter = EntryFilter {
                search: search.unwrap_or_default(),
                category,
                rating,
            };
            let shown = filter_entries(&entries, &filter, sort.into());

            if shown.is_empty() {
                if filter.is_active() {
                    println!("条件に一致するエントリがありません");
                } else {
                    println!("エントリがまだありません。`skin-log add` で追加してください");
                }
                return Ok(());
            }

            for entry in &shown {
                let brand = entry.brand.as_deref().unwrap_or("-");
                println!(
                    "{}  {}  {}  [{}]  {}",
                    entry.created_at.format("%Y-%m-%d"),
                    entry.product_name,
                    brand,
                    entry.category.label(),
                    entry.rating.label()
                );
                if let Some(notes) = &entry.notes {
                    println!("    {}", notes);
                }
            }
            println!("\n{} / {} 件を表示", shown.len(), entries.len());
        }

        Commands::Export { format, output } => {
            let config = Config::load()?;
            let owner = config.owner_id()?;
            let store = EntryStore::load(&config.store_path()?)?;
            let entries = store.entries_for(&owner);

            let output_path = export::output_path_for_format(output.as_deref(), &format);
            export::export_entries(&entries, &format, &output_path)?;
            println!("✔ {}件を出力: {}", entries.len(), output_path.display());
        }

        Commands::Suggest { debounce_ms } => {
            let config = Config::load_or_default();
            let catalog_path = resolve_catalog(&config);
            let catalog = catalog_source::load_catalog_or_empty(catalog_path.as_deref());
            let quiet = Duration::from_millis(debounce_ms.unwrap_or(config.debounce_ms));
            autocomplete::run_stdin(Arc::new(catalog), quiet).await?;
        }

        Commands::Config { set_owner, set_catalog, show } => {
            let mut config = Config::load()?;

            if let Some(owner) = set_owner {
                config.set_owner_id(owner)?;
                println!("✔ オーナーIDを設定しました");
            }

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  カタログ: {}",
                    config.catalog_path().map(|p| p.display().to_string()).unwrap_or_else(|| "未設定".into())
                );
                println!("  保存先: {}", config.store_path()?.display());
                println!("  オーナーID: {}", config.owner_id.as_deref().unwrap_or("未設定"));
                println!("  デバウンス: {}ms", config.debounce_ms);
            }
        }
    }

    Ok(())
}
