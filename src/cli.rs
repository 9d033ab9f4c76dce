use clap::{Parser, Subcommand, ValueEnum};
use skin_log_common::{CategoryTag, Rating, SortBy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skin-log")]
#[command(about = "スキンケア製品の使用記録・カタログ検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 製品カタログ（CSV/xlsx）。省略時は設定値
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カタログを検索して候補を表示
    Search {
        /// 検索語（複数単語可）
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// スコアも表示
        #[arg(long)]
        scores: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 種類の文字列からカテゴリを推定
    Classify {
        /// 種類（例: "gel cleanser"）
        #[arg(required = true)]
        type_text: String,
    },

    /// エントリを追加（--name 省略時は対話式）
    Add {
        /// 製品名
        #[arg(short, long)]
        name: Option<String>,

        /// ブランド
        #[arg(short, long)]
        brand: Option<String>,

        /// カテゴリ (cleanser/moisturizer/serum/sunscreen/treatment/other)
        #[arg(short, long)]
        category: Option<CategoryTag>,

        /// 評価 (loved_it/liked_it/neutral/disliked_it/broke_me_out)
        #[arg(short, long)]
        rating: Option<Rating>,

        /// メモ
        #[arg(long)]
        notes: Option<String>,
    },

    /// 記録したエントリを一覧表示
    List {
        /// 製品名・ブランドで絞り込み
        #[arg(short, long)]
        search: Option<String>,

        /// カテゴリで絞り込み
        #[arg(short, long)]
        category: Option<CategoryTag>,

        /// 評価で絞り込み
        #[arg(short, long)]
        rating: Option<Rating>,

        /// 並び順
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,
    },

    /// エントリをファイルに出力
    Export {
        /// 出力形式 (json/excel)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 標準入力の各行を入力変更として候補を表示（デバウンスあり）
    Suggest {
        /// 静止時間（ミリ秒）。省略時は設定値
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// 設定を表示/編集
    Config {
        /// オーナーIDを設定
        #[arg(long)]
        set_owner: Option<String>,

        /// カタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    Date,
    Name,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortBy::Date,
            SortArg::Name => SortBy::Name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use json or excel", s)),
        }
    }
}
