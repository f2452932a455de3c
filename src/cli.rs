use crate::export::ExportFormat;
use crate::view::SortPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tip_receipts_common::{Field, SortDirection, ViewMode};

#[derive(Parser)]
#[command(name = "tip-receipts")]
#[command(about = "レシート・チップ管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 絞り込み・並べ替え条件（各コマンド共通）
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// 絞り込むフィールド (customer_name/check_number/date/time/amount/tip/total/payment_type)
    #[arg(long)]
    pub filter_field: Option<Field>,

    /// 絞り込み文字列（部分一致・大文字小文字無視）
    #[arg(short, long)]
    pub query: Option<String>,

    /// 並べ替えフィールド
    #[arg(short, long)]
    pub sort: Option<Field>,

    /// 並べ替え方向 (asc/desc)
    #[arg(short, long)]
    pub direction: Option<SortDirection>,

    /// 絞り込み時の並べ替え (follow_filter/independent)
    #[arg(long)]
    pub sort_policy: Option<SortPolicy>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レシートを表示（グリッド/スライドショー）
    View {
        /// レシートJSON、または画像解析APIのレスポンス
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// 表示モード (grid/slideshow)
        #[arg(short, long, default_value = "grid")]
        mode: ViewMode,

        /// グリッドのページ番号（1始まり）
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// 1ページあたりの件数（設定を上書き）
        #[arg(long)]
        page_size: Option<usize>,

        /// スライドショーの表示位置（1始まり）
        #[arg(long)]
        index: Option<usize>,

        /// スライドショーで絞り込みを無視して全件を巡回
        #[arg(long)]
        show_all: bool,
    },

    /// 表示中レシートの集計
    Summary {
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 表示中レシートを書き出す
    Export {
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// 出力形式 (csv/excel/json)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ファイル名・シート名（設定を上書き）
        #[arg(short, long)]
        title: Option<String>,
    },

    /// デモ用レシートJSONを生成
    Sample {
        /// 出力JSONファイル
        #[arg(short, long, default_value = "sample-receipts.json")]
        output: PathBuf,

        /// 件数
        #[arg(short = 'n', long, default_value = "12")]
        count: usize,
    },

    /// 設定を表示/編集
    Config {
        /// グリッドのページサイズを設定
        #[arg(long)]
        set_page_size: Option<usize>,

        /// 絞り込み時の並べ替えを設定 (follow_filter/independent)
        #[arg(long)]
        set_sort_policy: Option<SortPolicy>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
