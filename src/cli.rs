use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "box-scanner")]
#[command(about = "写真から箱を数える解析サービスのクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 解析サービスの状態を一度だけ確認
    Health,

    /// 画像を送信して箱の数を取得
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 結果JSONの保存先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ヘルスチェックを省略
        #[arg(long)]
        skip_health: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 解析サービスのURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// APIトークンを設定
        #[arg(long)]
        set_api_token: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["box-scanner", "analyze", "boxes.jpg", "-o", "out.json"]);
        match cli.command {
            Commands::Analyze { image, output, skip_health } => {
                assert_eq!(image, PathBuf::from("boxes.jpg"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(!skip_health);
            }
            _ => panic!("analyze expected"),
        }
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["box-scanner", "health", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn test_analyze_requires_image() {
        assert!(Cli::try_parse_from(["box-scanner", "analyze"]).is_err());
    }
}
