mod commands;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::mapping::OpenArgs;

#[derive(Parser, Debug)]
#[command(name = "cod-upnp")]
#[command(author, version, about, long_about = Some("cod-upnp は Call of Duty のオンラインプレイに必要なポートを UPnP 対応ルーターで開放するツールです。"))]
struct Cli {
    /// 組み込みの代わりに使うポート表 (JSON)
    #[arg(long, global = true)]
    table: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 既知のゲームを一覧表示します
    Games,
    /// ゲームが対応するプラットフォームを一覧表示します
    Platforms {
        game: String,
    },
    /// 開放対象のポートと所有者ラベルを表示します
    Ports {
        /// ゲーム名 ("all" で全ゲーム)
        #[arg(short, long, default_value = "all")]
        game: String,

        /// プラットフォーム名 ("all" で全プラットフォーム)
        #[arg(short, long, default_value = "all")]
        platform: String,
    },
    /// ルーターにポートマッピングを追加します
    Open {
        #[arg(short, long)]
        game: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        /// ポートを転送する先のクライアント IP アドレス
        #[arg(long)]
        ip: Option<String>,

        /// Windows ファイアウォールに許可ルールも追加します
        #[arg(long)]
        firewall: bool,

        /// ファイアウォールコマンドを実行せずにログへ出力します
        #[arg(long)]
        dry_run_firewall: bool,

        /// 追加直後にマッピングを削除します (ルーターの動作確認用)
        #[arg(long)]
        probe: bool,

        /// リース期間 (秒)。0 は無期限です。
        #[arg(long)]
        lease: Option<u32>,

        /// JSON 設定ファイルから設定を読み込みます
        #[arg(short, long)]
        config: Option<String>,
    },
    /// ルーターからポートマッピングを削除します
    Close {
        #[arg(short, long, default_value = "all")]
        game: String,

        #[arg(short, long, default_value = "all")]
        platform: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let table = cli.table;
    match cli.command {
        Commands::Games => commands::catalog::run_games(table)?,
        Commands::Platforms { game } => commands::catalog::run_platforms(game, table)?,
        Commands::Ports { game, platform } => commands::catalog::run_ports(game, platform, table)?,
        Commands::Open { game, platform, ip, firewall, dry_run_firewall, probe, lease, config } => {
            commands::mapping::run_open(OpenArgs {
                game,
                platform,
                ip,
                firewall,
                dry_run_firewall,
                probe,
                lease,
                config,
                table,
            })
            .await?
        }
        Commands::Close { game, platform } => commands::mapping::run_close(game, platform, table).await?,
    }

    Ok(())
}
