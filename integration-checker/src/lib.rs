//! Integration checker
//!
//! Smoke-tests the monitoring dashboard and its webhook integrations
//! (GitHub Actions, Replit via ngrok, Cursor via the VSCode extension).

/// HTTPクライアント（タイムアウト付き）
pub mod client;

/// 統合チェックのパイプライン
pub mod checker;

/// CLIモジュール
pub mod cli;

/// 設定管理（環境変数）
pub mod config;

/// エラー型定義
pub mod error;

/// チェック対象の統合
pub mod integrations;

/// ログ初期化
pub mod logging;

/// コンソール出力
pub mod report;

pub use checker::{CheckResult, IntegrationChecker, RunSummary};
pub use config::CheckerConfig;
pub use error::CheckError;
