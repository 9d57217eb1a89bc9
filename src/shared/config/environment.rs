use log::warn;
use url::Url;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// 実行環境とログ設定
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: Environment,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から実行環境設定を読み込む
    pub fn from_env() -> Self {
        let environment = match std::env::var("ENVIRONMENT") {
            Ok(value) if value == "production" => Environment::Production,
            _ => Environment::Development,
        };

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            environment,
            log_level,
        }
    }
}

/// APIサーバー接続設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5678".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
        }
    }
}

impl ApiConfig {
    /// 環境変数からAPIサーバー接続設定を読み込む
    ///
    /// # 戻り値
    /// 接続設定（未設定の項目は既定値を使用）
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url =
            std::env::var("API_SERVER_URL").unwrap_or_else(|_| defaults.base_url.clone());

        // ベースURLを検証し、不正な場合は既定値へフォールバックする
        let base_url = match Url::parse(&base_url) {
            Ok(_) => base_url,
            Err(e) => {
                warn!("API_SERVER_URLが不正なため既定値を使用します: {base_url} ({e})");
                defaults.base_url.clone()
            }
        };

        let timeout_seconds = std::env::var("API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_seconds);

        let max_retries = std::env::var("API_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_retries);

        Self {
            base_url,
            timeout_seconds,
            max_retries,
        }
    }
}

/// 環境変数を読み込む
///
/// 開発環境（デバッグビルド）の場合のみ.envファイルを読み込む。
/// 本番環境では実行時に設定された環境変数のみを使用する。
pub fn load_environment_variables() {
    let is_development = cfg!(debug_assertions);

    if is_development {
        match dotenv::dotenv() {
            Ok(path) => {
                eprintln!("環境ファイルを読み込みました: {}", path.display());
            }
            Err(e) => {
                eprintln!("環境ファイルの読み込みに失敗: {e}");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// ログレベルはLOG_LEVEL環境変数から決定される（既定はinfo）。
pub fn initialize_logging() {
    let env_config = EnvironmentConfig::from_env();

    let log_level = match env_config.log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={}",
        env_config.log_level,
        env_config.environment
    );
}
