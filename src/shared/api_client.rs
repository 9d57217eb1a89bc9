use crate::shared::config::environment::ApiConfig;
/// 汎用APIクライアント
///
/// ストアAPIサーバーとの通信を行う汎用的なクライアント。
/// 明細の取得・作成・更新と領収書アップロードのエンドポイントで使用される。
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIクライアント設定
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5678".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
        }
    }
}

impl ApiClientConfig {
    /// 環境設定からAPIクライアント設定を作成
    pub fn from_env() -> Self {
        let api_config = ApiConfig::from_env();
        Self {
            base_url: api_config.base_url,
            timeout_seconds: api_config.timeout_seconds,
            max_retries: api_config.max_retries,
        }
    }
}

/// APIサーバーからのエラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub timestamp: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

/// 汎用APIクライアント
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// 環境変数の設定で新しいAPIクライアントを作成
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiClientConfig::from_env())
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn with_config(config: ApiClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self.client.get(&url);

        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        self.send_request_with_retry(request, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self.client.post(&url).json(body);

        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        self.send_request_with_retry(request, "POST", endpoint)
            .await
    }

    /// PATCHリクエストを送信
    pub async fn patch<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self.client.patch(&url).json(body);

        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        self.send_request_with_retry(request, "PATCH", endpoint)
            .await
    }

    /// マルチパートフォームのPOSTリクエストを送信
    ///
    /// マルチパートリクエストはクローンできないため、リトライごとに
    /// `build_form`でフォームを再構築する。
    ///
    /// # 引数
    /// * `endpoint` - エンドポイントパス
    /// * `auth_token` - 認証トークン（存在する場合）
    /// * `build_form` - フォームを構築するクロージャ
    ///
    /// # 戻り値
    /// 解析されたレスポンス、または失敗時はエラー
    pub async fn post_multipart<T, F>(
        &self,
        endpoint: &str,
        auth_token: Option<&str>,
        build_form: F,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<multipart::Form, AppError>,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);

        let mut attempts = 0;
        loop {
            let form = build_form()?;
            let mut request = self.client.post(&url).multipart(form);

            if let Some(token) = auth_token {
                request = request.header("Authorization", format!("Bearer {token}"));
            }

            match request.send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        let result: T = response.json().await.map_err(|e| {
                            AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
                        })?;

                        info!("マルチパートPOSTリクエスト成功: endpoint={endpoint}");
                        return Ok(result);
                    } else {
                        let error_response = self.handle_error_response(response).await?;
                        return Err(AppError::ExternalService(format!(
                            "APIサーバーエラー: {} - {}",
                            error_response.error.code, error_response.error.message
                        )));
                    }
                }
                Err(e) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = Duration::from_secs(2_u64.pow(attempts));
                        warn!(
                            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                            self.config.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    } else {
                        return Err(AppError::ExternalService(format!(
                            "APIサーバーへの接続に失敗しました: {e}"
                        )));
                    }
                }
            }
        }
    }

    /// リトライ機能付きでリクエストを送信
    ///
    /// リトライの対象は接続レベルの失敗のみで、HTTPエラーステータスは
    /// リトライせずそのままエラーとして返す。
    async fn send_request_with_retry<T>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let mut attempts = 0;
        loop {
            match request.try_clone() {
                Some(cloned_request) => match cloned_request.send().await {
                    Ok(response) => {
                        if response.status().is_success() {
                            let result: T = response.json().await.map_err(|e| {
                                AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
                            })?;

                            info!("{method}リクエスト成功: endpoint={endpoint}");
                            return Ok(result);
                        } else {
                            let error_response = self.handle_error_response(response).await?;
                            return Err(AppError::ExternalService(format!(
                                "APIサーバーエラー: {} - {}",
                                error_response.error.code, error_response.error.message
                            )));
                        }
                    }
                    Err(e) => {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = Duration::from_secs(2_u64.pow(attempts));
                            warn!(
                                "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                                self.config.max_retries
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::ExternalService(format!(
                                "APIサーバーへの接続に失敗しました: {e}"
                            )));
                        }
                    }
                },
                None => {
                    return Err(AppError::ExternalService(
                        "リクエストのクローンに失敗しました".to_string(),
                    ));
                }
            }
        }
    }

    /// エラーレスポンスを処理し、詳細なエラー情報を提供
    async fn handle_error_response(&self, response: Response) -> Result<ErrorResponse, AppError> {
        let status = response.status();
        let status_code = status.as_u16();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        // JSONエラーレスポンスの解析を試行
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
            debug!(
                "APIサーバーから構造化エラーレスポンスを受信: code={}, message={}",
                error_response.error.code, error_response.error.message
            );
            Ok(error_response)
        } else {
            // JSONでない場合は汎用エラーレスポンスを作成（メッセージは画面表示言語）
            let (error_code, user_message) = match status_code {
                400 => ("BAD_REQUEST", "Erreur 400 : requête invalide"),
                401 => ("UNAUTHORIZED", "Erreur 401 : authentification requise"),
                403 => ("FORBIDDEN", "Erreur 403 : accès refusé"),
                404 => ("NOT_FOUND", "Erreur 404"),
                413 => ("PAYLOAD_TOO_LARGE", "Erreur 413 : fichier trop volumineux"),
                500 => ("INTERNAL_SERVER_ERROR", "Erreur 500"),
                502 => ("BAD_GATEWAY", "Erreur 502 : passerelle invalide"),
                503 => ("SERVICE_UNAVAILABLE", "Erreur 503 : service indisponible"),
                _ => ("UNKNOWN_ERROR", "Erreur inconnue"),
            };

            warn!(
                "APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}"
            );

            Ok(ErrorResponse {
                error: ErrorDetail {
                    code: error_code.to_string(),
                    message: user_message.to_string(),
                    details: Some(serde_json::json!({
                        "http_status": status_code,
                        "raw_response": response_text,
                    })),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                    request_id,
                },
            })
        }
    }
}
