// ストア（バックエンドAPI）との連携

use crate::features::bills::models::{Bill, BillPayload};
use crate::shared::api_client::{ApiClient, ApiClientConfig};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

/// 領収書アップロードの結果
///
/// ストアはアップロード時に下書きレコードを作成し、その識別子（key）と
/// 保存済みファイルの参照を返す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptUpload {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub key: String,
}

/// 明細ストアのインターフェース
///
/// 永続化の唯一の窓口。テストでは手書きのモック実装に差し替えられる。
#[async_trait]
pub trait BillsStore: Send + Sync {
    /// セッションから参照可能な明細の一覧を取得する
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 明細を新規作成する（idはストアが採番する）
    async fn create(&self, payload: &BillPayload) -> AppResult<Bill>;

    /// 既存の明細を更新する
    async fn update(&self, id: &str, payload: &BillPayload) -> AppResult<Bill>;

    /// 領収書ファイルをアップロードし、下書きレコードを作成する
    async fn upload_receipt(
        &self,
        email: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<ReceiptUpload>;
}

/// APIサーバーからの明細一覧レスポンス
#[derive(Debug, Deserialize)]
struct ListBillsResponse {
    success: bool,
    bills: Vec<Bill>,
    count: usize,
    timestamp: String,
}

/// APIサーバーからの明細作成・更新レスポンス
#[derive(Debug, Deserialize)]
struct BillResponse {
    success: bool,
    bill: Bill,
    timestamp: String,
}

/// APIサーバーからの領収書アップロードレスポンス
#[derive(Debug, Deserialize)]
struct UploadReceiptResponse {
    success: bool,
    #[serde(rename = "fileUrl")]
    file_url: String,
    #[serde(rename = "fileName")]
    file_name: String,
    key: String,
    #[serde(rename = "uploadedAt")]
    uploaded_at: String,
}

/// APIサーバー経由の明細ストア実装
pub struct HttpBillsStore {
    api: ApiClient,
    auth_token: Option<String>,
}

impl HttpBillsStore {
    /// 環境変数の設定でストアを作成する
    ///
    /// # 引数
    /// * `auth_token` - ログイン時に取得した認証トークン（存在する場合）
    pub fn new(auth_token: Option<String>) -> AppResult<Self> {
        Self::with_config(ApiClientConfig::from_env(), auth_token)
    }

    /// 設定を指定してストアを作成する
    pub fn with_config(config: ApiClientConfig, auth_token: Option<String>) -> AppResult<Self> {
        Ok(Self {
            api: ApiClient::with_config(config)?,
            auth_token,
        })
    }

    fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// ファイル名からContent-Typeを取得
    fn content_type(file_name: &str) -> String {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}

#[async_trait]
impl BillsStore for HttpBillsStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let response: ListBillsResponse = self.api.get("/api/v1/bills", self.token()).await?;

        info!("明細一覧取得成功: count={}", response.count);
        Ok(response.bills)
    }

    async fn create(&self, payload: &BillPayload) -> AppResult<Bill> {
        let response: BillResponse = self
            .api
            .post("/api/v1/bills", payload, self.token())
            .await?;

        info!("明細作成成功: bill_id={}", response.bill.id);
        Ok(response.bill)
    }

    async fn update(&self, id: &str, payload: &BillPayload) -> AppResult<Bill> {
        let endpoint = format!("/api/v1/bills/{id}");
        let response: BillResponse = self.api.patch(&endpoint, payload, self.token()).await?;

        info!("明細更新成功: bill_id={}", response.bill.id);
        Ok(response.bill)
    }

    async fn upload_receipt(
        &self,
        email: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<ReceiptUpload> {
        info!("領収書アップロード開始: file_name={file_name}");

        let email = email.to_string();
        let file_name = file_name.to_string();
        let content_type = Self::content_type(&file_name);

        let response: UploadReceiptResponse = self
            .api
            .post_multipart("/api/v1/bills/upload", self.token(), || {
                let part = multipart::Part::bytes(data.clone())
                    .file_name(file_name.clone())
                    .mime_str(&content_type)
                    .map_err(|e| AppError::Validation(format!("MIMEタイプ設定エラー: {e}")))?;

                Ok(multipart::Form::new()
                    .part("file", part)
                    .text("email", email.clone()))
            })
            .await?;

        info!(
            "領収書アップロード成功: key={}, file_url={}",
            response.key, response.file_url
        );

        Ok(ReceiptUpload {
            file_url: response.file_url,
            file_name: response.file_name,
            key: response.key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_mapping() {
        // 拡張子からContent-Typeへの対応を確認（大文字小文字は区別しない）
        assert_eq!(HttpBillsStore::content_type("recu.jpg"), "image/jpeg");
        assert_eq!(HttpBillsStore::content_type("recu.JPEG"), "image/jpeg");
        assert_eq!(HttpBillsStore::content_type("recu.png"), "image/png");
        assert_eq!(
            HttpBillsStore::content_type("recu.pdf"),
            "application/octet-stream"
        );
        assert_eq!(
            HttpBillsStore::content_type("recu"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_upload_response_parsing() {
        // アップロードレスポンスのデシリアライゼーションテスト
        let json = r#"{
            "success": true,
            "fileUrl": "https://localhost:3456/images/test.jpg",
            "fileName": "test.jpg",
            "key": "1234",
            "uploadedAt": "2024-01-04T10:00:00Z"
        }"#;

        let parsed: UploadReceiptResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.file_url, "https://localhost:3456/images/test.jpg");
        assert_eq!(parsed.file_name, "test.jpg");
        assert_eq!(parsed.key, "1234");
    }

    #[test]
    fn test_list_response_parsing() {
        // 一覧レスポンスのデシリアライゼーションテスト
        let json = r#"{
            "success": true,
            "bills": [],
            "count": 0,
            "timestamp": "2024-01-04T10:00:00Z"
        }"#;

        let parsed: ListBillsResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.bills.is_empty());
        assert_eq!(parsed.count, 0);
    }

    #[test]
    fn test_http_store_creation() {
        // 既定設定でストアを作成できることを確認
        let store = HttpBillsStore::with_config(ApiClientConfig::default(), None);
        assert!(store.is_ok());
    }
}
