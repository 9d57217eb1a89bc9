use serde::{Deserialize, Serialize};

/// 経費明細（note de frais）データモデル
///
/// ストアに永続化されているレコードをそのまま表す。
/// `date`はISO形式（YYYY-MM-DD）、`status`はストア上の正規値
/// （pending / accepted / refused）を保持する。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: i64,
    pub vat: String,
    pub pct: i64,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    pub status: String,
    #[serde(rename = "commentAdmin")]
    pub comment_admin: Option<String>,
}

/// 表示用の経費明細
///
/// `date`と`status`が表示用文字列に置き換えられている点以外はBillと同じ。
/// 描画のためだけに導出され、ストアへ送り返されることはない。
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DisplayBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: i64,
    pub vat: String,
    pub pct: i64,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    pub status: String,
    #[serde(rename = "commentAdmin")]
    pub comment_admin: Option<String>,
}

/// 明細の作成・更新用ペイロード
///
/// `id`はストアが採番するため含まない。このクレートが生成するペイロードの
/// `status`は常に"pending"になる。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BillPayload {
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: i64,
    pub vat: String,
    pub pct: i64,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    pub status: String,
}

/// 添付領収書のモーダルプレビュー情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptPreview {
    /// 領収書画像のURL
    pub file_url: String,
    /// プレビュー画像の表示幅（モーダル幅の半分）
    pub img_width: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_deserialization() {
        // ストアが返すcamelCase形式のJSONを解析できることを確認
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "email": "a@a",
            "type": "Hôtel et logement",
            "name": "encore",
            "date": "2004-04-04",
            "amount": 400,
            "vat": "80",
            "pct": 20,
            "commentary": "séminaire billed",
            "fileUrl": "https://test.storage.tld/justificatif.jpg",
            "fileName": "justificatif.jpg",
            "status": "pending",
            "commentAdmin": "ok"
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.id, "47qAXb6fIm2zOKkLzMro");
        assert_eq!(bill.bill_type, "Hôtel et logement");
        assert_eq!(bill.amount, 400);
        assert_eq!(bill.file_url.as_deref(), Some("https://test.storage.tld/justificatif.jpg"));
        assert_eq!(bill.status, "pending");
    }

    #[test]
    fn test_bill_without_optional_fields() {
        // 任意項目が無いレコードも解析できる
        let json = r#"{
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "email": "a@a",
            "type": "Transports",
            "name": "test1",
            "date": "2001-01-01",
            "amount": 100,
            "vat": "",
            "pct": 20,
            "status": "refused"
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.commentary, None);
        assert_eq!(bill.file_url, None);
        assert_eq!(bill.file_name, None);
        assert_eq!(bill.comment_admin, None);
    }

    #[test]
    fn test_bill_payload_serialization() {
        // 送信ペイロードがcamelCaseで書き出されることを確認
        let payload = BillPayload {
            email: "employee@test.tld".to_string(),
            bill_type: "IT et électronique".to_string(),
            name: "Note de frais".to_string(),
            date: "2024-01-04".to_string(),
            amount: 300,
            vat: "60".to_string(),
            pct: 20,
            commentary: None,
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("imageNoteDeFrais.jpg".to_string()),
            status: "pending".to_string(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"IT et électronique\""));
        assert!(json.contains("\"fileUrl\":\"https://localhost:3456/images/test.jpg\""));
        assert!(json.contains("\"fileName\":\"imageNoteDeFrais.jpg\""));
        assert!(json.contains("\"status\":\"pending\""));
    }
}
