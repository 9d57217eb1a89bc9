use crate::features::bills::format::{format_date, format_status};
use crate::features::bills::models::{Bill, DisplayBill, ReceiptPreview};
use crate::shared::errors::AppResult;
use crate::shared::store::BillsStore;
use log::{info, warn};
use std::sync::Arc;

/// 経費明細一覧サービス
///
/// ストアから明細を取得し、表示用に整形した一覧を提供する。
pub struct BillListService<S: BillsStore> {
    store: Arc<S>,
}

impl<S: BillsStore> BillListService<S> {
    /// 新しい一覧サービスを作成する
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 明細一覧を取得し、表示用に整形する
    ///
    /// ストアの返却順を保持する。1件の整形失敗で一覧全体を失わないため、
    /// 日付の整形に失敗したレコードは元の日付文字列のまま一覧に残す。
    /// ストア呼び出し自体の失敗はそのままエラーとして返す。
    ///
    /// # 戻り値
    /// 表示用の明細一覧、またはストア失敗時はエラー
    pub async fn get_bills(&self) -> AppResult<Vec<DisplayBill>> {
        let bills = self.store.list().await?;

        info!("明細一覧取得成功: count={}", bills.len());
        Ok(bills.iter().map(to_display).collect())
    }
}

/// 1件の明細を表示用に変換する
fn to_display(bill: &Bill) -> DisplayBill {
    let date = match format_date(&bill.date) {
        Ok(formatted) => formatted,
        Err(e) => {
            // 破損した日付は元の文字列のまま表示に回す
            warn!(
                "日付の整形に失敗しました: id={}, date={}, error={e}",
                bill.id, bill.date
            );
            bill.date.clone()
        }
    };

    DisplayBill {
        id: bill.id.clone(),
        email: bill.email.clone(),
        bill_type: bill.bill_type.clone(),
        name: bill.name.clone(),
        date,
        amount: bill.amount,
        vat: bill.vat.clone(),
        pct: bill.pct,
        commentary: bill.commentary.clone(),
        file_url: bill.file_url.clone(),
        file_name: bill.file_name.clone(),
        status: format_status(&bill.status),
        comment_admin: bill.comment_admin.clone(),
    }
}

/// 表示用一覧を日付の降順（新しい順）に並べ替える
///
/// 表示層の都合による並べ替えで、日付文字列の単純な辞書順比較を使う。
pub fn sort_by_date_desc(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// 添付領収書のモーダルプレビュー情報を生成する
///
/// # 引数
/// * `bill` - 対象の明細
/// * `modal_width` - モーダルの表示幅
///
/// # 戻り値
/// プレビュー情報、または添付ファイルが無い場合はNone
pub fn receipt_preview(bill: &DisplayBill, modal_width: u32) -> Option<ReceiptPreview> {
    bill.file_url.as_ref().map(|url| ReceiptPreview {
        file_url: url.clone(),
        img_width: modal_width / 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::models::BillPayload;
    use crate::shared::errors::{AppError, AppResult};
    use crate::shared::store::ReceiptUpload;
    use async_trait::async_trait;

    /// テスト用モックストア
    struct MockStore {
        bills: Vec<Bill>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl BillsStore for MockStore {
        async fn list(&self) -> AppResult<Vec<Bill>> {
            if let Some(message) = &self.fail_with {
                return Err(AppError::ExternalService(message.clone()));
            }
            Ok(self.bills.clone())
        }

        async fn create(&self, _payload: &BillPayload) -> AppResult<Bill> {
            unimplemented!("一覧テストでは使用しない")
        }

        async fn update(&self, _id: &str, _payload: &BillPayload) -> AppResult<Bill> {
            unimplemented!("一覧テストでは使用しない")
        }

        async fn upload_receipt(
            &self,
            _email: &str,
            _file_name: &str,
            _data: Vec<u8>,
        ) -> AppResult<ReceiptUpload> {
            unimplemented!("一覧テストでは使用しない")
        }
    }

    fn bill(id: &str, date: &str, status: &str, bill_type: &str, amount: i64) -> Bill {
        Bill {
            id: id.to_string(),
            email: "a@a".to_string(),
            bill_type: bill_type.to_string(),
            name: format!("note {id}"),
            date: date.to_string(),
            amount,
            vat: "80".to_string(),
            pct: 20,
            commentary: None,
            file_url: Some(format!("https://test.storage.tld/{id}.jpg")),
            file_name: Some(format!("{id}.jpg")),
            status: status.to_string(),
            comment_admin: None,
        }
    }

    /// 4件の代表的な明細（全ステータスを含む）
    fn fixture_bills() -> Vec<Bill> {
        vec![
            bill("47qAXb6fIm2zOKkLzMro", "2004-04-04", "pending", "Hôtel et logement", 400),
            bill("BeKy5Mo4jkmdfPGYpTxZ", "2001-01-01", "refused", "Transports", 100),
            bill("UIUZtnPQvnbFnB0ozvJh", "2003-03-03", "accepted", "Services en ligne", 300),
            bill("qcCK3SzECmaZAGRrHjaC", "2002-02-02", "refused", "Restaurants et bars", 200),
        ]
    }

    fn service(store: MockStore) -> BillListService<MockStore> {
        BillListService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_get_bills_formats_four_records() {
        // ストアが4件返すと表示用も4件、順序は保持される
        let service = service(MockStore {
            bills: fixture_bills(),
            fail_with: None,
        });

        let bills = service.get_bills().await.unwrap();
        assert_eq!(bills.len(), 4);
        assert_eq!(bills[0].id, "47qAXb6fIm2zOKkLzMro");
        assert_eq!(bills[0].date, "4 Avr. 04");
        assert_eq!(bills[0].status, "En attente");
        assert_eq!(bills[1].date, "1 Jan. 01");
        assert_eq!(bills[1].status, "Refused");
        assert_eq!(bills[2].date, "3 Mar. 03");
        assert_eq!(bills[2].status, "Accepté");
        assert_eq!(bills[3].date, "2 Fév. 02");
    }

    #[tokio::test]
    async fn test_get_bills_keeps_raw_date_on_corrupt_record() {
        // 破損した日付のレコードも一覧から落とさず、元の文字列を保持する
        let mut bills = fixture_bills();
        bills[1].date = "donnée corrompue".to_string();

        let service = service(MockStore {
            bills,
            fail_with: None,
        });

        let display = service.get_bills().await.unwrap();
        assert_eq!(display.len(), 4);
        assert_eq!(display[1].date, "donnée corrompue");
        // ステータスの整形は引き続き適用される
        assert_eq!(display[1].status, "Refused");
    }

    #[tokio::test]
    async fn test_get_bills_unknown_status_passthrough() {
        // 未知のステータス値はそのまま表示に回す
        let mut bills = fixture_bills();
        bills[0].status = "archived".to_string();

        let service = service(MockStore {
            bills,
            fail_with: None,
        });

        let display = service.get_bills().await.unwrap();
        assert_eq!(display[0].status, "archived");
    }

    #[tokio::test]
    async fn test_get_bills_is_idempotent() {
        // ストアに変更がなければ2回の呼び出しは同一内容・同一順序を返す
        let service = service(MockStore {
            bills: fixture_bills(),
            fail_with: None,
        });

        let first = service.get_bills().await.unwrap();
        let second = service.get_bills().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_bills_store_failure_propagates() {
        // ストア失敗時は部分的な一覧を返さず、エラーをそのまま伝える
        let service = service(MockStore {
            bills: vec![],
            fail_with: Some("Erreur 404".to_string()),
        });

        let result = service.get_bills().await;
        let error = result.unwrap_err();
        assert!(error.to_string().contains("Erreur 404"));
    }

    #[tokio::test]
    async fn test_get_bills_empty_list() {
        // 空の一覧はエラーではない
        let service = service(MockStore {
            bills: vec![],
            fail_with: None,
        });

        let bills = service.get_bills().await.unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn test_sort_by_date_desc() {
        // 表示用一覧は日付文字列の辞書順降順で並べ替えられる
        let service = service(MockStore {
            bills: fixture_bills(),
            fail_with: None,
        });

        let mut bills = service.get_bills().await.unwrap();
        sort_by_date_desc(&mut bills);

        let dates: Vec<&str> = bills.iter().map(|b| b.date.as_str()).collect();
        let mut expected = dates.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, expected);
        assert_eq!(dates[0], "4 Avr. 04");
    }

    #[test]
    fn test_receipt_preview_with_file() {
        // 添付ファイルがあればモーダル幅の半分でプレビューを生成する
        let bill = to_display(&bill("id1", "2004-04-04", "pending", "Transports", 100));
        let preview = receipt_preview(&bill, 800).unwrap();
        assert_eq!(preview.file_url, "https://test.storage.tld/id1.jpg");
        assert_eq!(preview.img_width, 400);

        // 奇数幅は切り捨てる
        let preview = receipt_preview(&bill, 801).unwrap();
        assert_eq!(preview.img_width, 400);
    }

    #[test]
    fn test_receipt_preview_without_file() {
        // 添付ファイルが無い明細はプレビューを生成しない
        let mut raw = bill("id1", "2004-04-04", "pending", "Transports", 100);
        raw.file_url = None;
        raw.file_name = None;

        let display = to_display(&raw);
        assert!(receipt_preview(&display, 800).is_none());
    }
}
