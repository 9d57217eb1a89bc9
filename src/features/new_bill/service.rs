use crate::features::bills::models::BillPayload;
use crate::features::new_bill::models::{Draft, DraftFile, NewBillForm, StagedReceipt};
use crate::features::receipts::validation::{is_accepted_file, EXTENSION_ERROR_MESSAGE};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::routes::Route;
use crate::shared::session::SessionUser;
use crate::shared::store::BillsStore;
use log::{info, warn};
use std::sync::Arc;

/// VATパーセンテージの既定値（未入力・解析不能時に使用）
const DEFAULT_PCT: i64 = 20;

/// 新規明細サービス
///
/// 下書きのファイル受け付けと、明細の組み立て・送信を行う。
pub struct NewBillService<S: BillsStore> {
    store: Arc<S>,
    session: SessionUser,
}

impl<S: BillsStore> NewBillService<S> {
    /// 新しいサービスを作成する
    ///
    /// # 引数
    /// * `store` - 明細ストア
    /// * `session` - ログイン中ユーザーのセッション情報
    pub fn new(store: Arc<S>, session: SessionUser) -> Self {
        Self { store, session }
    }

    /// ファイル選択イベントを処理する
    ///
    /// 拡張子を検査し、受け付けた場合はストアへアップロードして
    /// 下書きレコードの参照を記録する。拒否した場合はアップロードを
    /// 行わず、バリデーションメッセージ付きの下書きを返す。
    /// 選択のたびに独立して再評価されるため、拒否後に有効なファイルを
    /// 選び直すと拒否状態は解消される。
    ///
    /// # 引数
    /// * `draft` - 現在の下書き
    /// * `file_name` - 選択されたファイル名
    /// * `data` - ファイル内容
    ///
    /// # 戻り値
    /// 新しい下書き、またはアップロード失敗時はエラー
    pub async fn handle_change_file(
        &self,
        draft: &Draft,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<Draft> {
        if !is_accepted_file(file_name) {
            warn!("領収書ファイルの拡張子を拒否しました: file_name={file_name}");
            return Ok(Draft {
                file: DraftFile::Rejected {
                    message: EXTENSION_ERROR_MESSAGE.to_string(),
                    previous: draft.staged().cloned(),
                },
            });
        }

        let upload = self
            .store
            .upload_receipt(&self.session.email, file_name, data)
            .await?;

        info!(
            "領収書アップロード完了: bill_id={}, file_name={}",
            upload.key, upload.file_name
        );

        Ok(Draft {
            file: DraftFile::Validated(StagedReceipt {
                bill_id: upload.key,
                file_url: upload.file_url,
                file_name: upload.file_name,
            }),
        })
    }

    /// フォーム送信イベントを処理する
    ///
    /// フォーム入力値から明細を組み立ててストアへ送信する。
    /// アップロード済みの下書きレコードがあれば更新、無ければ新規作成になる。
    /// 送信成功後は一覧画面への遷移要求を返す。失敗時は下書きに手を
    /// 加えないため、呼び出し側はそのまま再試行できる。
    ///
    /// # 引数
    /// * `draft` - 現在の下書き
    /// * `form` - フォーム入力値
    ///
    /// # 戻り値
    /// 遷移要求、または失敗時はエラー
    pub async fn handle_submit(&self, draft: &Draft, form: &NewBillForm) -> AppResult<Route> {
        let payload = self.build_payload(draft, form)?;

        match draft.staged() {
            Some(receipt) => {
                self.store.update(&receipt.bill_id, &payload).await?;
            }
            None => {
                self.store.create(&payload).await?;
            }
        }

        info!(
            "明細送信成功: name={}, amount={}",
            payload.name, payload.amount
        );
        Ok(Route::Bills)
    }

    /// フォーム入力値から送信用ペイロードを組み立てる
    ///
    /// statusは常に"pending"で送信される。
    fn build_payload(&self, draft: &Draft, form: &NewBillForm) -> AppResult<BillPayload> {
        let amount: i64 = form.amount.trim().parse().map_err(|_| {
            AppError::validation(format!("Le montant est invalide : {}", form.amount))
        })?;

        // pctは解析できない場合に既定値へフォールバックする
        let pct: i64 = form.pct.trim().parse().unwrap_or(DEFAULT_PCT);

        let (file_url, file_name) = match draft.staged() {
            Some(receipt) => (
                Some(receipt.file_url.clone()),
                Some(receipt.file_name.clone()),
            ),
            None => (None, None),
        };

        Ok(BillPayload {
            email: self.session.email.clone(),
            bill_type: form.expense_type.clone(),
            name: form.expense_name.clone(),
            date: form.date.clone(),
            amount,
            vat: form.vat.clone(),
            pct,
            commentary: if form.commentary.is_empty() {
                None
            } else {
                Some(form.commentary.clone())
            },
            file_url,
            file_name,
            status: "pending".to_string(),
        })
    }
}
