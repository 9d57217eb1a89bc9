use serde::{Deserialize, Serialize};

/// 新規明細フォームの入力値
///
/// 画面から受け取った時点の生の文字列を保持する。
/// 数値項目の解析は送信時に行われる。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBillForm {
    pub expense_type: String,
    pub expense_name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// アップロード済み領収書の参照情報
///
/// アップロード時にストアが作成した下書きレコードの識別子と、
/// 保存済みファイルの参照を保持する。送信時に再利用される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedReceipt {
    pub bill_id: String,
    pub file_url: String,
    pub file_name: String,
}

/// 下書きのファイル選択状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftFile {
    /// ファイル未選択
    Empty,
    /// 拡張子チェックを通過し、アップロードが完了している
    Validated(StagedReceipt),
    /// 拡張子チェックで拒否された
    ///
    /// 以前に受け付けられたファイルの参照は上書きせず保持する。
    Rejected {
        message: String,
        previous: Option<StagedReceipt>,
    },
}

/// 作成中の明細下書き
///
/// 不変の値オブジェクトとして扱い、各操作は書き換えの代わりに
/// 新しい下書きを返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub file: DraftFile,
}

impl Draft {
    /// ファイル未選択の下書きを作成する
    pub fn new() -> Self {
        Self {
            file: DraftFile::Empty,
        }
    }

    /// 利用可能なアップロード済み領収書の参照を返す
    ///
    /// 拒否状態の場合も、直前に受け付けられたファイルがあればそれを返す。
    pub fn staged(&self) -> Option<&StagedReceipt> {
        match &self.file {
            DraftFile::Validated(receipt) => Some(receipt),
            DraftFile::Rejected { previous, .. } => previous.as_ref(),
            DraftFile::Empty => None,
        }
    }

    /// ユーザーへ表示するバリデーションメッセージを返す
    pub fn validation_message(&self) -> Option<&str> {
        match &self.file {
            DraftFile::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}
