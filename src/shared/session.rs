use serde::{Deserialize, Serialize};

use crate::shared::errors::AppResult;

/// ログイン中ユーザーのセッション情報
///
/// 画面シェルがストレージに保持している値をサービス生成時に明示的に渡す。
/// コアロジック側からストレージを直接参照することはない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// ユーザー種別（従業員は "Employee"）
    #[serde(rename = "type")]
    pub user_type: String,
    /// メールアドレス（明細の所有者として使用される）
    pub email: String,
    /// 接続状態
    pub status: String,
}

impl SessionUser {
    /// ストレージに保存されたJSON文字列からセッション情報を復元する
    ///
    /// # 引数
    /// * `json` - 保存されたセッションJSON
    ///
    /// # 戻り値
    /// セッション情報、または解析失敗時はエラー
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
