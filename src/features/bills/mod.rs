/// 経費明細一覧機能モジュール
///
/// このモジュールは明細一覧の表示に関連する機能を提供します：
/// - ストアからの明細一覧取得
/// - 日付・ステータスの表示整形（破損レコードへのフォールバックを含む）
/// - 表示用の並べ替え
/// - 添付領収書のモーダルプレビュー
// サブモジュールの宣言
pub mod format;
pub mod models;
pub mod service;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{Bill, BillPayload, DisplayBill, ReceiptPreview};

// サービス
pub use service::{receipt_preview, sort_by_date_desc, BillListService};
