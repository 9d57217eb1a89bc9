/// 新規明細機能モジュール
///
/// このモジュールは新規明細の作成に関連する機能を提供します：
/// - 下書きのファイル選択状態の管理
/// - 領収書ファイルの受け付けとアップロード
/// - フォーム入力値からの明細組み立てと送信
// サブモジュールの宣言
pub mod models;
pub mod service;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{Draft, DraftFile, NewBillForm, StagedReceipt};

// サービス
pub use service::NewBillService;
