/// 機能別モジュール
///
/// アプリケーションの機能を機能別に整理したモジュール群です。
/// 各機能モジュールは、その機能に関連するモデル、整形処理、サービスを含む
/// 自己完結型のユニットです。
// 機能モジュールの宣言
pub mod bills;
pub mod new_bill;
pub mod receipts;
