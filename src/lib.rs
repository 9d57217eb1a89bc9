//! 経費精算クライアントのコアロジック
//!
//! 明細一覧の取得と表示整形、新規明細の作成（領収書アップロードを含む）を提供する。
//! 画面シェルは各サービスを生成し、ユーザー操作ごとに対応する操作を呼び出す。

pub mod features;
pub mod shared;

pub use shared::errors::{AppError, AppResult};
