use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// フランス語の月略称（3文字、先頭大文字）
///
/// juin と juillet はどちらも3文字に切り詰めると "Jui" になる。
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// ISO形式の日付文字列を表示用のフランス語短縮形に整形する
///
/// 例: "2004-04-04" は "4 Avr. 04" になる。
/// 解析できない入力は必ずエラーを返す。呼び出し側はこの失敗を
/// 元の文字列へのフォールバックの契機として利用する。
///
/// # 引数
/// * `date` - ISO形式（YYYY-MM-DD）の日付文字列
///
/// # 戻り値
/// 表示用の日付文字列、または解析失敗時はエラー
pub fn format_date(date: &str) -> AppResult<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| AppError::format_error(format!("日付の解析に失敗しました: {date} ({e})")))?;

    let month = MONTH_ABBREVIATIONS[parsed.month0() as usize];
    Ok(format!(
        "{} {}. {:02}",
        parsed.day(),
        month,
        parsed.year() % 100
    ))
}

/// ストア上のステータス値を表示用ラベルに変換する
///
/// 正規の3値以外はそのまま通す。未知の値で表示を壊さないための契約。
pub fn format_status(status: &str) -> String {
    match status {
        "pending" => "En attente".to_string(),
        "accepted" => "Accepté".to_string(),
        "refused" => "Refused".to_string(),
        other => other.to_string(),
    }
}
