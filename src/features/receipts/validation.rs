/// 領収書として受け付けるファイル拡張子
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 拡張子が受け付けられない場合にユーザーへ表示するメッセージ
pub const EXTENSION_ERROR_MESSAGE: &str = "Formats acceptés : jpg, jpeg et png";

/// ファイル名から拡張子を取り出す
///
/// 比較は大文字小文字を区別しないため、小文字化した値を返す。
/// 拡張子が無いファイル名はNoneになる。
pub fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// 領収書として受け付け可能なファイル名かどうかを判定する
///
/// # 引数
/// * `file_name` - 選択されたファイル名
///
/// # 戻り値
/// 受け付け可能な場合はtrue
pub fn is_accepted_file(file_name: &str) -> bool {
    match file_extension(file_name) {
        Some(extension) => ACCEPTED_EXTENSIONS.contains(&extension.as_str()),
        None => false,
    }
}
