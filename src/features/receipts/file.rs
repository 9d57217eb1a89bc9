use crate::shared::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// 選択された領収書ファイルを読み込む
///
/// 画面シェルから渡されたパスを開き、アップロードに必要な
/// ファイル名と内容を取り出す。
///
/// # 引数
/// * `path` - 選択されたファイルのパス
///
/// # 戻り値
/// ファイル名と内容のバイト列、または失敗時はエラー
pub fn read_receipt_file(path: &Path) -> AppResult<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::validation("Le nom du fichier est illisible"))?
        .to_string();

    let data = fs::read(path)?;
    Ok((file_name, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_receipt_file() {
        // 一時ファイルの名前と内容が正しく読み込まれることを確認
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recu.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"contenu du justificatif").unwrap();

        let (file_name, data) = read_receipt_file(&path).unwrap();
        assert_eq!(file_name, "recu.png");
        assert_eq!(data, b"contenu du justificatif");
    }

    #[test]
    fn test_read_receipt_file_missing() {
        // 存在しないパスはI/Oエラーになる
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");

        let result = read_receipt_file(&path);
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }
}
