//! 名前の正規化
//!
//! 小文字化と前後の空白除去のみ行う。Unicode正規化や記号除去はしない。

/// 料理名・レシピ名を比較用に正規化
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
