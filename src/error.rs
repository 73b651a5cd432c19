use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("ZIP読み込みエラー: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析エラー: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("不正なセル参照: {0}")]
    InvalidCellReference(String),

    #[error("別のワークブックを取り込み中です")]
    IngestInProgress,

    #[error("データが読み込まれていません。`nutrition-tracker load <FILE>` で取り込んでください")]
    NoData,

    #[error("ストレージエラー: {0}")]
    Storage(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] nutrition_common::Error),
}

impl From<calamine::XlsxError> for TrackerError {
    fn from(e: calamine::XlsxError) -> Self {
        TrackerError::Workbook(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
