//! ターゲットレジストリ
//!
//! 監視対象URLの順序付きリスト。起動時に一度だけ読み込み、以後は読み取り専用。
//! 先頭（index 0）がプライマリ、残りがクロスチェック用のフォールバック。

use crate::common::error::MonitorError;
use reqwest::Url;
use std::path::Path;
use tracing::{debug, info};

/// 監視対象URLリスト
///
/// 空のリストは構築できない（`primary()`は常に値を返す）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
    urls: Vec<String>,
}

impl TargetList {
    /// URLのリストから構築する
    pub fn new(urls: Vec<String>) -> Option<Self> {
        if urls.is_empty() {
            None
        } else {
            Some(Self { urls })
        }
    }

    /// ターゲットファイルを読み込む
    ///
    /// 1行1URL。空行と`#`で始まる行は無視する。
    /// 読み込み失敗・不正なURL・ターゲットなしはいずれも起動時エラー。
    pub fn load(path: &Path) -> Result<Self, MonitorError> {
        let content = std::fs::read_to_string(path).map_err(|source| MonitorError::TargetFile {
            path: path.to_path_buf(),
            source,
        })?;

        let urls = parse_targets(&content)?;
        let list =
            Self::new(urls).ok_or_else(|| MonitorError::EmptyTargetList(path.to_path_buf()))?;

        info!(
            path = %path.display(),
            count = list.len(),
            primary = %list.primary(),
            "Target list loaded"
        );
        Ok(list)
    }

    /// プライマリターゲット
    pub fn primary(&self) -> &str {
        &self.urls[0]
    }

    /// フォールバックターゲット（プライマリ以外）
    pub fn fallbacks(&self) -> &[String] {
        &self.urls[1..]
    }

    /// ターゲット総数
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// 全ターゲット（読み込み順）
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

/// ファイル内容をURLリストに変換
fn parse_targets(content: &str) -> Result<Vec<String>, MonitorError> {
    let mut urls = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let valid = Url::parse(line)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !valid {
            return Err(MonitorError::InvalidTarget {
                line: idx + 1,
                url: line.to_string(),
            });
        }

        debug!(url = %line, "Target registered");
        urls.push(line.to_string());
    }

    Ok(urls)
}
