use crate::adapters::storage::LocalStorage;
use crate::domain::ports::{DatasetSource, Storage};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Dataset file read through the `Storage` port.
pub struct FileDataset<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> FileDataset<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> DatasetSource for FileDataset<S> {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading dataset file: {}", self.path);
        self.storage.read_file(&self.path).await
    }

    fn describe(&self) -> String {
        format!("file '{}'", self.path)
    }
}

/// Dataset downloaded over HTTP, e.g. the upstream world universities JSON.
pub struct HttpDataset {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpDataset {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDataset {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Downloading dataset from: {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        tracing::debug!("Dataset response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DirectoryError::dataset(format!(
                "GET {} returned {}",
                self.url,
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        format!("url '{}'", self.url)
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// 依設定選擇資料來源：http(s) 開頭走下載，其餘視為 data_dir 下的檔案
pub fn from_source(source: &str, data_dir: &str, timeout: Duration) -> Box<dyn DatasetSource> {
    if is_remote(source) {
        Box::new(HttpDataset::new(source, timeout))
    } else {
        Box::new(FileDataset::new(LocalStorage::new(data_dir), source))
    }
}
