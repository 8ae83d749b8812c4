// src/downloader/mod.rs

mod assets;

pub use assets::Asset;

use crate::{
    client::RobustClient,
    error::{AppError, AppResult},
};
use anyhow::anyhow;
use futures::{Stream, StreamExt};
use log::{debug, error, info, warn};
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};

/// 下载任务的生命周期: Idle -> InProgress -> {Succeeded, Failed, Cancelled}
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadState {
    Idle,
    InProgress,
    Succeeded,
    Failed,
    Cancelled,
}

impl DownloadState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadState::Succeeded | DownloadState::Failed | DownloadState::Cancelled
        )
    }
}

/// 下载过程中发出的事件。`Done`、`Failed`、`Cancelled` 三者恰好出现一个，且总是最后一个。
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DownloadEvent {
    /// 响应头中的 Content-Length，缺失时为 None
    TotalKnown(Option<u64>),
    /// 目前为止已写入的字节数
    Progress(u64),
    Done,
    Failed(String),
    Cancelled,
}

impl DownloadEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadEvent::Done | DownloadEvent::Failed(_) | DownloadEvent::Cancelled
        )
    }
}

#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub source_url: String,
    pub destination: PathBuf,
    pub total_bytes: Option<u64>,
    pub bytes_transferred: u64,
    pub state: DownloadState,
}

impl DownloadTask {
    fn new(source_url: &str, destination: &Path) -> Self {
        Self {
            source_url: source_url.to_string(),
            destination: destination.to_path_buf(),
            total_bytes: None,
            bytes_transferred: 0,
            state: DownloadState::Idle,
        }
    }

    fn failure(&self, reason: impl ToString) -> AppError {
        AppError::DownloadFailed {
            path: self.destination.clone(),
            offset: self.bytes_transferred,
            reason: reason.to_string(),
        }
    }
}

/// 正在进行的下载。事件通过 `next_event` 读取，结果通过 `wait` 取得。
pub struct DownloadHandle {
    events: UnboundedReceiver<DownloadEvent>,
    cancellation_token: Arc<AtomicBool>,
    task: JoinHandle<AppResult<DownloadTask>>,
}

impl DownloadHandle {
    pub async fn next_event(&mut self) -> Option<DownloadEvent> {
        self.events.recv().await
    }

    /// 请求取消，下一次读取数据前生效
    pub fn cancel(&self) {
        self.cancellation_token.store(true, Ordering::Relaxed);
    }

    pub fn cancellation_token(&self) -> Arc<AtomicBool> {
        self.cancellation_token.clone()
    }

    pub async fn wait(self) -> AppResult<DownloadTask> {
        self.task
            .await
            .map_err(|e| AppError::Other(anyhow!("下载任务异常退出: {}", e)))?
    }
}

/// 按固定大小的分块把远程资源追加写入本地文件。
///
/// 每个实例之间不共享任何可变状态，可以同时向不同的目标路径下载。
#[derive(Clone)]
pub struct ChunkedDownloader {
    http_client: Arc<RobustClient>,
    chunk_size: usize,
}

impl ChunkedDownloader {
    pub fn new(http_client: Arc<RobustClient>, chunk_size: usize) -> Self {
        Self {
            http_client,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn start(&self, url: &str, destination: &Path) -> DownloadHandle {
        self.start_with_cancellation(url, destination, Arc::new(AtomicBool::new(false)))
    }

    /// 与 `start` 相同，但使用外部的取消标记（例如 Ctrl+C 处理器持有的那个）
    pub fn start_with_cancellation(
        &self,
        url: &str,
        destination: &Path,
        cancellation_token: Arc<AtomicBool>,
    ) -> DownloadHandle {
        let (tx, rx) = unbounded_channel();
        let downloader = self.clone();
        let url = url.to_string();
        let destination = destination.to_path_buf();
        let token = cancellation_token.clone();
        let task =
            tokio::spawn(async move { downloader.run(&url, &destination, &tx, &token).await });
        DownloadHandle {
            events: rx,
            cancellation_token,
            task,
        }
    }

    /// 在当前任务中执行下载。出错时先发出 `Failed` 事件，再返回错误；已写入的部分文件保留。
    pub async fn run(
        &self,
        url: &str,
        destination: &Path,
        events: &UnboundedSender<DownloadEvent>,
        cancellation_token: &AtomicBool,
    ) -> AppResult<DownloadTask> {
        let mut task = DownloadTask::new(url, destination);
        task.state = DownloadState::InProgress;
        info!("开始下载 {} -> {}", url, destination.display());

        match self.transfer(&mut task, events, cancellation_token).await {
            Ok(state) => {
                task.state = state;
                let event = if state == DownloadState::Cancelled {
                    warn!(
                        "下载 {} 已取消，已写入 {} 字节",
                        destination.display(),
                        task.bytes_transferred
                    );
                    DownloadEvent::Cancelled
                } else {
                    info!("下载完成: {} ({} 字节)", destination.display(), task.bytes_transferred);
                    DownloadEvent::Done
                };
                // 接收端可能已被丢弃，事件丢失不影响下载结果
                let _ = events.send(event);
                Ok(task)
            }
            Err(e) => {
                task.state = DownloadState::Failed;
                error!("下载 {} 失败: {}", url, e);
                let _ = events.send(DownloadEvent::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn transfer(
        &self,
        task: &mut DownloadTask,
        events: &UnboundedSender<DownloadEvent>,
        cancellation_token: &AtomicBool,
    ) -> AppResult<DownloadState> {
        let res = self
            .http_client
            .get(task.source_url.as_str())
            .await
            .map_err(|e| task.failure(e))?;

        task.total_bytes = res.content_length();
        debug!("Content-Length: {:?}", task.total_bytes);
        let _ = events.send(DownloadEvent::TotalKnown(task.total_bytes));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&task.destination)
            .await
            .map_err(|e| task.failure(e))?;

        let stream = res.bytes_stream();
        pump(stream, &mut file, self.chunk_size, task, events, cancellation_token).await
    }
}

/// 把数据流切成 `chunk_size` 大小的分块依次写入。
///
/// 取消时先写出缓冲区中已收到但不足一个分块的数据，文件内容与已接收的数据一致。
async fn pump<S, B, E>(
    mut stream: S,
    file: &mut File,
    chunk_size: usize,
    task: &mut DownloadTask,
    events: &UnboundedSender<DownloadEvent>,
    cancellation_token: &AtomicBool,
) -> AppResult<DownloadState>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let mut pending: Vec<u8> = Vec::with_capacity(chunk_size * 2);
    let state = loop {
        if cancellation_token.load(Ordering::Relaxed) {
            break DownloadState::Cancelled;
        }
        let Some(chunk_result) = stream.next().await else {
            break DownloadState::Succeeded;
        };
        let bytes = chunk_result.map_err(|e| task.failure(e))?;
        pending.extend_from_slice(bytes.as_ref());

        while pending.len() >= chunk_size {
            let chunk: Vec<u8> = pending.drain(..chunk_size).collect();
            write_chunk(file, &chunk, task, events).await?;
        }
    };

    // 最后一个分块可能不足 chunk_size，按实际字节数计入进度
    if !pending.is_empty() {
        write_chunk(file, &pending, task, events).await?;
    }
    file.flush().await.map_err(|e| task.failure(e))?;
    Ok(state)
}

async fn write_chunk(
    file: &mut File,
    chunk: &[u8],
    task: &mut DownloadTask,
    events: &UnboundedSender<DownloadEvent>,
) -> AppResult<()> {
    file.write_all(chunk).await.map_err(|e| task.failure(e))?;
    task.bytes_transferred += chunk.len() as u64;
    let _ = events.send(DownloadEvent::Progress(task.bytes_transferred));
    Ok(())
}
